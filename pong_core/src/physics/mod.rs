//! Physics seam.
//!
//! The game loop only talks to [`PhysicsWorld`]. Rendering engines with
//! their own rigid body solver implement it directly; [`ArcadePhysics`]
//! is the built-in solver used headless and in tests.

pub mod arcade;
pub mod contact;

pub use arcade::*;
pub use contact::*;

use glam::Vec2;

use crate::category::BodyMasks;
use crate::layout::Aabb;

/// Stable reference to a body, resolved once when the field is built.
pub type BodyHandle = hecs::Entity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
    /// Horizontal segment centred on the body position.
    HorizontalEdge { length: f32 },
}

impl Shape {
    pub fn bounds(&self, pos: Vec2) -> Aabb {
        match *self {
            Shape::Circle { radius } => Aabb::from_center_size(pos, Vec2::splat(radius * 2.0)),
            Shape::Rect { size } => Aabb::from_center_size(pos, size),
            Shape::HorizontalEdge { length } => Aabb::from_center_size(pos, Vec2::new(length, 0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moved by the solver.
    Dynamic,
    /// Never moved by the solver; may be repositioned by game code.
    Static,
}

/// Everything needed to create a body.
#[derive(Debug, Clone, Copy)]
pub struct BodyDef {
    pub name: &'static str,
    pub kind: BodyKind,
    pub shape: Shape,
    pub position: Vec2,
    pub masks: BodyMasks,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub affected_by_gravity: bool,
    pub allows_rotation: bool,
}

impl BodyDef {
    fn fixed(name: &'static str, shape: Shape, position: Vec2, masks: BodyMasks) -> Self {
        Self {
            name,
            kind: BodyKind::Static,
            shape,
            position,
            masks,
            mass: 0.0,
            restitution: 0.2,
            friction: 0.2,
            linear_damping: 0.1,
            angular_damping: 0.1,
            affected_by_gravity: false,
            allows_rotation: false,
        }
    }

    pub fn paddle(name: &'static str, position: Vec2, size: Vec2) -> Self {
        Self::fixed(name, Shape::Rect { size }, position, BodyMasks::paddle())
    }

    pub fn wall(name: &'static str, y: f32, length: f32) -> Self {
        Self::fixed(
            name,
            Shape::HorizontalEdge { length },
            Vec2::new(0.0, y),
            BodyMasks::wall(),
        )
    }

    pub fn board(bounds: Aabb) -> Self {
        Self::fixed(
            "board",
            Shape::Rect { size: bounds.size() },
            bounds.center(),
            BodyMasks::board(),
        )
    }

    /// Frictionless, undamped, perfectly elastic and non-rotating.
    pub fn ball(position: Vec2, radius: f32, mass: f32, restitution: f32) -> Self {
        Self {
            name: "ball",
            kind: BodyKind::Dynamic,
            shape: Shape::Circle { radius },
            position,
            masks: BodyMasks::ball(),
            mass,
            restitution,
            friction: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            affected_by_gravity: true,
            allows_rotation: false,
        }
    }
}

/// Rigid body simulation consumed by the game loop.
///
/// Queries on an unknown handle return `None` and mutations are ignored, so
/// a missing body degrades to a no-op.
pub trait PhysicsWorld {
    fn create_body(&mut self, def: BodyDef) -> BodyHandle;

    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    fn set_position(&mut self, body: BodyHandle, position: Vec2);

    fn velocity(&self, body: BodyHandle) -> Option<Vec2>;

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2);

    fn angular_velocity(&self, body: BodyHandle) -> Option<f32>;

    fn set_angular_velocity(&mut self, body: BodyHandle, angular: f32);

    /// Instantaneous change of momentum.
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2);

    fn bounding_box(&self, body: BodyHandle) -> Option<Aabb>;

    /// Advance the simulation, pushing contact notifications in the order
    /// they happened.
    fn step(&mut self, dt: f32, contacts: &mut ContactQueue);
}
