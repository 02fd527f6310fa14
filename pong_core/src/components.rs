use glam::Vec2;

use crate::category::BodyMasks;
use crate::physics::{BodyDef, BodyKind, Shape};

/// Debug name carried by every body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name(pub &'static str);

/// Position and heading of a body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub pos: Vec2,
    pub rotation: f32,
}

impl Transform {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, rotation: 0.0 }
    }
}

/// Linear and angular velocity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub linear: Vec2,
    pub angular: f32,
}

/// Shape plus the three category masks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub masks: BodyMasks,
}

/// Surface and mass response of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub affected_by_gravity: bool,
    pub allows_rotation: bool,
}

impl Material {
    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }
}

/// Split a body definition into the component bundle stored in the world.
pub fn body_components(
    def: &BodyDef,
) -> (Name, BodyKind, Transform, Velocity, Collider, Material) {
    (
        Name(def.name),
        def.kind,
        Transform::new(def.position),
        Velocity::default(),
        Collider {
            shape: def.shape,
            masks: def.masks,
        },
        Material {
            mass: def.mass,
            restitution: def.restitution,
            friction: def.friction,
            linear_damping: def.linear_damping,
            angular_damping: def.angular_damping,
            affected_by_gravity: def.affected_by_gravity,
            allows_rotation: def.allows_rotation,
        },
    )
}
