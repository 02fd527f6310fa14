use glam::Vec2;
use hecs::{Entity, World};
use tracing::trace;

use super::{BodyDef, BodyHandle, BodyKind, ContactEvent, ContactPhase, ContactQueue, PhysicsWorld, Shape};
use crate::components::{body_components, Collider, Material, Name, Transform, Velocity};
use crate::layout::Aabb;
use crate::params::Params;

/// Snapshot of a body used while resolving one sub-step.
#[derive(Debug, Clone, Copy)]
struct BodySnapshot {
    entity: Entity,
    kind: BodyKind,
    pos: Vec2,
    collider: Collider,
}

/// Small deterministic solver for circles against rectangles and edges.
///
/// Only circles are integrated; every other dynamic shape keeps its
/// velocity but is not resolved against colliders.
pub struct ArcadePhysics {
    world: World,
    gravity: Vec2,
    touching: Vec<(Entity, Entity)>,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl ArcadePhysics {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            world: World::new(),
            gravity,
            touching: Vec::new(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.world.len() as usize
    }

    pub fn name(&self, body: BodyHandle) -> Option<&'static str> {
        self.world.get::<&Name>(body).ok().map(|name| name.0)
    }

    fn snapshot(&self) -> Vec<BodySnapshot> {
        let mut bodies: Vec<BodySnapshot> = self
            .world
            .query::<(&BodyKind, &Transform, &Collider)>()
            .iter()
            .map(|(entity, (kind, transform, collider))| BodySnapshot {
                entity,
                kind: *kind,
                pos: transform.pos,
                collider: *collider,
            })
            .collect();
        // Deterministic order regardless of archetype layout
        bodies.sort_by_key(|b| b.entity.id());
        bodies
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        for (_entity, (kind, transform, velocity, material)) in
            self.world
                .query_mut::<(&BodyKind, &mut Transform, &mut Velocity, &Material)>()
        {
            if *kind != BodyKind::Dynamic {
                continue;
            }
            if material.affected_by_gravity {
                velocity.linear += gravity * dt;
            }
            velocity.linear /= 1.0 + material.linear_damping * dt;
            transform.pos += velocity.linear * dt;

            if material.allows_rotation {
                velocity.angular /= 1.0 + material.angular_damping * dt;
                transform.rotation += velocity.angular * dt;
            } else {
                velocity.angular = 0.0;
            }
        }
    }

    /// `before` holds positions from the start of the sub-step, so a circle
    /// that crossed a surface is pushed back out on the side it came from.
    fn resolve_collisions(&mut self, before: &[BodySnapshot], bodies: &[BodySnapshot]) {
        for (entity, (kind, transform, velocity, collider, material)) in self.world.query_mut::<(
            &BodyKind,
            &mut Transform,
            &mut Velocity,
            &Collider,
            &Material,
        )>() {
            if *kind != BodyKind::Dynamic {
                continue;
            }
            let Shape::Circle { radius } = collider.shape else {
                continue;
            };
            let previous = before
                .iter()
                .find(|b| b.entity == entity)
                .map_or(transform.pos, |b| b.pos);

            for other in bodies {
                if other.entity == entity || !collider.masks.collides(&other.collider.masks) {
                    continue;
                }
                let Some((push, n)) = circle_push_out(previous, transform.pos, radius, other) else {
                    continue;
                };
                transform.pos += push;

                let vn = velocity.linear.dot(n);
                if vn < 0.0 {
                    let normal_part = n * vn;
                    let tangent_part = velocity.linear - normal_part;
                    velocity.linear = tangent_part * (1.0 - material.friction.clamp(0.0, 1.0))
                        - normal_part * material.restitution;
                }
            }
        }
    }

    fn detect_contacts(&mut self, bodies: &[BodySnapshot], contacts: &mut ContactQueue) {
        let mut now_touching = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                if a.kind != BodyKind::Dynamic && b.kind != BodyKind::Dynamic {
                    continue;
                }
                if !a.collider.masks.reports_contact(&b.collider.masks) {
                    continue;
                }

                let pair = (a.entity, b.entity);
                let overlapping = shapes_overlap(a, b);
                let was_touching = self.touching.contains(&pair);

                let phase = match (was_touching, overlapping) {
                    (false, true) => Some(ContactPhase::Begin),
                    (true, false) => Some(ContactPhase::End),
                    _ => None,
                };
                if overlapping {
                    now_touching.push(pair);
                }
                if let Some(phase) = phase {
                    let event = ContactEvent::new(
                        a.collider.masks.category,
                        b.collider.masks.category,
                        contact_point(a, b).x,
                        phase,
                    );
                    trace!(
                        a = self.name(a.entity).unwrap_or("?"),
                        b = self.name(b.entity).unwrap_or("?"),
                        ?event,
                        "contact"
                    );
                    contacts.push(event);
                }
            }
        }

        self.touching = now_touching;
    }

    fn sub_step(&mut self, dt: f32, contacts: &mut ContactQueue) {
        let before = self.snapshot();
        self.integrate(dt);
        let bodies = self.snapshot();
        self.resolve_collisions(&before, &bodies);
        let bodies = self.snapshot();
        self.detect_contacts(&bodies, contacts);
    }
}

impl PhysicsWorld for ArcadePhysics {
    fn create_body(&mut self, def: BodyDef) -> BodyHandle {
        self.world.spawn(body_components(&def))
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.world.get::<&Transform>(body).ok().map(|t| t.pos)
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(body) {
            transform.pos = position;
        }
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.world.get::<&Velocity>(body).ok().map(|v| v.linear)
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Ok(mut v) = self.world.get::<&mut Velocity>(body) {
            v.linear = velocity;
        }
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<f32> {
        self.world.get::<&Velocity>(body).ok().map(|v| v.angular)
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angular: f32) {
        if let Ok(mut v) = self.world.get::<&mut Velocity>(body) {
            v.angular = angular;
        }
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        let Ok(mut query) = self
            .world
            .query_one::<(&BodyKind, &Material, &mut Velocity)>(body)
        else {
            return;
        };
        if let Some((kind, material, velocity)) = query.get() {
            if *kind == BodyKind::Dynamic {
                velocity.linear += impulse * material.inverse_mass();
            }
        }
    }

    fn bounding_box(&self, body: BodyHandle) -> Option<Aabb> {
        let transform = self.world.get::<&Transform>(body).ok()?;
        let collider = self.world.get::<&Collider>(body).ok()?;
        Some(collider.shape.bounds(transform.pos))
    }

    fn step(&mut self, dt: f32, contacts: &mut ContactQueue) {
        // Clamp dt to prevent large jumps
        let mut remaining_dt = dt.clamp(0.0, Params::MAX_DT);

        // Fixed micro-steps for stable physics
        while remaining_dt > 0.0 {
            let step_dt = remaining_dt.min(Params::FIXED_DT);
            remaining_dt -= step_dt;
            self.sub_step(step_dt, contacts);
        }
    }
}

/// Displacement and surface normal pushing a circle out of `other`.
///
/// `previous` is the circle centre before this sub-step. A centre that
/// crossed a face, or ended up inside a rectangle, leaves through the face
/// it entered by.
fn circle_push_out(
    previous: Vec2,
    center: Vec2,
    radius: f32,
    other: &BodySnapshot,
) -> Option<(Vec2, Vec2)> {
    let bounds = match other.collider.shape {
        Shape::Circle { radius: other_radius } => {
            let offset = center - other.pos;
            let distance = offset.length();
            if distance >= radius + other_radius {
                return None;
            }
            let n = offset.try_normalize().unwrap_or(Vec2::Y);
            return Some((n * (radius + other_radius - distance), n));
        }
        Shape::Rect { .. } | Shape::HorizontalEdge { .. } => other.collider.shape.bounds(other.pos),
    };

    let closest = bounds.closest_point(center);
    let offset = center - closest;
    let distance = offset.length();
    if distance >= radius {
        return None;
    }
    if distance > 0.0 && (previous - closest).dot(offset) >= 0.0 {
        // Still on the side it approached from
        let n = offset / distance;
        return Some((n * (radius - distance), n));
    }

    let entered = face_separations(previous, &bounds);
    let current = face_separations(center, &bounds);
    let mut face = deepest_face(&entered);
    if entered[face].0 <= 0.0 {
        // Started inside too: take the shallowest way out
        face = deepest_face(&current);
    }
    let (separation, n) = current[face];
    let depth = radius - separation;
    (depth > 0.0).then(|| (n * depth, n))
}

/// Signed distance of `point` outside each face of `bounds`, with the
/// face's outward normal.
fn face_separations(point: Vec2, bounds: &Aabb) -> [(f32, Vec2); 4] {
    [
        (bounds.min.x - point.x, Vec2::NEG_X),
        (point.x - bounds.max.x, Vec2::X),
        (bounds.min.y - point.y, Vec2::NEG_Y),
        (point.y - bounds.max.y, Vec2::Y),
    ]
}

fn deepest_face(faces: &[(f32, Vec2); 4]) -> usize {
    (0..faces.len())
        .max_by(|&i, &j| faces[i].0.total_cmp(&faces[j].0))
        .unwrap_or(0)
}

fn shapes_overlap(a: &BodySnapshot, b: &BodySnapshot) -> bool {
    match (a.collider.shape, b.collider.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            a.pos.distance_squared(b.pos) <= (ra + rb) * (ra + rb)
        }
        (Shape::Circle { radius }, other) => other.bounds(b.pos).intersects_circle(a.pos, radius),
        (other, Shape::Circle { radius }) => other.bounds(a.pos).intersects_circle(b.pos, radius),
        (sa, sb) => {
            let (ba, bb) = (sa.bounds(a.pos), sb.bounds(b.pos));
            ba.min.x <= bb.max.x && bb.min.x <= ba.max.x && ba.min.y <= bb.max.y && bb.min.y <= ba.max.y
        }
    }
}

/// Point on the non-circle body nearest the circle, or the midpoint.
fn contact_point(a: &BodySnapshot, b: &BodySnapshot) -> Vec2 {
    match (a.collider.shape, b.collider.shape) {
        (Shape::Circle { .. }, Shape::Circle { .. }) => (a.pos + b.pos) * 0.5,
        (Shape::Circle { .. }, other) => other.bounds(b.pos).closest_point(a.pos),
        (other, Shape::Circle { .. }) => other.bounds(a.pos).closest_point(b.pos),
        _ => (a.pos + b.pos) * 0.5,
    }
}
