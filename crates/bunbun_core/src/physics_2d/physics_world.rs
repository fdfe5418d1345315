use std::collections::BTreeMap;

use cgmath::InnerSpace;
use serde::Deserialize;

use crate::physics_2d::{
    collide, CollisionInfo, Contact, NormalizeZero, RigidBody, TimeUnit, Unit, Vector2D,
};
use crate::{Entity, Transform2D};

type Index = usize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed step, in seconds.
    pub timestep: TimeUnit,
    pub relaxation_count: u32,
    /// Fraction of the remaining penetration removed per relaxation pass.
    pub position_correction_rate: Unit,
    /// Approach speeds below this bounce with zero restitution, so resting
    /// contacts settle instead of jittering.
    pub resting_speed: Unit,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            relaxation_count: 15,
            position_correction_rate: 0.8,
            resting_speed: 0.5,
        }
    }
}

/// The mutable view of one physics participant for a single pass.
pub struct BodyMut<'a> {
    pub entity: Entity,
    pub transform: &'a mut Transform2D,
    pub body: &'a mut RigidBody,
    pub collision: &'a mut CollisionInfo,
}

/// Anything that can lend its transform, rigid body and collision slot to
/// the physics pass.
pub trait HasRigidBody {
    fn body_mut(&mut self, entity: Entity) -> Option<BodyMut<'_>>;
}

/// One colliding pair from the last pass. `normal` points from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRecord {
    pub a: Entity,
    pub b: Entity,
    pub normal: Vector2D,
    pub depth: Unit,
}

pub struct PhysicsWorld {
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Runs one fixed step over `bodies`: reset collision slots, integrate,
    /// then detect and resolve contacts `relaxation_count` times.
    ///
    /// Afterwards every participant's [`CollisionInfo`] holds its last
    /// contact normal (pointing away from itself, towards the partner) and
    /// `records` holds one entry per colliding pair.
    pub fn process_collision(
        &self,
        bodies: &mut [BodyMut<'_>],
        records: &mut Vec<CollisionRecord>,
    ) {
        records.clear();
        for b in bodies.iter_mut() {
            b.collision.reset();
        }

        for b in bodies.iter_mut() {
            b.body.integrate(b.transform, self.config.timestep);
        }

        let mut contacts: BTreeMap<(Index, Index), Contact> = BTreeMap::new();
        for _ in 0..self.config.relaxation_count {
            for i in 0..bodies.len() {
                for j in (i + 1)..bodies.len() {
                    let (a, b) = pair_mut(bodies, i, j);
                    if let Some(contact) = self.resolve_pair(a, b) {
                        contacts.insert((i, j), contact);
                    }
                }
            }
        }

        for ((i, j), contact) in contacts {
            let (a, b) = pair_mut(bodies, i, j);
            a.collision.record(contact.normal, b.entity);
            b.collision.record(-contact.normal, a.entity);
            records.push(CollisionRecord {
                a: a.entity,
                b: b.entity,
                normal: contact.normal,
                depth: contact.depth,
            });
        }
    }

    fn resolve_pair(&self, a: &mut BodyMut<'_>, b: &mut BodyMut<'_>) -> Option<Contact> {
        let inv_sum = a.body.inv_mass() + b.body.inv_mass();
        if inv_sum <= 0.0 {
            return None;
        }

        let a_box = a.body.aabb(a.transform.position);
        let b_box = b.body.aabb(b.transform.position);
        if !a_box.overlaps(&b_box) {
            return None;
        }

        let contact = collide(
            &a.body.shape,
            a.transform.position,
            &b.body.shape,
            b.transform.position,
        )?;

        self.correct_positions(a, b, &contact, inv_sum);
        self.apply_impulse(a, b, &contact, inv_sum);
        Some(contact)
    }

    fn correct_positions(
        &self,
        a: &mut BodyMut<'_>,
        b: &mut BodyMut<'_>,
        contact: &Contact,
        inv_sum: Unit,
    ) {
        let correction =
            contact.normal * (self.config.position_correction_rate * contact.depth / inv_sum);
        a.transform.position -= correction * a.body.inv_mass();
        b.transform.position += correction * b.body.inv_mass();
    }

    fn apply_impulse(
        &self,
        a: &mut BodyMut<'_>,
        b: &mut BodyMut<'_>,
        contact: &Contact,
        inv_sum: Unit,
    ) {
        let n = contact.normal;
        let relative = b.body.velocity - a.body.velocity;
        let approach = relative.dot(n);
        if approach >= 0.0 {
            // already separating
            return;
        }

        let restitution = if -approach < self.config.resting_speed {
            0.0
        } else {
            a.body.restitution.min(b.body.restitution)
        };
        let jn = -(1.0 + restitution) * approach / inv_sum;
        a.body.velocity -= n * (jn * a.body.inv_mass());
        b.body.velocity += n * (jn * b.body.inv_mass());

        let tangent = (relative - n * approach).normalize_to_zero();
        if tangent.x == 0.0 && tangent.y == 0.0 {
            return;
        }
        let mu = (a.body.friction * b.body.friction).max(0.0).sqrt();
        let jt = (-relative.dot(tangent) / inv_sum).clamp(-jn * mu, jn * mu);
        a.body.velocity -= tangent * (jt * a.body.inv_mass());
        b.body.velocity += tangent * (jt * b.body.inv_mass());
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

fn pair_mut<'s, 'a>(
    bodies: &'s mut [BodyMut<'a>],
    a_idx: Index,
    b_idx: Index,
) -> (&'s mut BodyMut<'a>, &'s mut BodyMut<'a>) {
    debug_assert!(a_idx < b_idx);
    let (left, right) = bodies.split_at_mut(b_idx);
    (&mut left[a_idx], &mut right[0])
}
