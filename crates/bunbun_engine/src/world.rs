use std::collections::HashMap;

use bunbun_core::physics_2d::{BodyMut, HasRigidBody};
use bunbun_core::Entity;

use crate::object::GameObject;

/// Owns every game object of a level. Sets and behaviours refer to objects
/// by [`Entity`] only.
#[derive(Debug, Default)]
pub struct World {
    next_id: u32,
    objects: HashMap<Entity, GameObject>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, object: GameObject) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.objects.insert(entity, object);
        entity
    }

    pub fn get(&self, entity: Entity) -> Option<&GameObject> {
        self.objects.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut GameObject> {
        self.objects.get_mut(&entity)
    }

    /// Present and not soft-deleted.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.get(entity).is_some_and(|o| !o.is_deleted())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Lends an object out for its update, so it can read the rest of the
    /// world meanwhile. Must be followed by [`put_back`](World::put_back).
    pub(crate) fn take(&mut self, entity: Entity) -> Option<GameObject> {
        self.objects.remove(&entity)
    }

    pub(crate) fn put_back(&mut self, entity: Entity, object: GameObject) {
        self.objects.insert(entity, object);
    }

    pub fn mark_deleted(&mut self, entity: Entity) {
        if let Some(object) = self.objects.get_mut(&entity) {
            object.set_deleted();
        }
    }

    /// Drops soft-deleted objects for good. Returns how many went.
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|_, o| !o.is_deleted());
        before - self.objects.len()
    }

    /// Disjoint physics views of the live members of `entities` that carry
    /// a rigid body, in `entities` order. Repeated entities appear once.
    pub fn bodies_mut(&mut self, entities: &[Entity]) -> Vec<BodyMut<'_>> {
        let mut lookup: HashMap<Entity, &mut GameObject> =
            self.objects.iter_mut().map(|(e, o)| (*e, o)).collect();

        let mut bodies = Vec::with_capacity(entities.len());
        for entity in entities {
            let Some(object) = lookup.remove(entity) else {
                continue;
            };
            if object.is_deleted() {
                continue;
            }
            if let Some(body) = object.body_mut(*entity) {
                bodies.push(body);
            }
        }
        bodies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Behavior, Drawable, ObjectState, Updatable};
    use crate::services::Renderable;
    use bunbun_core::physics_2d::RigidBody;
    use bunbun_core::Transform2D;
    use std::any::Any;

    struct Plain;
    impl Updatable for Plain {}
    impl Drawable for Plain {}
    impl Behavior for Plain {
        fn class(&self) -> &'static str {
            "Plain"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn object(with_body: bool) -> GameObject {
        let mut state = ObjectState::new(Transform2D::default(), Renderable::Hidden);
        if with_body {
            state = state.with_body(RigidBody::circle(1.0));
        }
        GameObject::new(state, Plain)
    }

    #[test]
    fn bodies_follow_request_order_and_skip_bodiless() {
        let mut world = World::new();
        let a = world.spawn(object(true));
        let b = world.spawn(object(false));
        let c = world.spawn(object(true));

        let bodies = world.bodies_mut(&[c, b, a, c]);
        let order: Vec<Entity> = bodies.iter().map(|body| body.entity).collect();
        assert_eq!(order, vec![c, a]);
    }

    #[test]
    fn deleted_objects_lend_no_body() {
        let mut world = World::new();
        let a = world.spawn(object(true));
        world.mark_deleted(a);
        assert!(world.bodies_mut(&[a]).is_empty());
        assert!(!world.is_live(a));
    }

    #[test]
    fn entities_are_never_reused() {
        let mut world = World::new();
        let a = world.spawn(object(false));
        world.mark_deleted(a);
        world.purge_deleted();
        let b = world.spawn(object(false));
        assert_ne!(a, b);
        assert_eq!(world.len(), 1);
    }
}
