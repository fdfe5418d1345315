use bunbun_core::Entity;

use crate::camera::Camera;
use crate::context::{Frame, UpdateContext};
use crate::object::GameObject;
use crate::services::Renderer;
use crate::world::World;

/// Ordered membership list over a [`World`]. Adding does not check for
/// duplicates: a member added twice updates and draws twice.
#[derive(Debug, Clone, Default)]
pub struct GameObjectSet {
    members: Vec<Entity>,
}

impl GameObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entity`. Adding it again makes it update and draw twice.
    pub fn add_to_set(&mut self, entity: Entity) {
        self.members.push(entity);
    }

    pub fn object_list(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    /// Drops members that are deleted or no longer in `world`, keeping the
    /// order of the rest.
    pub fn clean(&mut self, world: &World) {
        self.members.retain(|&e| world.is_live(e));
    }

    pub fn update(&self, world: &mut World, frame: &mut Frame<'_>) {
        for &entity in &self.members {
            let Some(mut object) = world.take(entity) else {
                continue;
            };
            {
                let mut ctx = UpdateContext::new(entity, world, &self.members, frame);
                object.update(&mut ctx);
            }
            world.put_back(entity, object);
        }
    }

    /// Draws live members ordered by draw depth; equal depths keep set order.
    pub fn draw(&self, world: &World, camera: &Camera, renderer: &mut dyn Renderer) {
        let mut live: Vec<&GameObject> = self
            .members
            .iter()
            .filter_map(|&e| world.get(e))
            .filter(|o| !o.is_deleted())
            .collect();
        live.sort_by(|a, b| a.draw_depth().total_cmp(&b.draw_depth()));
        for object in live {
            object.draw(camera, renderer);
        }
    }

    pub fn objects<'w>(&self, world: &'w World) -> Vec<(Entity, &'w GameObject)> {
        self.members
            .iter()
            .filter_map(|&e| world.get(e).map(|o| (e, o)))
            .filter(|(_, o)| !o.is_deleted())
            .collect()
    }

    pub fn objects_by_class<'w>(
        &self,
        world: &'w World,
        class: &str,
    ) -> Vec<(Entity, &'w GameObject)> {
        self.objects(world)
            .into_iter()
            .filter(|(_, o)| o.is_class(class))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Behavior, Drawable, ObjectState, Updatable};
    use crate::services::{AudioService, CameraView, Color, InputService, Renderable};
    use crate::transition::TransitionRequest;
    use crate::KeyboardState;
    use crate::SilentAudio;
    use bunbun_core::Transform2D;
    use std::any::Any;

    struct Tagged {
        class: &'static str,
        updates: u32,
    }

    impl Updatable for Tagged {
        fn update(&mut self, _state: &mut ObjectState, _ctx: &mut UpdateContext<'_>) {
            self.updates += 1;
        }
    }
    impl Drawable for Tagged {}
    impl Behavior for Tagged {
        fn class(&self) -> &'static str {
            self.class
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn tagged(class: &'static str, x: f32) -> GameObject {
        GameObject::new(
            ObjectState::new(
                Transform2D::new(x, 0.0, 1.0, 1.0),
                Renderable::Rect {
                    color: [1.0, 1.0, 1.0, 1.0],
                },
            ),
            Tagged { class, updates: 0 },
        )
    }

    fn updates(world: &World, e: Entity) -> u32 {
        world
            .get(e)
            .and_then(|o| o.behavior::<Tagged>())
            .map_or(0, |t| t.updates)
    }

    #[derive(Default)]
    struct Recorder {
        xs: Vec<f32>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self, _color: Color) {}
        fn begin_camera(&mut self, _view: &CameraView<'_>) {}
        fn draw(&mut self, transform: &Transform2D, _renderable: &Renderable) {
            self.xs.push(transform.position.x);
        }
    }

    fn run_update(set: &GameObjectSet, world: &mut World) {
        let input = KeyboardState::new();
        let mut audio = SilentAudio::default();
        let mut transition = TransitionRequest::default();
        let mut deletions = Vec::new();
        let mut cameras = vec![Camera::new("main", [0.0, 0.0], 100.0, [0, 0, 800, 600])];
        let mut frame = Frame {
            cameras: &mut cameras,
            input: &input as &dyn InputService,
            audio: &mut audio as &mut dyn AudioService,
            transition: &mut transition,
            deletions: &mut deletions,
            collisions: &[],
            level_name: "test",
            dt: 1.0 / 60.0,
        };
        set.update(world, &mut frame);
    }

    #[test]
    fn clean_is_idempotent_and_keeps_order() {
        let mut world = World::new();
        let mut set = GameObjectSet::new();
        let ids: Vec<Entity> = (0..5)
            .map(|i| world.spawn(tagged("Tagged", i as f32)))
            .collect();
        for &e in &ids {
            set.add_to_set(e);
        }
        world.mark_deleted(ids[1]);
        world.mark_deleted(ids[3]);

        set.clean(&world);
        let once = set.object_list().to_vec();
        set.clean(&world);

        assert_eq!(once, vec![ids[0], ids[2], ids[4]]);
        assert_eq!(set.object_list(), once.as_slice());
    }

    #[test]
    fn clean_drops_purged_members() {
        let mut world = World::new();
        let mut set = GameObjectSet::new();
        let a = world.spawn(tagged("Tagged", 0.0));
        let b = world.spawn(tagged("Tagged", 1.0));
        set.add_to_set(a);
        set.add_to_set(b);
        world.mark_deleted(a);
        assert_eq!(world.purge_deleted(), 1);

        set.clean(&world);
        assert_eq!(set.object_list(), &[b]);
    }

    #[test]
    fn class_query_keeps_insertion_order() {
        let mut world = World::new();
        let mut set = GameObjectSet::new();
        let classes = ["A", "B", "A", "C", "A"];
        let ids: Vec<Entity> = classes
            .iter()
            .enumerate()
            .map(|(i, &c)| world.spawn(tagged(c, i as f32)))
            .collect();
        for &e in &ids {
            set.add_to_set(e);
        }
        world.mark_deleted(ids[2]);

        let found: Vec<Entity> = set
            .objects_by_class(&world, "A")
            .into_iter()
            .map(|(e, _)| e)
            .collect();
        assert_eq!(found, vec![ids[0], ids[4]]);
        assert!(set.objects_by_class(&world, "Z").is_empty());
    }

    #[test]
    fn duplicate_member_updates_twice() {
        let mut world = World::new();
        let mut set = GameObjectSet::new();
        let e = world.spawn(tagged("Tagged", 0.0));
        set.add_to_set(e);
        set.add_to_set(e);

        run_update(&set, &mut world);

        assert_eq!(updates(&world, e), 2);
    }

    #[test]
    fn deleted_members_neither_update_nor_draw() {
        let mut world = World::new();
        let mut set = GameObjectSet::new();
        let a = world.spawn(tagged("Tagged", 1.0));
        let b = world.spawn(tagged("Tagged", 2.0));
        set.add_to_set(a);
        set.add_to_set(b);
        world.mark_deleted(a);

        run_update(&set, &mut world);
        let mut recorder = Recorder::default();
        let camera = Camera::new("main", [0.0, 0.0], 100.0, [0, 0, 800, 600]);
        set.draw(&world, &camera, &mut recorder);

        assert_eq!(updates(&world, a), 0);
        assert_eq!(updates(&world, b), 1);
        assert_eq!(recorder.xs, vec![2.0]);
    }

    #[test]
    fn draw_orders_by_depth_then_insertion() {
        let mut world = World::new();
        let mut set = GameObjectSet::new();
        for (x, depth) in [(0.0, None), (1.0, Some(5.0)), (2.0, Some(-1.0)), (3.0, None)] {
            let mut object = tagged("Tagged", x);
            object.state.draw_depth = depth;
            set.add_to_set(world.spawn(object));
        }

        let mut recorder = Recorder::default();
        let camera = Camera::new("main", [0.0, 0.0], 100.0, [0, 0, 800, 600]);
        set.draw(&world, &camera, &mut recorder);

        assert_eq!(recorder.xs, vec![2.0, 0.0, 3.0, 1.0]);
    }
}
