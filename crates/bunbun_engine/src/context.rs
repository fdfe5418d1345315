use bunbun_assets::AssetPath;
use bunbun_core::physics_2d::{CollisionRecord, Vector2D};
use bunbun_core::Entity;

use crate::camera::Camera;
use crate::object::GameObject;
use crate::services::{AudioService, InputService};
use crate::transition::TransitionRequest;
use crate::world::World;

/// The level-wide state an update pass runs against.
pub struct Frame<'a> {
    pub cameras: &'a mut [Camera],
    pub input: &'a dyn InputService,
    pub audio: &'a mut dyn AudioService,
    pub transition: &'a mut TransitionRequest,
    pub deletions: &'a mut Vec<Entity>,
    /// Pairs from the previous physics pass.
    pub collisions: &'a [CollisionRecord],
    pub level_name: &'a str,
    pub dt: f32,
}

/// What a behaviour sees while it updates.
///
/// The object being updated is lent out of the [`World`], so queries never
/// return it; everything else in the level is visible read-only.
pub struct UpdateContext<'a> {
    entity: Entity,
    world: &'a World,
    members: &'a [Entity],
    cameras: &'a mut [Camera],
    input: &'a dyn InputService,
    audio: &'a mut dyn AudioService,
    transition: &'a mut TransitionRequest,
    deletions: &'a mut Vec<Entity>,
    collisions: &'a [CollisionRecord],
    level_name: &'a str,
    dt: f32,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(
        entity: Entity,
        world: &'a World,
        members: &'a [Entity],
        frame: &'a mut Frame<'_>,
    ) -> Self {
        Self {
            entity,
            world,
            members,
            cameras: &mut *frame.cameras,
            input: frame.input,
            audio: &mut *frame.audio,
            transition: &mut *frame.transition,
            deletions: &mut *frame.deletions,
            collisions: frame.collisions,
            level_name: frame.level_name,
            dt: frame.dt,
        }
    }

    /// The entity being updated.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn level_name(&self) -> &str {
        self.level_name
    }

    /// Fixed timestep of this update, in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn input(&self) -> &dyn InputService {
        self.input
    }

    pub fn audio(&mut self) -> &mut dyn AudioService {
        &mut *self.audio
    }

    pub fn main_camera(&self) -> Option<&Camera> {
        self.cameras.first()
    }

    pub fn main_camera_mut(&mut self) -> Option<&mut Camera> {
        self.cameras.first_mut()
    }

    pub fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.name() == name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut Camera> {
        self.cameras.iter_mut().find(|c| c.name() == name)
    }

    pub fn get(&self, entity: Entity) -> Option<&GameObject> {
        self.world.get(entity).filter(|o| !o.is_deleted())
    }

    /// Live objects of the updating set whose class is `class`, in set order.
    pub fn objects_by_class(&self, class: &str) -> Vec<(Entity, &'a GameObject)> {
        let world = self.world;
        self.members
            .iter()
            .filter_map(|&e| world.get(e).map(|o| (e, o)))
            .filter(|(_, o)| !o.is_deleted() && o.is_class(class))
            .collect()
    }

    /// Every contact of the updating object in the last physics pass, as
    /// normals pointing from it towards the partner. Unlike the object's
    /// `CollisionInfo`, which keeps only the last contact, nothing is lost
    /// when it touches several bodies at once.
    pub fn contact_normals(&self) -> Vec<Vector2D> {
        let me = self.entity;
        self.collisions
            .iter()
            .filter_map(|record| {
                if record.a == me {
                    Some(record.normal)
                } else if record.b == me {
                    Some(-record.normal)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Deletes another object once the update pass is over.
    pub fn delete(&mut self, entity: Entity) {
        self.deletions.push(entity);
    }

    pub fn request_transition(&mut self, level: &str) -> bool {
        self.transition.request(AssetPath::new(level))
    }

    pub fn transition_pending(&self) -> bool {
        self.transition.is_pending()
    }
}
