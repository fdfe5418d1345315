use bunbun_assets::{AssetKind, AssetLoader, AssetPath};
use bunbun_core::physics_2d::{CollisionRecord, PhysicsConfig, PhysicsWorld};
use bunbun_core::Entity;
use log::{debug, info, warn};

use crate::camera::Camera;
use crate::context::Frame;
use crate::description::LevelDescription;
use crate::error::EngineError;
use crate::object::GameObject;
use crate::object_set::GameObjectSet;
use crate::properties::PropertyBag;
use crate::registry::EntityRegistry;
use crate::services::{AudioService, Color, InputService, Renderer};
use crate::transition::TransitionRequest;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Unloaded,
    Preloading,
    Loaded,
    Initialized,
    Running,
    Unloading,
}

/// What level-wide rules can touch at the start of each update.
pub struct RulesContext<'a> {
    pub level_name: &'a str,
    pub input: &'a dyn InputService,
    pub audio: &'a mut dyn AudioService,
    pub transition: &'a mut TransitionRequest,
}

/// Game-specific logic that belongs to a level rather than to any object.
pub trait LevelRules {
    fn on_initialize(&mut self, _level_name: &str, _audio: &mut dyn AudioService) {}
    fn on_update(&mut self, _ctx: &mut RulesContext<'_>) {}
}

/// Rules that do nothing.
pub struct NoRules;

impl LevelRules for NoRules {}

/// One scene: a parsed level file, its objects and its cameras.
///
/// Every object is in the drawable set; those flagged `__hasPhysics` are
/// also in the physics set. The first camera is the main camera.
pub struct GameLevel {
    path: AssetPath,
    state: LevelState,
    description: Option<LevelDescription>,
    world: World,
    objects: GameObjectSet,
    physics_objects: GameObjectSet,
    cameras: Vec<Camera>,
    collision_records: Vec<CollisionRecord>,
    physics: PhysicsWorld,
    transition: TransitionRequest,
    deletions: Vec<Entity>,
    clear_color: Color,
}

impl GameLevel {
    pub fn new(path: AssetPath, physics: PhysicsConfig) -> Self {
        Self {
            path,
            state: LevelState::Unloaded,
            description: None,
            world: World::new(),
            objects: GameObjectSet::new(),
            physics_objects: GameObjectSet::new(),
            cameras: Vec::new(),
            collision_records: Vec::new(),
            physics: PhysicsWorld::new(physics),
            transition: TransitionRequest::default(),
            deletions: Vec::new(),
            clear_color: [0.9, 0.9, 0.9, 1.0],
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn path(&self) -> &AssetPath {
        &self.path
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    /// The `name` field of the level file, empty before loading.
    pub fn name(&self) -> &str {
        self.description.as_ref().map_or("", |d| d.name.as_str())
    }

    pub fn description(&self) -> Option<&LevelDescription> {
        self.description.as_ref()
    }

    /// Requests the level file itself.
    pub fn preload(&mut self, loader: &mut dyn AssetLoader) -> Result<(), EngineError> {
        self.state = LevelState::Preloading;
        loader.load(&self.path, AssetKind::Text)?;
        Ok(())
    }

    /// Parses the level file and requests every asset it declares.
    pub fn load(&mut self, loader: &mut dyn AssetLoader) -> Result<(), EngineError> {
        let text = loader
            .retrieve_text(&self.path)
            .ok_or_else(|| EngineError::MissingDescription(self.path.clone()))?;
        let description =
            LevelDescription::parse(text).map_err(|source| EngineError::InvalidDescription {
                path: self.path.clone(),
                source,
            })?;

        for asset in &description.asset_list {
            let Some(kind) = AssetKind::parse(&asset.kind) else {
                warn!("asset {} has unknown type `{}`", asset.name, asset.kind);
                continue;
            };
            if let Err(e) = loader.load(&asset.name, kind) {
                warn!("{}: {e}", self.path);
            }
        }

        info!("loaded level `{}` from {}", description.name, self.path);
        self.description = Some(description);
        self.state = LevelState::Loaded;
        Ok(())
    }

    /// Builds cameras and objects from the parsed description, then hands
    /// over to the level rules.
    pub fn initialize(
        &mut self,
        registry: &EntityRegistry,
        audio: &mut dyn AudioService,
        rules: &mut dyn LevelRules,
    ) -> Result<(), EngineError> {
        let description = self
            .description
            .take()
            .ok_or_else(|| EngineError::MissingDescription(self.path.clone()))?;

        if description.camera_list.is_empty() {
            warn!("level `{}` defines no cameras", description.name);
        }
        self.cameras = description
            .camera_list
            .iter()
            .map(Camera::from_description)
            .collect();

        for (type_name, value) in description.instances() {
            let properties = match PropertyBag::from_value(value) {
                Ok(p) => p,
                Err(e) => {
                    warn!("skipping `{type_name}` instance: {e}");
                    continue;
                }
            };
            let mut object = match registry.construct(type_name, &properties) {
                Ok(o) => o,
                Err(e) => {
                    warn!("skipping instance: {e}");
                    continue;
                }
            };
            if let Some(depth) = properties.depth() {
                object.set_draw_depth(depth);
            }
            self.enroll_object(object, properties.has_physics());
        }

        info!(
            "level `{}` initialized: {} objects, {} with physics, {} cameras",
            description.name,
            self.objects.len(),
            self.physics_objects.len(),
            self.cameras.len()
        );
        rules.on_initialize(&description.name, audio);
        self.description = Some(description);
        self.state = LevelState::Initialized;
        Ok(())
    }

    /// One fixed step: level rules, object updates, deferred deletions,
    /// physics, then cameras.
    pub fn update(
        &mut self,
        input: &dyn InputService,
        audio: &mut dyn AudioService,
        rules: &mut dyn LevelRules,
        dt: f32,
    ) {
        self.state = LevelState::Running;
        let level_name = self.description.as_ref().map_or("", |d| d.name.as_str());

        rules.on_update(&mut RulesContext {
            level_name,
            input,
            audio: &mut *audio,
            transition: &mut self.transition,
        });

        let mut frame = Frame {
            cameras: &mut self.cameras,
            input,
            audio,
            transition: &mut self.transition,
            deletions: &mut self.deletions,
            collisions: &self.collision_records,
            level_name,
            dt,
        };
        self.objects.update(&mut self.world, &mut frame);

        for entity in self.deletions.drain(..) {
            debug!("deleting {entity:?}");
            self.world.mark_deleted(entity);
        }
        self.objects.clean(&self.world);
        self.physics_objects.clean(&self.world);

        let mut bodies = self.world.bodies_mut(self.physics_objects.object_list());
        self.physics
            .process_collision(&mut bodies, &mut self.collision_records);
        drop(bodies);

        for camera in &mut self.cameras {
            camera.update();
        }

        self.world.purge_deleted();
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.clear(self.clear_color);
        for camera in &self.cameras {
            camera.setup_view_projection(renderer);
            self.objects.draw(&self.world, camera, renderer);
        }
    }

    /// Releases the level file and every asset it declared.
    pub fn unload(&mut self, loader: &mut dyn AssetLoader) {
        self.state = LevelState::Unloading;
        if let Some(description) = &self.description {
            for asset in &description.asset_list {
                if AssetKind::parse(&asset.kind).is_some() {
                    loader.unload(&asset.name);
                }
            }
        }
        loader.unload(&self.path);
        info!("unloaded level {}", self.path);
        self.state = LevelState::Unloaded;
    }

    /// Spawns `object` into the world and adds it to the drawable set and,
    /// with `physics`, to the physics set.
    pub fn enroll_object(&mut self, object: GameObject, physics: bool) -> Entity {
        let entity = self.world.spawn(object);
        self.objects.add_to_set(entity);
        if physics {
            self.physics_objects.add_to_set(entity);
        }
        entity
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn drawable_set(&self) -> &GameObjectSet {
        &self.objects
    }

    pub fn physics_set(&self) -> &GameObjectSet {
        &self.physics_objects
    }

    pub fn objects(&self) -> Vec<(Entity, &GameObject)> {
        self.objects.objects(&self.world)
    }

    pub fn objects_by_class(&self, class: &str) -> Vec<(Entity, &GameObject)> {
        self.objects.objects_by_class(&self.world, class)
    }

    pub fn physics_objects(&self) -> Vec<(Entity, &GameObject)> {
        self.physics_objects.objects(&self.world)
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.name() == name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut Camera> {
        self.cameras.iter_mut().find(|c| c.name() == name)
    }

    /// Pairs that collided during the last physics pass.
    pub fn collision_records(&self) -> &[CollisionRecord] {
        &self.collision_records
    }

    pub fn request_transition(&mut self, level: AssetPath) -> bool {
        self.transition.request(level)
    }

    pub fn pending_transition(&self) -> Option<&AssetPath> {
        self.transition.pending()
    }

    pub fn take_transition(&mut self) -> Option<AssetPath> {
        self.transition.take()
    }
}
