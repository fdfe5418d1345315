use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use bunbun_assets::{AssetLoader, AssetPath, AssetStore, MemorySource};
use bunbun_core::physics_2d::{PhysicsConfig, RigidBody};
use bunbun_core::Transform2D;
use bunbun_engine::{
    AudioService, Behavior, Drawable, Engine, EngineConfig, EngineError, EntityRegistry,
    GameLevel, GameObject, KeyboardState, LevelRules, LevelState, NullRenderer, ObjectState,
    PropertyBag, PropertyError, Renderable, RulesContext, Services, SilentAudio, Updatable,
    UpdateContext,
};

const INTRO: &str = r#"{
    "name": "Intro",
    "cameraList": [
        {"name": "main", "center": [0, 0], "width": 100, "viewport": [0, 0, 800, 600]},
        {"name": "minimap", "center": [0, 0], "width": 400, "viewport": [600, 400, 200, 200]}
    ],
    "objectList": {
        "Crate": [
            {"position": [0, 10], "__hasPhysics": true},
            {"position": [5, 10], "__depth": 3}
        ],
        "Dragon": [{"position": [0, 0]}],
        "Door": [{"position": [50, 0], "to": "assets/levels/next.json"}]
    },
    "assetList": [
        {"name": "assets/textures/crate.png", "type": "texture"},
        {"name": "assets/shaders/glow.glsl", "type": "shader"}
    ]
}"#;

const NEXT: &str = r#"{
    "name": "Next",
    "cameraList": [{"name": "main", "center": [0, 0], "width": 100, "viewport": [0, 0, 800, 600]}],
    "objectList": {"Crate": [{"position": [0, 0]}]},
    "assetList": [{"name": "assets/sounds/next.mp3", "type": "sound"}]
}"#;

struct Crate;
impl Updatable for Crate {}
impl Drawable for Crate {}
impl Behavior for Crate {
    fn class(&self) -> &'static str {
        "Crate"
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn crate_at(x: f32, y: f32) -> GameObject {
    GameObject::new(
        ObjectState::new(
            Transform2D::new(x, y, 2.0, 2.0),
            Renderable::Rect {
                color: [0.5, 0.3, 0.1, 1.0],
            },
        )
        .with_body(RigidBody::rectangle(2.0, 2.0)),
        Crate,
    )
}

fn make_crate(props: &PropertyBag) -> Result<GameObject, PropertyError> {
    let p = props.position()?;
    Ok(crate_at(p.x, p.y))
}

/// Asks for a level change the first time it updates.
struct Door {
    to: String,
}
impl Updatable for Door {
    fn update(&mut self, _state: &mut ObjectState, ctx: &mut UpdateContext<'_>) {
        let crates = ctx.objects_by_class("Crate").len();
        if crates > 0 {
            ctx.request_transition(&self.to);
        }
    }
}
impl Drawable for Door {}
impl Behavior for Door {
    fn class(&self) -> &'static str {
        "Door"
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn make_door(props: &PropertyBag) -> Result<GameObject, PropertyError> {
    let p = props.position()?;
    Ok(GameObject::new(
        ObjectState::new(Transform2D::new(p.x, p.y, 1.0, 3.0), Renderable::Hidden),
        Door {
            to: props.string("to")?.to_string(),
        },
    ))
}

fn registry() -> EntityRegistry {
    EntityRegistry::new()
        .with("Crate", make_crate)
        .with("Door", make_door)
}

fn store() -> AssetStore<MemorySource> {
    AssetStore::new(
        MemorySource::new()
            .with_text("assets/levels/intro.json", INTRO)
            .with_text("assets/levels/next.json", NEXT)
            .with_bytes("assets/textures/crate.png", &[0x89, 0x50])
            .with_bytes("assets/sounds/next.mp3", &[0xff, 0xfb]),
    )
}

#[derive(Clone, Default)]
struct RecordingRules {
    initialized: Rc<RefCell<Vec<String>>>,
    updates: Rc<RefCell<u32>>,
}

impl LevelRules for RecordingRules {
    fn on_initialize(&mut self, level_name: &str, _audio: &mut dyn AudioService) {
        self.initialized.borrow_mut().push(level_name.to_string());
    }

    fn on_update(&mut self, _ctx: &mut RulesContext<'_>) {
        *self.updates.borrow_mut() += 1;
    }
}

fn loaded_intro(store: &mut AssetStore<MemorySource>) -> GameLevel {
    let mut level = GameLevel::new(
        AssetPath::new("assets/levels/intro.json"),
        PhysicsConfig::default(),
    );
    level.preload(store).unwrap();
    assert_eq!(level.state(), LevelState::Preloading);
    level.load(store).unwrap();
    assert_eq!(level.state(), LevelState::Loaded);
    level
}

#[test]
fn initialize_builds_cameras_and_skips_unknown_types() {
    let mut store = store();
    let mut level = loaded_intro(&mut store);
    let mut rules = RecordingRules::default();

    level
        .initialize(&registry(), &mut SilentAudio::default(), &mut rules)
        .unwrap();

    assert_eq!(level.state(), LevelState::Initialized);
    assert_eq!(level.name(), "Intro");
    assert_eq!(level.cameras().len(), 2);
    assert!(level.camera("minimap").is_some());
    assert!(level.camera("overview").is_none());

    let classes: Vec<&str> = level.objects().iter().map(|(_, o)| o.class()).collect();
    assert_eq!(classes, ["Crate", "Crate", "Door"]);
    assert_eq!(level.physics_objects().len(), 1);

    let crates = level.objects_by_class("Crate");
    assert_eq!(crates[1].1.draw_depth(), 3.0);
    assert_eq!(crates[0].1.state.draw_depth, None);
    assert_eq!(*rules.initialized.borrow(), ["Intro"]);
}

#[test]
fn load_requests_known_assets_only() {
    let mut store = store();
    let _level = loaded_intro(&mut store);

    assert!(store.is_loaded(&AssetPath::new("assets/textures/crate.png")));
    assert!(!store.is_loaded(&AssetPath::new("assets/shaders/glow.glsl")));
}

#[test]
fn only_physics_members_are_simulated() {
    let mut store = store();
    let mut level = loaded_intro(&mut store);
    let mut rules = RecordingRules::default();
    level
        .initialize(&registry(), &mut SilentAudio::default(), &mut rules)
        .unwrap();

    level.update(
        &KeyboardState::new(),
        &mut SilentAudio::default(),
        &mut rules,
        1.0 / 60.0,
    );

    let crates = level.objects_by_class("Crate");
    assert!(crates[0].1.transform().position.y < 10.0);
    assert_eq!(crates[1].1.transform().position.y, 10.0);
    assert_eq!(level.state(), LevelState::Running);
    assert_eq!(*rules.updates.borrow(), 1);
}

#[test]
fn enrolled_objects_get_one_slot_each() {
    let mut store = store();
    let mut level = loaded_intro(&mut store);
    let mut rules = RecordingRules::default();
    level
        .initialize(&registry(), &mut SilentAudio::default(), &mut rules)
        .unwrap();
    let drawn = level.objects().len();
    let simulated = level.physics_objects().len();

    let first = level.enroll_object(crate_at(0.0, 0.0), true);
    let second = level.enroll_object(crate_at(0.0, 0.0), false);

    assert_ne!(first, second);
    assert_eq!(level.objects().len(), drawn + 2);
    assert_eq!(level.physics_objects().len(), simulated + 1);
    let listed = level
        .objects()
        .iter()
        .filter(|(entity, _)| *entity == first)
        .count();
    assert_eq!(listed, 1);
}

#[test]
fn unload_releases_description_and_assets() {
    let mut store = store();
    let mut level = loaded_intro(&mut store);
    level.unload(&mut store);

    assert_eq!(level.state(), LevelState::Unloaded);
    assert_eq!(store.resident_count(), 0);
}

#[test]
fn missing_level_file_is_an_error() {
    let mut store = store();
    let mut level = GameLevel::new(
        AssetPath::new("assets/levels/none.json"),
        PhysicsConfig::default(),
    );
    assert!(matches!(level.preload(&mut store), Err(EngineError::Asset(_))));
    assert!(matches!(
        level.load(&mut store),
        Err(EngineError::MissingDescription(_))
    ));
}

#[test]
fn invalid_json_is_an_error() {
    let mut store = AssetStore::new(MemorySource::new().with_text("bad.json", "{ nope"));
    let mut level = GameLevel::new(AssetPath::new("bad.json"), PhysicsConfig::default());
    level.preload(&mut store).unwrap();
    assert!(matches!(
        level.load(&mut store),
        Err(EngineError::InvalidDescription { .. })
    ));
}

fn engine(rules: RecordingRules) -> Engine {
    Engine::new(
        EngineConfig::default(),
        registry(),
        Services {
            assets: Box::new(store()),
            audio: Box::new(SilentAudio::default()),
            renderer: Box::new(NullRenderer::default()),
        },
        Box::new(rules),
    )
}

#[test]
fn engine_swaps_level_at_frame_boundary() {
    let rules = RecordingRules::default();
    let mut engine = engine(rules.clone());
    engine.start("assets/levels/intro.json").unwrap();
    assert_eq!(engine.level().map(|l| l.name()), Some("Intro"));

    // less than one timestep: nothing runs
    engine.frame(Duration::from_millis(5)).unwrap();
    assert_eq!(engine.steps(), 0);

    engine.frame(Duration::from_millis(20)).unwrap();

    assert_eq!(engine.steps(), 1);
    assert_eq!(engine.level().map(|l| l.name()), Some("Next"));
    let assets = &engine.services().assets;
    assert!(!assets.is_loaded(&AssetPath::new("assets/levels/intro.json")));
    assert!(!assets.is_loaded(&AssetPath::new("assets/textures/crate.png")));
    assert!(assets.is_loaded(&AssetPath::new("assets/sounds/next.mp3")));
    assert_eq!(*rules.initialized.borrow(), ["Intro", "Next"]);
}

#[test]
fn engine_caps_steps_per_frame() {
    let mut engine = engine(RecordingRules::default());
    engine.start("assets/levels/next.json").unwrap();

    engine.frame(Duration::from_secs(2)).unwrap();
    assert_eq!(engine.steps(), 5);

    // the backlog was dropped, not carried over
    engine.frame(Duration::from_millis(1)).unwrap();
    assert_eq!(engine.steps(), 5);
}

#[test]
fn engine_reports_a_broken_first_level() {
    let mut engine = engine(RecordingRules::default());
    let err = engine.start("assets/levels/missing.json").unwrap_err();
    assert!(format!("{err:#}").contains("assets/levels/missing.json"));
    assert!(engine.level().is_none());
}
