use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use bunbun::levels;
use bunbun::rules::{GAME_OVER_CUE, GAME_WIN_CUE, INTRO_MUSIC, LEVEL_MUSIC};
use bunbun::{default_registry, BunBunRules};
use bunbun_assets::{AssetPath, AssetStore, MemorySource};
use bunbun_engine::{AudioService, Engine, EngineConfig, KeyCode, NullRenderer, Services};
use rstest::rstest;

/// Audio backend that writes down what it was asked to do.
#[derive(Clone, Default)]
struct RecordingAudio {
    log: Rc<RefCell<Vec<String>>>,
    playing: bool,
}

impl RecordingAudio {
    fn take(&self) -> Vec<String> {
        self.log.borrow_mut().drain(..).collect()
    }
}

impl AudioService for RecordingAudio {
    fn play_background(&mut self, clip: &AssetPath) {
        self.playing = true;
        self.log.borrow_mut().push(format!("play {clip}"));
    }

    fn stop_background(&mut self) {
        self.playing = false;
        self.log.borrow_mut().push("stop".to_string());
    }

    fn is_background_playing(&self) -> bool {
        self.playing
    }

    fn play_cue(&mut self, clip: &AssetPath) {
        self.log.borrow_mut().push(format!("cue {clip}"));
    }
}

fn shipped_levels() -> MemorySource {
    MemorySource::new()
        .with_text(levels::INTRO, include_str!("../assets/levels/intro.json"))
        .with_text(levels::LEVEL_0, include_str!("../assets/levels/level0.json"))
        .with_text(
            levels::WIN_SCREEN,
            include_str!("../assets/levels/winScreen.json"),
        )
        .with_text(
            levels::LOSE_SCREEN,
            include_str!("../assets/levels/loseScreen.json"),
        )
}

fn engine(audio: &RecordingAudio) -> Engine {
    let services = Services {
        assets: Box::new(AssetStore::new(shipped_levels())),
        audio: Box::new(audio.clone()),
        renderer: Box::new(NullRenderer::default()),
    };
    Engine::new(
        EngineConfig::default(),
        default_registry(),
        services,
        Box::new(BunBunRules),
    )
}

fn one_step() -> Duration {
    Duration::from_millis(20)
}

fn level_name(engine: &Engine) -> &str {
    engine.level().map_or("", |l| l.name())
}

fn click(engine: &mut Engine, key: KeyCode) {
    engine.input_mut().key_event(key, true);
    engine.input_mut().key_event(key, false);
}

#[test]
fn intro_starts_with_intro_music() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);

    engine.start(levels::INTRO).unwrap();

    assert_eq!(level_name(&engine), "Intro");
    assert_eq!(audio.take(), vec!["stop".to_string(), format!("play {INTRO_MUSIC}")]);
}

#[test]
fn enter_on_intro_starts_level_zero() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::INTRO).unwrap();
    audio.take();

    click(&mut engine, KeyCode::Enter);
    engine.frame(one_step()).unwrap();

    assert_eq!(level_name(&engine), "Level 0");
    assert_eq!(audio.take(), vec!["stop".to_string(), format!("play {LEVEL_MUSIC}")]);
}

#[test]
fn first_transition_request_in_a_step_wins() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::INTRO).unwrap();

    click(&mut engine, KeyCode::Enter);
    click(&mut engine, KeyCode::Digit3);
    engine.frame(one_step()).unwrap();

    assert_eq!(level_name(&engine), "Level 0");
}

#[rstest]
#[case::lose(KeyCode::Digit2, "LoseScreen", GAME_OVER_CUE)]
#[case::win(KeyCode::Digit3, "WinScreen", GAME_WIN_CUE)]
fn shortcut_keys_jump_to_end_screens(
    #[case] key: KeyCode,
    #[case] screen: &str,
    #[case] cue: &str,
) {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::LEVEL_0).unwrap();
    audio.take();

    click(&mut engine, key);
    engine.frame(one_step()).unwrap();

    assert_eq!(level_name(&engine), screen);
    assert_eq!(audio.take(), vec!["stop".to_string(), format!("cue {cue}")]);
}

#[test]
fn enter_on_end_screen_returns_to_intro() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::LOSE_SCREEN).unwrap();

    click(&mut engine, KeyCode::Enter);
    engine.frame(one_step()).unwrap();

    assert_eq!(level_name(&engine), "Intro");
}

#[test]
fn click_is_consumed_by_the_step_that_saw_it() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::WIN_SCREEN).unwrap();

    engine.input_mut().key_event(KeyCode::Enter, true);
    engine.frame(one_step()).unwrap();
    assert_eq!(level_name(&engine), "Intro");

    // still held: no second click, so the intro stays up
    engine.frame(one_step()).unwrap();
    assert_eq!(level_name(&engine), "Intro");
}

#[test]
fn level_zero_builds_every_shipped_entity() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::LEVEL_0).unwrap();
    let level = engine.level().unwrap();

    let count = |class: &str| level.objects_by_class(class).len();
    assert_eq!(count("Player"), 1);
    assert_eq!(count("Spaceship"), 3);
    assert_eq!(count("CarrotPickup"), 2);
    assert_eq!(count("Carrot"), 1);
    assert_eq!(count("Water"), 1);
    assert_eq!(count("Background"), 1);
    assert_eq!(count("HeadsUpDisplay"), 1);
    assert_eq!(count("WinPoint"), 1);
    assert_eq!(level.objects().len(), 11);

    let mut physics: Vec<&str> = level
        .physics_objects()
        .iter()
        .map(|(_, o)| o.class())
        .collect();
    physics.sort_unstable();
    assert_eq!(
        physics,
        vec!["Carrot", "Player", "Spaceship", "Spaceship", "Spaceship"]
    );
    assert_eq!(level.cameras().len(), 2);
    assert_eq!(level.cameras()[0].name(), "main");
}

#[test]
fn intro_has_no_physics_objects() {
    let audio = RecordingAudio::default();
    let mut engine = engine(&audio);
    engine.start(levels::INTRO).unwrap();

    engine.frame(one_step()).unwrap();

    let level = engine.level().unwrap();
    assert_eq!(level.objects_by_class("Overlay").len(), 1);
    assert_eq!(level.objects_by_class("BunAnimation").len(), 1);
    assert!(level.physics_objects().is_empty());
}
