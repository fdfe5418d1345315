mod app;
mod camera;
mod config;
mod context;
pub mod debug;
mod description;
mod engine;
mod error;
mod input;
mod level;
pub mod logging;
mod object;
mod object_set;
mod properties;
mod registry;
mod services;
mod transition;
mod world;

pub use app::App;
pub use camera::{Camera, CameraInterpolation};
pub use config::EngineConfig;
pub use context::{Frame, UpdateContext};
pub use description::{AssetDescription, CameraDescription, LevelDescription};
pub use engine::{Engine, Services};
pub use error::{ConfigError, EngineError, PropertyError};
pub use input::{keycode_to_str, mousebutton_to_str, KeyboardState};
pub use level::{GameLevel, LevelRules, LevelState, NoRules, RulesContext};
pub use object::{draw_renderable, Behavior, Drawable, GameObject, ObjectState, Updatable};
pub use object_set::GameObjectSet;
pub use properties::{PropertyBag, DEPTH_KEY, HAS_PHYSICS_KEY};
pub use registry::{EntityFactory, EntityRegistry};
pub use services::{
    AudioService, CameraView, Color, InputService, NullRenderer, Renderable, Renderer,
    SilentAudio, TextureCrop,
};
pub use transition::TransitionRequest;
pub use world::World;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
