pub mod behaviors;
pub mod registry;
pub mod rules;

pub use registry::default_registry;
pub use rules::BunBunRules;

/// Level files shipped with the game.
pub mod levels {
    pub const INTRO: &str = "assets/levels/intro.json";
    pub const LEVEL_0: &str = "assets/levels/level0.json";
    pub const WIN_SCREEN: &str = "assets/levels/winScreen.json";
    pub const LOSE_SCREEN: &str = "assets/levels/loseScreen.json";
}
