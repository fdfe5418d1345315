use bunbun_assets::AssetPath;
use bunbun_engine::{AudioService, KeyCode, LevelRules, RulesContext};
use log::info;

use crate::levels;

pub const INTRO_MUSIC: &str = "assets/sounds/BunBun_Level_1.mp3";
pub const LEVEL_MUSIC: &str = "assets/sounds/BunBun_Level_1_NoIntro.mp3";
pub const GAME_OVER_CUE: &str = "assets/sounds/Game_Over.wav";
pub const GAME_WIN_CUE: &str = "assets/sounds/Game_Win.wav";

/// Music per level and the menu keys: Enter advances from the title and
/// end screens, 2 and 3 jump straight to losing or winning.
#[derive(Debug, Default)]
pub struct BunBunRules;

impl LevelRules for BunBunRules {
    fn on_initialize(&mut self, level_name: &str, audio: &mut dyn AudioService) {
        let (clip, looped) = match level_name {
            "Level 0" => (LEVEL_MUSIC, true),
            "Intro" => (INTRO_MUSIC, true),
            "LoseScreen" => (GAME_OVER_CUE, false),
            "WinScreen" => (GAME_WIN_CUE, false),
            _ => return,
        };
        info!("starting audio for {level_name}: {clip}");
        audio.stop_background();
        if looped {
            audio.play_background(&AssetPath::new(clip));
        } else {
            audio.play_cue(&AssetPath::new(clip));
        }
    }

    fn on_update(&mut self, ctx: &mut RulesContext<'_>) {
        if ctx.input.is_key_clicked(KeyCode::Enter) {
            match ctx.level_name {
                "Intro" => {
                    ctx.transition.request(levels::LEVEL_0.into());
                }
                "WinScreen" | "LoseScreen" => {
                    ctx.transition.request(levels::INTRO.into());
                }
                _ => {}
            }
        }
        if ctx.input.is_key_clicked(KeyCode::Digit3) {
            ctx.transition.request(levels::WIN_SCREEN.into());
        }
        if ctx.input.is_key_clicked(KeyCode::Digit2) {
            ctx.transition.request(levels::LOSE_SCREEN.into());
        }
    }
}
