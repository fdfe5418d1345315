mod background;
mod bun_animation;
mod carrot;
mod carrot_pickup;
mod hud;
mod overlay;
mod player;
mod spaceship;
mod water;
mod win_point;

pub use background::Background;
pub use bun_animation::BunAnimation;
pub use carrot::Carrot;
pub use carrot_pickup::CarrotPickup;
pub use hud::HeadsUpDisplay;
pub use overlay::Overlay;
pub use player::Player;
pub use spaceship::Spaceship;
pub use water::Water;
pub use win_point::WinPoint;

/// Implements [`Behavior`](bunbun_engine::Behavior) with the type name as
/// the class name.
macro_rules! behavior_class {
    ($ty:ident) => {
        impl bunbun_engine::Behavior for $ty {
            fn class(&self) -> &'static str {
                stringify!($ty)
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

pub(crate) use behavior_class;

const OPAQUE_WHITE: bunbun_engine::Color = [1.0, 1.0, 1.0, 1.0];
/// Zero alpha: sprites show their texture untinted.
const CLEAR_WHITE: bunbun_engine::Color = [1.0, 1.0, 1.0, 0.0];
