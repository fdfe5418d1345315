use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, TextureCrop,
    Updatable, UpdateContext,
};

use super::{behavior_class, CLEAR_WHITE};

pub const TEXTURE: &str = "assets/textures/BunSprite1.png";
const GRAVITY: f32 = -0.05;
const JUMP_INTERVAL: u32 = 120;
const JUMP_VELOCITY: f32 = 1.1;
const FIRST_JUMP: u32 = 30;

/// The bunny hopping on the title screen. Moves its own transform; it is
/// never part of the physics pass.
#[derive(Debug, Clone)]
pub struct BunAnimation {
    velocity: f32,
    floor: f32,
    jump_timer: u32,
}

impl BunAnimation {
    pub fn new(floor: f32) -> Self {
        Self {
            velocity: 0.0,
            floor,
            jump_timer: FIRST_JUMP,
        }
    }

    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, 4.0, 4.0),
            Renderable::Sprite {
                texture: TEXTURE.into(),
                color: CLEAR_WHITE,
                crop: Some(TextureCrop::from_corners([23.0, 23.0], [489.0, 489.0])),
            },
        );
        Ok(GameObject::new(state, BunAnimation::new(p.y)))
    }

    pub fn hop(&mut self, transform: &mut Transform2D) {
        self.velocity += GRAVITY;
        transform.translate(0.0, self.velocity);
        if transform.position.y < self.floor {
            transform.position.y = self.floor;
        }

        self.jump_timer = self.jump_timer.saturating_sub(1);
        if self.jump_timer == 0 {
            self.jump_timer = JUMP_INTERVAL;
            self.velocity = JUMP_VELOCITY;
        }
    }
}

impl Updatable for BunAnimation {
    fn update(&mut self, state: &mut ObjectState, _ctx: &mut UpdateContext<'_>) {
        self.hop(&mut state.transform);
    }
}

impl Drawable for BunAnimation {}

behavior_class!(BunAnimation);
