use bunbun_core::physics_2d::RigidBody;
use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, TextureCrop,
    Updatable, UpdateContext,
};

use super::behavior_class;

pub const TEXTURE: &str = "assets/textures/carrotSlice.png";
const IDEAL_SIZE: f32 = 8.0;
const INITIAL_SIZE: f32 = 0.01;
const GROWTH_RATE: f32 = 0.2;
const MASS: f32 = 20.0;
const ROLL_SPEED: f32 = 20.0;

/// A carrot slice that pops into existence and rolls left at the player.
#[derive(Debug, Clone)]
pub struct Carrot {
    current_size: f32,
}

impl Carrot {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let mut body = RigidBody::circle(INITIAL_SIZE * 0.5).with_mass(MASS);
        body.set_velocity(-ROLL_SPEED, 0.0);

        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, INITIAL_SIZE, INITIAL_SIZE),
            Renderable::Sprite {
                texture: TEXTURE.into(),
                color: [1.0, 0.37, 0.0, 0.0],
                crop: Some(TextureCrop::from_corners([0.0, 0.0], [379.0, 379.0])),
            },
        )
        .with_body(body);
        Ok(GameObject::new(
            state,
            Carrot {
                current_size: INITIAL_SIZE,
            },
        ))
    }

    pub fn current_size(&self) -> f32 {
        self.current_size
    }
}

impl Updatable for Carrot {
    fn update(&mut self, state: &mut ObjectState, _ctx: &mut UpdateContext<'_>) {
        self.current_size += GROWTH_RATE * (IDEAL_SIZE - self.current_size);
        let size = self.current_size;
        state.transform.set_size(size, size);
        if let Some(body) = state.rigid_body.as_mut() {
            body.set_shape_size(size, size);
        }
    }
}

impl Drawable for Carrot {}

behavior_class!(Carrot);
