use bunbun_core::physics_2d::RigidBody;
use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, Updatable,
    UpdateContext,
};

use super::{behavior_class, OPAQUE_WHITE};
use crate::levels;

const WIDTH: f32 = 40.0;
const HEIGHT: f32 = 4.0;
const MASS: f32 = 5.5;
/// How far below the hull the tractor beam reaches.
const BEAM_LENGTH: f32 = 30.0;

/// Hovering saucer. A player caught in the beam underneath is carried off
/// to `nextLevel`. `"mass": 0` pins it in place as a platform.
#[derive(Debug, Clone)]
pub struct Spaceship {
    next_level: String,
}

impl Spaceship {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let next_level = props.string_or("nextLevel", levels::LEVEL_0)?.to_string();
        let mass = props.f32_or("mass", MASS)?;
        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, WIDTH, HEIGHT),
            Renderable::Rect {
                color: OPAQUE_WHITE,
            },
        )
        .with_body(RigidBody::rectangle(WIDTH, HEIGHT).with_mass(mass));
        Ok(GameObject::new(state, Spaceship { next_level }))
    }

    pub fn next_level(&self) -> &str {
        &self.next_level
    }

    fn in_beam(ship: &Transform2D, target: &Transform2D) -> bool {
        let dx = (target.position.x - ship.position.x).abs();
        let below = ship.position.y - target.position.y;
        dx < ship.half_size().x && below > 0.0 && below < BEAM_LENGTH
    }
}

impl Updatable for Spaceship {
    fn update(&mut self, state: &mut ObjectState, ctx: &mut UpdateContext<'_>) {
        let abducted = ctx
            .objects_by_class("Player")
            .iter()
            .any(|(_, player)| Self::in_beam(&state.transform, player.transform()));
        if abducted {
            ctx.request_transition(&self.next_level);
        }
    }
}

impl Drawable for Spaceship {}

behavior_class!(Spaceship);
