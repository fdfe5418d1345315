use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, Updatable,
};

use super::{behavior_class, OPAQUE_WHITE};

pub const TEXTURE: &str = "assets/textures/carrotPickup.png";

/// A carrot standing in the ground, worth one point to the player.
#[derive(Debug, Clone, Default)]
pub struct CarrotPickup;

impl CarrotPickup {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, 2.0, 8.0),
            Renderable::Sprite {
                texture: TEXTURE.into(),
                color: OPAQUE_WHITE,
                crop: None,
            },
        );
        Ok(GameObject::new(state, CarrotPickup))
    }
}

impl Updatable for CarrotPickup {}
impl Drawable for CarrotPickup {}

behavior_class!(CarrotPickup);
