use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, Updatable,
};

use super::{behavior_class, CLEAR_WHITE};

/// The goal marker. Touching it wins the level.
#[derive(Debug, Clone, Default)]
pub struct WinPoint;

impl WinPoint {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let renderable = if props.contains("textureId") {
            Renderable::Sprite {
                texture: props.string("textureId")?.into(),
                color: CLEAR_WHITE,
                crop: props.texture_crop()?,
            }
        } else {
            Renderable::Rect { color: CLEAR_WHITE }
        };
        let state = ObjectState::new(Transform2D::new(p.x, p.y, 4.0, 4.0), renderable);
        Ok(GameObject::new(state, WinPoint))
    }
}

impl Updatable for WinPoint {}
impl Drawable for WinPoint {}

behavior_class!(WinPoint);
