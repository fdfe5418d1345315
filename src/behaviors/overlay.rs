use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, Updatable,
};

use super::{behavior_class, CLEAR_WHITE};

/// Static textured scenery. Unlike other entities its `position` is the
/// lower left corner.
#[derive(Debug, Clone, Default)]
pub struct Overlay;

impl Overlay {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let corner = props.position()?;
        let size = props.vec2("size")?;
        let state = ObjectState::new(
            Transform2D::new(
                corner.x + size.x * 0.5,
                corner.y + size.y * 0.5,
                size.x,
                size.y,
            ),
            Renderable::Sprite {
                texture: props.string("textureId")?.into(),
                color: CLEAR_WHITE,
                crop: props.texture_crop()?,
            },
        );
        Ok(GameObject::new(state, Overlay))
    }
}

impl Updatable for Overlay {}
impl Drawable for Overlay {}

behavior_class!(Overlay);
