use bunbun_core::Transform2D;
use bunbun_engine::{
    draw_renderable, Camera, Drawable, GameObject, ObjectState, PropertyBag, PropertyError,
    Renderable, Renderer, Updatable, UpdateContext,
};

use super::{behavior_class, CLEAR_WHITE};

/// Backdrop pinned to the main camera. Other cameras never show it.
#[derive(Debug, Clone, Default)]
pub struct Background;

impl Background {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let size = props.vec2("size")?;
        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, size.x, size.y),
            Renderable::Sprite {
                texture: props.string("textureId")?.into(),
                color: CLEAR_WHITE,
                crop: props.texture_crop()?,
            },
        );
        Ok(GameObject::new(state, Background))
    }
}

impl Updatable for Background {
    fn update(&mut self, state: &mut ObjectState, ctx: &mut UpdateContext<'_>) {
        if let Some(camera) = ctx.camera("main") {
            let c = camera.center();
            state.transform.set_position(c.x, c.y);
        }
    }
}

impl Drawable for Background {
    fn draw(&self, state: &ObjectState, camera: &Camera, renderer: &mut dyn Renderer) {
        if camera.name() == "main" {
            draw_renderable(state, renderer);
        }
    }
}

behavior_class!(Background);
