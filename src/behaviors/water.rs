use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, Updatable,
    UpdateContext,
};

use super::behavior_class;

const WIDTH: f32 = 220.0;
const HEIGHT: f32 = 200.0;
const RISE_RATE: f32 = 0.05;

/// Translucent flood rising under the level. It tracks the main camera
/// horizontally and never climbs past the camera center.
#[derive(Debug, Clone)]
pub struct Water {
    water_level: f32,
    camera_configured: bool,
}

impl Water {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, WIDTH, HEIGHT),
            Renderable::Rect {
                color: [0.25, 0.5, 1.0, 0.2],
            },
        );
        Ok(GameObject::new(
            state,
            Water {
                water_level: p.y,
                camera_configured: false,
            },
        ))
    }

    pub fn water_level(&self) -> f32 {
        self.water_level
    }
}

impl Updatable for Water {
    fn update(&mut self, state: &mut ObjectState, ctx: &mut UpdateContext<'_>) {
        let Some(camera) = ctx.camera_mut("main") else {
            return;
        };
        if !self.camera_configured {
            camera.configure_interpolation(0.1, 1.0);
            self.camera_configured = true;
        }

        self.water_level += RISE_RATE;
        let center = camera.center();
        state
            .transform
            .set_position(center.x, self.water_level.min(center.y));
    }
}

impl Drawable for Water {}

behavior_class!(Water);
