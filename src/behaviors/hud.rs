use bunbun_core::Transform2D;
use bunbun_engine::{
    Camera, Drawable, GameObject, ObjectState, PropertyBag, PropertyError, Renderable, Renderer,
    Updatable, UpdateContext,
};

use super::{behavior_class, Player};

pub const FONT: &str = "assets/fonts/Consolas-32";
const TEXT_HEIGHT: f32 = 3.0;
/// Offset of the status line from the camera center.
const ANCHOR: [f32; 2] = [-47.0, -34.0];

/// Carrot count and oxygen of the first player, in the corner of the main
/// camera.
#[derive(Debug, Clone, Default)]
pub struct HeadsUpDisplay;

impl HeadsUpDisplay {
    pub fn from_properties(_props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let state = ObjectState::new(
            Transform2D::default(),
            Renderable::Text {
                text: "Loading...".to_string(),
                font: FONT.into(),
                height: TEXT_HEIGHT,
                color: [0.0, 0.0, 0.0, 1.0],
            },
        );
        Ok(GameObject::new(state, HeadsUpDisplay))
    }

    pub fn status_line(player: &Player) -> String {
        format!(
            "CarrotPoints: {}   Oxygen: {}%",
            player.carrot_points,
            player.oxygen_level.round()
        )
    }
}

impl Updatable for HeadsUpDisplay {
    fn update(&mut self, state: &mut ObjectState, ctx: &mut UpdateContext<'_>) {
        let players = ctx.objects_by_class("Player");
        let Some(player) = players.first().and_then(|(_, o)| o.behavior::<Player>()) else {
            return;
        };
        if let Renderable::Text { text, .. } = &mut state.renderable {
            *text = Self::status_line(player);
        }
    }
}

impl Drawable for HeadsUpDisplay {
    fn draw(&self, state: &ObjectState, camera: &Camera, renderer: &mut dyn Renderer) {
        if camera.name() != "main" || !state.visible {
            return;
        }
        let c = camera.center();
        let mut transform = state.transform.clone();
        transform.set_position(c.x + ANCHOR[0], c.y + ANCHOR[1]);
        renderer.draw(&transform, &state.renderable);
    }
}

behavior_class!(HeadsUpDisplay);
