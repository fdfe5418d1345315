use bunbun_core::physics_2d::{normalize_max_component, RigidBody};
use bunbun_core::Transform2D;
use bunbun_engine::{
    Drawable, GameObject, InputService, KeyCode, ObjectState, PropertyBag, PropertyError,
    Renderable, Updatable, UpdateContext,
};

use super::behavior_class;
use crate::levels;

pub const WIDTH: f32 = 3.0;
pub const HEIGHT: f32 = 4.0;

const RUN_SPEED: f32 = 15.0;
const JUMP_SPEED: f32 = 18.0;
/// Oxygen lost per update while submerged, in percent.
const OXYGEN_DRAIN: f32 = 0.25;
const OXYGEN_REFILL: f32 = 1.0;
const FULL_OXYGEN: f32 = 100.0;

/// BunBun. Runs, jumps off anything below it, collects carrots and must
/// keep its head above the rising water.
#[derive(Debug, Clone)]
pub struct Player {
    pub carrot_points: u32,
    pub oxygen_level: f32,
    grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            carrot_points: 0,
            oxygen_level: FULL_OXYGEN,
            grounded: false,
        }
    }
}

impl Player {
    pub fn from_properties(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        let state = ObjectState::new(
            Transform2D::new(p.x, p.y, WIDTH, HEIGHT),
            Renderable::Rect {
                color: [0.0, 0.0, 1.0, 1.0],
            },
        )
        .with_body(RigidBody::rectangle(WIDTH, HEIGHT));
        Ok(GameObject::new(state, Player::default()))
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn steer(&self, state: &mut ObjectState, input: &dyn InputService) {
        let Some(body) = state.rigid_body.as_mut() else {
            return;
        };

        let left = input.is_key_pressed(KeyCode::KeyA) || input.is_key_pressed(KeyCode::ArrowLeft);
        let right =
            input.is_key_pressed(KeyCode::KeyD) || input.is_key_pressed(KeyCode::ArrowRight);
        body.velocity.x = match (left, right) {
            (true, false) => -RUN_SPEED,
            (false, true) => RUN_SPEED,
            _ => 0.0,
        };

        let jump = input.is_key_pressed(KeyCode::KeyW)
            || input.is_key_pressed(KeyCode::Space)
            || input.is_key_pressed(KeyCode::ArrowUp);
        if jump && self.grounded {
            body.velocity.y = JUMP_SPEED;
        }
    }

    fn collect_carrots(&mut self, state: &ObjectState, ctx: &mut UpdateContext<'_>) {
        let touched: Vec<_> = ctx
            .objects_by_class("CarrotPickup")
            .into_iter()
            .filter(|(_, pickup)| state.transform.overlaps(pickup.transform()))
            .map(|(e, _)| e)
            .collect();
        for pickup in touched {
            self.carrot_points += 1;
            ctx.delete(pickup);
        }
    }

    fn breathe(&mut self, state: &ObjectState, ctx: &UpdateContext<'_>) {
        let head = state.transform.position.y + state.transform.half_size().y;
        let submerged = ctx.objects_by_class("Water").iter().any(|(_, water)| {
            let t = water.transform();
            head < t.position.y + t.half_size().y
        });

        self.oxygen_level = if submerged {
            (self.oxygen_level - OXYGEN_DRAIN).max(0.0)
        } else {
            (self.oxygen_level + OXYGEN_REFILL).min(FULL_OXYGEN)
        };
    }
}

impl Updatable for Player {
    fn update(&mut self, state: &mut ObjectState, ctx: &mut UpdateContext<'_>) {
        // contact normals point from the player to whatever it touched; a
        // wall contact must not hide the floor
        self.grounded = ctx
            .contact_normals()
            .into_iter()
            .any(|normal| normalize_max_component(normal).y <= -1.0);

        self.steer(state, ctx.input());
        self.collect_carrots(state, ctx);
        self.breathe(state, ctx);

        if self.oxygen_level <= 0.0 {
            ctx.request_transition(levels::LOSE_SCREEN);
        }
        let reached_goal = ctx
            .objects_by_class("WinPoint")
            .iter()
            .any(|(_, goal)| state.transform.overlaps(goal.transform()));
        if reached_goal {
            ctx.request_transition(levels::WIN_SCREEN);
        }

        let p = state.transform.position;
        if let Some(camera) = ctx.main_camera_mut() {
            camera.set_target(p.x, p.y);
        }
    }
}

impl Drawable for Player {}

behavior_class!(Player);
