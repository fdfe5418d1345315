use std::any::Any;

use bunbun_core::physics_2d::{BodyMut, CollisionInfo, HasRigidBody, RigidBody};
use bunbun_core::{Entity, Transform2D};

use crate::camera::Camera;
use crate::context::UpdateContext;
use crate::services::{Renderable, Renderer};

/// The engine-owned part of a game object: where it is, how it moves and
/// how it looks.
#[derive(Debug, Clone)]
pub struct ObjectState {
    pub transform: Transform2D,
    pub rigid_body: Option<RigidBody>,
    pub collision: CollisionInfo,
    pub renderable: Renderable,
    /// Lower depths draw first. `None` sorts as 0.
    pub draw_depth: Option<f32>,
    pub visible: bool,
    deleted: bool,
}

impl ObjectState {
    pub fn new(transform: Transform2D, renderable: Renderable) -> Self {
        Self {
            transform,
            rigid_body: None,
            collision: CollisionInfo::default(),
            renderable,
            draw_depth: None,
            visible: true,
            deleted: false,
        }
    }

    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = Some(body);
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Soft delete: the object stops updating and drawing at once and is
    /// dropped from its sets on their next clean.
    pub fn set_deleted(&mut self) {
        self.deleted = true;
    }
}

pub trait Updatable {
    fn update(&mut self, _state: &mut ObjectState, _ctx: &mut UpdateContext<'_>) {}
}

pub trait Drawable {
    fn draw(&self, state: &ObjectState, _camera: &Camera, renderer: &mut dyn Renderer) {
        draw_renderable(state, renderer);
    }
}

/// Per-entity game logic. `class` is the name queries match against.
pub trait Behavior: Updatable + Drawable + Any {
    fn class(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

pub fn draw_renderable(state: &ObjectState, renderer: &mut dyn Renderer) {
    if state.visible && state.renderable != Renderable::Hidden {
        renderer.draw(&state.transform, &state.renderable);
    }
}

pub struct GameObject {
    pub state: ObjectState,
    behavior: Box<dyn Behavior>,
}

impl GameObject {
    pub fn new<B: Behavior>(state: ObjectState, behavior: B) -> Self {
        Self {
            state,
            behavior: Box::new(behavior),
        }
    }

    pub fn class(&self) -> &'static str {
        self.behavior.class()
    }

    pub fn is_class(&self, class: &str) -> bool {
        self.behavior.class() == class
    }

    /// The concrete behaviour, when it is a `B`.
    pub fn behavior<B: Behavior>(&self) -> Option<&B> {
        self.behavior.as_any().downcast_ref::<B>()
    }

    pub fn transform(&self) -> &Transform2D {
        &self.state.transform
    }

    pub fn rigid_body(&self) -> Option<&RigidBody> {
        self.state.rigid_body.as_ref()
    }

    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    pub fn set_deleted(&mut self) {
        self.state.set_deleted();
    }

    pub fn draw_depth(&self) -> f32 {
        self.state.draw_depth.unwrap_or(0.0)
    }

    pub fn set_draw_depth(&mut self, depth: f32) {
        self.state.draw_depth = Some(depth);
    }

    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.state.is_deleted() {
            return;
        }
        self.behavior.update(&mut self.state, ctx);
    }

    pub fn draw(&self, camera: &Camera, renderer: &mut dyn Renderer) {
        if self.state.is_deleted() {
            return;
        }
        self.behavior.draw(&self.state, camera, renderer);
    }
}

impl HasRigidBody for GameObject {
    fn body_mut(&mut self, entity: Entity) -> Option<BodyMut<'_>> {
        let state = &mut self.state;
        let body = state.rigid_body.as_mut()?;
        Some(BodyMut {
            entity,
            transform: &mut state.transform,
            body,
            collision: &mut state.collision,
        })
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("class", &self.class())
            .field("state", &self.state)
            .finish()
    }
}
