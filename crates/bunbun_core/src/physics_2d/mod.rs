mod body_2d;
mod collision;
mod physics_world;

pub use body_2d::{
    NormalizeZero, RigidBody, Shape2D, HalfExtents, Point2D, TimeUnit, Unit, Vector2D, AABB,
    DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_RESTITUTION,
};
pub use collision::{collide, normalize_max_component, CollisionInfo, Contact};
pub use physics_world::{BodyMut, CollisionRecord, HasRigidBody, PhysicsConfig, PhysicsWorld};
