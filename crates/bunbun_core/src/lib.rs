mod entity;
mod transform;

pub mod physics_2d;

pub use entity::Entity;
pub use transform::Transform2D;
