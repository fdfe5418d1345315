use cgmath::{InnerSpace, Vector2};

use crate::Transform2D;

pub type Unit = f32;
pub type TimeUnit = f32;
pub type Point2D = Vector2<Unit>;
pub type Vector2D = Vector2<Unit>;
pub type HalfExtents = Vector2<Unit>;

pub const DEFAULT_GRAVITY: Vector2D = Vector2D { x: 0.0, y: -20.0 };
pub const DEFAULT_RESTITUTION: Unit = 0.2;
pub const DEFAULT_FRICTION: Unit = 0.8;

pub trait NormalizeZero {
    fn normalize_to_zero(self) -> Self;
}

impl NormalizeZero for Vector2D {
    fn normalize_to_zero(self) -> Self {
        if self.magnitude2() > std::f32::EPSILON {
            self.normalize()
        } else {
            Vector2D::new(0.0, 0.0)
        }
    }
}

/// Collision shape, centered on the owning transform's position.
///
/// Shapes are axis-aligned: the transform's rotation is visual only.
/// Radii and half extents must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape2D {
    Circle { radius: Unit },
    Rectangle { half_extents: HalfExtents },
}

impl Shape2D {
    pub fn compute_aabb(&self, center: Point2D) -> AABB {
        let half = self.half_extents();
        AABB {
            min: center - half,
            max: center + half,
        }
    }

    pub fn half_extents(&self) -> Vector2<f32> {
        match *self {
            Shape2D::Rectangle { half_extents } => half_extents,
            Shape2D::Circle { radius } => Vector2 {
                x: radius,
                y: radius,
            },
        }
    }

    /// Same kind of shape fitted to a `width` x `height` box. Circles take
    /// the width as their diameter.
    pub fn resized(&self, width: Unit, height: Unit) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative shape size");
        match *self {
            Shape2D::Circle { .. } => Shape2D::Circle {
                radius: width * 0.5,
            },
            Shape2D::Rectangle { .. } => Shape2D::Rectangle {
                half_extents: Vector2::new(width * 0.5, height * 0.5),
            },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub min: Point2D,
    pub max: Point2D,
}

impl AABB {
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self {
            min: Point2D::new(0.0, 0.0),
            max: Point2D::new(0.0, 0.0),
        }
    }
}

/// Physical state of a game object. The position lives in the object's
/// [`Transform2D`]; the body only carries kinematics and material.
///
/// A mass of zero means immovable: the inverse mass is zero, the body is
/// never integrated and never pushed by the resolver.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub shape: Shape2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub angular_velocity: Unit,
    pub drag: Unit,
    pub friction: Unit,
    pub restitution: Unit,
    mass: Unit,
    inv_mass: Unit,
    user_sets_state: bool,
}

impl RigidBody {
    pub fn new(shape: Shape2D) -> Self {
        Self {
            shape,
            velocity: Vector2D::new(0.0, 0.0),
            acceleration: DEFAULT_GRAVITY,
            angular_velocity: 0.0,
            drag: 0.0,
            friction: DEFAULT_FRICTION,
            restitution: DEFAULT_RESTITUTION,
            mass: 1.0,
            inv_mass: 1.0,
            user_sets_state: false,
        }
    }

    pub fn circle(radius: Unit) -> Self {
        debug_assert!(radius >= 0.0, "negative circle radius");
        Self::new(Shape2D::Circle { radius })
    }

    pub fn rectangle(width: Unit, height: Unit) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative rectangle size");
        Self::new(Shape2D::Rectangle {
            half_extents: Vector2::new(width * 0.5, height * 0.5),
        })
    }

    pub fn with_mass(mut self, mass: Unit) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn set_mass(&mut self, mass: Unit) {
        debug_assert!(mass >= 0.0, "negative mass");
        self.mass = mass;
        self.inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
    }

    pub fn mass(&self) -> Unit {
        self.mass
    }

    pub fn inv_mass(&self) -> Unit {
        self.inv_mass
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn set_velocity(&mut self, vx: Unit, vy: Unit) {
        self.velocity = Vector2D::new(vx, vy);
    }

    pub fn set_shape_size(&mut self, width: Unit, height: Unit) {
        self.shape = self.shape.resized(width, height);
    }

    /// The owning behaviour already placed the body for this step; the next
    /// physics pass skips integration once and clears the flag.
    pub fn user_sets_state(&mut self) {
        self.user_sets_state = true;
    }

    pub fn is_user_controlled(&self) -> bool {
        self.user_sets_state
    }

    pub fn aabb(&self, position: Point2D) -> AABB {
        self.shape.compute_aabb(position)
    }

    pub fn integrate(&mut self, transform: &mut Transform2D, dt: TimeUnit) {
        if self.user_sets_state {
            self.user_sets_state = false;
            return;
        }
        if self.is_static() {
            return;
        }

        self.velocity += self.acceleration * dt;
        if self.drag > 0.0 {
            self.velocity *= 1.0 / (1.0 + self.drag * dt);
        }
        transform.position += self.velocity * dt;
        transform.rotation_radians += self.angular_velocity * dt;
    }
}
