use cgmath::{InnerSpace, Vector2};

use crate::physics_2d::{NormalizeZero, Point2D, Shape2D, Unit, Vector2D, AABB};
use crate::Entity;

/// Narrow-phase result for an ordered pair `(a, b)`.
///
/// `normal` is unit length and points from `a` towards `b`; `depth` is the
/// overlap along it and always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vector2D,
    pub depth: Unit,
}

/// What a physics object collided with during the last pass.
///
/// A zero normal means no contact. Reset at the start of every pass, so a
/// behaviour reading it always sees the most recent step only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub normal: Vector2D,
    pub other: Option<Entity>,
}

impl Default for CollisionInfo {
    fn default() -> Self {
        Self {
            normal: Vector2D::new(0.0, 0.0),
            other: None,
        }
    }
}

impl CollisionInfo {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, normal: Vector2D, other: Entity) {
        self.normal = normal;
        self.other = Some(other);
    }

    pub fn is_colliding(&self) -> bool {
        self.other.is_some() && (self.normal.x != 0.0 || self.normal.y != 0.0)
    }
}

/// Scale `v` so its largest component has magnitude one. Zero stays zero.
pub fn normalize_max_component(v: Vector2D) -> Vector2D {
    let largest = v.x.abs().max(v.y.abs());
    if largest <= std::f32::EPSILON {
        return Vector2D::new(0.0, 0.0);
    }
    v / largest
}

/// Shape-pair dispatch. Returns `None` when the shapes do not overlap.
pub fn collide(a: &Shape2D, a_pos: Point2D, b: &Shape2D, b_pos: Point2D) -> Option<Contact> {
    match (a, b) {
        (Shape2D::Circle { radius: ra }, Shape2D::Circle { radius: rb }) => {
            circle_circle(a_pos, *ra, b_pos, *rb)
        }
        (Shape2D::Rectangle { half_extents }, Shape2D::Circle { radius }) => {
            rectangle_circle(a_pos, *half_extents, b_pos, *radius)
        }
        (Shape2D::Circle { radius }, Shape2D::Rectangle { half_extents }) => {
            rectangle_circle(b_pos, *half_extents, a_pos, *radius).map(|c| Contact {
                normal: -c.normal,
                depth: c.depth,
            })
        }
        (Shape2D::Rectangle { .. }, Shape2D::Rectangle { .. }) => {
            let mtv = compute_mtv(&a.compute_aabb(a_pos), &b.compute_aabb(b_pos))?;
            let depth = mtv.magnitude();
            Some(Contact {
                normal: mtv.normalize_to_zero(),
                depth,
            })
        }
    }
}

fn circle_circle(a_pos: Point2D, ra: Unit, b_pos: Point2D, rb: Unit) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let reach = ra + rb;
    let dist2 = delta.magnitude2();
    if dist2 >= reach * reach {
        return None;
    }

    let dist = dist2.sqrt();
    if dist <= std::f32::EPSILON {
        // coincident centers have no direction; push along +y
        return Some(Contact {
            normal: Vector2D::unit_y(),
            depth: reach,
        });
    }
    Some(Contact {
        normal: delta / dist,
        depth: reach - dist,
    })
}

fn rectangle_circle(
    rect_pos: Point2D,
    half: Vector2<Unit>,
    circle_pos: Point2D,
    radius: Unit,
) -> Option<Contact> {
    let d = circle_pos - rect_pos;
    let closest = Vector2D::new(d.x.clamp(-half.x, half.x), d.y.clamp(-half.y, half.y));

    if closest == d {
        // center inside the rectangle: leave through the nearest face
        let pen_x = half.x - d.x.abs();
        let pen_y = half.y - d.y.abs();
        let sign = |v: Unit| if v < 0.0 { -1.0 } else { 1.0 };
        return Some(if pen_x < pen_y {
            Contact {
                normal: Vector2D::new(sign(d.x), 0.0),
                depth: radius + pen_x,
            }
        } else {
            Contact {
                normal: Vector2D::new(0.0, sign(d.y)),
                depth: radius + pen_y,
            }
        });
    }

    let outside = d - closest;
    let dist2 = outside.magnitude2();
    if dist2 >= radius * radius {
        return None;
    }
    let dist = dist2.sqrt();
    Some(Contact {
        normal: outside / dist,
        depth: radius - dist,
    })
}

/// Minimum translation vector that moves `b` out of `a`, pointing from `a`
/// towards `b`.
fn compute_mtv(a: &AABB, b: &AABB) -> Option<Vector2D> {
    let dx1 = b.max.x - a.min.x; // overlap if b is to the left
    let dx2 = a.max.x - b.min.x; // overlap if b is to the right
    let dy1 = b.max.y - a.min.y; // overlap if b is below
    let dy2 = a.max.y - b.min.y; // overlap if b is above

    let overlap_x = dx1.min(dx2);
    let overlap_y = dy1.min(dy2);

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    // Resolve along the smaller axis (fastest way out)
    if overlap_x < overlap_y {
        let direction = if dx1 < dx2 { -1.0 } else { 1.0 };
        Some(Vector2D::new(direction * overlap_x, 0.0))
    } else {
        let direction = if dy1 < dy2 { -1.0 } else { 1.0 };
        Some(Vector2D::new(0.0, direction * overlap_y))
    }
}
