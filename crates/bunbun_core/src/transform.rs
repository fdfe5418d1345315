use cgmath::Vector2;

/// Position, size and rotation of one game object.
///
/// Position is the center of the object. A rigid body never keeps its own
/// copy; the physics pass borrows the transform next to the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2D {
    pub position: Vector2<f32>,
    pub size: Vector2<f32>,
    pub rotation_radians: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vector2::new(0.0, 0.0),
            size: Vector2::new(1.0, 1.0),
            rotation_radians: 0.0,
        }
    }
}

impl Transform2D {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            size: Vector2::new(width, height),
            rotation_radians: 0.0,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vector2::new(x, y);
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position += Vector2::new(dx, dy);
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vector2::new(width, height);
    }

    pub fn rotate_degrees(&mut self, degrees: f32) {
        self.rotation_radians += degrees.to_radians();
    }

    pub fn half_size(&self) -> Vector2<f32> {
        Vector2::new(self.size.x.abs() * 0.5, self.size.y.abs() * 0.5)
    }

    /// Axis-aligned overlap of the two transforms' boxes. Used by behaviours
    /// for trigger-style checks that do not go through the physics pass.
    pub fn overlaps(&self, other: &Transform2D) -> bool {
        let a = self.half_size();
        let b = other.half_size();
        (self.position.x - other.position.x).abs() < a.x + b.x
            && (self.position.y - other.position.y).abs() < a.y + b.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict_on_touching_edges() {
        let a = Transform2D::new(0.0, 0.0, 2.0, 2.0);
        let touching = Transform2D::new(2.0, 0.0, 2.0, 2.0);
        let inside = Transform2D::new(1.5, 0.5, 2.0, 2.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn rotate_accumulates_in_radians() {
        let mut t = Transform2D::default();
        t.rotate_degrees(90.0);
        t.rotate_degrees(90.0);
        assert!((t.rotation_radians - std::f32::consts::PI).abs() < 1e-6);
    }
}
