use cgmath::{InnerSpace, Matrix4, Point3, Vector2, Vector3};
use serde::Deserialize;

use crate::description::CameraDescription;
use crate::services::{CameraView, Color, Renderer};

const SNAP_DISTANCE: f32 = 1e-4;

/// Exponential smoothing of the camera center towards its target.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInterpolation {
    /// Fraction of the remaining distance covered per update, in (0, 1].
    pub smoothing: f32,
    /// Longest step per update, in world units.
    pub max_step: f32,
}

/// Orthographic 2D camera looking at `center`, `width` world units across,
/// drawn into a pixel `viewport`.
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,
    center: Vector2<f32>,
    target: Vector2<f32>,
    width: f32,
    viewport: [i32; 4],
    background: Color,
    interpolation: Option<CameraInterpolation>,
    eye_z: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(name: &str, center: [f32; 2], width: f32, viewport: [i32; 4]) -> Self {
        let center = Vector2::new(center[0], center[1]);
        Self {
            name: name.to_string(),
            center,
            target: center,
            width,
            viewport,
            background: [0.8, 0.8, 0.8, 1.0],
            interpolation: None,
            eye_z: 10.0,
            near: 0.0,
            far: 1000.0,
        }
    }

    pub fn from_description(desc: &CameraDescription) -> Self {
        let mut camera = Self::new(&desc.name, desc.center, desc.width, desc.viewport);
        camera.background = desc.background;
        camera.interpolation = desc.interpolation;
        camera
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn center(&self) -> Vector2<f32> {
        self.center
    }

    pub fn target(&self) -> Vector2<f32> {
        self.target
    }

    /// Where the camera should head; reached over several updates when
    /// interpolation is configured.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vector2::new(x, y);
    }

    /// Jump straight to `(x, y)`.
    pub fn set_center(&mut self, x: f32, y: f32) {
        self.center = Vector2::new(x, y);
        self.target = self.center;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// World height, derived from the viewport aspect ratio.
    pub fn height(&self) -> f32 {
        let [_, _, w, h] = self.viewport;
        if w <= 0 {
            return self.width;
        }
        self.width * h as f32 / w as f32
    }

    pub fn viewport(&self) -> [i32; 4] {
        self.viewport
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn interpolation(&self) -> Option<CameraInterpolation> {
        self.interpolation
    }

    pub fn configure_interpolation(&mut self, smoothing: f32, max_step: f32) {
        debug_assert!(smoothing > 0.0 && smoothing <= 1.0);
        self.interpolation = Some(CameraInterpolation {
            smoothing,
            max_step,
        });
    }

    pub fn update(&mut self) {
        let Some(lerp) = self.interpolation else {
            self.center = self.target;
            return;
        };

        let remaining = self.target - self.center;
        if remaining.magnitude() <= SNAP_DISTANCE {
            self.center = self.target;
            return;
        }

        let mut step = remaining * lerp.smoothing;
        let length = step.magnitude();
        if length > lerp.max_step {
            step *= lerp.max_step / length;
        }
        self.center += step;
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        let half_w = self.width * 0.5;
        let half_h = self.height() * 0.5;

        // view space is already centered on the camera
        let eye = Point3::new(self.center.x, self.center.y, self.eye_z);
        let target = Point3::new(self.center.x, self.center.y, 0.0);
        let view = Matrix4::look_at_rh(eye, target, Vector3::unit_y());
        let proj = cgmath::ortho(-half_w, half_w, -half_h, half_h, self.near, self.far);

        proj * view
    }

    pub fn setup_view_projection(&self, renderer: &mut dyn Renderer) {
        renderer.begin_camera(&CameraView {
            name: &self.name,
            viewport: self.viewport,
            background: self.background,
            view_projection: self.view_projection_matrix(),
        });
    }

    /// Converts a cursor position in window pixels (origin top left) into
    /// world coordinates.
    pub fn screen_to_world(&self, pixel: [f32; 2], window_height: f32) -> Vector2<f32> {
        let [vx, vy, vw, vh] = self.viewport.map(|v| v as f32);
        // viewport y counts from the bottom of the window
        let local_x = pixel[0] - vx;
        let local_y = (window_height - pixel[1]) - vy;

        let units_per_pixel = self.width / vw.max(1.0);
        let offset_x = local_x - vw * 0.5;
        let offset_y = local_y - vh * 0.5;

        Vector2::new(
            self.center.x + offset_x * units_per_pixel,
            self.center.y + offset_y * units_per_pixel,
        )
    }
}
