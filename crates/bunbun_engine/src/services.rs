use bunbun_assets::AssetPath;
use bunbun_core::Transform2D;
use cgmath::Matrix4;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

pub type Color = [f32; 4];

/// Background music and one-shot cues.
pub trait AudioService {
    fn play_background(&mut self, clip: &AssetPath);
    fn stop_background(&mut self);
    fn is_background_playing(&self) -> bool;
    fn play_cue(&mut self, clip: &AssetPath);
}

/// Keyboard and mouse state for the current frame.
pub trait InputService {
    fn is_key_pressed(&self, key: KeyCode) -> bool;
    /// Went down since the last frame that ran an update.
    fn is_key_clicked(&self, key: KeyCode) -> bool;
    fn is_button_pressed(&self, button: MouseButton) -> bool;
    /// Cursor position in window pixels, y down.
    fn mouse_position(&self) -> [f32; 2];
}

/// Sub-rectangle of a texture, in texels: left, right, bottom, top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureCrop {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl TextureCrop {
    pub fn from_corners(lower_left: [f32; 2], upper_right: [f32; 2]) -> Self {
        Self {
            left: lower_left[0],
            right: upper_right[0],
            bottom: lower_left[1],
            top: upper_right[1],
        }
    }
}

/// What a game object looks like. Drawn centered on its transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    Hidden,
    Rect {
        color: Color,
    },
    Sprite {
        texture: AssetPath,
        color: Color,
        crop: Option<TextureCrop>,
    },
    Text {
        text: String,
        font: AssetPath,
        height: f32,
        color: Color,
    },
}

/// Per-camera state handed to the renderer before a camera's draw calls.
#[derive(Debug, Clone, Copy)]
pub struct CameraView<'a> {
    pub name: &'a str,
    /// x, y, width, height in pixels, origin at the lower left.
    pub viewport: [i32; 4],
    pub background: Color,
    pub view_projection: Matrix4<f32>,
}

pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn begin_camera(&mut self, view: &CameraView<'_>);
    fn draw(&mut self, transform: &Transform2D, renderable: &Renderable);
}

/// Audio backend that only keeps track of what would be playing.
#[derive(Debug, Default)]
pub struct SilentAudio {
    background: Option<AssetPath>,
}

impl AudioService for SilentAudio {
    fn play_background(&mut self, clip: &AssetPath) {
        log::debug!("background music {clip}");
        self.background = Some(clip.clone());
    }

    fn stop_background(&mut self) {
        self.background = None;
    }

    fn is_background_playing(&self) -> bool {
        self.background.is_some()
    }

    fn play_cue(&mut self, clip: &AssetPath) {
        log::debug!("cue {clip}");
    }
}

/// Renderer that draws nothing. Useful headless and in tests.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub draw_calls: usize,
}

impl Renderer for NullRenderer {
    fn clear(&mut self, _color: Color) {
        self.draw_calls = 0;
    }

    fn begin_camera(&mut self, _view: &CameraView<'_>) {}

    fn draw(&mut self, _transform: &Transform2D, _renderable: &Renderable) {
        self.draw_calls += 1;
    }
}
