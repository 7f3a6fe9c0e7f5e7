//! The graphics backend seam
//!
//! [`Backend`] is the handheld GPU's native primitive set: solid rectangles,
//! triangles and quads, stretched textures, a single scissor rectangle and
//! text drawn from a shaped layout. [`TextShaper`] is the font collaborator
//! the renderer measures and shapes text with.

use glam::Vec2;
use kiln_core::types::{BoundingBox, Color, Dimensions, Point};
use std::ffi::CStr;

use crate::clip::Scissor;
use crate::primitive::Primitive;

pub mod recording;

pub use recording::{DrawCall, RecordedFont, RecordedImage, RecordedLayout, RecordingBackend, RecordingTarget};

/// Shapes null-terminated text into a reusable layout
pub trait TextShaper {
    /// Opaque font handle produced by the application's font loader
    type Font;
    /// Shaping output, reused across calls
    type TextLayout: Default;

    /// Shape `text` at the reference point size into `layout`, replacing its
    /// previous contents. `None` selects the system font.
    fn shape(&mut self, layout: &mut Self::TextLayout, text: &CStr, font: Option<&Self::Font>);

    /// Unscaled extent of a shaped layout
    fn layout_size(&self, layout: &Self::TextLayout) -> Dimensions;
}

/// Draw calls of the target GPU.
///
/// Calls are issued in command order; later calls paint over earlier ones.
pub trait Backend: TextShaper {
    /// Render target handle (a screen or an offscreen surface)
    type Target;
    /// Pre-loaded image handle
    type Image;

    /// Start a new draw batch on `target`
    fn begin_scene(&mut self, target: &Self::Target);

    /// Install or disable the hardware scissor
    fn set_scissor(&mut self, scissor: Scissor);

    fn draw_rect_solid(&mut self, bounds: BoundingBox, color: Color);

    fn draw_triangle(&mut self, points: [Point; 3], color: Color);

    fn draw_quad(&mut self, points: [Point; 4], color: Color);

    /// Draw `image` at the top-left of `bounds`, scaled per axis by `scale`
    /// so that it exactly covers `bounds`
    fn draw_image(&mut self, image: &Self::Image, bounds: BoundingBox, scale: Vec2);

    /// Draw a shaped layout with its top-left at `origin`, scaled by `scale`
    fn draw_text(&mut self, layout: &Self::TextLayout, origin: Point, scale: f32, color: Color);

    /// Issue the draw call for one tessellated primitive
    fn draw_primitive(&mut self, primitive: &Primitive) {
        match *primitive {
            Primitive::RectSolid { bounds, color } => self.draw_rect_solid(bounds, color),
            Primitive::Triangle { points, color } => self.draw_triangle(points, color),
            Primitive::Quad { points, color } => self.draw_quad(points, color),
        }
    }
}
