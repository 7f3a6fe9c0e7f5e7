//! In-memory backend that records every draw call
//!
//! Used for headless frame captures and tests. Text metrics are fixed-advance:
//! every character of a line is `advance` wide and every line is
//! `line_height` tall at the reference point size.

use glam::Vec2;
use kiln_core::types::{BoundingBox, Color, Dimensions, Point};
use kiln_core::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ffi::CStr;

use super::{Backend, TextShaper};
use crate::clip::Scissor;

/// Font handle with fixed per-character metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFont {
    pub name: String,
    pub advance: f32,
    pub line_height: f32,
}

impl RecordedFont {
    pub fn new(name: impl Into<String>, advance: f32, line_height: f32) -> Self {
        Self {
            name: name.into(),
            advance,
            line_height,
        }
    }

    /// Metrics of the built-in font at the default 30pt reference size
    pub fn system() -> Self {
        Self::new("system", 15.0, 30.0)
    }
}

/// Named image handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedImage {
    pub name: String,
    pub dimensions: Dimensions,
}

impl RecordedImage {
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }
}

/// Named render target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingTarget {
    pub name: String,
}

impl RecordingTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Shaped text, reused between runs
#[derive(Debug, Clone, Default)]
pub struct RecordedLayout {
    text: String,
    font: String,
    line_widths: SmallVec<[f32; 4]>,
    line_height: f32,
}

impl RecordedLayout {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn line_count(&self) -> usize {
        self.line_widths.len()
    }

    fn size(&self) -> Dimensions {
        let width = self.line_widths.iter().copied().fold(0.0, f32::max);
        Dimensions::new(width, self.line_height * self.line_widths.len() as f32)
    }
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    BeginScene { target: String },
    Scissor { scissor: Scissor },
    RectSolid { bounds: BoundingBox, color: Color },
    Triangle { points: [Point; 3], color: Color },
    Quad { points: [Point; 4], color: Color },
    Image {
        image: String,
        bounds: BoundingBox,
        /// Stretch applied to the source image
        scale: Vec2,
    },
    Text {
        text: String,
        font: String,
        origin: Point,
        scale: f32,
        color: Color,
        /// Drawn extent, after scaling
        size: Dimensions,
    },
}

impl DrawCall {
    /// Whether this call came out of the tessellator
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            DrawCall::RectSolid { .. } | DrawCall::Triangle { .. } | DrawCall::Quad { .. }
        )
    }
}

/// Backend that keeps an ordered log of draw calls
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    system_font: RecordedFont,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::with_system_font(RecordedFont::system())
    }

    pub fn with_system_font(system_font: RecordedFont) -> Self {
        Self {
            calls: Vec::new(),
            system_font,
        }
    }

    /// Calls recorded so far, in issue order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Hand over the log and start a fresh one
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// The log as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.calls)?)
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper for RecordingBackend {
    type Font = RecordedFont;
    type TextLayout = RecordedLayout;

    fn shape(&mut self, layout: &mut RecordedLayout, text: &CStr, font: Option<&RecordedFont>) {
        let font = font.unwrap_or(&self.system_font);

        layout.text.clear();
        layout.text.push_str(&text.to_string_lossy());
        layout.font.clear();
        layout.font.push_str(&font.name);
        layout.line_height = font.line_height;
        layout.line_widths.clear();
        if !layout.text.is_empty() {
            layout.line_widths.extend(
                layout
                    .text
                    .split('\n')
                    .map(|line| line.chars().count() as f32 * font.advance),
            );
        }
    }

    fn layout_size(&self, layout: &RecordedLayout) -> Dimensions {
        layout.size()
    }
}

impl Backend for RecordingBackend {
    type Target = RecordingTarget;
    type Image = RecordedImage;

    fn begin_scene(&mut self, target: &RecordingTarget) {
        self.calls.push(DrawCall::BeginScene {
            target: target.name.clone(),
        });
    }

    fn set_scissor(&mut self, scissor: Scissor) {
        self.calls.push(DrawCall::Scissor { scissor });
    }

    fn draw_rect_solid(&mut self, bounds: BoundingBox, color: Color) {
        self.calls.push(DrawCall::RectSolid { bounds, color });
    }

    fn draw_triangle(&mut self, points: [Point; 3], color: Color) {
        self.calls.push(DrawCall::Triangle { points, color });
    }

    fn draw_quad(&mut self, points: [Point; 4], color: Color) {
        self.calls.push(DrawCall::Quad { points, color });
    }

    fn draw_image(&mut self, image: &RecordedImage, bounds: BoundingBox, scale: Vec2) {
        self.calls.push(DrawCall::Image {
            image: image.name.clone(),
            bounds,
            scale,
        });
    }

    fn draw_text(&mut self, layout: &RecordedLayout, origin: Point, scale: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: layout.text.clone(),
            font: layout.font.clone(),
            origin,
            scale,
            color,
            size: layout.size().scaled(scale),
        });
    }
}
