//! Render commands emitted by the layout engine
//!
//! A frame's commands borrow their text and image handles from the layout
//! engine for lifetime `'a`; nothing here outlives the frame that produced it.

use glam::Vec2;
use kiln_core::types::{BorderSide, BoundingBox, Color, CornerRadius, Dimensions};

use crate::fonts::FontId;

/// One instruction in a frame's ordered command sequence
#[derive(Debug, Clone)]
pub struct RenderCommand<'a, I> {
    pub bounding_box: BoundingBox,
    pub config: RenderCommandConfig<'a, I>,
}

/// Per-kind payload of a [`RenderCommand`]
#[derive(Debug, Clone)]
pub enum RenderCommandConfig<'a, I> {
    Rectangle(RectangleConfig),
    Border(BorderConfig),
    Text(TextConfig<'a>),
    Image(ImageConfig<'a, I>),
    /// Clip subsequent commands to the bounding box
    ScissorStart,
    /// Stop clipping
    ScissorEnd,
    /// A command tag decoded at the layout-engine boundary that this renderer
    /// has no drawing for. Rendering one is fatal.
    Unrecognized(u8),
}

impl<I> RenderCommandConfig<'_, I> {
    pub fn name(&self) -> &'static str {
        match self {
            RenderCommandConfig::Rectangle(_) => "rectangle",
            RenderCommandConfig::Border(_) => "border",
            RenderCommandConfig::Text(_) => "text",
            RenderCommandConfig::Image(_) => "image",
            RenderCommandConfig::ScissorStart => "scissor_start",
            RenderCommandConfig::ScissorEnd => "scissor_end",
            RenderCommandConfig::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Filled, optionally rounded rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectangleConfig {
    pub color: Color,
    pub corner_radius: CornerRadius,
}

/// Border drawn inside the bounding box, one width and color per edge
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderConfig {
    pub left: BorderSide,
    pub right: BorderSide,
    pub top: BorderSide,
    pub bottom: BorderSide,
    pub corner_radius: CornerRadius,
}

impl BorderConfig {
    /// Same width and color on all four edges, square corners
    pub fn uniform(width: f32, color: Color) -> Self {
        let side = BorderSide::new(width, color);
        Self {
            left: side,
            right: side,
            top: side,
            bottom: side,
            corner_radius: CornerRadius::ZERO,
        }
    }

    pub fn with_corner_radius(mut self, corner_radius: CornerRadius) -> Self {
        self.corner_radius = corner_radius;
        self
    }
}

/// A run of text. The bytes are not null-terminated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextConfig<'a> {
    pub text: &'a [u8],
    pub font_id: FontId,
    pub font_size: f32,
    pub color: Color,
}

/// A pre-loaded image stretched over the bounding box
#[derive(Debug)]
pub struct ImageConfig<'a, I> {
    /// `None` when the layout engine has no resource for this element; drawing is skipped
    pub image: Option<&'a I>,
    pub source_dimensions: Dimensions,
}

impl<I> ImageConfig<'_, I> {
    /// Per-axis scale that stretches the source image over `bounds`.
    ///
    /// `None` when the source has no area and there is nothing to stretch.
    pub fn stretch_to(&self, bounds: &BoundingBox) -> Option<Vec2> {
        let source = self.source_dimensions;
        if source.width <= 0.0 || source.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(bounds.width / source.width, bounds.height / source.height))
    }
}

impl<I> Clone for ImageConfig<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for ImageConfig<'_, I> {}

impl<'a, I> RenderCommand<'a, I> {
    pub fn rectangle(bounding_box: BoundingBox, color: Color, corner_radius: CornerRadius) -> Self {
        Self {
            bounding_box,
            config: RenderCommandConfig::Rectangle(RectangleConfig {
                color,
                corner_radius,
            }),
        }
    }

    pub fn border(bounding_box: BoundingBox, border: BorderConfig) -> Self {
        Self {
            bounding_box,
            config: RenderCommandConfig::Border(border),
        }
    }

    pub fn text(
        bounding_box: BoundingBox,
        text: &'a [u8],
        font_id: FontId,
        font_size: f32,
        color: Color,
    ) -> Self {
        Self {
            bounding_box,
            config: RenderCommandConfig::Text(TextConfig {
                text,
                font_id,
                font_size,
                color,
            }),
        }
    }

    pub fn image(bounding_box: BoundingBox, image: Option<&'a I>, source_dimensions: Dimensions) -> Self {
        Self {
            bounding_box,
            config: RenderCommandConfig::Image(ImageConfig {
                image,
                source_dimensions,
            }),
        }
    }

    pub fn scissor_start(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            config: RenderCommandConfig::ScissorStart,
        }
    }

    pub fn scissor_end() -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            config: RenderCommandConfig::ScissorEnd,
        }
    }

    pub fn unrecognized(bounding_box: BoundingBox, tag: u8) -> Self {
        Self {
            bounding_box,
            config: RenderCommandConfig::Unrecognized(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_border() {
        let border = BorderConfig::uniform(4.0, Color::RED).with_corner_radius(CornerRadius::all(16.0));
        assert_eq!(border.left, border.bottom);
        assert_eq!(border.top.width, 4.0);
        assert_eq!(border.corner_radius.top_right, 16.0);
    }

    #[test]
    fn test_command_names() {
        let text: RenderCommand<'_, ()> = RenderCommand::text(
            BoundingBox::default(),
            b"hello",
            FontId::SYSTEM,
            16.0,
            Color::WHITE,
        );
        assert_eq!(text.config.name(), "text");
        assert_eq!(RenderCommand::<()>::scissor_end().config.name(), "scissor_end");
        assert_eq!(
            RenderCommand::<()>::unrecognized(BoundingBox::default(), 9).config.name(),
            "unrecognized"
        );
    }

    #[test]
    fn test_image_stretch() {
        let image = ImageConfig::<()> {
            image: None,
            source_dimensions: Dimensions::new(64.0, 32.0),
        };
        assert_eq!(
            image.stretch_to(&BoundingBox::new(5.0, 5.0, 32.0, 64.0)),
            Some(Vec2::new(0.5, 2.0))
        );

        let empty = ImageConfig::<()> {
            image: None,
            source_dimensions: Dimensions::new(0.0, 32.0),
        };
        assert_eq!(empty.stretch_to(&BoundingBox::new(0.0, 0.0, 10.0, 10.0)), None);
    }
}
