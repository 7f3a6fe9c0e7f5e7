//! Kiln Renderer
//!
//! Interprets a layout engine's per-frame render commands on a handheld GPU
//! that draws solid rectangles, triangles, quads, textures and shaped text.
//!
//! ## Features
//! - Ordered dispatch of rectangle, border, text, image and scissor commands
//! - Rounded rectangles and borders tessellated into backend primitives
//! - Layout-space clip rectangles translated to the hardware scissor
//! - Fixed-capacity font registry with a system-font fallback
//! - Text measurement for the layout engine through a reusable scratch buffer

pub mod backend;
pub mod clip;
pub mod command;
pub mod fonts;
pub mod primitive;
pub mod renderer;
pub mod tessellator;
pub mod text;

// Re-export commonly used types
pub use backend::{Backend, DrawCall, RecordedFont, RecordedImage, RecordingBackend, RecordingTarget, TextShaper};
pub use clip::{Scissor, ScissorRect};
pub use command::{
    BorderConfig, ImageConfig, RectangleConfig, RenderCommand, RenderCommandConfig, TextConfig,
};
pub use fonts::{FontId, FontRegistry};
pub use primitive::{Primitive, PrimitiveBatch};
pub use renderer::{RenderStats, Renderer};
pub use tessellator::{Quadrant, Tessellator};
pub use text::{TextMeasurement, TextScratch};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::backend::{Backend, TextShaper};
    pub use crate::command::{BorderConfig, RenderCommand, RenderCommandConfig};
    pub use crate::fonts::FontId;
    pub use crate::renderer::{RenderStats, Renderer};
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::RendererConfig;

    #[test]
    fn test_default_renderer() {
        let renderer = Renderer::<RecordingBackend>::new(RendererConfig::default()).unwrap();
        assert_eq!(renderer.tessellator().segments(), 8);
        assert_eq!(renderer.fonts().capacity(), 8);
        assert!(renderer.fonts().is_empty());
    }
}
