//! Kiln - render-command interpreter for handheld GPUs
//!
//! Kiln takes the flat, ordered list of render commands a retained-mode layout
//! engine produces each frame and turns it into the draw calls of a small GPU:
//! rectangles, triangles, quads, textures, text and a hardware scissor.

pub use kiln_core;
pub use kiln_renderer;

use kiln_core::{KilnConfig, Result};
use kiln_renderer::{Renderer, TextShaper};

/// Unified prelude module that exports all commonly used types
pub mod prelude {
    pub use kiln_core::prelude::*;
    pub use kiln_core::types::{BorderSide, CornerRadius};
    pub use kiln_renderer::prelude::*;
    pub use kiln_renderer::{RecordedFont, RecordedImage, RecordingBackend, RecordingTarget};
}

/// Initialize logging from `config` and build a renderer for shaper `S`
pub fn init<S: TextShaper>(config: &KilnConfig) -> Result<Renderer<S>> {
    kiln_core::init(config)?;
    Renderer::new(config.renderer.clone())
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
