//! Core functionality for the Kiln renderer
//!
//! This crate provides the types shared between the layout engine boundary and
//! the renderer, together with the error type, logging and configuration.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{KilnConfig, LoggingConfig, RendererConfig};
pub use error::{KilnError, Result};
pub use logging::{LogCategory, LogLevel};
pub use types::{BorderSide, BoundingBox, Color, CornerRadius, Dimensions, Point};

#[doc(hidden)]
pub use tracing as __tracing;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        config::{KilnConfig, RendererConfig},
        error::{KilnError, Result},
        types::{BorderSide, BoundingBox, Color, CornerRadius, Dimensions, Point},
    };
}

/// Framework version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from `config` and announce the core version
pub fn init(config: &KilnConfig) -> Result<()> {
    config.validate()?;
    logging::init_with(&config.logging)?;
    crate::kiln_info!(LogCategory::Core, "Kiln core v{} initialized", VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let mut config = KilnConfig::default();
        config.renderer.arc_segments = 0;
        assert!(init(&config).is_err());
    }
}
