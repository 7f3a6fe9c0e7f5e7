//! Configuration for the Kiln renderer

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KilnError, Result};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KilnConfig {
    /// Tessellation, text and resource bounds
    pub renderer: RendererConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Renderer tuning and resource bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Angular segments per quarter-circle corner; trades smoothness for fill-rate
    pub arc_segments: u32,
    /// Point size at which text is shaped; draws scale by `font_size / text_reference_size`
    pub text_reference_size: f32,
    /// Bytes in the text scratch buffer, terminator included
    pub text_scratch_capacity: usize,
    /// Maximum number of fonts that can be registered
    pub font_capacity: usize,
}

impl RendererConfig {
    pub const DEFAULT_ARC_SEGMENTS: u32 = 8;
    pub const DEFAULT_TEXT_REFERENCE_SIZE: f32 = 30.0;
    pub const DEFAULT_TEXT_SCRATCH_CAPACITY: usize = 4096;
    pub const DEFAULT_FONT_CAPACITY: usize = 8;

    /// Check the bounds the renderer relies on
    pub fn validate(&self) -> Result<()> {
        if self.arc_segments == 0 {
            return Err(KilnError::configuration("arc_segments must be at least 1"));
        }
        if !(self.text_reference_size.is_finite() && self.text_reference_size > 0.0) {
            return Err(KilnError::configuration(format!(
                "text_reference_size must be positive, got {}",
                self.text_reference_size
            )));
        }
        if self.text_scratch_capacity < 2 {
            return Err(KilnError::configuration(
                "text_scratch_capacity must hold at least one byte and a terminator",
            ));
        }
        if self.font_capacity == 0 {
            return Err(KilnError::configuration("font_capacity must be at least 1"));
        }
        // Font ids are i32 with 0 and -1 reserved.
        if self.font_capacity > i32::MAX as usize {
            return Err(KilnError::configuration("font_capacity exceeds the font id range"));
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            arc_segments: Self::DEFAULT_ARC_SEGMENTS,
            text_reference_size: Self::DEFAULT_TEXT_REFERENCE_SIZE,
            text_scratch_capacity: Self::DEFAULT_TEXT_SCRATCH_CAPACITY,
            font_capacity: Self::DEFAULT_FONT_CAPACITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level, e.g. "info" or "debug"
    pub level: String,
    /// Enabled categories; `None` enables all of them
    pub categories: Option<Vec<String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            categories: None,
        }
    }
}

impl KilnConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: KilnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.renderer.validate()?;
        self.logging.level.parse::<crate::logging::LogLevel>()?;
        Ok(())
    }
}
