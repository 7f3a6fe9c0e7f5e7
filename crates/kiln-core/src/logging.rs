//! Logging for the Kiln renderer
//!
//! Structured logging on top of `tracing`, with per-category gating so the
//! per-frame paths (geometry, text) stay quiet unless asked for.

use std::str::FromStr;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::KilnError;

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = KilnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(KilnError::configuration(format!("unknown log level '{}'", other))),
        }
    }
}

/// Categories for organizing log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Core,
    Renderer,
    Geometry,
    Clip,
    Text,
    Fonts,
}

impl LogCategory {
    pub const ALL: [LogCategory; 6] = [
        LogCategory::Core,
        LogCategory::Renderer,
        LogCategory::Geometry,
        LogCategory::Clip,
        LogCategory::Text,
        LogCategory::Fonts,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Core => "CORE",
            LogCategory::Renderer => "RENDERER",
            LogCategory::Geometry => "GEOMETRY",
            LogCategory::Clip => "CLIP",
            LogCategory::Text => "TEXT",
            LogCategory::Fonts => "FONTS",
        }
    }

    /// Parse a category name as written in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Global logger instance
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger configuration and state
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    enabled_categories: Vec<LogCategory>,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            enabled_categories: LogCategory::ALL.to_vec(),
        }
    }

    /// Build a logger from the logging section of the configuration.
    ///
    /// Unknown category names are rejected rather than silently dropped.
    pub fn from_config(config: &LoggingConfig) -> crate::Result<Self> {
        let level = config.level.parse()?;
        let categories = match &config.categories {
            Some(names) => names
                .iter()
                .map(|name| {
                    LogCategory::from_name(name).ok_or_else(|| {
                        KilnError::configuration(format!("unknown log category '{}'", name))
                    })
                })
                .collect::<crate::Result<Vec<_>>>()?,
            None => LogCategory::ALL.to_vec(),
        };
        Ok(Self::new(level).with_categories(categories))
    }

    pub fn with_categories(mut self, categories: Vec<LogCategory>) -> Self {
        self.enabled_categories = categories;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn is_enabled(&self, level: LogLevel, category: LogCategory) -> bool {
        level >= self.level && self.enabled_categories.contains(&category)
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn enable_category(&mut self, category: LogCategory) {
        if !self.enabled_categories.contains(&category) {
            self.enabled_categories.push(category);
        }
    }

    pub fn disable_category(&mut self, category: LogCategory) {
        self.enabled_categories.retain(|&c| c != category);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

/// Convenience macros for structured logging
#[macro_export]
macro_rules! kiln_trace {
    ($category:expr, $($arg:tt)*) => {
        if $crate::logging::get_logger().is_enabled($crate::logging::LogLevel::Trace, $category) {
            $crate::__tracing::trace!(target: $category.as_str(), $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! kiln_debug {
    ($category:expr, $($arg:tt)*) => {
        if $crate::logging::get_logger().is_enabled($crate::logging::LogLevel::Debug, $category) {
            $crate::__tracing::debug!(target: $category.as_str(), $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! kiln_info {
    ($category:expr, $($arg:tt)*) => {
        if $crate::logging::get_logger().is_enabled($crate::logging::LogLevel::Info, $category) {
            $crate::__tracing::info!(target: $category.as_str(), $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! kiln_warn {
    ($category:expr, $($arg:tt)*) => {
        if $crate::logging::get_logger().is_enabled($crate::logging::LogLevel::Warn, $category) {
            $crate::__tracing::warn!(target: $category.as_str(), $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! kiln_error {
    ($category:expr, $($arg:tt)*) => {
        if $crate::logging::get_logger().is_enabled($crate::logging::LogLevel::Error, $category) {
            $crate::__tracing::error!(target: $category.as_str(), $($arg)*);
        }
    };
}

/// Initialize the logging system with the default configuration
pub fn init() -> crate::Result<()> {
    init_with(&LoggingConfig::default())
}

/// Initialize the logging system.
///
/// `RUST_LOG` overrides the configured level for the subscriber filter.
/// Calling this more than once keeps the first subscriber and logger.
pub fn init_with(config: &LoggingConfig) -> crate::Result<()> {
    let logger = Logger::from_config(config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logger.level().as_str()));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }

    let _ = LOGGER.set(logger);
    Ok(())
}

/// Get the global logger instance, falling back to the defaults before `init`
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error > LogLevel::Warn);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Debug > LogLevel::Trace);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_category_gating() {
        let mut logger = Logger::new(LogLevel::Warn);
        assert!(!logger.is_enabled(LogLevel::Debug, LogCategory::Renderer));
        assert!(logger.is_enabled(LogLevel::Error, LogCategory::Renderer));

        logger.disable_category(LogCategory::Renderer);
        assert!(!logger.is_enabled(LogLevel::Error, LogCategory::Renderer));

        logger.enable_category(LogCategory::Renderer);
        logger.set_level(LogLevel::Trace);
        assert!(logger.is_enabled(LogLevel::Trace, LogCategory::Renderer));
    }

    #[test]
    fn test_logger_from_config() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            categories: Some(vec!["fonts".to_string(), "Clip".to_string()]),
        };
        let logger = Logger::from_config(&config).unwrap();
        assert!(logger.is_enabled(LogLevel::Debug, LogCategory::Fonts));
        assert!(logger.is_enabled(LogLevel::Debug, LogCategory::Clip));
        assert!(!logger.is_enabled(LogLevel::Error, LogCategory::Geometry));

        let bad = LoggingConfig {
            level: "info".to_string(),
            categories: Some(vec!["audio".to_string()]),
        };
        assert!(Logger::from_config(&bad).is_err());
    }
}
