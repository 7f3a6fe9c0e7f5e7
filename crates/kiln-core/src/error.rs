//! Error types for the Kiln renderer

use thiserror::Error;

/// Main error type for Kiln operations
#[derive(Debug, Error)]
pub enum KilnError {
    #[error("font registry is full ({capacity} fonts registered)")]
    FontRegistryFull { capacity: usize },

    #[error("unhandled render command: {0}")]
    UnrecognizedCommand(u8),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KilnError {
    /// Create a configuration error from a string
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a backend error from a string
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Whether the caller can carry on after this error.
    ///
    /// Registry exhaustion only costs the caller one font; a command the
    /// renderer does not understand means the command stream cannot be trusted.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnrecognizedCommand(_))
    }
}

/// Result type alias for Kiln operations
pub type Result<T> = std::result::Result<T, KilnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let full = KilnError::FontRegistryFull { capacity: 8 };
        assert_eq!(full.to_string(), "font registry is full (8 fonts registered)");
        assert_eq!(
            KilnError::UnrecognizedCommand(7).to_string(),
            "unhandled render command: 7"
        );
        assert_eq!(
            KilnError::configuration("bad").to_string(),
            "Configuration error: bad"
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(KilnError::FontRegistryFull { capacity: 8 }.is_recoverable());
        assert!(KilnError::backend("lost context").is_recoverable());
        assert!(!KilnError::UnrecognizedCommand(0).is_recoverable());
    }
}
