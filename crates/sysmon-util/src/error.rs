//! Error types for the monitoring helpers.

/// Result type alias for sysmon-util operations.
pub type Result<T> = std::result::Result<T, SysmonError>;

/// Main error type for sysmon-util.
///
/// The readers in [`crate::read`] return the source's `std::io::Error`
/// directly and never produce this type.
#[derive(Debug, thiserror::Error)]
pub enum SysmonError {
    /// Text does not start with a dotted-integer version
    #[error("Invalid version string format: {input:?}")]
    InvalidFormat { input: String },

    /// Two versions hold an integer and a suffix at the same position
    #[error("Cannot compare versions {left} and {right}: component {index} mixes a number and a suffix")]
    Comparison {
        index: usize,
        left: String,
        right: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SysmonError {
    /// Create a new invalid format error
    pub fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
        }
    }

    /// Create a new comparison error
    pub fn comparison(index: usize, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Comparison {
            index,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a new config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is an invalid format error
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Check if this is a comparison error
    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Comparison { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
