//! Error types for sqltpl

use thiserror::Error;

/// Result type alias for template operations
pub type TplResult<T> = Result<T, TplError>;

/// Error types for query template rendering
#[derive(Debug, Error)]
pub enum TplError {
    /// The argument matched against a placeholder has a runtime type
    /// outside that placeholder's accepted set
    #[error("Invalid argument type: {placeholder} does not accept {found}")]
    InvalidArgumentType {
        placeholder: &'static str,
        found: &'static str,
    },

    /// The template contains more placeholders than supplied arguments
    #[error("Insufficient arguments: placeholder #{needed} has no argument ({supplied} supplied)")]
    InsufficientArguments { needed: usize, supplied: usize },
}

impl TplError {
    /// Create an invalid-argument-type error
    pub fn invalid_type(placeholder: &'static str, found: &'static str) -> Self {
        Self::InvalidArgumentType { placeholder, found }
    }

    /// Check if this is an invalid-argument-type error
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, Self::InvalidArgumentType { .. })
    }

    /// Check if this is an insufficient-arguments error
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientArguments { .. })
    }
}
