//! Evaluation errors for bound operators

use thiserror::Error;

/// Result type for evaluation operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while evaluating a bound operator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Value does not have the type the operator was bound for
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Invalid operand error
    #[error("Invalid operand for {operator}: {message}")]
    InvalidOperand { operator: String, message: String },

    /// Time zone string cannot be parsed
    #[error("Invalid time zone: {zone}")]
    InvalidTimeZone { zone: String },
}

impl ExprError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Create an invalid operand error
    pub fn invalid_operand(operator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOperand {
            operator: operator.into(),
            message: message.into(),
        }
    }
}
