//! Node construction errors.

use thiserror::Error;

/// Errors raised while coercing dump attributes into a [`Node`](crate::Node).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// Bounds were neither a 4-tuple nor a `[L,T][R,B]` string.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// An integer attribute held a non-numeric value.
    #[error("Invalid integer for {field}: {value}")]
    InvalidInteger { field: String, value: String },

    /// An attribute had a JSON shape that cannot be coerced.
    #[error("Invalid attribute {field}: {message}")]
    InvalidAttribute { field: String, message: String },
}
