//! Error types for host value / JSON conversion.

use thiserror::Error;

/// Errors that can occur while converting between host values and JSON.
#[derive(Error, Debug)]
pub enum ParsonError {
    /// The input text was not valid JSON (parse path).
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A host value whose kind has no JSON spelling (stringify path).
    #[error("value of type `{kind}` cannot be represented as JSON")]
    Unrepresentable { kind: &'static str },

    /// NaN and the infinities have no JSON number syntax.
    #[error("non-finite float {0} cannot be represented as JSON")]
    NonFiniteNumber(f64),

    /// Input nested deeper than the configured limit.
    #[error("nesting exceeds the maximum depth of {limit}")]
    RecursionLimitExceeded { limit: usize },

    /// A host function was called with the wrong number of arguments.
    #[error("{function}: expected {expected} argument(s), got {got}")]
    WrongNumberOfArguments {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    /// A host function argument had the wrong dynamic kind.
    #[error("wrong type argument: expected {expected}, got {got}")]
    WrongType {
        expected: &'static str,
        got: &'static str,
    },

    /// No function with this name is registered in the host table.
    #[error("void function: {0}")]
    UnknownFunction(String),
}

/// Convenience alias used throughout parson-core.
pub type Result<T> = std::result::Result<T, ParsonError>;
