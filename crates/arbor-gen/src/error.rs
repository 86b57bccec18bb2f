//! Generator error types.

use thiserror::Error;

/// Invalid generation requests. Raised before any random draw, so a
/// rejected request never advances the caller's random source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// `max_depth` of zero; the leaf ramp divides by it.
    #[error("invalid generation request: max depth must be at least 1")]
    ZeroDepth,

    #[error("invalid generation request: no variable names given")]
    NoVariables,

    /// A variable name collides with the sequence name.
    #[error("invalid generation request: variable name `{0}` is reserved")]
    ReservedVariable(String),

    /// Sort given by name is not `Expr`, `Bool` or `Stmt`.
    #[error("invalid generation request: unknown sort `{0}`")]
    UnknownSort(String),

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
}

/// Generator result type alias.
pub type GenResult<T> = Result<T, GenError>;
