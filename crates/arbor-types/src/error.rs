use thiserror::Error;

/// Errors raised while building or decoding trees.
#[derive(Debug, Error)]
pub enum AstError {
    /// Operator symbol outside `+ - > < ==`.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// Sort name other than `Expr`, `Bool` or `Stmt`.
    #[error("unknown sort: {0}")]
    UnknownSort(String),

    /// Malformed JSON tree.
    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}
