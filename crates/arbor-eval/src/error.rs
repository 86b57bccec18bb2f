//! Runtime error types for the Arbor evaluator.

use arbor_types::Sort;
use thiserror::Error;

/// Evaluation error. Every variant aborts the enclosing `evaluate` call;
/// context mutations committed before the failure are kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Variable read of a name absent from the context, or any use of `L`
    /// when the context has no sequence.
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    /// Sequence index outside `[0, len - 1]`.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// The sequence name used where a scalar binding is required.
    #[error("reserved name cannot be bound as a scalar: {0}")]
    ReservedName(String),

    /// A child node of the wrong sort, e.g. a `+` node used as a condition.
    #[error("sort mismatch: expected {expected}, found {found}")]
    SortMismatch { expected: Sort, found: Sort },

    /// `+` or `-` left the `i64` range.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("gas exhausted")]
    GasExhausted,

    /// Tree nesting deeper than the evaluator's recursion limit.
    #[error("evaluation depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
