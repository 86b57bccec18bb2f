//! Shared types for Arbor.
//!
//! This crate defines the runtime value space, the closed AST node set with
//! its canonical rendering, structural tree diffs, and AST-level errors used
//! by both the evaluator and the generator.

mod error;
mod value;
pub mod ast;
pub mod ast_diff;

pub use ast::{BinOp, Node, Sort, SEQUENCE_NAME};
pub use error::AstError;
pub use value::Value;

/// Result type for AST construction and decoding.
pub type Result<T> = std::result::Result<T, AstError>;
