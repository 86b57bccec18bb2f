//! Arbor tree-walking evaluator.
//!
//! Executes Arbor trees directly against a caller-owned [`Context`]. There
//! is no intermediate form: evaluation is an exhaustive match over the node
//! set, recursing into children before combining them.

mod env;
mod error;
mod evaluator;

pub use env::Context;
pub use error::{EvalError, EvalResult};
pub use evaluator::{Evaluator, MAX_EVAL_DEPTH};

use arbor_types::{Node, Value};

/// Evaluate `node` against `ctx` with unlimited gas.
///
/// Returns the value of an `Expr` or `Bool` root, or `None` for a `Stmt`
/// root whose effects are left in `ctx`. On error, mutations already made
/// by earlier statements stay in place.
#[tracing::instrument(level = "debug", skip_all, fields(kind = node.kind_name(), sort = %node.sort()))]
pub fn evaluate(node: &Node, ctx: &mut Context) -> EvalResult<Option<Value>> {
    let result = Evaluator::new(ctx).eval(node);
    if let Err(err) = &result {
        tracing::debug!(%err, "evaluation aborted");
    }
    result
}
