//! Core node evaluator.

use crate::env::Context;
use crate::error::{EvalError, EvalResult};
use arbor_types::{BinOp, Node, Sort, Value, SEQUENCE_NAME};

/// Default recursion limit. Generated trees stay far below it; hand-built
/// trees nested deeper fail with [`EvalError::DepthLimitExceeded`] instead
/// of overflowing the call stack.
pub const MAX_EVAL_DEPTH: usize = 512;

/// The tree-walking evaluator. Borrows the caller's context for its whole
/// lifetime and is its only mutator.
pub struct Evaluator<'c> {
    ctx: &'c mut Context,
    /// Gas consumed so far; one unit per node visit.
    pub gas: u64,
    pub gas_limit: u64,
    depth: usize,
    max_depth: usize,
}

impl<'c> Evaluator<'c> {
    /// Create an evaluator with unlimited gas.
    pub fn new(ctx: &'c mut Context) -> Self {
        Self::with_gas_limit(ctx, u64::MAX)
    }

    pub fn with_gas_limit(ctx: &'c mut Context, gas_limit: u64) -> Self {
        Self {
            ctx,
            gas: 0,
            gas_limit,
            depth: 0,
            max_depth: MAX_EVAL_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn context(&self) -> &Context {
        &*self.ctx
    }

    /// Consume one unit of gas. Returns error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.gas_limit {
            Err(EvalError::GasExhausted)
        } else {
            Ok(())
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Dispatch
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate any node. `Expr` and `Bool` nodes yield `Some`, `Stmt`
    /// nodes yield `None` after mutating the context.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Option<Value>> {
        self.tick()?;
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        let result = self.dispatch(node);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, node: &Node) -> EvalResult<Option<Value>> {
        match node {
            Node::Constant { value } => Ok(Some(Value::Int(*value))),
            Node::Variable { name } => self.eval_variable(name).map(|n| Some(Value::Int(n))),
            Node::SequenceGet { index } => self.eval_sequence_get(index).map(|n| Some(Value::Int(n))),
            Node::BinaryOp { op, left, right } => self.eval_binary(*op, left, right).map(Some),

            Node::SequenceSet { index, value } => self.exec_sequence_set(index, value).map(|()| None),
            Node::Swap { first, second } => self.exec_swap(first, second).map(|()| None),
            Node::Assign { target, value } => self.exec_assign(target, value).map(|()| None),
            Node::Conditional {
                cond,
                then_branch,
                else_branch,
            } => self.exec_conditional(cond, then_branch, else_branch).map(|()| None),
            Node::BoundedLoop { var, limit, body } => self.exec_loop(var, limit, body).map(|()| None),
        }
    }

    // ── Sort-checked entry points ────────────────────────────────────────

    fn expect_sort(node: &Node, expected: Sort) -> EvalResult<()> {
        let found = node.sort();
        if found == expected {
            Ok(())
        } else {
            Err(EvalError::SortMismatch { expected, found })
        }
    }

    /// Evaluate an `Expr` node to an integer.
    pub fn eval_int(&mut self, node: &Node) -> EvalResult<i64> {
        Self::expect_sort(node, Sort::Expr)?;
        match self.eval(node)? {
            Some(Value::Int(n)) => Ok(n),
            other => Err(EvalError::SortMismatch {
                expected: Sort::Expr,
                found: other.map_or(Sort::Stmt, Value::sort),
            }),
        }
    }

    /// Evaluate a `Bool` node.
    pub fn eval_bool(&mut self, node: &Node) -> EvalResult<bool> {
        Self::expect_sort(node, Sort::Bool)?;
        match self.eval(node)? {
            Some(Value::Bool(b)) => Ok(b),
            other => Err(EvalError::SortMismatch {
                expected: Sort::Bool,
                found: other.map_or(Sort::Stmt, Value::sort),
            }),
        }
    }

    /// Execute a `Stmt` node for its effects.
    pub fn exec(&mut self, node: &Node) -> EvalResult<()> {
        Self::expect_sort(node, Sort::Stmt)?;
        self.eval(node).map(|_| ())
    }

    // ── Expressions ──────────────────────────────────────────────────────

    fn eval_variable(&self, name: &str) -> EvalResult<i64> {
        if name == SEQUENCE_NAME {
            return Err(EvalError::ReservedName(name.to_string()));
        }
        self.ctx
            .get(name)
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    fn eval_sequence_get(&mut self, index: &Node) -> EvalResult<i64> {
        let i = self.eval_int(index)?;
        let idx = self.ctx.check_index(i)?;
        Ok(self.ctx.list_mut()?[idx])
    }

    fn eval_binary(&mut self, op: BinOp, left: &Node, right: &Node) -> EvalResult<Value> {
        // Left completes, side effects included, before right starts.
        let l = self.eval_int(left)?;
        let r = self.eval_int(right)?;

        match op {
            BinOp::Add => l
                .checked_add(r)
                .map(Value::Int)
                .ok_or_else(|| EvalError::ArithmeticOverflow(format!("{l} + {r}"))),
            BinOp::Sub => l
                .checked_sub(r)
                .map(Value::Int)
                .ok_or_else(|| EvalError::ArithmeticOverflow(format!("{l} - {r}"))),
            BinOp::Greater => Ok(Value::Bool(l > r)),
            BinOp::Less => Ok(Value::Bool(l < r)),
            BinOp::Eq => Ok(Value::Bool(l == r)),
        }
    }

    // ── Statements ───────────────────────────────────────────────────────

    fn exec_sequence_set(&mut self, index: &Node, value: &Node) -> EvalResult<()> {
        let i = self.eval_int(index)?;
        let v = self.eval_int(value)?;
        let idx = self.ctx.check_index(i)?;
        self.ctx.list_mut()?[idx] = v;
        Ok(())
    }

    fn exec_swap(&mut self, first: &Node, second: &Node) -> EvalResult<()> {
        let i = self.eval_int(first)?;
        let j = self.eval_int(second)?;
        let a = self.ctx.check_index(i)?;
        let b = self.ctx.check_index(j)?;
        self.ctx.list_mut()?.swap(a, b);
        Ok(())
    }

    fn exec_assign(&mut self, target: &str, value: &Node) -> EvalResult<()> {
        let v = self.eval_int(value)?;
        self.ctx.set_var(target, v)
    }

    fn exec_conditional(&mut self, cond: &Node, then_branch: &Node, else_branch: &Node) -> EvalResult<()> {
        if self.eval_bool(cond)? {
            self.exec(then_branch)
        } else {
            self.exec(else_branch)
        }
    }

    fn exec_loop(&mut self, var: &str, limit: &Node, body: &Node) -> EvalResult<()> {
        if var == SEQUENCE_NAME {
            return Err(EvalError::ReservedName(var.to_string()));
        }
        // Evaluated once; body effects on the limit's inputs do not change
        // the iteration count.
        let limit = self.eval_int(limit)?;
        tracing::trace!(var, limit, depth = self.depth, "bounded loop");
        for k in 0..limit.max(0) {
            self.ctx.set_var(var, k)?;
            self.exec(body)?;
        }
        Ok(())
    }
}
