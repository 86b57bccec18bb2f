//! Grammar-based random tree generation.
//!
//! Trees are generated per sort with a depth-dependent leaf probability.
//! Every recursive call goes exactly one level deeper, and once the depth
//! budget is spent only terminal productions are emitted, so each branch
//! ends within a bounded number of levels.
//!
//! Random draws happen in a fixed order per node (leaf decision, then the
//! production choice, then payloads, then children left to right), so a
//! seeded source always yields the same tree.

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use arbor_types::{BinOp, Node, Sort, SEQUENCE_NAME};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Statement expansions, chosen uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StmtProduction {
    Assign,
    SequenceSet,
    Swap,
    Conditional,
    BoundedLoop,
}

impl StmtProduction {
    const ALL: [StmtProduction; 5] = [
        StmtProduction::Assign,
        StmtProduction::SequenceSet,
        StmtProduction::Swap,
        StmtProduction::Conditional,
        StmtProduction::BoundedLoop,
    ];
}

/// Check a request before any random draw.
pub(crate) fn validate_request(max_depth: usize, variables: &[String]) -> GenResult<()> {
    if max_depth == 0 {
        return Err(GenError::ZeroDepth);
    }
    if variables.is_empty() {
        return Err(GenError::NoVariables);
    }
    if let Some(reserved) = variables.iter().find(|v| v.as_str() == SEQUENCE_NAME) {
        return Err(GenError::ReservedVariable(reserved.clone()));
    }
    Ok(())
}

/// Tree generator over one variable set and depth budget.
pub struct TreeGenerator<'a, R> {
    rng: &'a mut R,
    config: &'a GenConfig,
    variables: &'a [String],
    max_depth: usize,
    expr_terminals: WeightedIndex<u32>,
}

impl<'a, R: Rng> TreeGenerator<'a, R> {
    /// Create a generator, validating the request and the config.
    pub fn new(
        rng: &'a mut R,
        config: &'a GenConfig,
        variables: &'a [String],
        max_depth: usize,
    ) -> GenResult<Self> {
        validate_request(max_depth, variables)?;
        config.validate()?;
        let expr_terminals = WeightedIndex::new(config.terminal_weights())
            .map_err(|e| GenError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            rng,
            config,
            variables,
            max_depth,
            expr_terminals,
        })
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Generate a tree of the given sort from the root.
    pub fn generate(&mut self, sort: Sort) -> Node {
        self.generate_at(sort, 0)
    }

    /// Generate a tree of the given sort as if rooted at `depth`.
    pub fn generate_at(&mut self, sort: Sort, depth: usize) -> Node {
        let p_leaf = self.config.leaf_probability(depth, self.max_depth);
        if self.rng.gen::<f64>() < p_leaf {
            self.terminal(sort, depth)
        } else {
            self.non_terminal(sort, depth)
        }
    }

    // ── Terminal productions ─────────────────────────────────────────────

    fn terminal(&mut self, sort: Sort, depth: usize) -> Node {
        match sort {
            Sort::Expr => match self.expr_terminals.sample(&mut *self.rng) {
                0 => Node::constant(
                    self.rng
                        .gen_range(self.config.constant_min..=self.config.constant_max),
                ),
                1 => self.random_variable(),
                _ => Node::get(self.random_variable()),
            },
            // Bool has no leaf of its own; it bottoms out one level down.
            Sort::Bool => self.binary(BinOp::Greater, depth),
            Sort::Stmt => {
                let target = self.random_name();
                Node::assign(target, self.generate_at(Sort::Expr, depth + 1))
            }
        }
    }

    // ── Non-terminal productions ─────────────────────────────────────────

    fn non_terminal(&mut self, sort: Sort, depth: usize) -> Node {
        match sort {
            Sort::Expr => {
                let op = self.pick(&BinOp::ARITHMETIC);
                self.binary(op, depth)
            }
            Sort::Bool => {
                let op = self.pick(&BinOp::COMPARISON);
                self.binary(op, depth)
            }
            Sort::Stmt => self.statement(depth),
        }
    }

    fn statement(&mut self, depth: usize) -> Node {
        match self.pick(&StmtProduction::ALL) {
            StmtProduction::Assign => {
                let target = self.random_name();
                Node::assign(target, self.generate_at(Sort::Expr, depth + 1))
            }
            StmtProduction::SequenceSet => {
                let index = self.random_variable();
                Node::set(index, self.generate_at(Sort::Expr, depth + 1))
            }
            StmtProduction::Swap => {
                let first = self.random_variable();
                let second = self.random_variable();
                Node::swap(first, second)
            }
            StmtProduction::Conditional => {
                let cond = self.generate_at(Sort::Bool, depth + 1);
                let then_branch = self.generate_at(Sort::Stmt, depth + 1);
                let else_branch = self.generate_at(Sort::Stmt, depth + 1);
                Node::cond(cond, then_branch, else_branch)
            }
            StmtProduction::BoundedLoop => {
                let var = self.random_name();
                let limit = self.generate_at(Sort::Expr, depth + 1);
                let body = self.generate_at(Sort::Stmt, depth + 1);
                Node::for_range(var, limit, body)
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    /// `BinaryOp` over two fresh `Expr` children.
    fn binary(&mut self, op: BinOp, depth: usize) -> Node {
        let left = self.generate_at(Sort::Expr, depth + 1);
        let right = self.generate_at(Sort::Expr, depth + 1);
        Node::binary(op, left, right)
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }

    fn random_name(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.variables.len());
        self.variables[idx].clone()
    }

    fn random_variable(&mut self) -> Node {
        Node::var(self.random_name())
    }
}
