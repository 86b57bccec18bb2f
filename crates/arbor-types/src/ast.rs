//! AST node types for the Arbor language.
//!
//! The node set is closed: every consumer matches exhaustively on [`Node`].
//! Children are boxed and exclusively owned by their parent, so a tree is
//! always finite and acyclic. Trees have no identity beyond their structure.

use crate::error::AstError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Reserved name of the single mutable integer sequence.
pub const SEQUENCE_NAME: &str = "L";

// ══════════════════════════════════════════════════════════════════════════════
// Sorts
// ══════════════════════════════════════════════════════════════════════════════

/// Grammar category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sort {
    /// Produces an integer.
    Expr,
    /// Produces a boolean.
    Bool,
    /// Produces no value; mutates the context only.
    Stmt,
}

impl Sort {
    pub const ALL: [Sort; 3] = [Sort::Expr, Sort::Bool, Sort::Stmt];

    pub fn name(self) -> &'static str {
        match self {
            Self::Expr => "Expr",
            Self::Bool => "Bool",
            Self::Stmt => "Stmt",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sort {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Expr" => Ok(Self::Expr),
            "Bool" => Ok(Self::Bool),
            "Stmt" => Ok(Self::Stmt),
            other => Err(AstError::UnknownSort(other.to_string())),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Binary operators. Operands are always integers.
///
/// Serialized as the operator symbol; any other symbol is rejected with
/// [`AstError::UnsupportedOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `==`
    Eq,
}

impl BinOp {
    /// Operators producing an `Expr`.
    pub const ARITHMETIC: [BinOp; 2] = [BinOp::Add, BinOp::Sub];
    /// Operators producing a `Bool`.
    pub const COMPARISON: [BinOp; 3] = [BinOp::Greater, BinOp::Less, BinOp::Eq];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Eq => "==",
        }
    }

    /// The sort of a `BinaryOp` node carrying this operator.
    pub fn result_sort(self) -> Sort {
        match self {
            Self::Add | Self::Sub => Sort::Expr,
            Self::Greater | Self::Less | Self::Eq => Sort::Bool,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinOp {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            ">" => Ok(Self::Greater),
            "<" => Ok(Self::Less),
            "==" => Ok(Self::Eq),
            other => Err(AstError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for BinOp {
    type Error = AstError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BinOp> for String {
    fn from(op: BinOp) -> Self {
        op.symbol().to_string()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Nodes
// ══════════════════════════════════════════════════════════════════════════════

/// A node of an Arbor program tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Integer literal.
    Constant { value: i64 },
    /// Scalar variable read.
    Variable { name: String },
    /// `L[index]`
    SequenceGet { index: Box<Node> },
    /// `L[index] = value`
    SequenceSet { index: Box<Node>, value: Box<Node> },
    /// `swap(first, second)`
    Swap { first: Box<Node>, second: Box<Node> },
    /// `target = value`
    Assign { target: String, value: Box<Node> },
    /// `(left op right)`
    BinaryOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `if (cond) { then } else { else }`; both branches are mandatory.
    Conditional {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    /// `for var in range(limit): { body }`
    BoundedLoop {
        var: String,
        limit: Box<Node>,
        body: Box<Node>,
    },
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl Node {
    pub fn constant(value: i64) -> Self {
        Self::Constant { value }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    pub fn get(index: Node) -> Self {
        Self::SequenceGet {
            index: Box::new(index),
        }
    }

    pub fn set(index: Node, value: Node) -> Self {
        Self::SequenceSet {
            index: Box::new(index),
            value: Box::new(value),
        }
    }

    pub fn swap(first: Node, second: Node) -> Self {
        Self::Swap {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn assign(target: impl Into<String>, value: Node) -> Self {
        Self::Assign {
            target: target.into(),
            value: Box::new(value),
        }
    }

    pub fn binary(op: BinOp, left: Node, right: Node) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn cond(cond: Node, then_branch: Node, else_branch: Node) -> Self {
        Self::Conditional {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn for_range(var: impl Into<String>, limit: Node, body: Node) -> Self {
        Self::BoundedLoop {
            var: var.into(),
            limit: Box::new(limit),
            body: Box::new(body),
        }
    }
}

// ── Structure queries ────────────────────────────────────────────────────────

impl Node {
    /// The declared sort of this node.
    pub fn sort(&self) -> Sort {
        match self {
            Self::Constant { .. } | Self::Variable { .. } | Self::SequenceGet { .. } => Sort::Expr,
            Self::BinaryOp { op, .. } => op.result_sort(),
            Self::SequenceSet { .. }
            | Self::Swap { .. }
            | Self::Assign { .. }
            | Self::Conditional { .. }
            | Self::BoundedLoop { .. } => Sort::Stmt,
        }
    }

    /// Short variant name, used in diffs and log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Variable { .. } => "variable",
            Self::SequenceGet { .. } => "sequence_get",
            Self::SequenceSet { .. } => "sequence_set",
            Self::Swap { .. } => "swap",
            Self::Assign { .. } => "assign",
            Self::BinaryOp { .. } => "binary_op",
            Self::Conditional { .. } => "conditional",
            Self::BoundedLoop { .. } => "bounded_loop",
        }
    }

    /// Children paired with their field label, in evaluation order.
    pub fn labeled_children(&self) -> Vec<(&'static str, &Node)> {
        match self {
            Self::Constant { .. } | Self::Variable { .. } => vec![],
            Self::SequenceGet { index } => vec![("index", index)],
            Self::SequenceSet { index, value } => vec![("index", index), ("value", value)],
            Self::Swap { first, second } => vec![("first", first), ("second", second)],
            Self::Assign { value, .. } => vec![("value", value)],
            Self::BinaryOp { left, right, .. } => vec![("left", left), ("right", right)],
            Self::Conditional {
                cond,
                then_branch,
                else_branch,
            } => vec![("cond", cond), ("then", then_branch), ("else", else_branch)],
            Self::BoundedLoop { limit, body, .. } => vec![("limit", limit), ("body", body)],
        }
    }

    /// Children in evaluation order.
    pub fn children(&self) -> Vec<&Node> {
        self.labeled_children().into_iter().map(|(_, c)| c).collect()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Constant { .. } | Self::Variable { .. })
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::node_count)
            .sum::<usize>()
    }

    /// SHA-256 of the canonical rendering, as lowercase hex.
    ///
    /// For trees over identifier-like variable names the rendering is
    /// injective, so equal fingerprints mean structurally identical trees.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.to_string().as_bytes());
        format!("{digest:x}")
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, AstError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Rendering
// ══════════════════════════════════════════════════════════════════════════════

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value } => write!(f, "{value}"),
            Self::Variable { name } => f.write_str(name),
            Self::SequenceGet { index } => write!(f, "{SEQUENCE_NAME}[{index}]"),
            Self::SequenceSet { index, value } => write!(f, "{SEQUENCE_NAME}[{index}] = {value}"),
            Self::Swap { first, second } => write!(f, "swap({first}, {second})"),
            Self::Assign { target, value } => write!(f, "{target} = {value}"),
            Self::BinaryOp { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Conditional {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "if ({cond}) {{ {then_branch} }} else {{ {else_branch} }}"),
            Self::BoundedLoop { var, limit, body } => {
                write!(f, "for {var} in range({limit}): {{ {body} }}")
            }
        }
    }
}
