//! Runtime values produced by `Expr` and `Bool` nodes.
//!
//! The integer sequence is deliberately absent: it lives only in the
//! evaluation context under [`SEQUENCE_NAME`](crate::ast::SEQUENCE_NAME).

use crate::ast::Sort;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    /// The sort whose nodes produce this kind of value.
    pub fn sort(self) -> Sort {
        match self {
            Self::Int(_) => Sort::Expr,
            Self::Bool(_) => Sort::Bool,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(n),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
