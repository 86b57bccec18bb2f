//! Structural diff between two Arbor trees.
//!
//! Walks both trees in lockstep and reports every position where they
//! differ. Used to explain determinism failures between two generator runs
//! and to compare a mutated program against its parent.
//!
//! Paths are dot-separated child labels from the root, e.g.
//! `root.body.then.value`.

use crate::ast::Node;
use serde::{Deserialize, Serialize};

// ══════════════════════════════════════════════════════════════════════════════
// Types
// ══════════════════════════════════════════════════════════════════════════════

/// A single difference between two trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeChange {
    /// Dot-separated path to the differing node.
    pub path: String,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// The node kind differs; the subtree below is not compared further.
    Replaced,
    /// Same node kind, different payload (constant, name, operator, target
    /// or loop variable). Children are still compared.
    Modified,
}

/// A structured diff between two trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDiff {
    pub changes: Vec<TreeChange>,
}

/// Paths a diff is allowed to touch.
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedScope {
    Any,
    /// Only changes at or below these path prefixes.
    Paths(Vec<String>),
}

pub const ROOT_PATH: &str = "root";

// ══════════════════════════════════════════════════════════════════════════════
// Core diff
// ══════════════════════════════════════════════════════════════════════════════

impl TreeDiff {
    /// Compute the diff between two trees.
    pub fn diff(old: &Node, new: &Node) -> Self {
        let mut changes = Vec::new();
        diff_node(old, new, ROOT_PATH, &mut changes);
        TreeDiff { changes }
    }

    /// True if the two trees are structurally identical.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Changes falling outside `scope` (empty = all valid).
    pub fn validate_scope(&self, scope: &AllowedScope) -> Vec<&TreeChange> {
        match scope {
            AllowedScope::Any => vec![],
            AllowedScope::Paths(allowed) => self
                .changes
                .iter()
                .filter(|c| !allowed.iter().any(|a| within(&c.path, a)))
                .collect(),
        }
    }
}

/// `path` equals `prefix` or lies below it.
fn within(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

// ══════════════════════════════════════════════════════════════════════════════
// Diff walker
// ══════════════════════════════════════════════════════════════════════════════

fn push(changes: &mut Vec<TreeChange>, path: &str, kind: ChangeKind) {
    changes.push(TreeChange {
        path: path.to_string(),
        kind,
    });
}

fn diff_node(old: &Node, new: &Node, path: &str, changes: &mut Vec<TreeChange>) {
    if old.kind_name() != new.kind_name() {
        push(changes, path, ChangeKind::Replaced);
        return;
    }

    let payload_differs = match (old, new) {
        (Node::Constant { value: a }, Node::Constant { value: b }) => a != b,
        (Node::Variable { name: a }, Node::Variable { name: b }) => a != b,
        (Node::Assign { target: a, .. }, Node::Assign { target: b, .. }) => a != b,
        (Node::BinaryOp { op: a, .. }, Node::BinaryOp { op: b, .. }) => a != b,
        (Node::BoundedLoop { var: a, .. }, Node::BoundedLoop { var: b, .. }) => a != b,
        _ => false,
    };
    if payload_differs {
        push(changes, path, ChangeKind::Modified);
    }

    // Same kind means same arity and labels.
    for ((label, o), (_, n)) in old.labeled_children().into_iter().zip(new.labeled_children()) {
        diff_node(o, n, &format!("{path}.{label}"), changes);
    }
}
