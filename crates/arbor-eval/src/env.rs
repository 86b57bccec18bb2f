//! Evaluation context: scalar bindings plus the distinguished sequence `L`.

use crate::error::{EvalError, EvalResult};
use arbor_types::SEQUENCE_NAME;
use std::collections::BTreeMap;

/// The mutable binding environment a tree is evaluated against.
///
/// Scalars and the sequence are kept in separate fields, so `L` can never be
/// bound as an integer and no scalar can be bound as a sequence. The caller
/// owns the context; the evaluator only mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    vars: BTreeMap<String, i64>,
    list: Option<Vec<i64>>,
}

impl Context {
    /// Create an empty context with no sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context holding only the sequence `L`.
    pub fn with_list(list: Vec<i64>) -> Self {
        Self {
            vars: BTreeMap::new(),
            list: Some(list),
        }
    }

    /// Builder form of [`set_var`](Self::set_var).
    pub fn bind(mut self, name: &str, value: i64) -> EvalResult<Self> {
        self.set_var(name, value)?;
        Ok(self)
    }

    /// Look up a scalar binding.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    /// Bind a scalar, creating or overwriting it.
    ///
    /// The sequence name is rejected.
    pub fn set_var(&mut self, name: &str, value: i64) -> EvalResult<()> {
        if name == SEQUENCE_NAME {
            return Err(EvalError::ReservedName(name.to_string()));
        }
        self.vars.insert(name.to_string(), value);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// All scalar bindings, in name order.
    pub fn vars(&self) -> &BTreeMap<String, i64> {
        &self.vars
    }

    pub fn list(&self) -> Option<&[i64]> {
        self.list.as_deref()
    }

    /// Install (or replace) the sequence `L`.
    pub fn set_list(&mut self, list: Vec<i64>) {
        self.list = Some(list);
    }

    /// Remove and return the sequence, leaving the context without one.
    pub fn take_list(&mut self) -> Option<Vec<i64>> {
        self.list.take()
    }

    pub(crate) fn list_mut(&mut self) -> EvalResult<&mut Vec<i64>> {
        self.list
            .as_mut()
            .ok_or_else(|| EvalError::UnboundVariable(SEQUENCE_NAME.to_string()))
    }

    /// Bounds-checked conversion of an evaluated index.
    pub(crate) fn check_index(&self, index: i64) -> EvalResult<usize> {
        let len = self
            .list
            .as_ref()
            .ok_or_else(|| EvalError::UnboundVariable(SEQUENCE_NAME.to_string()))?
            .len();
        usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(EvalError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_bindings_create_and_overwrite() {
        let mut ctx = Context::new();
        assert_eq!(ctx.get("x"), None);
        ctx.set_var("x", 1).unwrap();
        ctx.set_var("x", 7).unwrap();
        assert_eq!(ctx.get("x"), Some(7));
        assert!(ctx.contains("x"));
    }

    #[test]
    fn sequence_name_cannot_be_bound_as_scalar() {
        let mut ctx = Context::with_list(vec![1]);
        assert!(matches!(
            ctx.set_var("L", 3),
            Err(EvalError::ReservedName(name)) if name == "L"
        ));
        assert_eq!(ctx.list(), Some(&[1][..]));
    }

    #[test]
    fn index_checks() {
        let ctx = Context::with_list(vec![4, 5, 6]);
        assert_eq!(ctx.check_index(2).unwrap(), 2);
        assert!(matches!(
            ctx.check_index(3),
            Err(EvalError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            ctx.check_index(-1),
            Err(EvalError::IndexOutOfRange { index: -1, len: 3 })
        ));
        assert!(matches!(
            Context::new().check_index(0),
            Err(EvalError::UnboundVariable(_))
        ));
    }

    #[test]
    fn take_list_leaves_context_without_sequence() {
        let mut ctx = Context::with_list(vec![1, 2]).bind("i", 0).unwrap();
        assert_eq!(ctx.take_list(), Some(vec![1, 2]));
        assert_eq!(ctx.list(), None);
        assert_eq!(ctx.get("i"), Some(0));
    }
}
