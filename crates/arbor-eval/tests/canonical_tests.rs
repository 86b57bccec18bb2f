//! Canonical programs and evaluator properties.
//!
//! Tests verify:
//! - The bubble-sort fixture sorts its input and renders stably
//! - The fixture sorts arbitrary inputs of its hard-coded length
//! - Constant identity, swap self-inverse, loop counting (property-based)

use arbor_eval::{evaluate, Context};
use arbor_types::{BinOp, Node, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ══════════════════════════════════════════════════════════════════════════════

/// Bubble sort over an 8-element `L`:
///
/// ```text
/// for i in range(8):
///   for j in range(7 - i):
///     if L[j] > L[j + 1] { swap(j, j + 1) } else { temp = 0 }
/// ```
fn bubble_sort_program() -> Node {
    let j_plus_one = || Node::binary(BinOp::Add, Node::var("j"), Node::constant(1));
    Node::for_range(
        "i",
        Node::constant(8),
        Node::for_range(
            "j",
            Node::binary(BinOp::Sub, Node::constant(7), Node::var("i")),
            Node::cond(
                Node::binary(
                    BinOp::Greater,
                    Node::get(Node::var("j")),
                    Node::get(j_plus_one()),
                ),
                Node::swap(Node::var("j"), j_plus_one()),
                Node::assign("temp", Node::constant(0)),
            ),
        ),
    )
}

fn bubble_sort_context(list: Vec<i64>) -> Context {
    let mut ctx = Context::with_list(list);
    for name in ["i", "j", "temp"] {
        ctx.set_var(name, 0).expect("scalar binding");
    }
    ctx
}

// ══════════════════════════════════════════════════════════════════════════════
// Bubble sort
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn bubble_sort_sorts_fixture_input() {
    let mut ctx = bubble_sort_context(vec![5, 2, 4, 8, 2, 1, 0, 6]);
    assert_eq!(evaluate(&bubble_sort_program(), &mut ctx), Ok(None));
    assert_eq!(ctx.list(), Some(&[0, 1, 2, 2, 4, 5, 6, 8][..]));
}

#[test]
fn bubble_sort_leaves_final_loop_bindings() {
    let mut ctx = bubble_sort_context(vec![5, 2, 4, 8, 2, 1, 0, 6]);
    evaluate(&bubble_sort_program(), &mut ctx).unwrap();
    assert_eq!(ctx.get("i"), Some(7));
    // The last pass with a non-empty inner range is i = 6, j in [0, 1).
    assert_eq!(ctx.get("j"), Some(0));
}

#[test]
fn bubble_sort_renders_canonically() {
    assert_eq!(
        bubble_sort_program().to_string(),
        "for i in range(8): { for j in range((7 - i)): { \
         if ((L[j] > L[(j + 1)])) { swap(j, (j + 1)) } else { temp = 0 } } }"
    );
}

#[test]
fn bubble_sort_rendering_is_deterministic() {
    assert_eq!(bubble_sort_program(), bubble_sort_program());
    assert_eq!(
        bubble_sort_program().to_string(),
        bubble_sort_program().to_string()
    );
    assert_eq!(
        bubble_sort_program().fingerprint(),
        bubble_sort_program().fingerprint()
    );
}

#[test]
fn bubble_sort_rejects_short_sequence() {
    let mut ctx = bubble_sort_context(vec![3, 2, 1]);
    assert!(evaluate(&bubble_sort_program(), &mut ctx).is_err());
    // The first comparisons ran before the out-of-range read.
    assert_eq!(ctx.list(), Some(&[2, 1, 3][..]));
}

// ══════════════════════════════════════════════════════════════════════════════
// Properties
// ══════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bubble_sort_matches_std_sort(list in prop::collection::vec(-50i64..50, 8)) {
        let mut ctx = bubble_sort_context(list.clone());
        evaluate(&bubble_sort_program(), &mut ctx).unwrap();
        let mut expected = list;
        expected.sort_unstable();
        prop_assert_eq!(ctx.list(), Some(&expected[..]));
    }

    #[test]
    fn constant_is_identity(value in any::<i64>(), x in any::<i64>()) {
        let mut ctx = Context::with_list(vec![1, 2]).bind("x", x).unwrap();
        let before = ctx.clone();
        prop_assert_eq!(evaluate(&Node::constant(value), &mut ctx), Ok(Some(Value::Int(value))));
        prop_assert_eq!(ctx, before);
    }

    #[test]
    fn swap_twice_restores_sequence(
        list in prop::collection::vec(any::<i64>(), 1..16),
        seed_i in any::<usize>(),
        seed_j in any::<usize>(),
    ) {
        let i = (seed_i % list.len()) as i64;
        let j = (seed_j % list.len()) as i64;
        let swap = Node::swap(Node::constant(i), Node::constant(j));
        let mut ctx = Context::with_list(list.clone());
        evaluate(&swap, &mut ctx).unwrap();
        evaluate(&swap, &mut ctx).unwrap();
        prop_assert_eq!(ctx.list(), Some(&list[..]));
    }

    #[test]
    fn loop_runs_body_max_n_zero_times(n in -20i64..200) {
        // Body checks that indices arrive in order and counts iterations.
        let body = Node::cond(
            Node::binary(BinOp::Eq, Node::var("k"), Node::var("count")),
            Node::assign("count", Node::binary(BinOp::Add, Node::var("count"), Node::constant(1))),
            Node::assign("out_of_order", Node::constant(1)),
        );
        let mut ctx = Context::new().bind("count", 0).unwrap();
        evaluate(&Node::for_range("k", Node::constant(n), body), &mut ctx).unwrap();
        prop_assert_eq!(ctx.get("count"), Some(n.max(0)));
        prop_assert!(!ctx.contains("out_of_order"));
        prop_assert_eq!(ctx.get("k"), if n > 0 { Some(n - 1) } else { None });
    }
}
