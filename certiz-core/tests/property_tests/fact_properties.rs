//! Property-based tests for fact interning

use certiz_core::{FactId, FactManager, Lit, Var};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Var(u8),
    Int(i64),
    Not(Box<Shape>),
    Or(Vec<Shape>),
    And(Vec<Shape>),
    Eq(Box<Shape>, Box<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0u8..4).prop_map(Shape::Var),
        (-3i64..3).prop_map(Shape::Int),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Not(Box::new(s))),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Shape::Or),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Shape::And),
            (inner.clone(), inner).prop_map(|(a, b)| Shape::Eq(Box::new(a), Box::new(b))),
        ]
    })
}

fn build(fm: &mut FactManager, shape: &Shape) -> FactId {
    match shape {
        Shape::Var(v) => fm.mk_var(&format!("v{}", v)),
        Shape::Int(n) => fm.mk_int(*n),
        Shape::Not(s) => {
            let a = build(fm, s);
            fm.mk_not(a)
        }
        Shape::Or(items) => {
            let args: Vec<FactId> = items.iter().map(|s| build(fm, s)).collect();
            fm.mk_or(args)
        }
        Shape::And(items) => {
            let args: Vec<FactId> = items.iter().map(|s| build(fm, s)).collect();
            fm.mk_and(args)
        }
        Shape::Eq(a, b) => {
            let a = build(fm, a);
            let b = build(fm, b);
            fm.mk_eq(a, b)
        }
    }
}

proptest! {
    /// Rebuilding a term yields the same handle and allocates nothing
    #[test]
    fn interning_is_structural(shape in shape_strategy()) {
        let mut fm = FactManager::new();
        let first = build(&mut fm, &shape);
        let size = fm.len();
        let second = build(&mut fm, &shape);
        prop_assert_eq!(first, second);
        prop_assert_eq!(fm.len(), size);
    }

    /// Equal handles print equally and distinct handles print differently
    #[test]
    fn display_identifies_facts(a in shape_strategy(), b in shape_strategy()) {
        let mut fm = FactManager::new();
        let fa = build(&mut fm, &a);
        let fb = build(&mut fm, &b);
        let same_text = fm.display(fa).to_string() == fm.display(fb).to_string();
        prop_assert_eq!(fa == fb, same_text);
    }

    /// Negation never simplifies and `atom` strips exactly one level
    #[test]
    fn atom_strips_one_negation(shape in shape_strategy()) {
        let mut fm = FactManager::new();
        let f = build(&mut fm, &shape);
        let not_f = fm.mk_not(f);
        let not_not_f = fm.mk_not(not_f);
        prop_assert_eq!(fm.atom(not_f), f);
        prop_assert_eq!(fm.atom(not_not_f), not_f);
        prop_assert_eq!(fm.not_inner(not_f), Some(f));
    }

    /// Literal negation flips only the sign
    #[test]
    fn literal_negation(index in 0u32..1_000_000, negated in proptest::bool::ANY) {
        let lit = Lit::new(Var::new(index), negated);
        prop_assert_eq!((!lit).var(), lit.var());
        prop_assert_eq!((!lit).is_negated(), !negated);
        prop_assert_eq!(!!lit, lit);
    }
}
