//! Property-based tests for resolution semantics

use certiz_core::{FactId, FactManager};
use certiz_proof::resolution::{chain_resolvent, literals_to_fact};
use certiz_proof::{ProofChecker, ProofRule};
use proptest::prelude::*;

/// Literals over variables `v1..v5`; `v0` is reserved for pivots.
fn literal_strategy() -> impl Strategy<Value = (u8, bool)> {
    (1u8..6, proptest::bool::ANY)
}

fn clause_strategy(max: usize) -> impl Strategy<Value = Vec<(u8, bool)>> {
    prop::collection::vec(literal_strategy(), 0..max)
}

fn literal(fm: &mut FactManager, (var, positive): (u8, bool)) -> FactId {
    let v = fm.mk_var(&format!("v{}", var));
    if positive { v } else { fm.mk_not(v) }
}

fn literals(fm: &mut FactManager, shape: &[(u8, bool)]) -> Vec<FactId> {
    shape.iter().map(|&l| literal(fm, l)).collect()
}

proptest! {
    /// Binary resolution concatenates the remaining literals in order
    #[test]
    fn resolvent_keeps_remaining_literals(
        left in clause_strategy(5),
        right in clause_strategy(5),
        pivot_pos in 0usize..5,
    ) {
        let mut fm = FactManager::new();
        let x = fm.mk_var("v0");
        let not_x = fm.mk_not(x);

        let left_rest = literals(&mut fm, &left);
        let right_rest = literals(&mut fm, &right);
        let mut left_lits = left_rest.clone();
        left_lits.insert(pivot_pos.min(left_lits.len()), x);
        let mut right_lits = vec![not_x];
        right_lits.extend(right_rest.iter().copied());

        let lhs = literals_to_fact(&mut fm, &left_lits);
        let rhs = literals_to_fact(&mut fm, &right_lits);
        let t = fm.mk_true();
        let lits = chain_resolvent(&fm, &[lhs, rhs], &[(true, x)]).unwrap();

        let mut expected = left_rest;
        expected.extend(right_rest);
        prop_assert_eq!(lits.to_vec(), expected);

        let resolved = ProofChecker::check(&mut fm, ProofRule::Resolution, &[lhs, rhs], &[t, x]);
        prop_assert!(resolved.is_ok());
    }

    /// Resolving a disjunction with the negation of each disjunct yields false
    #[test]
    fn unit_negations_refute_clause(vars in prop::collection::btree_set(1u8..8, 2..6)) {
        let mut fm = FactManager::new();
        let atoms: Vec<FactId> = vars.iter().map(|v| fm.mk_var(&format!("v{}", v))).collect();
        let clause = fm.mk_or(atoms.iter().copied());
        let t = fm.mk_true();

        let mut premises = vec![clause];
        let mut args = Vec::new();
        for &a in &atoms {
            premises.push(fm.mk_not(a));
            args.push(t);
            args.push(a);
        }
        let res = ProofChecker::check(&mut fm, ProofRule::ChainResolution, &premises, &args).unwrap();
        prop_assert!(fm.is_false(res));
    }

    /// Factoring keeps the first occurrence of every literal
    #[test]
    fn factoring_keeps_first_occurrences(shape in prop::collection::vec(literal_strategy(), 2..8)) {
        let mut fm = FactManager::new();
        let lits = literals(&mut fm, &shape);
        let clause = fm.mk_or(lits.iter().copied());
        let res = ProofChecker::check(&mut fm, ProofRule::Factoring, &[clause], &[]).unwrap();

        let mut unique: Vec<FactId> = Vec::new();
        for l in lits {
            if !unique.contains(&l) {
                unique.push(l);
            }
        }
        let expected = if unique.len() == shape.len() {
            clause
        } else {
            literals_to_fact(&mut fm, &unique)
        };
        prop_assert_eq!(res, expected);
    }
}
