//! Property-based tests for the clause/literal duality of translated steps

use certiz_core::{FactId, FactManager, ProofConfig};
use certiz_proof::{ProofManager, ProofNodeRef, ProofRule, ProofStore, RuleTag};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

/// Atoms `x1..x9` in arbitrary order; `x0` is reserved for pivots.
fn atoms_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(1u8..10, 2..6)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Derive a disjunction over `atoms` by the rule picked by `origin`.
fn derive_disjunction(
    fm: &mut FactManager,
    store: &mut ProofStore,
    origin: u8,
    atoms: &[FactId],
) -> FactId {
    match origin {
        0 => {
            let d = fm.mk_or(atoms.iter().copied());
            store.add_assumption(d);
            d
        }
        1 => {
            let imp = fm.mk_implies(atoms[0], atoms[1]);
            store.add_assumption(imp);
            store
                .add(fm, ProofRule::ImpliesElim, &[imp], vec![])
                .unwrap()
                .conclusion()
        }
        2 => {
            let and = fm.mk_and(atoms.iter().copied());
            store
                .add(fm, ProofRule::CnfAndNeg, &[], vec![and])
                .unwrap()
                .conclusion()
        }
        3 => {
            let or = fm.mk_or(atoms.iter().copied());
            store
                .add(fm, ProofRule::CnfOrPos, &[], vec![or])
                .unwrap()
                .conclusion()
        }
        _ => {
            let pivot = fm.mk_var("x0");
            let not_pivot = fm.mk_not(pivot);
            let mut lits = vec![pivot];
            lits.extend_from_slice(atoms);
            let wide = fm.mk_or(lits);
            store.add_assumption(wide);
            store.add_assumption(not_pivot);
            let t = fm.mk_true();
            store
                .add(fm, ProofRule::ChainResolution, &[wide, not_pivot], vec![t, pivot])
                .unwrap()
                .conclusion()
        }
    }
}

/// Refute `d` by resolving away each of its disjuncts with a unit negation.
fn refute(fm: &mut FactManager, store: &mut ProofStore, d: FactId) -> ProofNodeRef {
    let t = fm.mk_true();
    let mut inputs = vec![d];
    let mut args = Vec::new();
    for lit in fm.children(d).to_vec() {
        let neg = fm.mk_not(lit);
        store.add_assumption(neg);
        inputs.push(neg);
        args.push(t);
        args.push(lit);
    }
    store
        .add(fm, ProofRule::ChainResolution, &inputs, args)
        .unwrap()
}

proptest! {
    /// Wherever a translated step prints the disjuncts of a derived
    /// disjunction, they keep their original order
    #[test]
    fn printed_disjuncts_keep_their_order(
        names in atoms_strategy(),
        origin in 0u8..5,
        pedantic in proptest::bool::ANY,
    ) {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let atoms: Vec<FactId> = names.iter().map(|v| fm.mk_var(&format!("x{}", v))).collect();
        let d = derive_disjunction(&mut fm, &mut store, origin, &atoms);
        prop_assert!(fm.is_or(d));
        let disjuncts = fm.children(d).to_vec();
        let wanted: FxHashSet<FactId> = disjuncts.iter().copied().collect();
        let refutation = refute(&mut fm, &mut store, d);

        let config = ProofConfig { pedantic, ..ProofConfig::default() };
        let mut manager = ProofManager::new(config);
        let out = manager.translate(&mut fm, &refutation).unwrap();

        let mut printed = Vec::new();
        out.for_each_post_order(|n| {
            if let (RuleTag::Alethe(_), Some(clause)) = (n.rule(), n.target_clause()) {
                let lits = fm.children(clause);
                let same_set = lits.len() == wanted.len() && lits.iter().all(|l| wanted.contains(l));
                if same_set {
                    printed.push(lits.to_vec());
                }
            }
        });
        prop_assert!(!printed.is_empty());
        for lits in printed {
            prop_assert_eq!(lits, disjuncts.clone());
        }
        prop_assert_eq!(manager.translation_stats().unsupported_total(), 0);
    }
}
