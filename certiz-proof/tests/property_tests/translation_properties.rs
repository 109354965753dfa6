//! Property-based tests for the Alethe translation

use certiz_core::{FactId, FactManager, ProofConfig};
use certiz_proof::{AletheRule, ProofManager, ProofRule, ProofStore, RuleTag};
use proptest::prelude::*;

proptest! {
    /// An assumed disjunction refuted by unit negations translates into a
    /// closed proof with exactly one `or` unpacking step
    #[test]
    fn refutation_translation_is_closed(
        vars in prop::collection::btree_set(0u8..10, 2..6),
        pedantic in proptest::bool::ANY,
    ) {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let atoms: Vec<FactId> = vars.iter().map(|v| fm.mk_var(&format!("x{}", v))).collect();
        let clause = fm.mk_or(atoms.iter().copied());
        let t = fm.mk_true();

        let mut inputs = vec![clause];
        let mut args = Vec::new();
        store.add_assumption(clause);
        for &a in &atoms {
            let neg = fm.mk_not(a);
            store.add_assumption(neg);
            inputs.push(neg);
            args.push(t);
            args.push(a);
        }
        let refutation = store
            .add(&mut fm, ProofRule::ChainResolution, &inputs, args)
            .unwrap();

        let config = ProofConfig { pedantic, ..ProofConfig::default() };
        let mut manager = ProofManager::new(config);
        let out = manager.final_proof(&mut fm, &refutation, &inputs).unwrap();

        prop_assert!(out.free_assumptions().is_empty());
        let mut unpacked = 0;
        out.for_each_post_order(|n| {
            if n.rule() == RuleTag::Alethe(AletheRule::Or) {
                unpacked += 1;
            }
        });
        prop_assert_eq!(unpacked, 1);
        prop_assert_eq!(manager.translation_stats().unsupported_total(), 0);
    }

    /// Dropping any input from the assertion list is detected
    #[test]
    fn missing_assertion_is_reported(
        vars in prop::collection::btree_set(0u8..10, 2..5),
        dropped in 0usize..5,
    ) {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let atoms: Vec<FactId> = vars.iter().map(|v| fm.mk_var(&format!("x{}", v))).collect();
        let clause = fm.mk_or(atoms.iter().copied());
        let t = fm.mk_true();

        let mut inputs = vec![clause];
        let mut args = Vec::new();
        store.add_assumption(clause);
        for &a in &atoms {
            let neg = fm.mk_not(a);
            store.add_assumption(neg);
            inputs.push(neg);
            args.push(t);
            args.push(a);
        }
        let refutation = store
            .add(&mut fm, ProofRule::ChainResolution, &inputs, args)
            .unwrap();

        let mut assertions = inputs.clone();
        assertions.remove(dropped % inputs.len());
        let mut manager = ProofManager::default();
        prop_assert!(manager.final_proof(&mut fm, &refutation, &assertions).is_err());
    }
}
