//! Binary and chain resolution.

use super::AletheTranslator;
use crate::node::ProofNode;
use crate::resolution::{
    chain_conclusion_is_singleton, chain_resolvent, matches_lhs, matches_rhs, pivot_pairs,
};
use crate::rule::{AletheRule, ProofRule};
use crate::store::ProofStore;
use certiz_core::{FactId, FactManager, Result};
use tracing::trace;

/// Check whether premise `index` is consumed literal by literal.
fn read_as_clause(fm: &FactManager, index: usize, premise: FactId, pivots: &[(bool, FactId)]) -> bool {
    if !fm.is_or(premise) {
        return false;
    }
    let whole = match index {
        0 => pivots
            .first()
            .is_some_and(|&(pol, pivot)| matches_lhs(fm, premise, pol, pivot)),
        _ => pivots
            .get(index - 1)
            .is_some_and(|&(pol, pivot)| matches_rhs(fm, premise, pol, pivot)),
    };
    !whole
}

impl AletheTranslator {
    /// Premise facts of a resolution step, with disjunctions that are printed
    /// as unit clauses unpacked by an `or` step.
    fn resolution_premises(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        pivots: &[(bool, FactId)],
    ) -> Result<Vec<FactId>> {
        let mut premises = Vec::with_capacity(node.children().len());
        for (i, child) in node.children().iter().enumerate() {
            let fact = child.conclusion();
            let printed_whole = matches!(
                self.printing_origin(child).rule().internal(),
                Some(ProofRule::Assume | ProofRule::EqResolve | ProofRule::Instantiate)
            );
            if printed_whole && read_as_clause(fm, i, fact, pivots) {
                let lits = fm.children(fact).to_vec();
                let clause = fm.mk_clause(lits);
                trace!("unpacking premise {}", fm.display(fact));
                self.emit(fm, target, clause, AletheRule::Or, clause, &[fact], vec![])?;
                premises.push(clause);
            } else {
                premises.push(fact);
            }
        }
        Ok(premises)
    }

    pub(super) fn resolution(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let pivots = pivot_pairs(fm, node.args())?;
        let lits = chain_resolvent(fm, &node.child_conclusions(), &pivots)?;
        let premises = self.resolution_premises(fm, node, target, &pivots)?;
        let clause = fm.mk_clause(lits);
        self.emit(
            fm,
            target,
            node.conclusion(),
            AletheRule::Resolution,
            clause,
            &premises,
            vec![],
        )
    }

    /// The conclusion's clause is recovered from the shape of the premises
    /// alone: `(cl L1 ... Ln)` for a disjunction clause, `(cl)` for `false`,
    /// `(cl res)` for a singleton.
    pub(super) fn chain_resolution(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let pivots = pivot_pairs(fm, node.args())?;
        let premises = self.resolution_premises(fm, node, target, &pivots)?;
        let singleton = chain_conclusion_is_singleton(fm, res, &node.child_conclusions(), &pivots);
        let clause = if !singleton {
            Self::or_clause(fm, res)
        } else if fm.is_false(res) {
            fm.mk_clause([])
        } else {
            Self::unit_clause(fm, res)
        };
        self.emit(fm, target, res, AletheRule::Resolution, clause, &premises, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleTag;
    use certiz_core::ProofConfig;

    #[test]
    fn test_assumed_disjunction_is_unpacked() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let not_a = fm.mk_not(a);
        let ab = fm.mk_or(vec![a, b]);
        store.add_assumption(ab);
        store.add_assumption(not_a);
        let t = fm.mk_true();
        let res = store
            .add(&mut fm, ProofRule::ChainResolution, &[ab, not_a], vec![t, a])
            .unwrap();
        assert_eq!(res.conclusion(), b);

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &res).unwrap();
        assert_eq!(fm.display(out.target_clause().unwrap()).to_string(), "(cl b)");

        let unpacked = &out.children()[0];
        assert_eq!(unpacked.rule(), RuleTag::Alethe(AletheRule::Or));
        assert_eq!(
            fm.display(unpacked.target_clause().unwrap()).to_string(),
            "(cl a b)"
        );
        assert!(unpacked.children()[0].is_assumption());
        assert!(out.children()[1].is_assumption());
    }

    #[test]
    fn test_disjunction_used_as_pivot_is_not_unpacked() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let ab = fm.mk_or(vec![a, b]);
        let not_ab = fm.mk_not(ab);
        store.add_assumption(ab);
        store.add_assumption(not_ab);
        let t = fm.mk_true();
        let res = store
            .add(&mut fm, ProofRule::Resolution, &[ab, not_ab], vec![t, ab])
            .unwrap();
        assert!(fm.is_false(res.conclusion()));

        let mut translator = AletheTranslator::new(ProofConfig {
            final_empty_clause: false,
            ..ProofConfig::default()
        });
        let out = translator.translate_proof(&mut fm, &res).unwrap();
        assert_eq!(fm.display(out.target_clause().unwrap()).to_string(), "(cl)");
        assert!(out.children().iter().all(|c| c.is_assumption()));
        assert_eq!(translator.stats().steps_emitted, 1);
    }
}
