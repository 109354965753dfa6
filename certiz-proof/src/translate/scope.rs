//! Discharging assumptions.
//!
//! `SCOPE` over `F1 ... Fn` with body `F` concludes `(=> A F)`, where `A` is
//! `F1` when `n = 1` and `(and F1 ... Fn)` otherwise. It expands into
//!
//! | step | rule | clause |
//! |---|---|---|
//! | anchor | `subproof` | `(cl (not F1) ... (not Fn) F)` |
//! | for each i | `and_pos` | `(cl (not A) Fi)` |
//! | collect | `resolution` | `(cl F (not A) ... (not A))` |
//! | reorder | `reordering` | `(cl (not A) ... (not A) F)`, extended mode only |
//! | dedup | `contraction` | `(cl (not A) F)` |
//! | half-step | `implies_neg1` | `(cl (=> A F) A)` |
//! | half-step | `implies_neg2` | `(cl (=> A F) (not F))` |
//! | final | `resolution` | `(cl (=> A F))` |
//!
//! When `F` is `false` the conclusion is `(not A)`: the final resolution
//! proves `(cl (=> A false))` and `implies_simplify`, `equiv1` and one more
//! resolution turn it into `(cl (not A))`.

use super::AletheTranslator;
use crate::node::ProofNode;
use crate::rule::AletheRule;
use crate::store::ProofStore;
use certiz_core::{FactManager, ProofError, Result};
use tracing::debug;

impl AletheTranslator {
    pub(super) fn scope(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let assumptions = node.args().to_vec();
        let body = node
            .children()
            .first()
            .map(|c| c.conclusion())
            .ok_or_else(|| ProofError::invalid_step("SCOPE", "missing body"))?;
        if assumptions.is_empty() {
            return Err(ProofError::invalid_step("SCOPE", "nothing to discharge"));
        }
        debug!(
            "expanding scope over {} assumptions of {}",
            assumptions.len(),
            fm.display(body)
        );

        let antecedent = match assumptions.as_slice() {
            [single] => *single,
            _ => fm.mk_and(assumptions.iter().copied()),
        };
        let not_antecedent = fm.mk_not(antecedent);
        let implication = fm.mk_implies(antecedent, body);
        let n = assumptions.len();

        let mut anchor_lits: Vec<_> = assumptions.iter().map(|&f| fm.mk_not(f)).collect();
        anchor_lits.push(body);
        let anchor = fm.mk_clause(anchor_lits);
        self.emit(
            fm,
            target,
            anchor,
            AletheRule::Anchor,
            anchor,
            &[body],
            assumptions.clone(),
        )?;

        let mut collect_premises = vec![anchor];
        for &assumption in &assumptions {
            let and_pos = fm.mk_clause([not_antecedent, assumption]);
            self.emit(fm, target, and_pos, AletheRule::AndPos, and_pos, &[], vec![])?;
            collect_premises.push(and_pos);
        }

        let mut collected_lits = vec![body];
        collected_lits.extend(std::iter::repeat_n(not_antecedent, n));
        let collected = fm.mk_clause(collected_lits);
        self.emit(
            fm,
            target,
            collected,
            AletheRule::Resolution,
            collected,
            &collect_premises,
            vec![],
        )?;

        let mut contracted = collected;
        if self.config.extended {
            let mut reordered_lits = vec![not_antecedent; n];
            reordered_lits.push(body);
            let reordered = fm.mk_clause(reordered_lits);
            self.emit(
                fm,
                target,
                reordered,
                AletheRule::Reorder,
                reordered,
                &[collected],
                vec![],
            )?;
            contracted = reordered;
        }

        let dedup = fm.mk_clause([not_antecedent, body]);
        self.emit(
            fm,
            target,
            dedup,
            AletheRule::DuplicatedLiterals,
            dedup,
            &[contracted],
            vec![],
        )?;

        let neg1 = fm.mk_clause([implication, antecedent]);
        self.emit(fm, target, neg1, AletheRule::ImpliesNeg1, neg1, &[], vec![])?;
        let not_body = fm.mk_not(body);
        let neg2 = fm.mk_clause([implication, not_body]);
        self.emit(fm, target, neg2, AletheRule::ImpliesNeg2, neg2, &[], vec![])?;

        let implication_clause = Self::unit_clause(fm, implication);
        if !fm.is_false(body) {
            return self.emit(
                fm,
                target,
                res,
                AletheRule::Resolution,
                implication_clause,
                &[neg1, dedup, neg2],
                vec![],
            );
        }

        self.emit(
            fm,
            target,
            implication_clause,
            AletheRule::Resolution,
            implication_clause,
            &[neg1, dedup, neg2],
            vec![],
        )?;
        let simplified = fm.mk_eq(implication, not_antecedent);
        let simplify = Self::unit_clause(fm, simplified);
        self.emit(
            fm,
            target,
            simplify,
            AletheRule::ImpliesSimplify,
            simplify,
            &[],
            vec![],
        )?;
        let not_implication = fm.mk_not(implication);
        let equiv = fm.mk_clause([not_implication, not_antecedent]);
        self.emit(
            fm,
            target,
            equiv,
            AletheRule::Equiv1,
            equiv,
            &[simplify],
            vec![],
        )?;
        let negated_clause = Self::unit_clause(fm, not_antecedent);
        self.emit(
            fm,
            target,
            res,
            AletheRule::Resolution,
            negated_clause,
            &[implication_clause, equiv],
            vec![],
        )
    }
}
