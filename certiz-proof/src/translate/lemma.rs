//! Quantifier and arithmetic lemmas.
//!
//! An arithmetic lemma with premises `P1 ... Pn` and conclusion literals
//! `L1 ... Lk` becomes one theory step proving
//! `(cl (not P1) ... (not Pn) L1 ... Lk)`, resolved against the premises.
//! Lemmas without premises are single steps of the table.

use super::AletheTranslator;
use crate::node::ProofNode;
use crate::rule::AletheRule;
use crate::store::ProofStore;
use certiz_core::{FactId, FactManager, Result};
use tracing::trace;

impl AletheTranslator {
    /// `forall_inst` proving `(cl (or (not Q) F))`, an `or` step and a
    /// resolution with `Q`.
    pub(super) fn instantiate(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let quantified = Self::child(node, 0)?;
        let res = node.conclusion();
        let terms = node.args().get(1..).unwrap_or_default().to_vec();
        trace!(
            "instantiating {} with [{}]",
            fm.display(quantified),
            fm.display_list(&terms)
        );
        let not_q = fm.mk_not(quantified);
        let instance = fm.mk_or(vec![not_q, res]);
        let vp1 = Self::unit_clause(fm, instance);
        self.emit(fm, target, vp1, AletheRule::ForallInst, vp1, &[], terms)?;
        let vp2 = fm.mk_clause([not_q, res]);
        self.emit(fm, target, vp2, AletheRule::Or, vp2, &[vp1], vec![])?;
        let premise = self.unit_premise(fm, target, quantified)?;
        self.resolve_to_unit(fm, target, res, &[vp2, premise])
    }

    /// `(= P F)` by skolemization, then `equiv_pos2` and a resolution.
    pub(super) fn skolemize(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let premise = Self::child(node, 0)?;
        let res = node.conclusion();
        // a negated premise is a negated universal
        let rule = if fm.is_not(premise) {
            AletheRule::SkoForall
        } else {
            AletheRule::SkoEx
        };
        let eq = fm.mk_eq(premise, res);
        let vp1 = Self::unit_clause(fm, eq);
        self.emit(fm, target, vp1, rule, vp1, &[], vec![])?;
        let not_eq = fm.mk_not(eq);
        let not_premise = fm.mk_not(premise);
        let vp2 = fm.mk_clause([not_eq, not_premise, res]);
        self.emit(fm, target, vp2, AletheRule::EquivPos2, vp2, &[], vec![])?;
        let unit = self.unit_premise(fm, target, premise)?;
        self.resolve_to_unit(fm, target, res, &[vp2, vp1, unit])
    }

    pub(super) fn lemma_resolution(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: AletheRule,
        args: Vec<FactId>,
    ) -> Result<()> {
        let res = node.conclusion();
        let premises = node.child_conclusions();
        let clause = Self::or_clause(fm, res);

        let mut lits: Vec<FactId> = premises.iter().map(|&p| fm.mk_not(p)).collect();
        lits.extend_from_slice(fm.children(clause));
        let lemma = fm.mk_clause(lits);
        self.emit(fm, target, lemma, rule, lemma, &[], args)?;

        let mut resolved = vec![lemma];
        for &p in &premises {
            resolved.push(self.unit_premise(fm, target, p)?);
        }
        self.emit(fm, target, res, AletheRule::Resolution, clause, &resolved, vec![])
    }
}
