//! Rules expanded into short fixed derivations.

use super::AletheTranslator;
use crate::node::ProofNode;
use crate::rule::{AletheRule, ProofRule};
use crate::store::ProofStore;
use certiz_core::{FactId, FactManager, ProofError, Result};
use rustc_hash::FxHashSet;

impl AletheTranslator {
    /// Key of a proof of `(cl fact)`.
    ///
    /// A disjunction whose translated proof prints its disjuncts is packed
    /// back into one literal: an `or_neg` step per disjunct, a resolution
    /// giving `(cl F ... F)` and a `contraction`.
    pub(super) fn unit_premise(
        &mut self,
        fm: &mut FactManager,
        target: &mut ProofStore,
        fact: FactId,
    ) -> Result<FactId> {
        if !fm.is_or(fact) {
            return Ok(fact);
        }
        let Some(printed) = target.get_proof_for(fact).and_then(|p| p.target_clause()) else {
            return Ok(fact);
        };
        let printed_lits: FxHashSet<FactId> = fm.children(printed).iter().copied().collect();
        let disjuncts: FxHashSet<FactId> = fm.children(fact).iter().copied().collect();
        if fm.children(printed).len() != fm.children(fact).len() || printed_lits != disjuncts {
            return Ok(fact);
        }

        let disjuncts = fm.children(fact).to_vec();
        let mut premises = vec![fact];
        for &d in &disjuncts {
            let not_d = fm.mk_not(d);
            let or_neg = fm.mk_clause([fact, not_d]);
            self.emit(fm, target, or_neg, AletheRule::OrNeg, or_neg, &[], vec![])?;
            premises.push(or_neg);
        }
        let repeated = fm.mk_clause(vec![fact; disjuncts.len()]);
        self.emit(
            fm,
            target,
            repeated,
            AletheRule::Resolution,
            repeated,
            &premises,
            vec![],
        )?;
        let packed = Self::unit_clause(fm, fact);
        self.emit(
            fm,
            target,
            packed,
            AletheRule::DuplicatedLiterals,
            packed,
            &[repeated],
            vec![],
        )?;
        Ok(packed)
    }

    /// Final `resolution` proving `(cl res)`.
    pub(super) fn resolve_to_unit(
        &mut self,
        fm: &mut FactManager,
        target: &mut ProofStore,
        res: FactId,
        premises: &[FactId],
    ) -> Result<()> {
        let clause = Self::unit_clause(fm, res);
        self.emit(fm, target, res, AletheRule::Resolution, clause, premises, vec![])
    }

    pub(super) fn child(node: &ProofNode, index: usize) -> Result<FactId> {
        node.children()
            .get(index)
            .map(|c| c.conclusion())
            .ok_or_else(|| {
                ProofError::invalid_step(node.rule(), format!("missing premise {}", index))
            })
    }

    pub(super) fn arg(node: &ProofNode, index: usize) -> Result<FactId> {
        node.args().get(index).copied().ok_or_else(|| {
            ProofError::invalid_step(node.rule(), format!("missing argument {}", index))
        })
    }

    /// `(or F (not F))` from two `not_not` instances.
    pub(super) fn split(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let f = Self::arg(node, 0)?;
        let not_f = fm.mk_not(f);
        let not2 = fm.mk_not(not_f);
        let not3 = fm.mk_not(not2);
        let not4 = fm.mk_not(not3);
        let vp1 = fm.mk_clause([not3, f]);
        let vp2 = fm.mk_clause([not4, not_f]);
        self.emit(fm, target, vp2, AletheRule::NotNot, vp2, &[], vec![])?;
        self.emit(fm, target, vp1, AletheRule::NotNot, vp1, &[], vec![])?;
        let res = node.conclusion();
        let clause = Self::or_clause(fm, res);
        self.emit(fm, target, res, AletheRule::Resolution, clause, &[vp1, vp2], vec![])
    }

    /// `F2` from `F1` and `(= F1 F2)` through `equiv_pos2`.
    pub(super) fn eq_resolve(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let f1 = Self::child(node, 0)?;
        let eq = Self::child(node, 1)?;
        let res = node.conclusion();
        let not_eq = fm.mk_not(eq);
        let not_f1 = fm.mk_not(f1);
        let vp1 = fm.mk_clause([not_eq, not_f1, res]);
        self.emit(fm, target, vp1, AletheRule::EquivPos2, vp1, &[], vec![])?;
        let premise = self.unit_premise(fm, target, f1)?;
        self.resolve_to_unit(fm, target, res, &[vp1, eq, premise])
    }

    /// `F2` from `F1` and `(=> F1 F2)` through `implies`.
    pub(super) fn modus_ponens(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let f1 = Self::child(node, 0)?;
        let imp = Self::child(node, 1)?;
        let res = node.conclusion();
        let not_f1 = fm.mk_not(f1);
        let vp1 = fm.mk_clause([not_f1, res]);
        self.emit(fm, target, vp1, AletheRule::Implies, vp1, &[imp], vec![])?;
        let premise = self.unit_premise(fm, target, f1)?;
        self.resolve_to_unit(fm, target, res, &[vp1, premise])
    }

    pub(super) fn not_not_elim(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let nn = Self::child(node, 0)?;
        let res = node.conclusion();
        let not_nn = fm.mk_not(nn);
        let vp1 = fm.mk_clause([not_nn, res]);
        self.emit(fm, target, vp1, AletheRule::NotNot, vp1, &[], vec![])?;
        self.resolve_to_unit(fm, target, res, &[vp1, nn])
    }

    pub(super) fn contra(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let f = Self::child(node, 0)?;
        let not_f = Self::child(node, 1)?;
        let premise = self.unit_premise(fm, target, f)?;
        let empty = fm.mk_clause([]);
        self.emit(
            fm,
            target,
            node.conclusion(),
            AletheRule::Resolution,
            empty,
            &[premise, not_f],
            vec![],
        )
    }

    /// `(and F1 ... Fn)` from `and_neg` and the conjuncts.
    pub(super) fn and_intro(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let conjuncts = node.child_conclusions();
        let mut lits = vec![res];
        lits.extend(conjuncts.iter().map(|&c| fm.mk_not(c)));
        let vp1 = fm.mk_clause(lits);
        self.emit(fm, target, vp1, AletheRule::AndNeg, vp1, &[], vec![])?;

        let mut premises = vec![vp1];
        for &c in &conjuncts {
            premises.push(self.unit_premise(fm, target, c)?);
        }
        self.resolve_to_unit(fm, target, res, &premises)
    }

    /// Third positive and negative ite clauses, which Alethe lacks, from the
    /// first two and a `contraction`.
    pub(super) fn cnf_ite3(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: ProofRule,
    ) -> Result<()> {
        let res = node.conclusion();
        let ite = Self::arg(node, 0)?;
        let (&[r0, r1, r2], Some(&cond)) = (fm.children(res), fm.children(ite).first()) else {
            return Err(ProofError::invalid_step(rule, "expected a ternary clause"));
        };
        let (first, second) = match rule {
            ProofRule::CnfItePos3 => (AletheRule::ItePos1, AletheRule::ItePos2),
            _ => (AletheRule::IteNeg1, AletheRule::IteNeg2),
        };
        let not_cond = fm.mk_not(cond);
        let vp1 = fm.mk_clause([r0, cond, r2]);
        let vp2 = fm.mk_clause([r0, not_cond, r1]);
        let vp3 = fm.mk_clause([r0, r1, r0, r2]);
        self.emit(fm, target, vp1, first, vp1, &[], vec![])?;
        self.emit(fm, target, vp2, second, vp2, &[], vec![])?;
        self.emit(fm, target, vp3, AletheRule::Resolution, vp3, &[vp1, vp2], vec![])?;
        let clause = Self::or_clause(fm, res);
        self.emit(
            fm,
            target,
            res,
            AletheRule::DuplicatedLiterals,
            clause,
            &[vp3],
            vec![],
        )
    }

    /// Introduction and elimination of `(= F true)` and `(= F false)` through
    /// `equiv_simplify`.
    pub(super) fn bool_constant(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: ProofRule,
    ) -> Result<()> {
        let premise = Self::child(node, 0)?;
        let res = node.conclusion();
        match rule {
            ProofRule::TrueIntro => {
                // (= F true) from F
                let eq = fm.mk_eq(res, premise);
                let vp1 = Self::unit_clause(fm, eq);
                let not_f = fm.mk_not(premise);
                let vp2 = fm.mk_clause([res, not_f]);
                self.emit(fm, target, vp1, AletheRule::EquivSimplify, vp1, &[], vec![])?;
                self.emit(fm, target, vp2, AletheRule::Equiv2, vp2, &[vp1], vec![])?;
                let premise = self.unit_premise(fm, target, premise)?;
                self.resolve_to_unit(fm, target, res, &[vp2, premise])
            }
            ProofRule::FalseIntro => {
                // (= F false) from (not F)
                let f = fm.not_inner(premise).ok_or_else(|| {
                    ProofError::invalid_step(rule, "premise is not a negation")
                })?;
                let eq = fm.mk_eq(res, premise);
                let vp1 = Self::unit_clause(fm, eq);
                let not_premise = fm.mk_not(premise);
                let vp2 = fm.mk_clause([res, not_premise]);
                let not3 = fm.mk_not(not_premise);
                let vp3 = fm.mk_clause([not3, f]);
                let vp4 = fm.mk_clause([res, f]);
                self.emit(fm, target, vp1, AletheRule::EquivSimplify, vp1, &[], vec![])?;
                self.emit(fm, target, vp2, AletheRule::Equiv2, vp2, &[vp1], vec![])?;
                self.emit(fm, target, vp3, AletheRule::NotNot, vp3, &[], vec![])?;
                self.emit(fm, target, vp4, AletheRule::Resolution, vp4, &[vp2, vp3], vec![])?;
                self.resolve_to_unit(fm, target, res, &[vp4, premise])
            }
            _ => {
                // F from (= F true), (not F) from (= F false)
                let eq = fm.mk_eq(premise, res);
                let vp1 = Self::unit_clause(fm, eq);
                let not_premise = fm.mk_not(premise);
                let vp2 = fm.mk_clause([not_premise, res]);
                self.emit(fm, target, vp1, AletheRule::EquivSimplify, vp1, &[], vec![])?;
                self.emit(fm, target, vp2, AletheRule::Equiv1, vp2, &[vp1], vec![])?;
                self.resolve_to_unit(fm, target, res, &[vp2, premise])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleTag;
    use certiz_core::ProofConfig;

    fn rules_of(out: &crate::node::ProofNodeRef) -> Vec<RuleTag> {
        let mut rules = Vec::new();
        out.for_each_post_order(|n| rules.push(n.rule()));
        rules
    }

    #[test]
    fn test_split_expansion() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let split = store.add(&mut fm, ProofRule::Split, &[], vec![p]).unwrap();

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &split).unwrap();
        assert_eq!(
            fm.display(out.target_clause().unwrap()).to_string(),
            "(cl p (not p))"
        );
        assert_eq!(
            rules_of(&out),
            vec![
                RuleTag::Alethe(AletheRule::NotNot),
                RuleTag::Alethe(AletheRule::NotNot),
                RuleTag::Alethe(AletheRule::Resolution),
            ]
        );
    }

    #[test]
    fn test_modus_ponens_repacks_disjunction() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let c = fm.mk_var("c");
        let imp_ab = fm.mk_implies(a, b);
        store.add_assumption(imp_ab);
        // (or (not a) b), printed as (cl (not a) b)
        let elim = store
            .add(&mut fm, ProofRule::ImpliesElim, &[imp_ab], vec![])
            .unwrap();
        let imp = fm.mk_implies(elim.conclusion(), c);
        store.add_assumption(imp);
        let mp = store
            .add(&mut fm, ProofRule::ModusPonens, &[elim.conclusion(), imp], vec![])
            .unwrap();
        assert_eq!(mp.conclusion(), c);

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &mp).unwrap();
        assert_eq!(fm.display(out.target_clause().unwrap()).to_string(), "(cl c)");
        let packed = &out.children()[1];
        assert_eq!(packed.rule(), RuleTag::Alethe(AletheRule::DuplicatedLiterals));
        assert_eq!(
            fm.display(packed.target_clause().unwrap()).to_string(),
            "(cl (or (not a) b))"
        );
        let or_negs = rules_of(&out)
            .into_iter()
            .filter(|r| *r == RuleTag::Alethe(AletheRule::OrNeg))
            .count();
        assert_eq!(or_negs, 2);
    }

    #[test]
    fn test_false_intro_expansion() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let not_p = fm.mk_not(p);
        store.add_assumption(not_p);
        let intro = store
            .add(&mut fm, ProofRule::FalseIntro, &[not_p], vec![])
            .unwrap();

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &intro).unwrap();
        assert_eq!(
            fm.display(out.target_clause().unwrap()).to_string(),
            "(cl (= p false))"
        );
        assert_eq!(translator.stats().steps_emitted, 5);
        assert_eq!(out.free_assumptions(), vec![not_p]);
    }

    #[test]
    fn test_cnf_ite3_expansion() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let c = fm.mk_var("c");
        let x = fm.mk_var("x");
        let y = fm.mk_var("y");
        let ite = fm.mk_ite(c, x, y);
        let pos3 = store
            .add(&mut fm, ProofRule::CnfItePos3, &[], vec![ite])
            .unwrap();

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &pos3).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::DuplicatedLiterals));
        let vp3 = &out.children()[0];
        assert_eq!(
            fm.display(vp3.target_clause().unwrap()).to_string(),
            "(cl (not (ite c x y)) x (not (ite c x y)) y)"
        );
    }
}
