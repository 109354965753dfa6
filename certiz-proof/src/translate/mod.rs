//! Translation of internal proofs into the Alethe calculus.
//!
//! [`AletheTranslator`] is a [`ProofTranslator`]: the rewrite engine hands it
//! every internal node, children first, and it writes an equivalent Alethe
//! derivation into the target store. The last step of each derivation is
//! keyed by the original conclusion; intermediate steps are keyed by their
//! own `(cl ...)` clause.
//!
//! # Clause/literal duality
//!
//! A disjunction `(or L1 ... Ln)` is printed by most steps as the clause
//! `(cl L1 ... Ln)`. Assumptions, equality resolutions and instantiations
//! print it as the unit clause `(cl (or L1 ... Ln))` instead, so when resolution consumes such
//! a premise literal by literal an `or` step unpacks it first. Whether a
//! premise needs unpacking depends on the rule that originally derived it,
//! which is why translation looks at the original children of a node.
//!
//! # Extended mode
//!
//! With [`ProofConfig::extended`] unset, `SYMM` and `REORDERING` produce no
//! step: their conclusion is proved by the translated premise, and checkers
//! are expected to see through the orientation or the order.

mod expand;
pub mod lean;
mod lemma;
mod resolution;
mod scope;
pub mod table;
mod theory;
mod validate;

pub use lean::LeanTranslator;
pub use table::{ClauseShape, single_step};
pub use theory::theory_rewrite_rule;

use crate::node::{ProofNode, ProofNodeRef};
use crate::rewrite::{ProofRewriter, ProofTranslator, RewriteConfig};
use crate::rule::{AletheRule, ProofRule, RuleTag};
use crate::store::ProofStore;
use certiz_core::{FactId, FactManager, OptionProofExt, ProofConfig, Result};
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

/// Translation statistics.
#[derive(Debug, Clone, Default)]
pub struct TranslationStats {
    /// Internal nodes handed to the translator.
    pub nodes_translated: u64,
    /// Alethe steps written to the target store.
    pub steps_emitted: u64,
    /// Rules replaced by a trusted `hole` step, with their counts.
    pub unsupported: FxHashMap<ProofRule, u64>,
}

impl TranslationStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total number of trusted steps emitted.
    pub fn unsupported_total(&self) -> u64 {
        self.unsupported.values().sum()
    }
}

/// Translator from the internal calculus to Alethe.
#[derive(Debug, Clone, Default)]
pub struct AletheTranslator {
    config: ProofConfig,
    stats: TranslationStats,
}

impl AletheTranslator {
    /// Create a translator.
    pub fn new(config: ProofConfig) -> Self {
        Self {
            config,
            stats: TranslationStats::default(),
        }
    }

    /// Get statistics.
    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    /// Translate the proof rooted at `root` into a fresh store and return the
    /// translated root.
    pub fn translate_proof(
        &mut self,
        fm: &mut FactManager,
        root: &ProofNodeRef,
    ) -> Result<ProofNodeRef> {
        let mut rewriter = ProofRewriter::with_config(RewriteConfig::from(&self.config));
        let mut target = ProofStore::new();
        rewriter.process(fm, root, self, &mut target)
    }

    /// Write one Alethe step keyed by `key`. In pedantic mode the step is
    /// first checked against its premises.
    #[allow(clippy::too_many_arguments)]
    fn emit(
        &mut self,
        fm: &mut FactManager,
        target: &mut ProofStore,
        key: FactId,
        rule: AletheRule,
        clause: FactId,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<()> {
        if self.config.pedantic {
            Self::validate_step(fm, target, rule, clause, children)?;
        }
        target.add_target_step(fm, key, rule, clause, children, args)?;
        self.stats.steps_emitted += 1;
        Ok(())
    }

    /// `(cl f)`.
    fn unit_clause(fm: &mut FactManager, f: FactId) -> FactId {
        fm.mk_clause([f])
    }

    /// The disjuncts of `f` as a clause, or `(cl f)` if it is no disjunction.
    fn or_clause(fm: &mut FactManager, f: FactId) -> FactId {
        if fm.is_or(f) {
            let lits = fm.children(f).to_vec();
            fm.mk_clause(lits)
        } else {
            Self::unit_clause(fm, f)
        }
    }

    /// Rules that print nothing outside extended mode.
    fn folds(&self, tag: RuleTag) -> bool {
        !self.config.extended && matches!(tag.internal(), Some(ProofRule::Symm | ProofRule::Reordering))
    }

    /// The node whose step prints the conclusion of `node`.
    fn printing_origin<'a>(&self, node: &'a ProofNodeRef) -> &'a ProofNodeRef {
        let mut current = node;
        while self.folds(current.rule()) {
            match current.children().first() {
                Some(premise) => current = premise,
                None => break,
            }
        }
        current
    }

    /// Prove the conclusion of a folded step by the proof of its premise.
    fn fold(&mut self, fm: &FactManager, node: &ProofNode, target: &mut ProofStore) -> Result<()> {
        let premise = Self::child(node, 0)?;
        trace!(
            "folding {} of {} into its premise",
            node.rule(),
            fm.display(node.conclusion())
        );
        target.alias(node.conclusion(), premise).or_unknown(fm, premise)?;
        Ok(())
    }

    fn single(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: ProofRule,
    ) -> Result<()> {
        let Some((alethe, shape)) = single_step(rule) else {
            return self.fallback(fm, node, target, rule);
        };
        let res = node.conclusion();
        let clause = match shape {
            ClauseShape::FromOr => Self::or_clause(fm, res),
            ClauseShape::Unit => Self::unit_clause(fm, res),
        };
        self.emit(fm, target, res, alethe, clause, &node.child_conclusions(), vec![])
    }

    fn factoring(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let clause = Self::or_clause(fm, res);
        self.emit(
            fm,
            target,
            res,
            AletheRule::DuplicatedLiterals,
            clause,
            &node.child_conclusions(),
            vec![],
        )
    }

    /// Trusted `hole` step standing for a rule without expansion.
    fn fallback(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: ProofRule,
    ) -> Result<()> {
        let res = node.conclusion();
        warn!("no Alethe expansion for {}, trusting {}", rule, fm.display(res));
        *self.stats.unsupported.entry(rule).or_insert(0) += 1;
        let clause = Self::unit_clause(fm, res);
        self.emit(
            fm,
            target,
            res,
            AletheRule::Undefined,
            clause,
            &node.child_conclusions(),
            node.args().to_vec(),
        )
    }
}

impl ProofTranslator for AletheTranslator {
    fn name(&self) -> &str {
        "alethe"
    }

    fn should_translate(&self, _fm: &FactManager, node: &ProofNode) -> bool {
        node.rule()
            .internal()
            .is_some_and(|rule| rule != ProofRule::Assume)
    }

    fn translate(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNodeRef,
        target: &mut ProofStore,
    ) -> Result<bool> {
        let RuleTag::Internal(rule) = node.rule() else {
            return Ok(false);
        };
        trace!("translating {} for {}", rule, fm.display(node.conclusion()));
        self.stats.nodes_translated += 1;

        if self.folds(node.rule()) {
            self.fold(fm, node, target)?;
            return Ok(true);
        }

        use ProofRule::*;
        match rule {
            Assume | Trust | Unknown => self.fallback(fm, node, target, rule)?,
            Scope => self.scope(fm, node, target)?,
            Resolution => self.resolution(fm, node, target)?,
            ChainResolution => self.chain_resolution(fm, node, target)?,
            Factoring => self.factoring(fm, node, target)?,
            Split => self.split(fm, node, target)?,
            EqResolve => self.eq_resolve(fm, node, target)?,
            ModusPonens => self.modus_ponens(fm, node, target)?,
            NotNotElim => self.not_not_elim(fm, node, target)?,
            Contra => self.contra(fm, node, target)?,
            AndIntro => self.and_intro(fm, node, target)?,
            CnfItePos3 | CnfIteNeg3 => self.cnf_ite3(fm, node, target, rule)?,
            TrueIntro | TrueElim | FalseIntro | FalseElim => {
                self.bool_constant(fm, node, target, rule)?
            }
            TheoryRewrite => self.theory_rewrite(fm, node, target)?,
            Instantiate => self.instantiate(fm, node, target)?,
            Skolemize => self.skolemize(fm, node, target)?,
            ArithScaleSumUpperBounds => {
                let coefficients = node.args().get(1..).unwrap_or_default().to_vec();
                self.lemma_resolution(fm, node, target, AletheRule::LaGeneric, coefficients)?
            }
            ArithTrichotomy => {
                self.lemma_resolution(fm, node, target, AletheRule::LaGeneric, vec![])?
            }
            IntTightUb | IntTightLb => {
                self.lemma_resolution(fm, node, target, AletheRule::LiaGeneric, vec![])?
            }
            AndElim | NotOrElim | ImpliesElim | NotImpliesElim1 | NotImpliesElim2 | EquivElim1
            | EquivElim2 | NotEquivElim1 | NotEquivElim2 | XorElim1 | XorElim2 | NotXorElim1
            | NotXorElim2 | IteElim1 | IteElim2 | NotIteElim1 | NotIteElim2 | NotAnd
            | CnfAndPos | CnfAndNeg | CnfOrPos | CnfOrNeg | CnfImpliesPos | CnfImpliesNeg1
            | CnfImpliesNeg2 | CnfEquivPos1 | CnfEquivPos2 | CnfEquivNeg1 | CnfEquivNeg2
            | CnfXorPos1 | CnfXorPos2 | CnfXorNeg1 | CnfXorNeg2 | CnfItePos1 | CnfItePos2
            | CnfIteNeg1 | CnfIteNeg2 | Refl | Trans | Cong | Symm | Reordering
            | ArithOpElimAxiom | IntTrust | ArithMultSign | ArithMultPos | ArithMultNeg
            | ArithMultTangent => self.single(fm, node, target, rule)?,
        }
        if self.config.pedantic {
            Self::validate_conclusion(fm, target, node.conclusion())?;
        }
        Ok(true)
    }

    /// Alethe refutations end with the empty clause. A root proving
    /// `(cl false)` gets two more steps: `false` proving `(cl (not false))`
    /// and a resolution of both into `(cl)`.
    fn finish(
        &mut self,
        fm: &mut FactManager,
        root: ProofNodeRef,
        target: &mut ProofStore,
    ) -> Result<ProofNodeRef> {
        if !self.config.final_empty_clause {
            return Ok(root);
        }
        let (RuleTag::Alethe(rule), Some(clause)) = (root.rule(), root.target_clause()) else {
            return Ok(root);
        };
        let ff = fm.mk_false();
        if !fm.is_clause(clause) || fm.children(clause) != [ff] {
            return Ok(root);
        }

        target.force_insert_node(ProofNode::new(
            rule,
            clause,
            root.args().to_vec(),
            root.children().to_vec(),
        ));
        let not_false = fm.mk_not(ff);
        let not_false_clause = Self::unit_clause(fm, not_false);
        target.force_add_target_step(
            fm,
            not_false_clause,
            AletheRule::False,
            not_false_clause,
            &[],
            vec![],
        )?;
        let empty = fm.mk_clause([]);
        let closed = target.force_add_target_step(
            fm,
            root.conclusion(),
            AletheRule::Resolution,
            empty,
            &[not_false_clause, clause],
            vec![],
        )?;
        self.stats.steps_emitted += 2;
        Ok(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_table_rule_uses_disjuncts() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let imp = fm.mk_implies(a, b);
        store.add_assumption(imp);
        let elim = store
            .add(&mut fm, ProofRule::ImpliesElim, &[imp], vec![])
            .unwrap();

        let mut translator = AletheTranslator::default();
        let out = translator.translate_proof(&mut fm, &elim).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Implies));
        let clause = out.target_clause().unwrap();
        assert_eq!(fm.display(clause).to_string(), "(cl (not a) b)");
        assert!(out.children()[0].is_assumption());
    }

    #[test]
    fn test_trust_becomes_counted_hole() {
        let mut fm = FactManager::new();
        let p = fm.mk_var("p");
        let node = ProofNode::new(ProofRule::Trust, p, vec![p], vec![]);

        let mut translator = AletheTranslator::default();
        let out = translator.translate_proof(&mut fm, &node).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Undefined));
        assert_eq!(translator.stats().unsupported.get(&ProofRule::Trust), Some(&1));
        assert_eq!(translator.stats().unsupported_total(), 1);
    }

    #[test]
    fn test_false_root_closed_with_empty_clause() {
        let mut fm = FactManager::new();
        let ff = fm.mk_false();
        let node = ProofNode::new(ProofRule::Trust, ff, vec![ff], vec![]);

        let mut translator = AletheTranslator::default();
        let out = translator.translate_proof(&mut fm, &node).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Resolution));
        assert_eq!(out.conclusion(), ff);
        assert_eq!(fm.display(out.target_clause().unwrap()).to_string(), "(cl)");

        let premises: Vec<_> = out.children().iter().map(|c| c.rule()).collect();
        assert_eq!(
            premises,
            vec![
                RuleTag::Alethe(AletheRule::False),
                RuleTag::Alethe(AletheRule::Undefined)
            ]
        );

        let config = ProofConfig {
            final_empty_clause: false,
            ..ProofConfig::default()
        };
        let mut plain = AletheTranslator::new(config);
        let out = plain.translate_proof(&mut fm, &node).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Undefined));
    }

    #[test]
    fn test_closing_keeps_derived_not_false() {
        let mut fm = FactManager::new();
        let ff = fm.mk_false();
        let not_false = fm.mk_not(ff);
        let derived = ProofNode::new(ProofRule::Trust, not_false, vec![not_false], vec![]);
        let root = ProofNode::new(ProofRule::Trust, ff, vec![ff], vec![derived]);

        let mut translator = AletheTranslator::default();
        let mut target = ProofStore::new();
        let out = ProofRewriter::new()
            .process(&mut fm, &root, &mut translator, &mut target)
            .unwrap();

        let kept = target.get_proof_for(not_false).unwrap();
        assert_eq!(kept.rule(), RuleTag::Alethe(AletheRule::Undefined));
        let not_false_clause = fm.mk_clause([not_false]);
        let axiom = target.get_proof_for(not_false_clause).unwrap();
        assert_eq!(axiom.rule(), RuleTag::Alethe(AletheRule::False));
        assert!(Rc::ptr_eq(&out.children()[0], &axiom));
    }

    #[test]
    fn test_symmetry_folded_outside_extended_mode() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let x = fm.mk_var("x");
        let y = fm.mk_var("y");
        let xy = fm.mk_eq(x, y);
        store.add_assumption(xy);
        let yx = store.add(&mut fm, ProofRule::Symm, &[xy], vec![]).unwrap();

        let mut extended = AletheTranslator::default();
        let out = extended.translate_proof(&mut fm, &yx).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Symm));

        let mut plain = AletheTranslator::new(ProofConfig {
            extended: false,
            ..ProofConfig::default()
        });
        let out = plain.translate_proof(&mut fm, &yx).unwrap();
        assert!(out.is_assumption());
        assert_eq!(out.conclusion(), xy);
        assert_eq!(plain.stats().steps_emitted, 0);
    }

    #[test]
    fn test_reordered_assumption_still_unpacked() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let ab = fm.mk_or(vec![a, b]);
        let ba = fm.mk_or(vec![b, a]);
        let not_a = fm.mk_not(a);
        let not_b = fm.mk_not(b);
        for f in [ab, not_a, not_b] {
            store.add_assumption(f);
        }
        store.add(&mut fm, ProofRule::Reordering, &[ab], vec![ba]).unwrap();
        let t = fm.mk_true();
        let ff = store
            .add(
                &mut fm,
                ProofRule::ChainResolution,
                &[ba, not_b, not_a],
                vec![t, b, t, a],
            )
            .unwrap();

        let mut translator = AletheTranslator::new(ProofConfig {
            extended: false,
            final_empty_clause: false,
            ..ProofConfig::pedantic()
        });
        let out = translator.translate_proof(&mut fm, &ff).unwrap();
        let mut rules = Vec::new();
        out.for_each_post_order(|n| rules.push(n.rule()));
        assert!(!rules.contains(&RuleTag::Alethe(AletheRule::Reorder)));
        let unpacked = &out.children()[0];
        assert_eq!(unpacked.rule(), RuleTag::Alethe(AletheRule::Or));
        assert_eq!(fm.display(unpacked.target_clause().unwrap()).to_string(), "(cl b a)");
        assert_eq!(unpacked.children()[0].conclusion(), ab);
    }
}
