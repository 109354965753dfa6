//! Final proof assembly.
//!
//! The boolean layer hands over a proof of `false` whose open leaves are input
//! assertions. [`ProofManager::final_proof`] closes it under a scope over the
//! assertions and translates the result into the calculus selected by
//! [`ProofConfig::format`].

use crate::checker::ProofChecker;
use crate::node::{ProofNode, ProofNodeRef};
use crate::rule::ProofRule;
use crate::translate::{AletheTranslator, LeanTranslator, TranslationStats};
use certiz_core::{FactId, FactManager, ProofConfig, ProofError, ProofFormat, Result};
use rustc_hash::FxHashSet;
use std::rc::Rc;
use tracing::{debug, info};

/// Assembles and translates refutations.
#[derive(Debug, Clone, Default)]
pub struct ProofManager {
    config: ProofConfig,
    translator: AletheTranslator,
    lean: LeanTranslator,
}

impl ProofManager {
    /// Create a manager.
    pub fn new(config: ProofConfig) -> Self {
        Self {
            translator: AletheTranslator::new(config.clone()),
            lean: LeanTranslator::new(config.clone()),
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    /// Statistics accumulated over all translations into the configured
    /// format.
    pub fn translation_stats(&self) -> &TranslationStats {
        match self.config.format {
            ProofFormat::Alethe => self.translator.stats(),
            ProofFormat::Lean => self.lean.stats(),
        }
    }

    /// Translate a proof without closing it.
    pub fn translate(&mut self, fm: &mut FactManager, root: &ProofNodeRef) -> Result<ProofNodeRef> {
        match self.config.format {
            ProofFormat::Alethe => self.translator.translate_proof(fm, root),
            ProofFormat::Lean => self.lean.translate_proof(fm, root),
        }
    }

    /// Close `false_proof` over `assertions` and translate it.
    ///
    /// Every free assumption of `false_proof` must be one of `assertions`;
    /// otherwise the proof is rejected with [`ProofError::NonClosedProof`]
    /// unless closedness checking is disabled.
    pub fn final_proof(
        &mut self,
        fm: &mut FactManager,
        false_proof: &ProofNodeRef,
        assertions: &[FactId],
    ) -> Result<ProofNodeRef> {
        let ff = fm.mk_false();
        if false_proof.conclusion() != ff {
            return Err(ProofError::mismatch(fm, ff, false_proof.conclusion()));
        }

        let free = false_proof.free_assumptions();
        if self.config.check_closedness {
            let inputs: FxHashSet<FactId> = assertions.iter().copied().collect();
            let open: Vec<FactId> = free.iter().copied().filter(|f| !inputs.contains(f)).collect();
            if !open.is_empty() {
                return Err(ProofError::non_closed(fm, &open));
            }
        }

        let mut discharged = Vec::with_capacity(assertions.len());
        let mut seen = FxHashSet::default();
        for &a in assertions {
            if seen.insert(a) {
                discharged.push(a);
            }
        }
        info!(
            "assembling final proof: {} nodes, {} free assumptions, {} assertions",
            false_proof.dag_size(),
            free.len(),
            discharged.len()
        );

        let root = if discharged.is_empty() {
            Rc::clone(false_proof)
        } else {
            let conclusion = ProofChecker::scope_conclusion(fm, ff, &discharged);
            ProofNode::new(
                ProofRule::Scope,
                conclusion,
                discharged,
                vec![Rc::clone(false_proof)],
            )
        };

        let translated = self.translate(fm, &root)?;
        debug!(
            "final {:?} proof has {} steps, {} trusted",
            self.config.format,
            translated.dag_size(),
            self.translation_stats().unsupported_total()
        );
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{AletheRule, LeanRule, RuleTag};
    use crate::store::ProofStore;

    fn refutation(fm: &mut FactManager) -> (ProofNodeRef, FactId, FactId) {
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let not_p = fm.mk_not(p);
        store.add_assumption(p);
        store.add_assumption(not_p);
        let t = fm.mk_true();
        let proof = store
            .add(fm, ProofRule::Resolution, &[p, not_p], vec![t, p])
            .unwrap();
        (proof, p, not_p)
    }

    #[test]
    fn test_final_proof_is_closed() {
        let mut fm = FactManager::new();
        let (proof, p, not_p) = refutation(&mut fm);

        let mut manager = ProofManager::default();
        let out = manager.final_proof(&mut fm, &proof, &[p, not_p]).unwrap();
        assert_eq!(
            fm.display(out.conclusion()).to_string(),
            "(not (and p (not p)))"
        );
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Resolution));
        assert!(out.free_assumptions().is_empty());
    }

    #[test]
    fn test_unlisted_assumption_rejected() {
        let mut fm = FactManager::new();
        let (proof, p, _) = refutation(&mut fm);

        let mut manager = ProofManager::default();
        let err = manager.final_proof(&mut fm, &proof, &[p]).unwrap_err();
        assert!(matches!(err, ProofError::NonClosedProof(_)));

        let mut lenient = ProofManager::new(ProofConfig {
            check_closedness: false,
            ..ProofConfig::default()
        });
        assert!(lenient.final_proof(&mut fm, &proof, &[p]).is_ok());
    }

    #[test]
    fn test_non_refutation_rejected() {
        let mut fm = FactManager::new();
        let p = fm.mk_var("p");
        let proof = ProofNode::assume(p);

        let mut manager = ProofManager::default();
        let err = manager.final_proof(&mut fm, &proof, &[p]).unwrap_err();
        assert!(matches!(err, ProofError::ConclusionMismatch { .. }));
    }

    #[test]
    fn test_lean_format_selected() {
        let mut fm = FactManager::new();
        let (proof, p, not_p) = refutation(&mut fm);

        let mut manager = ProofManager::new(ProofConfig {
            format: ProofFormat::Lean,
            ..ProofConfig::default()
        });
        let out = manager.final_proof(&mut fm, &proof, &[p, not_p]).unwrap();
        assert_eq!(out.rule(), RuleTag::Lean(LeanRule::Scope));
        assert_eq!(
            fm.display(out.target_clause().unwrap()).to_string(),
            "(cl (not p) (not (not p)) false)"
        );
        assert_eq!(out.children()[0].rule(), RuleTag::Lean(LeanRule::R0));
        assert!(out.free_assumptions().is_empty());
        assert_eq!(manager.translation_stats().nodes_translated, 2);
    }
}
