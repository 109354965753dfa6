//! Buffer of checked proof steps.
//!
//! Steps are computed with [`ProofChecker`] as they are pushed, so a step
//! whose premises do not support the expected conclusion is rejected before
//! it reaches a [`crate::LazyProofChain`].

use crate::checker::ProofChecker;
use crate::lazy::ProofStep;
use crate::resolution::literals_to_fact;
use crate::rule::ProofRule;
use certiz_core::{FactId, FactManager, ProofError, Result};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Ordered `(conclusion, step)` pairs awaiting transfer.
#[derive(Debug, Default, Clone)]
pub struct ProofStepBuffer {
    steps: Vec<(FactId, ProofStep)>,
    pedantic: bool,
}

impl ProofStepBuffer {
    /// Create a buffer. In pedantic mode expected conclusions are always
    /// re-derived and compared.
    pub fn new(pedantic: bool) -> Self {
        Self {
            steps: Vec::new(),
            pedantic,
        }
    }

    /// Number of buffered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Buffered steps, oldest first.
    pub fn steps(&self) -> &[(FactId, ProofStep)] {
        &self.steps
    }

    /// Remove and return every buffered step.
    pub fn take(&mut self) -> Vec<(FactId, ProofStep)> {
        std::mem::take(&mut self.steps)
    }

    /// Remove every buffered step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Remove the last step.
    pub fn pop_step(&mut self) -> Option<(FactId, ProofStep)> {
        self.steps.pop()
    }

    /// Push a step and return its conclusion.
    ///
    /// Without an expected conclusion the checker computes it. With one, the
    /// expectation is trusted unless the buffer is pedantic, in which case a
    /// differing conclusion is a [`ProofError::ConclusionMismatch`].
    pub fn add_step(
        &mut self,
        fm: &mut FactManager,
        rule: ProofRule,
        children: Vec<FactId>,
        args: Vec<FactId>,
        expected: Option<FactId>,
    ) -> Result<FactId> {
        let conclusion = match expected {
            Some(expected) if !self.pedantic => {
                ProofChecker::check_arity(rule, children.len(), args.len())?;
                expected
            }
            Some(expected) => {
                let found = ProofChecker::check(fm, rule, &children, &args)?;
                if found != expected {
                    return Err(ProofError::mismatch(fm, expected, found));
                }
                found
            }
            None => ProofChecker::check(fm, rule, &children, &args)?,
        };
        self.steps
            .push((conclusion, ProofStep::new(rule, children, args)));
        Ok(conclusion)
    }

    /// Append the steps turning `premise`, whose clause literals are
    /// `premise_lits`, into `target`.
    ///
    /// Duplicate literals are factored first, then the literals are permuted
    /// into the order of `target`, and a remaining double negation of
    /// `target` is eliminated. Any other difference is a
    /// [`ProofError::ConclusionMismatch`].
    pub fn factor_reorder_elim_double_neg(
        &mut self,
        fm: &mut FactManager,
        premise: FactId,
        premise_lits: &[FactId],
        target: FactId,
    ) -> Result<()> {
        let mut current = premise;
        if current == target {
            return Ok(());
        }

        let mut seen = FxHashSet::default();
        let unique: Vec<FactId> = premise_lits
            .iter()
            .copied()
            .filter(|l| seen.insert(*l))
            .collect();
        if unique.len() < premise_lits.len() {
            let factored = literals_to_fact(fm, &unique);
            debug!(
                "factoring {} into {}",
                fm.display(current),
                fm.display(factored)
            );
            current = self.add_step(
                fm,
                ProofRule::Factoring,
                vec![current],
                vec![],
                Some(factored),
            )?;
        }

        if current != target
            && unique.len() > 1
            && fm.is_or(target)
            && fm.children(target).len() == unique.len()
            && fm.children(target).iter().all(|l| seen.contains(l))
        {
            current = self.add_step(
                fm,
                ProofRule::Reordering,
                vec![current],
                vec![target],
                Some(target),
            )?;
        }

        if current != target
            && fm.not_inner(current).and_then(|inner| fm.not_inner(inner)) == Some(target)
        {
            current = self.add_step(
                fm,
                ProofRule::NotNotElim,
                vec![current],
                vec![],
                Some(target),
            )?;
        }

        if current != target {
            return Err(ProofError::mismatch(fm, target, current));
        }
        Ok(())
    }
}
