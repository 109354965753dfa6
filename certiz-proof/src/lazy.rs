//! Steps recorded before their premises are justified.
//!
//! The boolean layer learns clauses long before it knows whether their
//! premises will ever be needed. [`LazyProofChain`] keeps one step per
//! conclusion and links the steps into a proof DAG only when asked.

use crate::node::{ProofNode, ProofNodeRef};
use crate::rule::ProofRule;
use certiz_core::FactId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::rc::Rc;

/// An unlinked proof step: premises are referenced by conclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    /// Rule applied
    pub rule: ProofRule,
    /// Conclusions of the premises
    pub children: Vec<FactId>,
    /// Argument facts
    pub args: Vec<FactId>,
}

impl ProofStep {
    /// Create a step.
    pub fn new(rule: ProofRule, children: Vec<FactId>, args: Vec<FactId>) -> Self {
        Self {
            rule,
            children,
            args,
        }
    }
}

/// Conclusion-indexed steps linked into proofs on demand.
#[derive(Debug, Default, Clone)]
pub struct LazyProofChain {
    steps: FxHashMap<FactId, ProofStep>,
}

impl LazyProofChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check whether `fact` has a recorded step.
    pub fn has_step(&self, fact: FactId) -> bool {
        self.steps.contains_key(&fact)
    }

    /// The step recorded for `fact`.
    pub fn step(&self, fact: FactId) -> Option<&ProofStep> {
        self.steps.get(&fact)
    }

    /// Record a step unless `conclusion` already has one. Returns whether the
    /// step was recorded.
    pub fn add_step(&mut self, conclusion: FactId, step: ProofStep) -> bool {
        if self.steps.contains_key(&conclusion) {
            return false;
        }
        self.steps.insert(conclusion, step);
        true
    }

    /// Record a step, replacing any previous one.
    pub fn force_add_step(&mut self, conclusion: FactId, step: ProofStep) {
        self.steps.insert(conclusion, step);
    }

    /// Record every pair in order, keeping earlier steps.
    pub fn add_steps(&mut self, steps: impl IntoIterator<Item = (FactId, ProofStep)>) {
        for (conclusion, step) in steps {
            self.add_step(conclusion, step);
        }
    }

    /// Link the steps reachable from `fact` into a proof.
    ///
    /// Facts without a step become assumption leaves, as do facts whose step
    /// would require the fact itself.
    pub fn get_proof_for(&self, fact: FactId) -> ProofNodeRef {
        let mut done = FxHashMap::default();
        let mut active = FxHashSet::default();
        self.link(fact, &mut done, &mut active)
    }

    fn link(
        &self,
        fact: FactId,
        done: &mut FxHashMap<FactId, ProofNodeRef>,
        active: &mut FxHashSet<FactId>,
    ) -> ProofNodeRef {
        if let Some(node) = done.get(&fact) {
            return Rc::clone(node);
        }
        let Some(step) = self.steps.get(&fact) else {
            let leaf = ProofNode::assume(fact);
            done.insert(fact, Rc::clone(&leaf));
            return leaf;
        };
        if !active.insert(fact) {
            return ProofNode::assume(fact);
        }
        let children = step
            .children
            .iter()
            .map(|&c| self.link(c, done, active))
            .collect();
        active.remove(&fact);
        let node = ProofNode::new(step.rule, fact, step.args.clone(), children);
        done.insert(fact, Rc::clone(&node));
        node
    }
}
