//! Content-addressed store of accepted proof steps.
//!
//! Every fact maps to at most one proof. `add*` operations keep the first
//! proof recorded for a fact; `force_*` operations overwrite it and are only
//! used while finalizing a refutation.

use crate::checker::ProofChecker;
use crate::node::{ProofNode, ProofNodeRef};
use crate::rule::{ProofRule, RuleTag};
use certiz_core::{FactId, FactManager, OptionProofExt, Result};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::trace;

/// Map from conclusions to the proof accepted for them.
#[derive(Debug, Default, Clone)]
pub struct ProofStore {
    nodes: FxHashMap<FactId, ProofNodeRef>,
    /// Keys in insertion order
    order: Vec<FactId>,
}

impl ProofStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored facts.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `fact` has a proof.
    pub fn contains(&self, fact: FactId) -> bool {
        self.nodes.contains_key(&fact)
    }

    /// The proof accepted for `fact`.
    pub fn get_proof_for(&self, fact: FactId) -> Option<ProofNodeRef> {
        self.nodes.get(&fact).cloned()
    }

    /// Stored keys, oldest first.
    pub fn facts(&self) -> &[FactId] {
        &self.order
    }

    /// Drop every stored proof.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
    }

    fn lookup_children(&self, fm: &FactManager, children: &[FactId]) -> Result<Vec<ProofNodeRef>> {
        children
            .iter()
            .map(|&c| self.get_proof_for(c).or_unknown(fm, c))
            .collect()
    }

    fn store(&mut self, key: FactId, node: ProofNodeRef, overwrite: bool) -> ProofNodeRef {
        match self.nodes.get(&key) {
            Some(existing) if !overwrite => Rc::clone(existing),
            Some(_) => {
                self.nodes.insert(key, Rc::clone(&node));
                node
            }
            None => {
                self.order.push(key);
                self.nodes.insert(key, Rc::clone(&node));
                node
            }
        }
    }

    fn build(
        &self,
        fm: &mut FactManager,
        rule: ProofRule,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<ProofNodeRef> {
        ProofChecker::check_arity(rule, children.len(), args.len())?;
        let premises = self.lookup_children(fm, children)?;
        let conclusion = ProofChecker::check(fm, rule, children, &args)?;
        trace!(
            "step {} proves {} from [{}]",
            rule,
            fm.display(conclusion),
            fm.display_list(children)
        );
        Ok(ProofNode::new(rule, conclusion, args, premises))
    }

    /// Add an internal step whose premises are the stored proofs of
    /// `children`. If the computed conclusion already has a proof, that proof
    /// is returned unchanged.
    pub fn add(
        &mut self,
        fm: &mut FactManager,
        rule: ProofRule,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<ProofNodeRef> {
        let node = self.build(fm, rule, children, args)?;
        Ok(self.store(node.conclusion(), node, false))
    }

    /// Like [`ProofStore::add`] but replaces an existing proof.
    pub fn force_add(
        &mut self,
        fm: &mut FactManager,
        rule: ProofRule,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<ProofNodeRef> {
        let node = self.build(fm, rule, children, args)?;
        Ok(self.store(node.conclusion(), node, true))
    }

    /// Record `fact` as an open assumption unless it already has a proof.
    pub fn add_assumption(&mut self, fact: FactId) -> ProofNodeRef {
        self.store(fact, ProofNode::assume(fact), false)
    }

    /// Store an already built node under its conclusion.
    pub fn insert_node(&mut self, node: ProofNodeRef) -> ProofNodeRef {
        self.store(node.conclusion(), node, false)
    }

    /// Store an already built node, replacing any existing proof.
    pub fn force_insert_node(&mut self, node: ProofNodeRef) -> ProofNodeRef {
        self.store(node.conclusion(), node, true)
    }

    /// Make the proof stored for `existing` also prove `key`.
    ///
    /// Used for steps a target calculus leaves implicit. Returns `None` when
    /// `existing` has no proof; an existing proof of `key` is kept.
    pub fn alias(&mut self, key: FactId, existing: FactId) -> Option<ProofNodeRef> {
        let node = self.get_proof_for(existing)?;
        Some(self.store(key, node, false))
    }

    /// Add a step of a target calculus keyed by `key`.
    ///
    /// The node's first argument is its `(cl ...)` clause; `args` follow it.
    /// Premises are the stored proofs of `children`.
    pub fn add_target_step(
        &mut self,
        fm: &FactManager,
        key: FactId,
        rule: impl Into<RuleTag>,
        clause: FactId,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<ProofNodeRef> {
        let node = self.build_target(fm, key, rule, clause, children, args)?;
        Ok(self.store(key, node, false))
    }

    /// Like [`ProofStore::add_target_step`] but replaces an existing proof.
    pub fn force_add_target_step(
        &mut self,
        fm: &FactManager,
        key: FactId,
        rule: impl Into<RuleTag>,
        clause: FactId,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<ProofNodeRef> {
        let node = self.build_target(fm, key, rule, clause, children, args)?;
        Ok(self.store(key, node, true))
    }

    fn build_target(
        &self,
        fm: &FactManager,
        key: FactId,
        rule: impl Into<RuleTag>,
        clause: FactId,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<ProofNodeRef> {
        let rule = rule.into();
        let premises = self.lookup_children(fm, children)?;
        let mut all_args = Vec::with_capacity(args.len() + 1);
        all_args.push(clause);
        all_args.extend(args);
        trace!("{} {}", rule, fm.display(clause));
        Ok(ProofNode::new(rule, key, all_args, premises))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::AletheRule;
    use certiz_core::ProofError;

    #[test]
    fn test_add_computes_conclusion() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let q = fm.mk_var("q");
        store.add_assumption(p);
        store.add_assumption(q);

        let node = store
            .add(&mut fm, ProofRule::AndIntro, &[p, q], vec![])
            .unwrap();
        assert_eq!(fm.display(node.conclusion()).to_string(), "(and p q)");
        assert_eq!(node.children().len(), 2);
        assert!(store.contains(node.conclusion()));
    }

    #[test]
    fn test_first_writer_wins() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let split = store.add(&mut fm, ProofRule::Split, &[], vec![p]).unwrap();
        let again = store.add(&mut fm, ProofRule::Split, &[], vec![p]).unwrap();
        assert!(Rc::ptr_eq(&split, &again));

        let stored = store.add_assumption(split.conclusion());
        assert!(Rc::ptr_eq(&stored, &split));
    }

    #[test]
    fn test_force_add_overwrites() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let leaf = store.add_assumption(p);
        let trusted = store.force_add(&mut fm, ProofRule::Trust, &[], vec![p]).unwrap();

        assert!(!Rc::ptr_eq(&leaf, &trusted));
        let current = store.get_proof_for(p).unwrap();
        assert!(current.rule().is(ProofRule::Trust));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_child_and_arity() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let not_p = fm.mk_not(p);

        let err = store
            .add(&mut fm, ProofRule::Contra, &[p, not_p], vec![])
            .unwrap_err();
        assert!(matches!(err, ProofError::UnknownFact(ref s) if s == "p"));

        let err = store.add(&mut fm, ProofRule::Split, &[], vec![]).unwrap_err();
        assert!(matches!(err, ProofError::ArityMismatch { .. }));
    }

    #[test]
    fn test_target_step_carries_clause() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let p = fm.mk_var("p");
        let not_p = fm.mk_not(p);
        let clause = fm.mk_clause(vec![p, not_p]);
        let or = fm.mk_or(vec![p, not_p]);

        let node = store
            .add_target_step(&fm, or, AletheRule::Undefined, clause, &[], vec![])
            .unwrap();
        assert_eq!(node.target_clause(), Some(clause));
        assert_eq!(node.conclusion(), or);
        assert_eq!(store.facts(), &[or]);
    }

    #[test]
    fn test_alias_shares_proof() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let x = fm.mk_var("x");
        let y = fm.mk_var("y");
        let xy = fm.mk_eq(x, y);
        let yx = fm.mk_eq(y, x);
        let leaf = store.add_assumption(xy);

        let aliased = store.alias(yx, xy).unwrap();
        assert!(Rc::ptr_eq(&leaf, &aliased));
        assert_eq!(aliased.conclusion(), xy);
        assert_eq!(store.facts(), &[xy, yx]);
        assert!(store.alias(x, y).is_none());
    }
}
