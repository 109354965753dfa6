//! Proof DAG nodes.
//!
//! Nodes are immutable and reference counted. A child may be shared by many
//! parents; cycles are impossible because a node can only reference nodes
//! that existed before it.

use crate::rule::{AletheRule, LeanRule, ProofRule, RuleTag};
use certiz_core::FactId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Shared handle to a proof node.
pub type ProofNodeRef = Rc<ProofNode>;

/// One inference step together with its premise sub-proofs.
#[derive(Debug, PartialEq, Eq)]
pub struct ProofNode {
    rule: RuleTag,
    conclusion: FactId,
    args: Vec<FactId>,
    children: Vec<ProofNodeRef>,
}

impl ProofNode {
    /// Create a node. The conclusion is trusted; use [`crate::ProofStore`] to
    /// have it computed from the rule.
    pub fn new(
        rule: impl Into<RuleTag>,
        conclusion: FactId,
        args: Vec<FactId>,
        children: Vec<ProofNodeRef>,
    ) -> ProofNodeRef {
        Rc::new(Self {
            rule: rule.into(),
            conclusion,
            args,
            children,
        })
    }

    /// Assumption leaf for `fact`.
    pub fn assume(fact: FactId) -> ProofNodeRef {
        Self::new(ProofRule::Assume, fact, vec![fact], Vec::new())
    }

    /// Rule of this step.
    pub fn rule(&self) -> RuleTag {
        self.rule
    }

    /// Fact proven by this step.
    pub fn conclusion(&self) -> FactId {
        self.conclusion
    }

    /// Argument facts.
    pub fn args(&self) -> &[FactId] {
        &self.args
    }

    /// Premise sub-proofs.
    pub fn children(&self) -> &[ProofNodeRef] {
        &self.children
    }

    /// Conclusions of the premises, in order.
    pub fn child_conclusions(&self) -> Vec<FactId> {
        self.children.iter().map(|c| c.conclusion).collect()
    }

    /// The `(cl ...)` clause of a target step.
    pub fn target_clause(&self) -> Option<FactId> {
        match self.rule {
            RuleTag::Alethe(_) | RuleTag::Lean(_) => self.args.first().copied(),
            RuleTag::Internal(_) => None,
        }
    }

    /// Check for an open assumption leaf.
    pub fn is_assumption(&self) -> bool {
        self.rule.is(ProofRule::Assume)
    }

    /// Facts discharged by this step, if it binds any.
    fn bound_facts(&self) -> &[FactId] {
        match self.rule {
            RuleTag::Internal(ProofRule::Scope) => &self.args,
            RuleTag::Alethe(AletheRule::Anchor) | RuleTag::Lean(LeanRule::Scope) => {
                self.args.get(1..).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    /// Assumption leaves not discharged by an enclosing scope, sorted.
    pub fn free_assumptions(self: &Rc<Self>) -> Vec<FactId> {
        let mut memo: FxHashMap<*const ProofNode, Rc<BTreeSet<FactId>>> = FxHashMap::default();
        let free = Self::collect_free(self, &mut memo);
        free.iter().copied().collect()
    }

    fn collect_free(
        node: &ProofNodeRef,
        memo: &mut FxHashMap<*const ProofNode, Rc<BTreeSet<FactId>>>,
    ) -> Rc<BTreeSet<FactId>> {
        let key = Rc::as_ptr(node);
        if let Some(done) = memo.get(&key) {
            return Rc::clone(done);
        }

        let mut free = BTreeSet::new();
        if node.is_assumption() {
            free.insert(node.conclusion);
        }
        for child in &node.children {
            free.extend(Self::collect_free(child, memo).iter().copied());
        }
        for bound in node.bound_facts() {
            free.remove(bound);
        }

        let free = Rc::new(free);
        memo.insert(key, Rc::clone(&free));
        free
    }

    /// Number of distinct nodes reachable from this one.
    pub fn dag_size(self: &Rc<Self>) -> usize {
        let mut seen = FxHashSet::default();
        let mut stack = vec![Rc::clone(self)];
        while let Some(node) = stack.pop() {
            if seen.insert(Rc::as_ptr(&node)) {
                stack.extend(node.children.iter().cloned());
            }
        }
        seen.len()
    }

    /// Visit every distinct node once, children before parents.
    pub fn for_each_post_order(self: &Rc<Self>, mut visit: impl FnMut(&ProofNodeRef)) {
        let mut seen = FxHashSet::default();
        Self::post_order(self, &mut seen, &mut visit);
    }

    fn post_order(
        node: &ProofNodeRef,
        seen: &mut FxHashSet<*const ProofNode>,
        visit: &mut impl FnMut(&ProofNodeRef),
    ) {
        if !seen.insert(Rc::as_ptr(node)) {
            return;
        }
        for child in &node.children {
            Self::post_order(child, seen, visit);
        }
        visit(node);
    }
}
