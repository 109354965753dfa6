//! Access to the boolean engine's implication graph.

use certiz_core::{Lit, Var};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Source of the clauses that forced variable assignments.
pub trait ReasonProvider {
    /// Reason clause of the current assignment of `var`, or `None` for
    /// decisions, inputs and unassigned variables.
    ///
    /// The first literal of the clause is the literal it implied.
    fn reason(&self, var: Var) -> Option<Vec<Lit>>;
}

/// Reason clauses kept in a map, one per implied variable.
#[derive(Debug, Default, Clone)]
pub struct TrailReasons {
    reasons: FxHashMap<Var, SmallVec<[Lit; 4]>>,
}

impl TrailReasons {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `clause` as the reason of its first literal, replacing any
    /// previous reason of that variable. An empty clause is ignored.
    pub fn add_reason(&mut self, clause: impl IntoIterator<Item = Lit>) {
        let clause: SmallVec<[Lit; 4]> = clause.into_iter().collect();
        if let Some(implied) = clause.first() {
            self.reasons.insert(implied.var(), clause);
        }
    }

    /// Forget the reason of `var`.
    pub fn remove(&mut self, var: Var) {
        self.reasons.remove(&var);
    }

    /// Number of implied variables.
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// Check whether no variable is implied.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl ReasonProvider for TrailReasons {
    fn reason(&self, var: Var) -> Option<Vec<Lit>> {
        self.reasons.get(&var).map(|clause| clause.to_vec())
    }
}

/// A provider with no implications at all.
impl ReasonProvider for () {
    fn reason(&self, _var: Var) -> Option<Vec<Lit>> {
        None
    }
}
