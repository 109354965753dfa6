//! Error types for proof production.
//!
//! Every variant aborts proof production for the current refutation. The
//! caller is expected to degrade to an "unsat without proof" answer instead of
//! crashing. Rules a translator cannot express are not errors; they become
//! trusted leaves.

use crate::fact::{FactId, FactManager};
use thiserror::Error;

/// Errors raised while building or translating proofs.
#[derive(Error, Debug)]
pub enum ProofError {
    /// A step was built with the wrong number of children or arguments.
    #[error("arity mismatch for {rule}: expected {expected} {what}, found {found}")]
    ArityMismatch {
        /// Rule name
        rule: String,
        /// "children" or "arguments"
        what: &'static str,
        /// Expected count, rendered
        expected: String,
        /// Actual count
        found: usize,
    },

    /// A step references a fact that has no stored proof.
    #[error("no stored proof for {0}")]
    UnknownFact(String),

    /// A literal's justification requires the literal itself.
    #[error("cyclic justification of {0}")]
    CyclicJustification(String),

    /// Finalization left free assumptions that are not inputs.
    #[error("proof is not closed, free assumptions: {}", .0.join(", "))]
    NonClosedProof(Vec<String>),

    /// A recomputed conclusion differs from the requested one.
    #[error("conclusion mismatch: expected {expected}, computed {found}")]
    ConclusionMismatch {
        /// Requested conclusion
        expected: String,
        /// Conclusion actually derived
        found: String,
    },

    /// Crowding literal elimination discovered a literal that does not
    /// appear strictly later than the literal that introduced it.
    #[error("crowding literal elimination loops on {0}")]
    CrowdingLoop(String),

    /// No later link eliminates a crowding literal.
    #[error("no link eliminates crowding literal {0}")]
    UnresolvedCrowdingLiteral(String),

    /// A step whose premises do not support its conclusion.
    #[error("invalid {rule} step: {message}")]
    InvalidStep {
        /// Rule name
        rule: String,
        /// What is wrong
        message: String,
    },

    /// An operation was called in the wrong builder state.
    #[error("invalid state: {0}")]
    State(String),

    /// Configuration could not be read or written.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for proof operations.
pub type Result<T> = std::result::Result<T, ProofError>;

impl ProofError {
    /// Unknown fact, rendered through the manager.
    pub fn unknown_fact(fm: &FactManager, fact: FactId) -> Self {
        Self::UnknownFact(fm.display(fact).to_string())
    }

    /// Cyclic justification of a fact.
    pub fn cyclic(fm: &FactManager, fact: FactId) -> Self {
        Self::CyclicJustification(fm.display(fact).to_string())
    }

    /// Invalid step of `rule`.
    pub fn invalid_step(rule: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidStep {
            rule: rule.to_string(),
            message: message.into(),
        }
    }

    /// Mismatch between an expected and a computed conclusion.
    pub fn mismatch(fm: &FactManager, expected: FactId, found: FactId) -> Self {
        Self::ConclusionMismatch {
            expected: fm.display(expected).to_string(),
            found: fm.display(found).to_string(),
        }
    }

    /// Non-closed proof with the given offending assumptions.
    pub fn non_closed(fm: &FactManager, facts: &[FactId]) -> Self {
        Self::NonClosedProof(facts.iter().map(|&f| fm.display(f).to_string()).collect())
    }
}

/// Extension trait turning missing proofs into [`ProofError::UnknownFact`].
pub trait OptionProofExt<T> {
    /// Convert `None` into an unknown-fact error for `fact`.
    fn or_unknown(self, fm: &FactManager, fact: FactId) -> Result<T>;
}

impl<T> OptionProofExt<T> for Option<T> {
    fn or_unknown(self, fm: &FactManager, fact: FactId) -> Result<T> {
        self.ok_or_else(|| ProofError::unknown_fact(fm, fact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_render_facts() {
        let mut fm = FactManager::new();
        let p = fm.mk_var("p");
        let not_p = fm.mk_not(p);

        let err = ProofError::mismatch(&fm, p, not_p);
        assert_eq!(
            err.to_string(),
            "conclusion mismatch: expected p, computed (not p)"
        );

        let err = ProofError::non_closed(&fm, &[p, not_p]);
        assert!(err.to_string().ends_with("p, (not p)"));
    }

    #[test]
    fn test_or_unknown() {
        let mut fm = FactManager::new();
        let q = fm.mk_var("q");
        let missing: Option<u8> = None;

        let err = missing.or_unknown(&fm, q).unwrap_err();
        assert!(matches!(err, ProofError::UnknownFact(ref s) if s == "q"));
        assert_eq!(Some(3u8).or_unknown(&fm, q).unwrap(), 3);
    }

    #[test]
    fn test_config_error_from_json() {
        let err: ProofError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ProofError::Config(_)));
    }
}
