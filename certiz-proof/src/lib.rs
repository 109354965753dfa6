//! certiz Proof - Proof DAGs and Alethe Translation
//!
//! This crate turns the internal proofs of an SMT solver into certificates
//! in the Alethe calculus:
//! - Reference-counted proof DAGs ([`ProofNode`]) and a per-conclusion
//!   [`ProofStore`] whose conclusions are computed by [`ProofChecker`]
//! - Lazily linked step records ([`LazyProofChain`], [`ProofStepBuffer`])
//! - A memoizing post-order rewrite engine ([`ProofRewriter`]) driven by a
//!   pluggable [`ProofTranslator`]
//! - The internal-to-Alethe translator ([`AletheTranslator`]), a translator
//!   to the steps of a tactic-based Lean checker ([`LeanTranslator`]) and the
//!   final refutation assembly ([`ProofManager`])
//!
//! # Examples
//!
//! ```
//! use certiz_core::{FactManager, ProofConfig};
//! use certiz_proof::{ProofManager, ProofRule, ProofStore};
//!
//! let mut fm = FactManager::new();
//! let mut store = ProofStore::new();
//!
//! let p = fm.mk_var("p");
//! let not_p = fm.mk_not(p);
//! store.add_assumption(p);
//! store.add_assumption(not_p);
//!
//! // p and (not p) resolve to false
//! let t = fm.mk_true();
//! let refutation = store
//!     .add(&mut fm, ProofRule::Resolution, &[p, not_p], vec![t, p])
//!     .unwrap();
//!
//! let mut manager = ProofManager::new(ProofConfig::default());
//! let proof = manager.final_proof(&mut fm, &refutation, &[p, not_p]).unwrap();
//! assert!(proof.free_assumptions().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod checker;
pub mod lazy;
pub mod manager;
pub mod node;
pub mod resolution;
pub mod rewrite;
pub mod rule;
pub mod step_buffer;
pub mod store;
pub mod translate;

pub use checker::ProofChecker;
pub use lazy::{LazyProofChain, ProofStep};
pub use manager::ProofManager;
pub use node::{ProofNode, ProofNodeRef};
pub use rewrite::{ProofRewriter, ProofTranslator, RewriteConfig, RewriteStats};
pub use rule::{AletheRule, Arity, Count, LeanRule, ProofRule, RuleTag, TheoryId};
pub use step_buffer::ProofStepBuffer;
pub use store::ProofStore;
pub use translate::{AletheTranslator, LeanTranslator, TranslationStats};
