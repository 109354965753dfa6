//! certiz SAT - Resolution Proofs from CDCL Conflict Analysis
//!
//! This crate records how a CDCL engine derives its learned clauses and the
//! empty clause, and turns that record into a proof of `false` whose leaves
//! are input clauses:
//! - A literal/fact table for the CNF layer ([`CnfMap`])
//! - Access to the engine's implication graph ([`ReasonProvider`])
//! - Resolution chains with crowding literal elimination
//!   ([`ResolutionChainBuilder`])
//! - Explanation of propagated literals and proof finalization
//!   ([`SatProofManager`])
//!
//! # Examples
//!
//! ```
//! use certiz_core::{FactManager, Lit, ProofConfig, Var};
//! use certiz_sat::{SatProofManager, TrailReasons};
//!
//! let mut fm = FactManager::new();
//! let mut sat = SatProofManager::new(ProofConfig::default());
//!
//! let a = Lit::pos(Var::new(0));
//! let b = Lit::pos(Var::new(1));
//! let fa = fm.mk_var("a");
//! let fb = fm.mk_var("b");
//! sat.register_lit(&mut fm, a, fa).unwrap();
//! sat.register_lit(&mut fm, b, fb).unwrap();
//!
//! // a, (or (not a) b) and (not b) are contradictory
//! sat.register_input_lit(&mut fm, a).unwrap();
//! sat.register_input_clause(&mut fm, &[!a, b]).unwrap();
//! sat.register_input_lit(&mut fm, !b).unwrap();
//!
//! // b was propagated by (or (not a) b) and conflicts with (not b)
//! let mut trail = TrailReasons::new();
//! trail.add_reason([b, !a]);
//! let proof = sat.finalize_proof(&mut fm, &trail, &[!b]).unwrap();
//! assert!(fm.is_false(proof.conclusion()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod chain;
pub mod cnf;
pub mod crowding;
pub mod manager;
pub mod reason;

pub use chain::{ChainConfig, ChainState, ChainStats, ResolutionChainBuilder};
pub use cnf::CnfMap;
pub use crowding::{ResolutionLink, eliminate_crowding_literals};
pub use manager::{SatProofManager, SatProofStats};
pub use reason::{ReasonProvider, TrailReasons};
