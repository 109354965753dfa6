//! certiz Core - Facts, Literals and Shared Infrastructure
//!
//! This crate provides the foundational types used by the certiz proof
//! production layer:
//! - Hash-consed facts with efficient [`FactId`] handles
//! - SAT literals ([`Lit`], [`Var`]) shared with the boolean layer
//! - The [`ProofError`] taxonomy and [`Result`] alias
//! - Serializable proof production settings ([`ProofConfig`])
//!
//! # Examples
//!
//! ```
//! use certiz_core::FactManager;
//!
//! let mut fm = FactManager::new();
//!
//! let p = fm.mk_var("p");
//! let q = fm.mk_var("q");
//! let not_p = fm.mk_not(p);
//! let clause = fm.mk_or(vec![not_p, q]);
//!
//! // Structurally equal facts share one handle
//! let again = fm.mk_or(vec![not_p, q]);
//! assert_eq!(clause, again);
//! assert_eq!(fm.display(clause).to_string(), "(or (not p) q)");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fact;
pub mod literal;
pub mod logging;

pub use config::{ProofConfig, ProofFormat};
pub use error::{OptionProofExt, ProofError, Result};
pub use fact::{FactDisplay, FactId, FactKind, FactList, FactManager};
pub use literal::{Lit, Var};
pub use logging::{init_test_tracing, init_tracing};
