//! Property-based tests for certiz-sat
//!
//! Chains recorded the way conflict analysis reports them must close on the
//! learned clause exactly, whatever the literal order and however crowded
//! the naive resolvent is.

mod chain_properties;
