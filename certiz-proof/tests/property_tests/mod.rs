//! Property-based tests for certiz-proof
//!
//! Resolution results are checked against their literal-level definition and
//! translated refutations are checked for closedness and for the order of
//! the literals they print.

mod duality_properties;
mod resolution_properties;
mod translation_properties;
