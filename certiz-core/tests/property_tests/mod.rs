//! Property-based tests for certiz-core

mod fact_properties;
