//! SAT literals as seen by the proof layer.
//!
//! The boolean engine reports propagations and conflicts in terms of these
//! literals; the CNF map in `certiz-sat` turns them back into facts.

use std::fmt;
use std::ops::Not;

/// A Boolean variable of the SAT engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(u32);

impl Var {
    /// Create a variable from its index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Index of the variable.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A signed occurrence of a [`Var`].
///
/// Encoded as `2 * var + sign`, so a literal and its negation differ in the
/// lowest bit only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(u32);

impl Lit {
    /// Literal of `var` with the given sign.
    #[must_use]
    pub const fn new(var: Var, negated: bool) -> Self {
        Self((var.0 << 1) | negated as u32)
    }

    /// Positive literal of `var`.
    #[must_use]
    pub const fn pos(var: Var) -> Self {
        Self::new(var, false)
    }

    /// Negative literal of `var`.
    #[must_use]
    pub const fn neg(var: Var) -> Self {
        Self::new(var, true)
    }

    /// Variable of this literal.
    #[must_use]
    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    /// Check if this literal is negated.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        (self.0 & 1) == 1
    }

    /// The complementary literal.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        self.negate()
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "~{}", self.var())
        } else {
            write!(f, "{}", self.var())
        }
    }
}
