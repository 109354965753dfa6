//! Rule tags of the internal and the target calculus.
//!
//! Both calculi are closed enumerations. Internal rules carry an arity
//! contract that [`crate::ProofStore`] enforces before computing a conclusion.

use std::fmt;

/// Rules of the internal calculus produced by the boolean and theory layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProofRule {
    /// Open assumption `F`
    Assume,
    /// Discharge assumptions `F1..Fn` of a proof of `F`
    Scope,
    /// Binary resolution with `[polarity, pivot]`
    Resolution,
    /// N-ary resolution with one `[polarity, pivot]` pair per link
    ChainResolution,
    /// Remove duplicate literals
    Factoring,
    /// Permute literals into the argument clause
    Reordering,
    /// `(or F (not F))`
    Split,
    /// From `F1` and `(= F1 F2)` conclude `F2`
    EqResolve,
    /// From `F1` and `(=> F1 F2)` conclude `F2`
    ModusPonens,
    /// From `(not (not F))` conclude `F`
    NotNotElim,
    /// From `F` and `(not F)` conclude `false`
    Contra,
    /// i-th conjunct
    AndElim,
    /// Conjunction of the premises
    AndIntro,
    /// Negated i-th disjunct of a negated disjunction
    NotOrElim,
    #[allow(missing_docs)]
    ImpliesElim,
    #[allow(missing_docs)]
    NotImpliesElim1,
    #[allow(missing_docs)]
    NotImpliesElim2,
    #[allow(missing_docs)]
    EquivElim1,
    #[allow(missing_docs)]
    EquivElim2,
    #[allow(missing_docs)]
    NotEquivElim1,
    #[allow(missing_docs)]
    NotEquivElim2,
    #[allow(missing_docs)]
    XorElim1,
    #[allow(missing_docs)]
    XorElim2,
    #[allow(missing_docs)]
    NotXorElim1,
    #[allow(missing_docs)]
    NotXorElim2,
    #[allow(missing_docs)]
    IteElim1,
    #[allow(missing_docs)]
    IteElim2,
    #[allow(missing_docs)]
    NotIteElim1,
    #[allow(missing_docs)]
    NotIteElim2,
    /// De Morgan on a negated conjunction
    NotAnd,
    #[allow(missing_docs)]
    CnfAndPos,
    #[allow(missing_docs)]
    CnfAndNeg,
    #[allow(missing_docs)]
    CnfOrPos,
    #[allow(missing_docs)]
    CnfOrNeg,
    #[allow(missing_docs)]
    CnfImpliesPos,
    #[allow(missing_docs)]
    CnfImpliesNeg1,
    #[allow(missing_docs)]
    CnfImpliesNeg2,
    #[allow(missing_docs)]
    CnfEquivPos1,
    #[allow(missing_docs)]
    CnfEquivPos2,
    #[allow(missing_docs)]
    CnfEquivNeg1,
    #[allow(missing_docs)]
    CnfEquivNeg2,
    #[allow(missing_docs)]
    CnfXorPos1,
    #[allow(missing_docs)]
    CnfXorPos2,
    #[allow(missing_docs)]
    CnfXorNeg1,
    #[allow(missing_docs)]
    CnfXorNeg2,
    #[allow(missing_docs)]
    CnfItePos1,
    #[allow(missing_docs)]
    CnfItePos2,
    #[allow(missing_docs)]
    CnfItePos3,
    #[allow(missing_docs)]
    CnfIteNeg1,
    #[allow(missing_docs)]
    CnfIteNeg2,
    #[allow(missing_docs)]
    CnfIteNeg3,
    /// `(= t t)`
    Refl,
    /// Flip an equality or disequality
    Symm,
    /// Chain equalities
    Trans,
    /// Congruence over the uninterpreted symbol given as argument
    Cong,
    /// From `F` conclude `(= F true)`
    TrueIntro,
    /// From `(= F true)` conclude `F`
    TrueElim,
    /// From `(not F)` conclude `(= F false)`
    FalseIntro,
    /// From `(= F false)` conclude `(not F)`
    FalseElim,
    /// Trusted rewrite `(= t t')` attributed to a theory
    TheoryRewrite,
    /// Instance `args[0]` of the quantified premise under the terms `args[1..]`
    Instantiate,
    /// Skolemized form `args[0]` of the premise
    Skolemize,
    /// Sum of the premise bounds scaled by the coefficients `args[1..]`
    ArithScaleSumUpperBounds,
    /// Integer tightening of a strict upper bound
    IntTightUb,
    /// Integer tightening of a strict lower bound
    IntTightLb,
    /// Third relation from two of `<`, `=`, `>`
    ArithTrichotomy,
    /// Defining axiom of an eliminated arithmetic operator
    ArithOpElimAxiom,
    /// Trusted integer step
    IntTrust,
    /// Sign of a monomial from the signs of its factors
    ArithMultSign,
    /// Multiplying both sides by a positive factor
    ArithMultPos,
    /// Multiplying both sides by a negative factor
    ArithMultNeg,
    /// Tangent plane lemma of a product
    ArithMultTangent,
    /// Trusted step concluding its argument
    Trust,
    /// Step of unknown origin concluding its argument
    Unknown,
}

impl ProofRule {
    /// Every internal rule, in declaration order.
    pub const ALL: &'static [ProofRule] = &[
        ProofRule::Assume,
        ProofRule::Scope,
        ProofRule::Resolution,
        ProofRule::ChainResolution,
        ProofRule::Factoring,
        ProofRule::Reordering,
        ProofRule::Split,
        ProofRule::EqResolve,
        ProofRule::ModusPonens,
        ProofRule::NotNotElim,
        ProofRule::Contra,
        ProofRule::AndElim,
        ProofRule::AndIntro,
        ProofRule::NotOrElim,
        ProofRule::ImpliesElim,
        ProofRule::NotImpliesElim1,
        ProofRule::NotImpliesElim2,
        ProofRule::EquivElim1,
        ProofRule::EquivElim2,
        ProofRule::NotEquivElim1,
        ProofRule::NotEquivElim2,
        ProofRule::XorElim1,
        ProofRule::XorElim2,
        ProofRule::NotXorElim1,
        ProofRule::NotXorElim2,
        ProofRule::IteElim1,
        ProofRule::IteElim2,
        ProofRule::NotIteElim1,
        ProofRule::NotIteElim2,
        ProofRule::NotAnd,
        ProofRule::CnfAndPos,
        ProofRule::CnfAndNeg,
        ProofRule::CnfOrPos,
        ProofRule::CnfOrNeg,
        ProofRule::CnfImpliesPos,
        ProofRule::CnfImpliesNeg1,
        ProofRule::CnfImpliesNeg2,
        ProofRule::CnfEquivPos1,
        ProofRule::CnfEquivPos2,
        ProofRule::CnfEquivNeg1,
        ProofRule::CnfEquivNeg2,
        ProofRule::CnfXorPos1,
        ProofRule::CnfXorPos2,
        ProofRule::CnfXorNeg1,
        ProofRule::CnfXorNeg2,
        ProofRule::CnfItePos1,
        ProofRule::CnfItePos2,
        ProofRule::CnfItePos3,
        ProofRule::CnfIteNeg1,
        ProofRule::CnfIteNeg2,
        ProofRule::CnfIteNeg3,
        ProofRule::Refl,
        ProofRule::Symm,
        ProofRule::Trans,
        ProofRule::Cong,
        ProofRule::TrueIntro,
        ProofRule::TrueElim,
        ProofRule::FalseIntro,
        ProofRule::FalseElim,
        ProofRule::TheoryRewrite,
        ProofRule::Instantiate,
        ProofRule::Skolemize,
        ProofRule::ArithScaleSumUpperBounds,
        ProofRule::IntTightUb,
        ProofRule::IntTightLb,
        ProofRule::ArithTrichotomy,
        ProofRule::ArithOpElimAxiom,
        ProofRule::IntTrust,
        ProofRule::ArithMultSign,
        ProofRule::ArithMultPos,
        ProofRule::ArithMultNeg,
        ProofRule::ArithMultTangent,
        ProofRule::Trust,
        ProofRule::Unknown,
    ];

    /// Upper snake case name, as printed in diagnostics.
    pub fn name(self) -> &'static str {
        use ProofRule::*;
        match self {
            Assume => "ASSUME",
            Scope => "SCOPE",
            Resolution => "RESOLUTION",
            ChainResolution => "CHAIN_RESOLUTION",
            Factoring => "FACTORING",
            Reordering => "REORDERING",
            Split => "SPLIT",
            EqResolve => "EQ_RESOLVE",
            ModusPonens => "MODUS_PONENS",
            NotNotElim => "NOT_NOT_ELIM",
            Contra => "CONTRA",
            AndElim => "AND_ELIM",
            AndIntro => "AND_INTRO",
            NotOrElim => "NOT_OR_ELIM",
            ImpliesElim => "IMPLIES_ELIM",
            NotImpliesElim1 => "NOT_IMPLIES_ELIM1",
            NotImpliesElim2 => "NOT_IMPLIES_ELIM2",
            EquivElim1 => "EQUIV_ELIM1",
            EquivElim2 => "EQUIV_ELIM2",
            NotEquivElim1 => "NOT_EQUIV_ELIM1",
            NotEquivElim2 => "NOT_EQUIV_ELIM2",
            XorElim1 => "XOR_ELIM1",
            XorElim2 => "XOR_ELIM2",
            NotXorElim1 => "NOT_XOR_ELIM1",
            NotXorElim2 => "NOT_XOR_ELIM2",
            IteElim1 => "ITE_ELIM1",
            IteElim2 => "ITE_ELIM2",
            NotIteElim1 => "NOT_ITE_ELIM1",
            NotIteElim2 => "NOT_ITE_ELIM2",
            NotAnd => "NOT_AND",
            CnfAndPos => "CNF_AND_POS",
            CnfAndNeg => "CNF_AND_NEG",
            CnfOrPos => "CNF_OR_POS",
            CnfOrNeg => "CNF_OR_NEG",
            CnfImpliesPos => "CNF_IMPLIES_POS",
            CnfImpliesNeg1 => "CNF_IMPLIES_NEG1",
            CnfImpliesNeg2 => "CNF_IMPLIES_NEG2",
            CnfEquivPos1 => "CNF_EQUIV_POS1",
            CnfEquivPos2 => "CNF_EQUIV_POS2",
            CnfEquivNeg1 => "CNF_EQUIV_NEG1",
            CnfEquivNeg2 => "CNF_EQUIV_NEG2",
            CnfXorPos1 => "CNF_XOR_POS1",
            CnfXorPos2 => "CNF_XOR_POS2",
            CnfXorNeg1 => "CNF_XOR_NEG1",
            CnfXorNeg2 => "CNF_XOR_NEG2",
            CnfItePos1 => "CNF_ITE_POS1",
            CnfItePos2 => "CNF_ITE_POS2",
            CnfItePos3 => "CNF_ITE_POS3",
            CnfIteNeg1 => "CNF_ITE_NEG1",
            CnfIteNeg2 => "CNF_ITE_NEG2",
            CnfIteNeg3 => "CNF_ITE_NEG3",
            Refl => "REFL",
            Symm => "SYMM",
            Trans => "TRANS",
            Cong => "CONG",
            TrueIntro => "TRUE_INTRO",
            TrueElim => "TRUE_ELIM",
            FalseIntro => "FALSE_INTRO",
            FalseElim => "FALSE_ELIM",
            TheoryRewrite => "THEORY_REWRITE",
            Instantiate => "INSTANTIATE",
            Skolemize => "SKOLEMIZE",
            ArithScaleSumUpperBounds => "ARITH_SCALE_SUM_UPPER_BOUNDS",
            IntTightUb => "INT_TIGHT_UB",
            IntTightLb => "INT_TIGHT_LB",
            ArithTrichotomy => "ARITH_TRICHOTOMY",
            ArithOpElimAxiom => "ARITH_OP_ELIM_AXIOM",
            IntTrust => "INT_TRUST",
            ArithMultSign => "ARITH_MULT_SIGN",
            ArithMultPos => "ARITH_MULT_POS",
            ArithMultNeg => "ARITH_MULT_NEG",
            ArithMultTangent => "ARITH_MULT_TANGENT",
            Trust => "TRUST",
            Unknown => "UNKNOWN",
        }
    }

    /// Arity contract of the rule.
    pub fn arity(self) -> Arity {
        use Count::{AtLeast, Exact};
        use ProofRule::*;
        let (children, args) = match self {
            Assume => (Exact(0), Exact(1)),
            Scope => (Exact(1), AtLeast(1)),
            Resolution => (Exact(2), Exact(2)),
            ChainResolution => (AtLeast(2), AtLeast(2)),
            Factoring => (Exact(1), Exact(0)),
            Reordering => (Exact(1), Exact(1)),
            Split => (Exact(0), Exact(1)),
            EqResolve | ModusPonens | Contra => (Exact(2), Exact(0)),
            AndElim | NotOrElim => (Exact(1), Exact(1)),
            AndIntro | Trans => (AtLeast(1), Exact(0)),
            Cong => (AtLeast(1), Exact(1)),
            NotNotElim | ImpliesElim | NotImpliesElim1 | NotImpliesElim2 | EquivElim1
            | EquivElim2 | NotEquivElim1 | NotEquivElim2 | XorElim1 | XorElim2 | NotXorElim1
            | NotXorElim2 | IteElim1 | IteElim2 | NotIteElim1 | NotIteElim2 | NotAnd | Symm
            | TrueIntro | TrueElim | FalseIntro | FalseElim => (Exact(1), Exact(0)),
            CnfAndPos | CnfOrNeg | TheoryRewrite => (Exact(0), Exact(2)),
            CnfAndNeg | CnfOrPos | CnfImpliesPos | CnfImpliesNeg1 | CnfImpliesNeg2
            | CnfEquivPos1 | CnfEquivPos2 | CnfEquivNeg1 | CnfEquivNeg2 | CnfXorPos1
            | CnfXorPos2 | CnfXorNeg1 | CnfXorNeg2 | CnfItePos1 | CnfItePos2 | CnfItePos3
            | CnfIteNeg1 | CnfIteNeg2 | CnfIteNeg3 | Refl => (Exact(0), Exact(1)),
            Instantiate => (Exact(1), AtLeast(1)),
            Skolemize | IntTightUb | IntTightLb => (Exact(1), Exact(1)),
            ArithScaleSumUpperBounds => (AtLeast(1), AtLeast(1)),
            ArithTrichotomy => (Exact(2), Exact(1)),
            ArithOpElimAxiom | ArithMultSign | ArithMultPos | ArithMultNeg | ArithMultTangent => {
                (Exact(0), AtLeast(1))
            }
            Trust | Unknown | IntTrust => (AtLeast(0), Exact(1)),
        };
        Arity { children, args }
    }
}

impl fmt::Display for ProofRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected number of children or arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// Exactly this many
    Exact(usize),
    /// This many or more
    AtLeast(usize),
}

impl Count {
    /// Check whether `n` satisfies the contract.
    pub fn admits(self, n: usize) -> bool {
        match self {
            Count::Exact(k) => n == k,
            Count::AtLeast(k) => n >= k,
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Exact(k) => write!(f, "exactly {}", k),
            Count::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

/// Arity contract of an internal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Premises
    pub children: Count,
    /// Argument facts
    pub args: Count,
}

/// Rules of the Alethe calculus checked by veriT-compatible tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum AletheRule {
    Anchor,
    And,
    AndPos,
    AndNeg,
    Or,
    OrPos,
    OrNeg,
    NotOr,
    NotAnd,
    Implies,
    NotImplies1,
    NotImplies2,
    Equiv1,
    Equiv2,
    NotEquiv1,
    NotEquiv2,
    Xor1,
    Xor2,
    NotXor1,
    NotXor2,
    Ite1,
    Ite2,
    NotIte1,
    NotIte2,
    ImpliesPos,
    ImpliesNeg1,
    ImpliesNeg2,
    EquivPos1,
    EquivPos2,
    EquivNeg1,
    EquivNeg2,
    XorPos1,
    XorPos2,
    XorNeg1,
    XorNeg2,
    ItePos1,
    ItePos2,
    IteNeg1,
    IteNeg2,
    NotNot,
    Resolution,
    Reorder,
    DuplicatedLiterals,
    Refl,
    Trans,
    Cong,
    Symm,
    EquivSimplify,
    ImpliesSimplify,
    IteSimplify,
    EqSimplify,
    AndSimplify,
    OrSimplify,
    NotSimplify,
    BoolSimplify,
    QuantifierSimplify,
    DivSimplify,
    ProdSimplify,
    MinusSimplify,
    UnaryMinusSimplify,
    SumSimplify,
    CompSimplify,
    ForallInst,
    SkoEx,
    SkoForall,
    LaGeneric,
    LiaGeneric,
    LaTautology,
    LaMultPos,
    LaMultNeg,
    False,
    /// Distinguished tag for rules with no Alethe expansion
    Undefined,
}

impl AletheRule {
    /// Rule name as printed in an Alethe proof.
    pub fn name(self) -> &'static str {
        use AletheRule::*;
        match self {
            Anchor => "subproof",
            And => "and",
            AndPos => "and_pos",
            AndNeg => "and_neg",
            Or => "or",
            OrPos => "or_pos",
            OrNeg => "or_neg",
            NotOr => "not_or",
            NotAnd => "not_and",
            Implies => "implies",
            NotImplies1 => "not_implies1",
            NotImplies2 => "not_implies2",
            Equiv1 => "equiv1",
            Equiv2 => "equiv2",
            NotEquiv1 => "not_equiv1",
            NotEquiv2 => "not_equiv2",
            Xor1 => "xor1",
            Xor2 => "xor2",
            NotXor1 => "not_xor1",
            NotXor2 => "not_xor2",
            Ite1 => "ite1",
            Ite2 => "ite2",
            NotIte1 => "not_ite1",
            NotIte2 => "not_ite2",
            ImpliesPos => "implies_pos",
            ImpliesNeg1 => "implies_neg1",
            ImpliesNeg2 => "implies_neg2",
            EquivPos1 => "equiv_pos1",
            EquivPos2 => "equiv_pos2",
            EquivNeg1 => "equiv_neg1",
            EquivNeg2 => "equiv_neg2",
            XorPos1 => "xor_pos1",
            XorPos2 => "xor_pos2",
            XorNeg1 => "xor_neg1",
            XorNeg2 => "xor_neg2",
            ItePos1 => "ite_pos1",
            ItePos2 => "ite_pos2",
            IteNeg1 => "ite_neg1",
            IteNeg2 => "ite_neg2",
            NotNot => "not_not",
            Resolution => "resolution",
            Reorder => "reordering",
            DuplicatedLiterals => "contraction",
            Refl => "refl",
            Trans => "trans",
            Cong => "cong",
            Symm => "symm",
            EquivSimplify => "equiv_simplify",
            ImpliesSimplify => "implies_simplify",
            IteSimplify => "ite_simplify",
            EqSimplify => "eq_simplify",
            AndSimplify => "and_simplify",
            OrSimplify => "or_simplify",
            NotSimplify => "not_simplify",
            BoolSimplify => "bool_simplify",
            QuantifierSimplify => "qnt_simplify",
            DivSimplify => "div_simplify",
            ProdSimplify => "prod_simplify",
            MinusSimplify => "minus_simplify",
            UnaryMinusSimplify => "unary_minus_simplify",
            SumSimplify => "sum_simplify",
            CompSimplify => "comp_simplify",
            ForallInst => "forall_inst",
            SkoEx => "sko_ex",
            SkoForall => "sko_forall",
            LaGeneric => "la_generic",
            LiaGeneric => "lia_generic",
            LaTautology => "la_tautology",
            LaMultPos => "la_mult_pos",
            LaMultNeg => "la_mult_neg",
            False => "false",
            Undefined => "hole",
        }
    }
}

impl fmt::Display for AletheRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rules of the tactic-based Lean checker.
///
/// Steps whose conclusion is a plain term carry `(cl res)`; the clausal ones
/// carry the clause the Lean tactics operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum LeanRule {
    Scope,
    ImpliesElim,
    EqResolve,
    AndElim,
    Refl,
    ThTrustValid,
    Symm,
    NegSymm,
    ReflPartial,
    CongPartial,
    Cong,
    Trans,
    R0,
    R0Partial,
    R1,
    R1Partial,
    Reorder,
    CnfAndPos,
    /// No Lean counterpart
    Unknown,
}

impl LeanRule {
    /// Tactic name.
    pub fn name(self) -> &'static str {
        use LeanRule::*;
        match self {
            Scope => "scope",
            ImpliesElim => "impliesElim",
            EqResolve => "eqResolve",
            AndElim => "andElim",
            Refl => "refl",
            ThTrustValid => "thTrustValid",
            Symm => "symm",
            NegSymm => "negSymm",
            ReflPartial => "reflP",
            CongPartial => "congP",
            Cong => "cong",
            Trans => "trans",
            R0 => "R0",
            R0Partial => "R0P",
            R1 => "R1",
            R1Partial => "R1P",
            Reorder => "reorder",
            CnfAndPos => "cnfAndPos",
            Unknown => "unknown",
        }
    }

    /// Check whether the step works on clauses rather than terms.
    pub fn is_clausal(self) -> bool {
        use LeanRule::*;
        matches!(
            self,
            R0 | R0Partial | R1 | R1Partial | Reorder | CnfAndPos | Scope | ImpliesElim
        )
    }
}

impl fmt::Display for LeanRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag of a proof node: an internal rule or a rule of a target calculus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTag {
    /// Internal rule
    Internal(ProofRule),
    /// Alethe rule; the node's first argument is its `(cl ...)` clause
    Alethe(AletheRule),
    /// Lean rule; the first argument is a clause as for Alethe
    Lean(LeanRule),
}

impl RuleTag {
    /// The internal rule, if any.
    pub fn internal(self) -> Option<ProofRule> {
        match self {
            RuleTag::Internal(rule) => Some(rule),
            RuleTag::Alethe(_) | RuleTag::Lean(_) => None,
        }
    }

    /// Check for a rule of a target calculus.
    pub fn is_target(self) -> bool {
        !matches!(self, RuleTag::Internal(_))
    }

    /// Check for the given internal rule.
    pub fn is(self, rule: ProofRule) -> bool {
        self == RuleTag::Internal(rule)
    }
}

impl From<ProofRule> for RuleTag {
    fn from(rule: ProofRule) -> Self {
        RuleTag::Internal(rule)
    }
}

impl From<AletheRule> for RuleTag {
    fn from(rule: AletheRule) -> Self {
        RuleTag::Alethe(rule)
    }
}

impl From<LeanRule> for RuleTag {
    fn from(rule: LeanRule) -> Self {
        RuleTag::Lean(rule)
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTag::Internal(rule) => write!(f, "{}", rule),
            RuleTag::Alethe(rule) => write!(f, "{}", rule),
            RuleTag::Lean(rule) => write!(f, "{}", rule),
        }
    }
}

/// Theory a trusted rewrite is attributed to, encoded as an integer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TheoryId {
    /// Builtin operators (ite, equality, connectives)
    Builtin,
    /// Boolean theory
    Bool,
    /// Uninterpreted functions
    Uf,
    /// Arithmetic
    Arith,
    /// Quantifiers
    Quantifiers,
    /// Any other theory
    Other,
}

impl TheoryId {
    /// Decode the integer argument of a theory rewrite.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => TheoryId::Builtin,
            1 => TheoryId::Bool,
            2 => TheoryId::Uf,
            3 => TheoryId::Arith,
            4 => TheoryId::Quantifiers,
            _ => TheoryId::Other,
        }
    }

    /// Integer encoding of the theory.
    pub fn index(self) -> i64 {
        match self {
            TheoryId::Builtin => 0,
            TheoryId::Bool => 1,
            TheoryId::Uf => 2,
            TheoryId::Arith => 3,
            TheoryId::Quantifiers => 4,
            TheoryId::Other => 99,
        }
    }
}
