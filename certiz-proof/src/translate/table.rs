//! Internal rules translated by exactly one Alethe step.

use crate::rule::{AletheRule, ProofRule};

/// How the clause of a single-step translation is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseShape {
    /// The conclusion is a disjunction; its disjuncts are the literals
    FromOr,
    /// The conclusion is the only literal
    Unit,
}

/// Target rule and clause shape for rules with a direct counterpart.
pub fn single_step(rule: ProofRule) -> Option<(AletheRule, ClauseShape)> {
    use ClauseShape::{FromOr, Unit};
    use ProofRule::*;
    let entry = match rule {
        AndElim => (AletheRule::And, Unit),
        NotOrElim => (AletheRule::NotOr, Unit),
        ImpliesElim => (AletheRule::Implies, FromOr),
        NotImpliesElim1 => (AletheRule::NotImplies1, Unit),
        NotImpliesElim2 => (AletheRule::NotImplies2, Unit),
        EquivElim1 => (AletheRule::Equiv1, FromOr),
        EquivElim2 => (AletheRule::Equiv2, FromOr),
        NotEquivElim1 => (AletheRule::NotEquiv1, FromOr),
        NotEquivElim2 => (AletheRule::NotEquiv2, FromOr),
        XorElim1 => (AletheRule::Xor1, FromOr),
        XorElim2 => (AletheRule::Xor2, FromOr),
        NotXorElim1 => (AletheRule::NotXor1, FromOr),
        NotXorElim2 => (AletheRule::NotXor2, FromOr),
        // the two calculi number the ite cases the other way round
        IteElim1 => (AletheRule::Ite2, FromOr),
        IteElim2 => (AletheRule::Ite1, FromOr),
        NotIteElim1 => (AletheRule::NotIte2, FromOr),
        NotIteElim2 => (AletheRule::NotIte1, FromOr),
        NotAnd => (AletheRule::NotAnd, FromOr),
        CnfAndPos => (AletheRule::AndPos, FromOr),
        CnfAndNeg => (AletheRule::AndNeg, FromOr),
        CnfOrPos => (AletheRule::OrPos, FromOr),
        CnfOrNeg => (AletheRule::OrNeg, FromOr),
        CnfImpliesPos => (AletheRule::ImpliesPos, FromOr),
        CnfImpliesNeg1 => (AletheRule::ImpliesNeg1, FromOr),
        CnfImpliesNeg2 => (AletheRule::ImpliesNeg2, FromOr),
        CnfEquivPos1 => (AletheRule::EquivPos2, FromOr),
        CnfEquivPos2 => (AletheRule::EquivPos1, FromOr),
        CnfEquivNeg1 => (AletheRule::EquivNeg2, FromOr),
        CnfEquivNeg2 => (AletheRule::EquivNeg1, FromOr),
        CnfXorPos1 => (AletheRule::XorPos1, FromOr),
        CnfXorPos2 => (AletheRule::XorPos2, FromOr),
        CnfXorNeg1 => (AletheRule::XorNeg2, FromOr),
        CnfXorNeg2 => (AletheRule::XorNeg1, FromOr),
        CnfItePos1 => (AletheRule::ItePos2, FromOr),
        CnfItePos2 => (AletheRule::ItePos1, FromOr),
        CnfIteNeg1 => (AletheRule::IteNeg2, FromOr),
        CnfIteNeg2 => (AletheRule::IteNeg1, FromOr),
        Refl => (AletheRule::Refl, Unit),
        Trans => (AletheRule::Trans, Unit),
        Cong => (AletheRule::Cong, Unit),
        Symm => (AletheRule::Symm, Unit),
        Reordering => (AletheRule::Reorder, FromOr),
        ArithOpElimAxiom => (AletheRule::LaTautology, FromOr),
        ArithMultSign | ArithMultTangent => (AletheRule::LaGeneric, FromOr),
        ArithMultPos => (AletheRule::LaMultPos, FromOr),
        ArithMultNeg => (AletheRule::LaMultNeg, FromOr),
        IntTrust => (AletheRule::LiaGeneric, FromOr),
        _ => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_step_rules_have_no_entry() {
        for rule in [
            ProofRule::Scope,
            ProofRule::Resolution,
            ProofRule::ChainResolution,
            ProofRule::Split,
            ProofRule::CnfItePos3,
            ProofRule::TheoryRewrite,
            ProofRule::Assume,
            ProofRule::Instantiate,
            ProofRule::ArithTrichotomy,
        ] {
            assert!(single_step(rule).is_none(), "{}", rule);
        }
    }

    #[test]
    fn test_ite_cases_swap() {
        assert_eq!(
            single_step(ProofRule::IteElim1),
            Some((AletheRule::Ite2, ClauseShape::FromOr))
        );
        assert_eq!(
            single_step(ProofRule::CnfIteNeg2),
            Some((AletheRule::IteNeg1, ClauseShape::FromOr))
        );
        assert_eq!(
            single_step(ProofRule::AndElim),
            Some((AletheRule::And, ClauseShape::Unit))
        );
    }
}
