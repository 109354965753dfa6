//! Trusted theory rewrites.

use super::AletheTranslator;
use crate::node::ProofNode;
use crate::rule::{AletheRule, ProofRule, TheoryId};
use crate::store::ProofStore;
use certiz_core::{FactId, FactKind, FactManager, Result};
use tracing::trace;

/// Alethe simplification rule for the rewrite `(= t t')` attributed to
/// `theory`, chosen by the shape of `t`.
///
/// Returns `None` when no simplification rule covers the rewrite.
pub fn theory_rewrite_rule(
    fm: &FactManager,
    rewrite: FactId,
    theory: TheoryId,
) -> Option<AletheRule> {
    let FactKind::Eq([lhs, _]) = fm.kind(rewrite) else {
        return None;
    };
    let symbol = fm.name(*lhs);
    let lhs = fm.kind(*lhs);
    match theory {
        TheoryId::Builtin => match lhs {
            FactKind::Ite(_) => Some(AletheRule::IteSimplify),
            FactKind::Eq(_) => Some(AletheRule::EqSimplify),
            FactKind::And(_) => Some(AletheRule::AndSimplify),
            FactKind::Or(_) => Some(AletheRule::OrSimplify),
            FactKind::Not(_) => Some(AletheRule::NotSimplify),
            FactKind::Implies(_) => Some(AletheRule::ImpliesSimplify),
            _ => None,
        },
        TheoryId::Bool => Some(AletheRule::BoolSimplify),
        TheoryId::Uf => match lhs {
            FactKind::Eq(_) => Some(AletheRule::EquivSimplify),
            _ => None,
        },
        TheoryId::Quantifiers => Some(AletheRule::QuantifierSimplify),
        TheoryId::Arith => match lhs {
            FactKind::Eq(_) => Some(AletheRule::CompSimplify),
            FactKind::App(_, args) => match symbol.unwrap_or_default() {
                "/" => Some(AletheRule::DivSimplify),
                "*" => Some(AletheRule::ProdSimplify),
                "-" if args.len() == 1 => Some(AletheRule::UnaryMinusSimplify),
                "-" => Some(AletheRule::MinusSimplify),
                "+" => Some(AletheRule::SumSimplify),
                "<" | "<=" | ">" | ">=" | "=" => Some(AletheRule::CompSimplify),
                _ => None,
            },
            _ => None,
        },
        TheoryId::Other => None,
    }
}

impl AletheTranslator {
    pub(super) fn theory_rewrite(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let theory = node
            .args()
            .get(1)
            .and_then(|&id| fm.as_int(id))
            .map_or(TheoryId::Other, TheoryId::from_index);
        let Some(rule) = theory_rewrite_rule(fm, res, theory) else {
            return self.fallback(fm, node, target, ProofRule::TheoryRewrite);
        };
        trace!("theory rewrite {} by {}", fm.display(res), rule);
        let clause = Self::unit_clause(fm, res);
        self.emit(fm, target, res, rule, clause, &[], vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleTag;
    use certiz_core::ProofConfig;

    fn rewrite(fm: &mut FactManager, lhs: FactId) -> FactId {
        let rhs = fm.mk_var("r");
        fm.mk_eq(lhs, rhs)
    }

    #[test]
    fn test_builtin_rule_follows_operator() {
        let mut fm = FactManager::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let and = fm.mk_and(vec![a, b]);
        let imp = fm.mk_implies(a, b);
        let eq_and = rewrite(&mut fm, and);
        let eq_imp = rewrite(&mut fm, imp);
        let eq_var = rewrite(&mut fm, a);
        assert_eq!(
            theory_rewrite_rule(&fm, eq_and, TheoryId::Builtin),
            Some(AletheRule::AndSimplify)
        );
        assert_eq!(
            theory_rewrite_rule(&fm, eq_imp, TheoryId::Builtin),
            Some(AletheRule::ImpliesSimplify)
        );
        assert_eq!(theory_rewrite_rule(&fm, eq_var, TheoryId::Builtin), None);
        assert_eq!(
            theory_rewrite_rule(&fm, eq_var, TheoryId::Bool),
            Some(AletheRule::BoolSimplify)
        );
    }

    #[test]
    fn test_arith_rule_follows_symbol() {
        let mut fm = FactManager::new();
        let x = fm.mk_var("x");
        let y = fm.mk_var("y");
        let neg = fm.mk_app("-", vec![x]);
        let sub = fm.mk_app("-", vec![x, y]);
        let sum = fm.mk_app("+", vec![x, y]);
        let leq = fm.mk_app("<=", vec![x, y]);
        let f = fm.mk_app("f", vec![x]);
        let cases = [
            (neg, Some(AletheRule::UnaryMinusSimplify)),
            (sub, Some(AletheRule::MinusSimplify)),
            (sum, Some(AletheRule::SumSimplify)),
            (leq, Some(AletheRule::CompSimplify)),
            (f, None),
        ];
        for (lhs, expected) in cases {
            let eq = rewrite(&mut fm, lhs);
            assert_eq!(theory_rewrite_rule(&fm, eq, TheoryId::Arith), expected);
        }
    }

    #[test]
    fn test_uncovered_rewrite_is_trusted() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let eq = rewrite(&mut fm, a);
        let tid = fm.mk_int(TheoryId::Other.index());
        let node = store
            .add(&mut fm, ProofRule::TheoryRewrite, &[], vec![eq, tid])
            .unwrap();

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &node).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::Undefined));
        assert_eq!(
            translator.stats().unsupported.get(&ProofRule::TheoryRewrite),
            Some(&1)
        );
    }

    #[test]
    fn test_covered_rewrite_is_one_step() {
        let mut fm = FactManager::new();
        let mut store = ProofStore::new();
        let a = fm.mk_var("a");
        let not_a = fm.mk_not(a);
        let eq = rewrite(&mut fm, not_a);
        let tid = fm.mk_int(TheoryId::Builtin.index());
        let node = store
            .add(&mut fm, ProofRule::TheoryRewrite, &[], vec![eq, tid])
            .unwrap();

        let mut translator = AletheTranslator::new(ProofConfig::default());
        let out = translator.translate_proof(&mut fm, &node).unwrap();
        assert_eq!(out.rule(), RuleTag::Alethe(AletheRule::NotSimplify));
        assert_eq!(
            fm.display(out.target_clause().unwrap()).to_string(),
            "(cl (= (not a) r))"
        );
        assert!(out.children().is_empty());
    }
}
