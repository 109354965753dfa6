//! Semantic functions of the internal rules.
//!
//! [`ProofChecker::check`] computes the conclusion a rule yields from its
//! premise conclusions and arguments. The store uses it for every new step,
//! so a stored conclusion is always determined by `(rule, args, children)`.

use crate::resolution::{chain_resolvent, clause_literals, literals_to_fact, pivot_pairs};
use crate::rule::ProofRule;
use certiz_core::{FactId, FactKind, FactManager, ProofError, Result};
use rustc_hash::FxHashSet;

/// Conclusion calculator for internal rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofChecker;

fn invalid(rule: ProofRule, message: impl Into<String>) -> ProofError {
    ProofError::invalid_step(rule, message)
}

fn index_arg(fm: &FactManager, rule: ProofRule, arg: FactId, len: usize) -> Result<usize> {
    match fm.as_int(arg) {
        Some(i) if i >= 0 && (i as usize) < len => Ok(i as usize),
        _ => Err(invalid(
            rule,
            format!("index {} out of range 0..{}", fm.display(arg), len),
        )),
    }
}

fn dedup(lits: &[FactId]) -> Vec<FactId> {
    let mut seen = FxHashSet::default();
    lits.iter().copied().filter(|l| seen.insert(*l)).collect()
}

impl ProofChecker {
    /// Enforce the arity contract of `rule`.
    pub fn check_arity(rule: ProofRule, children: usize, args: usize) -> Result<()> {
        let arity = rule.arity();
        if !arity.children.admits(children) {
            return Err(ProofError::ArityMismatch {
                rule: rule.to_string(),
                what: "children",
                expected: arity.children.to_string(),
                found: children,
            });
        }
        if !arity.args.admits(args) {
            return Err(ProofError::ArityMismatch {
                rule: rule.to_string(),
                what: "arguments",
                expected: arity.args.to_string(),
                found: args,
            });
        }
        if rule == ProofRule::ChainResolution && args != 2 * (children - 1) {
            return Err(ProofError::ArityMismatch {
                rule: rule.to_string(),
                what: "arguments",
                expected: format!("exactly {}", 2 * (children - 1)),
                found: args,
            });
        }
        Ok(())
    }

    /// Compute the conclusion of `rule` applied to premises with the given
    /// conclusions.
    pub fn check(
        fm: &mut FactManager,
        rule: ProofRule,
        children: &[FactId],
        args: &[FactId],
    ) -> Result<FactId> {
        Self::check_arity(rule, children.len(), args.len())?;
        use ProofRule::*;
        match rule {
            Assume | Trust | Unknown => Ok(args[0]),
            Scope => Ok(Self::scope_conclusion(fm, children[0], args)),
            Resolution | ChainResolution => {
                let pivots = pivot_pairs(fm, args)?;
                let lits = chain_resolvent(fm, children, &pivots)?;
                Ok(literals_to_fact(fm, &lits))
            }
            Factoring => {
                let lits = clause_literals(fm, children[0]);
                let unique = dedup(&lits);
                if unique.len() == lits.len() {
                    return Ok(children[0]);
                }
                Ok(literals_to_fact(fm, &unique))
            }
            Reordering => {
                let from: FxHashSet<_> = clause_literals(fm, children[0]).into_iter().collect();
                let to: FxHashSet<_> = clause_literals(fm, args[0]).into_iter().collect();
                if from != to {
                    return Err(invalid(
                        rule,
                        format!(
                            "{} is not a permutation of {}",
                            fm.display(args[0]),
                            fm.display(children[0])
                        ),
                    ));
                }
                Ok(args[0])
            }
            Split => {
                let not_f = fm.mk_not(args[0]);
                Ok(fm.mk_or(vec![args[0], not_f]))
            }
            EqResolve => match fm.kind(children[1]) {
                FactKind::Eq([lhs, rhs]) if *lhs == children[0] => Ok(*rhs),
                _ => Err(invalid(rule, "second premise must equate the first")),
            },
            ModusPonens => match fm.kind(children[1]) {
                FactKind::Implies([lhs, rhs]) if *lhs == children[0] => Ok(*rhs),
                _ => Err(invalid(rule, "second premise must be implied by the first")),
            },
            NotNotElim => fm
                .not_inner(children[0])
                .and_then(|inner| fm.not_inner(inner))
                .ok_or_else(|| invalid(rule, "premise is not a double negation")),
            Contra => {
                if fm.not_inner(children[1]) != Some(children[0]) {
                    return Err(invalid(rule, "premises are not complementary"));
                }
                Ok(fm.mk_false())
            }
            AndElim => match fm.kind(children[0]).clone() {
                FactKind::And(conjuncts) => {
                    let i = index_arg(fm, rule, args[0], conjuncts.len())?;
                    Ok(conjuncts[i])
                }
                _ => Err(invalid(rule, "premise is not a conjunction")),
            },
            AndIntro => Ok(fm.mk_and(children.iter().copied())),
            NotOrElim => {
                let inner = fm.not_inner(children[0]);
                match inner.map(|f| fm.kind(f).clone()) {
                    Some(FactKind::Or(disjuncts)) => {
                        let i = index_arg(fm, rule, args[0], disjuncts.len())?;
                        Ok(fm.mk_not(disjuncts[i]))
                    }
                    _ => Err(invalid(rule, "premise is not a negated disjunction")),
                }
            }
            NotAnd => {
                let inner = fm.not_inner(children[0]);
                match inner.map(|f| fm.kind(f).clone()) {
                    Some(FactKind::And(conjuncts)) => {
                        let negated: Vec<_> = conjuncts.iter().map(|&c| fm.mk_not(c)).collect();
                        Ok(fm.mk_or(negated))
                    }
                    _ => Err(invalid(rule, "premise is not a negated conjunction")),
                }
            }
            ImpliesElim | NotImpliesElim1 | NotImpliesElim2 | EquivElim1 | EquivElim2
            | NotEquivElim1 | NotEquivElim2 | XorElim1 | XorElim2 | NotXorElim1 | NotXorElim2
            | IteElim1 | IteElim2 | NotIteElim1 | NotIteElim2 => {
                Self::elim_conclusion(fm, rule, children[0])
            }
            CnfAndPos | CnfAndNeg | CnfOrPos | CnfOrNeg => Self::cnf_nary(fm, rule, args),
            CnfImpliesPos | CnfImpliesNeg1 | CnfImpliesNeg2 | CnfEquivPos1 | CnfEquivPos2
            | CnfEquivNeg1 | CnfEquivNeg2 | CnfXorPos1 | CnfXorPos2 | CnfXorNeg1 | CnfXorNeg2
            | CnfItePos1 | CnfItePos2 | CnfItePos3 | CnfIteNeg1 | CnfIteNeg2 | CnfIteNeg3 => {
                Self::cnf_fixed(fm, rule, args[0])
            }
            Refl => Ok(fm.mk_eq(args[0], args[0])),
            Symm => Self::symm(fm, children[0]),
            Trans => Self::trans(fm, children),
            Cong => Self::cong(fm, children, args[0]),
            TrueIntro => {
                let t = fm.mk_true();
                Ok(fm.mk_eq(children[0], t))
            }
            TrueElim => match fm.kind(children[0]) {
                FactKind::Eq([f, t]) if fm.is_true(*t) => Ok(*f),
                _ => Err(invalid(rule, "premise is not (= F true)")),
            },
            FalseIntro => {
                let f = fm
                    .not_inner(children[0])
                    .ok_or_else(|| invalid(rule, "premise is not a negation"))?;
                let ff = fm.mk_false();
                Ok(fm.mk_eq(f, ff))
            }
            FalseElim => match fm.kind(children[0]).clone() {
                FactKind::Eq([f, ff]) if fm.is_false(ff) => Ok(fm.mk_not(f)),
                _ => Err(invalid(rule, "premise is not (= F false)")),
            },
            // quantifier and arithmetic lemmas are not replayed
            Instantiate | Skolemize | ArithScaleSumUpperBounds | IntTightUb | IntTightLb
            | ArithTrichotomy | ArithOpElimAxiom | IntTrust | ArithMultSign | ArithMultPos
            | ArithMultNeg | ArithMultTangent => Ok(args[0]),
            TheoryRewrite => {
                if !matches!(fm.kind(args[0]), FactKind::Eq(_)) || fm.as_int(args[1]).is_none() {
                    return Err(invalid(rule, "expected an equality and a theory identifier"));
                }
                Ok(args[0])
            }
        }
    }

    /// `(=> A F)` or, for a `false` body, `(not A)`, where `A` is the single
    /// assumption or the conjunction of all of them.
    pub fn scope_conclusion(fm: &mut FactManager, body: FactId, assumptions: &[FactId]) -> FactId {
        let antecedent = match assumptions {
            [single] => *single,
            _ => fm.mk_and(assumptions.iter().copied()),
        };
        if fm.is_false(body) {
            fm.mk_not(antecedent)
        } else {
            fm.mk_implies(antecedent, body)
        }
    }

    fn elim_conclusion(fm: &mut FactManager, rule: ProofRule, premise: FactId) -> Result<FactId> {
        use ProofRule::*;
        let negated = matches!(
            rule,
            NotImpliesElim1
                | NotImpliesElim2
                | NotEquivElim1
                | NotEquivElim2
                | NotXorElim1
                | NotXorElim2
                | NotIteElim1
                | NotIteElim2
        );
        let inner = if negated {
            fm.not_inner(premise)
                .ok_or_else(|| invalid(rule, "premise is not a negation"))?
        } else {
            premise
        };
        let kind = fm.kind(inner).clone();
        let or2 = |fm: &mut FactManager, a: FactId, na: bool, b: FactId, nb: bool| {
            let a = if na { fm.mk_not(a) } else { a };
            let b = if nb { fm.mk_not(b) } else { b };
            fm.mk_or(vec![a, b])
        };
        match (rule, kind) {
            (ImpliesElim, FactKind::Implies([a, b])) => Ok(or2(fm, a, true, b, false)),
            (NotImpliesElim1, FactKind::Implies([a, _])) => Ok(a),
            (NotImpliesElim2, FactKind::Implies([_, b])) => Ok(fm.mk_not(b)),
            (EquivElim1, FactKind::Eq([a, b])) => Ok(or2(fm, a, true, b, false)),
            (EquivElim2, FactKind::Eq([a, b])) => Ok(or2(fm, a, false, b, true)),
            (NotEquivElim1, FactKind::Eq([a, b])) => Ok(or2(fm, a, false, b, false)),
            (NotEquivElim2, FactKind::Eq([a, b])) => Ok(or2(fm, a, true, b, true)),
            (XorElim1, FactKind::Xor([a, b])) => Ok(or2(fm, a, false, b, false)),
            (XorElim2, FactKind::Xor([a, b])) => Ok(or2(fm, a, true, b, true)),
            (NotXorElim1, FactKind::Xor([a, b])) => Ok(or2(fm, a, false, b, true)),
            (NotXorElim2, FactKind::Xor([a, b])) => Ok(or2(fm, a, true, b, false)),
            (IteElim1, FactKind::Ite([c, t, _])) => Ok(or2(fm, c, true, t, false)),
            (IteElim2, FactKind::Ite([c, _, e])) => Ok(or2(fm, c, false, e, false)),
            (NotIteElim1, FactKind::Ite([c, t, _])) => Ok(or2(fm, c, true, t, true)),
            (NotIteElim2, FactKind::Ite([c, _, e])) => Ok(or2(fm, c, false, e, true)),
            _ => Err(invalid(
                rule,
                format!("unexpected premise {}", fm.display(premise)),
            )),
        }
    }

    fn cnf_nary(fm: &mut FactManager, rule: ProofRule, args: &[FactId]) -> Result<FactId> {
        let f = args[0];
        let kind = fm.kind(f).clone();
        match (rule, kind) {
            (ProofRule::CnfAndPos, FactKind::And(conjuncts)) => {
                let i = index_arg(fm, rule, args[1], conjuncts.len())?;
                let not_f = fm.mk_not(f);
                Ok(fm.mk_or(vec![not_f, conjuncts[i]]))
            }
            (ProofRule::CnfAndNeg, FactKind::And(conjuncts)) => {
                let mut lits = vec![f];
                lits.extend(conjuncts.iter().map(|&c| fm.mk_not(c)));
                Ok(fm.mk_or(lits))
            }
            (ProofRule::CnfOrPos, FactKind::Or(disjuncts)) => {
                let mut lits = vec![fm.mk_not(f)];
                lits.extend(disjuncts.iter().copied());
                Ok(fm.mk_or(lits))
            }
            (ProofRule::CnfOrNeg, FactKind::Or(disjuncts)) => {
                let i = index_arg(fm, rule, args[1], disjuncts.len())?;
                let not_d = fm.mk_not(disjuncts[i]);
                Ok(fm.mk_or(vec![f, not_d]))
            }
            _ => Err(invalid(rule, format!("unexpected argument {}", fm.display(f)))),
        }
    }

    fn cnf_fixed(fm: &mut FactManager, rule: ProofRule, f: FactId) -> Result<FactId> {
        use ProofRule::*;
        // (negate f?, [(child index, negate?)])
        let (neg_f, shape): (bool, &[(usize, bool)]) = match (rule, fm.kind(f)) {
            (CnfImpliesPos, FactKind::Implies(_)) => (true, &[(0, true), (1, false)]),
            (CnfImpliesNeg1, FactKind::Implies(_)) => (false, &[(0, false)]),
            (CnfImpliesNeg2, FactKind::Implies(_)) => (false, &[(1, true)]),
            (CnfEquivPos1, FactKind::Eq(_)) => (true, &[(0, true), (1, false)]),
            (CnfEquivPos2, FactKind::Eq(_)) => (true, &[(0, false), (1, true)]),
            (CnfEquivNeg1, FactKind::Eq(_)) => (false, &[(0, false), (1, false)]),
            (CnfEquivNeg2, FactKind::Eq(_)) => (false, &[(0, true), (1, true)]),
            (CnfXorPos1, FactKind::Xor(_)) => (true, &[(0, false), (1, false)]),
            (CnfXorPos2, FactKind::Xor(_)) => (true, &[(0, true), (1, true)]),
            (CnfXorNeg1, FactKind::Xor(_)) => (false, &[(0, true), (1, false)]),
            (CnfXorNeg2, FactKind::Xor(_)) => (false, &[(0, false), (1, true)]),
            (CnfItePos1, FactKind::Ite(_)) => (true, &[(0, true), (1, false)]),
            (CnfItePos2, FactKind::Ite(_)) => (true, &[(0, false), (2, false)]),
            (CnfItePos3, FactKind::Ite(_)) => (true, &[(1, false), (2, false)]),
            (CnfIteNeg1, FactKind::Ite(_)) => (false, &[(0, true), (1, true)]),
            (CnfIteNeg2, FactKind::Ite(_)) => (false, &[(0, false), (2, true)]),
            (CnfIteNeg3, FactKind::Ite(_)) => (false, &[(1, true), (2, true)]),
            _ => {
                return Err(invalid(rule, format!("unexpected argument {}", fm.display(f))));
            }
        };
        let operands: Vec<FactId> = fm.children(f).to_vec();
        let mut lits = Vec::with_capacity(shape.len() + 1);
        lits.push(if neg_f { fm.mk_not(f) } else { f });
        for &(i, negate) in shape {
            let lit = operands[i];
            lits.push(if negate { fm.mk_not(lit) } else { lit });
        }
        Ok(fm.mk_or(lits))
    }

    fn symm(fm: &mut FactManager, premise: FactId) -> Result<FactId> {
        match fm.kind(premise).clone() {
            FactKind::Eq([a, b]) => Ok(fm.mk_eq(b, a)),
            FactKind::Not(inner) => match fm.kind(inner).clone() {
                FactKind::Eq([a, b]) => {
                    let flipped = fm.mk_eq(b, a);
                    Ok(fm.mk_not(flipped))
                }
                _ => Err(invalid(ProofRule::Symm, "premise is not a disequality")),
            },
            _ => Err(invalid(ProofRule::Symm, "premise is not an equality")),
        }
    }

    fn trans(fm: &mut FactManager, premises: &[FactId]) -> Result<FactId> {
        let mut ends: Option<(FactId, FactId)> = None;
        for &premise in premises {
            let FactKind::Eq([a, b]) = *fm.kind(premise) else {
                return Err(invalid(ProofRule::Trans, "premise is not an equality"));
            };
            ends = match ends {
                None => Some((a, b)),
                Some((first, last)) if last == a => Some((first, b)),
                Some(_) => {
                    return Err(invalid(ProofRule::Trans, "equalities do not form a chain"));
                }
            };
        }
        let (first, last) =
            ends.ok_or_else(|| invalid(ProofRule::Trans, "no premises"))?;
        Ok(fm.mk_eq(first, last))
    }

    fn cong(fm: &mut FactManager, premises: &[FactId], op: FactId) -> Result<FactId> {
        let name = fm
            .name(op)
            .map(str::to_owned)
            .ok_or_else(|| invalid(ProofRule::Cong, "operator argument is not a symbol"))?;
        let mut lhs = Vec::with_capacity(premises.len());
        let mut rhs = Vec::with_capacity(premises.len());
        for &premise in premises {
            let FactKind::Eq([a, b]) = *fm.kind(premise) else {
                return Err(invalid(ProofRule::Cong, "premise is not an equality"));
            };
            lhs.push(a);
            rhs.push(b);
        }
        let l = fm.mk_app(&name, lhs);
        let r = fm.mk_app(&name, rhs);
        Ok(fm.mk_eq(l, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_is_enforced() {
        let mut fm = FactManager::new();
        let p = fm.mk_var("p");
        let err = ProofChecker::check(&mut fm, ProofRule::Assume, &[p], &[p]).unwrap_err();
        assert!(matches!(err, ProofError::ArityMismatch { what: "children", .. }));

        let t = fm.mk_true();
        let err = ProofChecker::check(&mut fm, ProofRule::ChainResolution, &[p, p, p], &[t, p])
            .unwrap_err();
        assert!(matches!(err, ProofError::ArityMismatch { what: "arguments", .. }));
    }

    #[test]
    fn test_scope_conclusions() {
        let mut fm = FactManager::new();
        let p = fm.mk_var("p");
        let q = fm.mk_var("q");
        let r = fm.mk_var("r");
        let ff = fm.mk_false();

        let imp = ProofChecker::check(&mut fm, ProofRule::Scope, &[r], &[p, q]).unwrap();
        assert_eq!(fm.display(imp).to_string(), "(=> (and p q) r)");

        let neg = ProofChecker::check(&mut fm, ProofRule::Scope, &[ff], &[p]).unwrap();
        assert_eq!(fm.display(neg).to_string(), "(not p)");
    }

    #[test]
    fn test_clausal_eliminations() {
        let mut fm = FactManager::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let c = fm.mk_var("c");
        let ite = fm.mk_ite(c, a, b);
        let eq = fm.mk_eq(a, b);
        let not_eq = fm.mk_not(eq);

        let r = ProofChecker::check(&mut fm, ProofRule::IteElim2, &[ite], &[]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(or c b)");

        let r = ProofChecker::check(&mut fm, ProofRule::NotEquivElim2, &[not_eq], &[]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(or (not a) (not b))");

        let r = ProofChecker::check(&mut fm, ProofRule::CnfItePos3, &[], &[ite]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(or (not (ite c a b)) a b)");

        let r = ProofChecker::check(&mut fm, ProofRule::CnfEquivNeg2, &[], &[eq]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(or (= a b) (not a) (not b))");
    }

    #[test]
    fn test_indexed_rules() {
        let mut fm = FactManager::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let and = fm.mk_and(vec![a, b]);
        let one = fm.mk_int(1);
        let five = fm.mk_int(5);

        assert_eq!(
            ProofChecker::check(&mut fm, ProofRule::AndElim, &[and], &[one]).unwrap(),
            b
        );
        assert!(ProofChecker::check(&mut fm, ProofRule::AndElim, &[and], &[five]).is_err());

        let r = ProofChecker::check(&mut fm, ProofRule::CnfAndPos, &[], &[and, one]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(or (not (and a b)) b)");
    }

    #[test]
    fn test_factoring_and_reordering() {
        let mut fm = FactManager::new();
        let a = fm.mk_var("a");
        let b = fm.mk_var("b");
        let aba = fm.mk_or(vec![a, b, a]);
        let ba = fm.mk_or(vec![b, a]);
        let ab = fm.mk_or(vec![a, b]);

        let r = ProofChecker::check(&mut fm, ProofRule::Factoring, &[aba], &[]).unwrap();
        assert_eq!(r, ab);
        let r = ProofChecker::check(&mut fm, ProofRule::Reordering, &[ab], &[ba]).unwrap();
        assert_eq!(r, ba);
        assert!(ProofChecker::check(&mut fm, ProofRule::Reordering, &[ab], &[a]).is_err());
    }

    #[test]
    fn test_equality_rules() {
        let mut fm = FactManager::new();
        let x = fm.mk_var("x");
        let y = fm.mk_var("y");
        let z = fm.mk_var("z");
        let f = fm.mk_var("f");
        let xy = fm.mk_eq(x, y);
        let yz = fm.mk_eq(y, z);

        let r = ProofChecker::check(&mut fm, ProofRule::Trans, &[xy, yz], &[]).unwrap();
        assert_eq!(r, fm.mk_eq(x, z));
        assert!(ProofChecker::check(&mut fm, ProofRule::Trans, &[yz, xy], &[]).is_err());

        let r = ProofChecker::check(&mut fm, ProofRule::Symm, &[xy], &[]).unwrap();
        assert_eq!(r, fm.mk_eq(y, x));

        let r = ProofChecker::check(&mut fm, ProofRule::Cong, &[xy, yz], &[f]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(= (f x y) (f y z))");
    }

    #[test]
    fn test_theory_lemmas_conclude_first_argument() {
        let mut fm = FactManager::new();
        let q = fm.mk_var("q");
        let x = fm.mk_var("x");
        let px = fm.mk_app("P", [x]);

        let r = ProofChecker::check(&mut fm, ProofRule::Instantiate, &[q], &[px, x]).unwrap();
        assert_eq!(r, px);
        let err = ProofChecker::check(&mut fm, ProofRule::Instantiate, &[], &[px]).unwrap_err();
        assert!(matches!(err, ProofError::ArityMismatch { what: "children", .. }));

        let r = ProofChecker::check(&mut fm, ProofRule::ArithMultPos, &[], &[px]).unwrap();
        assert_eq!(r, px);
    }

    #[test]
    fn test_contra_and_split() {
        let mut fm = FactManager::new();
        let p = fm.mk_var("p");
        let not_p = fm.mk_not(p);

        let r = ProofChecker::check(&mut fm, ProofRule::Contra, &[p, not_p], &[]).unwrap();
        assert!(fm.is_false(r));
        assert!(ProofChecker::check(&mut fm, ProofRule::Contra, &[not_p, p], &[]).is_err());

        let r = ProofChecker::check(&mut fm, ProofRule::Split, &[], &[p]).unwrap();
        assert_eq!(fm.display(r).to_string(), "(or p (not p))");
    }
}
