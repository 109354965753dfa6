//! Re-checking emitted Alethe steps.
//!
//! Only steps with a structural relation to their premises are checked:
//! `resolution` against the literals of the premise clauses, `reordering`
//! and `contraction` as the same literal set, `or` against the disjunction it
//! unpacks. Equalities are compared up to orientation, since a step may use
//! a premise whose `symm` was folded away.

use super::AletheTranslator;
use crate::rule::AletheRule;
use crate::store::ProofStore;
use certiz_core::{FactId, FactKind, FactManager, OptionProofExt, ProofError, Result};
use rustc_hash::FxHashSet;
use tracing::warn;

/// `lit` with a flipped equality put into a fixed orientation.
fn oriented(fm: &mut FactManager, lit: FactId) -> FactId {
    match fm.kind(lit).clone() {
        FactKind::Eq([a, b]) if b < a => fm.mk_eq(b, a),
        FactKind::Not(inner) => match fm.kind(inner).clone() {
            FactKind::Eq([a, b]) if b < a => {
                let eq = fm.mk_eq(b, a);
                fm.mk_not(eq)
            }
            _ => lit,
        },
        _ => lit,
    }
}

fn oriented_all(fm: &mut FactManager, lits: &[FactId]) -> Vec<FactId> {
    lits.iter().map(|&l| oriented(fm, l)).collect()
}

/// Literals printed by the proof stored for `key`. Proofs outside the target
/// calculus print their conclusion as a unit clause.
fn printed_literals(fm: &mut FactManager, target: &ProofStore, key: FactId) -> Result<Vec<FactId>> {
    let proof = target.get_proof_for(key).or_unknown(fm, key)?;
    let raw = match proof.target_clause() {
        Some(clause) => fm.children(clause).to_vec(),
        None => vec![proof.conclusion()],
    };
    Ok(oriented_all(fm, &raw))
}

/// Literals of `premises` that no resolution can remove, in order of first
/// occurrence. A literal is removable when its complement occurs in some
/// premise; `false` is always removable.
fn survivors(fm: &FactManager, premises: &[Vec<FactId>]) -> (FxHashSet<FactId>, Vec<FactId>) {
    let all: FxHashSet<FactId> = premises.iter().flatten().copied().collect();
    let negated: FxHashSet<FactId> = all.iter().filter_map(|&l| fm.not_inner(l)).collect();
    let mut seen = FxHashSet::default();
    let kept = premises
        .iter()
        .flatten()
        .copied()
        .filter(|&l| {
            let clashes = negated.contains(&l)
                || fm.not_inner(l).is_some_and(|inner| all.contains(&inner));
            !clashes && !fm.is_false(l) && seen.insert(l)
        })
        .collect();
    (all, kept)
}

impl AletheTranslator {
    /// Check a step before it is written to `target`.
    ///
    /// Fails with [`ProofError::ConclusionMismatch`] when `clause` does not
    /// follow from the clauses of `children`.
    pub(super) fn validate_step(
        fm: &mut FactManager,
        target: &ProofStore,
        rule: AletheRule,
        clause: FactId,
        children: &[FactId],
    ) -> Result<()> {
        if !fm.is_clause(clause) {
            return Err(ProofError::invalid_step(
                rule,
                format!("{} is not a clause", fm.display(clause)),
            ));
        }
        let raw = fm.children(clause).to_vec();
        let lits = oriented_all(fm, &raw);
        let premises = children
            .iter()
            .map(|&c| printed_literals(fm, target, c))
            .collect::<Result<Vec<_>>>()?;

        let expected: FxHashSet<FactId> = match rule {
            AletheRule::Resolution => {
                let (all, kept) = survivors(fm, &premises);
                let invented = lits.iter().any(|l| !all.contains(l));
                let dropped = kept.iter().any(|l| !lits.contains(l));
                if invented || dropped {
                    let found = fm.mk_clause(kept);
                    return Err(Self::reject(fm, rule, clause, found));
                }
                return Ok(());
            }
            AletheRule::Reorder | AletheRule::DuplicatedLiterals => match premises.as_slice() {
                [premise] => premise.iter().copied().collect(),
                _ => return Err(ProofError::invalid_step(rule, "expected one premise")),
            },
            AletheRule::Or => match premises.as_slice() {
                [premise] => match premise.as_slice() {
                    [disjunction] if fm.is_or(*disjunction) => {
                        let disjuncts = fm.children(*disjunction).to_vec();
                        oriented_all(fm, &disjuncts).into_iter().collect()
                    }
                    _ => {
                        return Err(ProofError::invalid_step(
                            rule,
                            "premise is not a single disjunction",
                        ));
                    }
                },
                _ => return Err(ProofError::invalid_step(rule, "expected one premise")),
            },
            _ => return Ok(()),
        };

        let actual: FxHashSet<FactId> = lits.iter().copied().collect();
        if actual != expected {
            let mut found: Vec<FactId> = expected.into_iter().collect();
            found.sort();
            let found = fm.mk_clause(found);
            return Err(Self::reject(fm, rule, clause, found));
        }
        Ok(())
    }

    /// Check the clause printed for a translated conclusion `res`: the
    /// disjuncts of `res`, `res` alone, or nothing for `false`.
    pub(super) fn validate_conclusion(
        fm: &mut FactManager,
        target: &ProofStore,
        res: FactId,
    ) -> Result<()> {
        let proof = target.get_proof_for(res).or_unknown(fm, res)?;
        let Some(clause) = proof.target_clause() else {
            return Ok(());
        };
        let unit = Self::unit_clause(fm, res);
        let disjuncts = Self::or_clause(fm, res);
        let empty = fm.mk_clause([]);
        if clause == unit || clause == disjuncts || (fm.is_false(res) && clause == empty) {
            return Ok(());
        }
        Err(Self::reject(fm, proof.rule(), unit, clause))
    }

    fn reject(
        fm: &FactManager,
        rule: impl std::fmt::Display,
        expected: FactId,
        found: FactId,
    ) -> ProofError {
        warn!(
            "{} step claims {} but its premises give {}",
            rule,
            fm.display(expected),
            fm.display(found)
        );
        ProofError::mismatch(fm, expected, found)
    }
}
