//! Clause views and resolution arithmetic.
//!
//! A fact used as a premise of resolution is read either as a singleton
//! clause (the fact itself is the only literal) or as a disjunction clause
//! (its direct disjuncts are the literals). A premise is a singleton when it
//! is not a disjunction, or when it is exactly the literal its link
//! eliminates.
//!
//! Pivots come as `(polarity, pivot)` pairs. With polarity `true` the pivot
//! occurs positively in the accumulated clause and negated in the next
//! premise; with `false` it is the other way round. Only the first
//! occurrence of an eliminated literal is removed, so duplicates survive.

use certiz_core::{FactId, FactList, FactManager, ProofError, Result};
use smallvec::smallvec;

/// Check if `lit` is the literal removed from the accumulated clause.
pub fn matches_lhs(fm: &FactManager, lit: FactId, pol: bool, pivot: FactId) -> bool {
    if pol {
        lit == pivot
    } else {
        fm.not_inner(lit) == Some(pivot)
    }
}

/// Check if `lit` is the literal removed from the incoming premise.
pub fn matches_rhs(fm: &FactManager, lit: FactId, pol: bool, pivot: FactId) -> bool {
    if pol {
        fm.not_inner(lit) == Some(pivot)
    } else {
        lit == pivot
    }
}

/// Check whether a link with `pivot` eliminates `lit` from the accumulated
/// clause, allowing for a negated pivot.
pub fn eliminates(fm: &FactManager, lit: FactId, pivot: FactId, pos_first: bool) -> bool {
    if pos_first {
        lit == pivot
    } else {
        fm.not_inner(pivot) == Some(lit) || fm.not_inner(lit) == Some(pivot)
    }
}

/// Literal removed from the incoming premise, built as a fact.
pub fn rhs_literal(fm: &mut FactManager, pol: bool, pivot: FactId) -> FactId {
    if pol { fm.mk_not(pivot) } else { pivot }
}

/// Literals contributed by the first premise of a chain.
pub fn first_premise_literals(
    fm: &FactManager,
    premise: FactId,
    pol: bool,
    pivot: FactId,
) -> FactList {
    if fm.is_or(premise) && !matches_lhs(fm, premise, pol, pivot) {
        fm.children(premise).into()
    } else {
        smallvec![premise]
    }
}

/// Literals contributed by a later premise of a chain.
pub fn premise_literals(fm: &FactManager, premise: FactId, pol: bool, pivot: FactId) -> FactList {
    if fm.is_or(premise) && !matches_rhs(fm, premise, pol, pivot) {
        fm.children(premise).into()
    } else {
        smallvec![premise]
    }
}

/// Literals of `fact` read as a clause: disjuncts of a disjunction, nothing
/// for `false`, the fact itself otherwise.
pub fn clause_literals(fm: &FactManager, fact: FactId) -> FactList {
    if fm.is_or(fact) {
        fm.children(fact).into()
    } else if fm.is_false(fact) {
        FactList::new()
    } else {
        smallvec![fact]
    }
}

/// Fact denoted by a literal list: `false`, the literal, or a disjunction.
pub fn literals_to_fact(fm: &mut FactManager, lits: &[FactId]) -> FactId {
    match lits {
        [] => fm.mk_false(),
        [lit] => *lit,
        _ => fm.mk_or(lits.iter().copied()),
    }
}

/// Decode flattened `[pol, pivot, pol, pivot, ...]` arguments.
pub fn pivot_pairs(fm: &FactManager, args: &[FactId]) -> Result<Vec<(bool, FactId)>> {
    if args.len() % 2 != 0 {
        return Err(ProofError::invalid_step(
            "CHAIN_RESOLUTION",
            "pivot arguments must come in pairs",
        ));
    }
    args.chunks(2)
        .map(|pair| {
            fm.as_bool(pair[0])
                .map(|pol| (pol, pair[1]))
                .ok_or_else(|| {
                    ProofError::invalid_step(
                        "CHAIN_RESOLUTION",
                        format!("polarity {} is not a Boolean constant", fm.display(pair[0])),
                    )
                })
        })
        .collect()
}

/// Flatten `(pol, pivot)` pairs back into rule arguments.
pub fn pivot_args(fm: &FactManager, pivots: &[(bool, FactId)]) -> Vec<FactId> {
    pivots
        .iter()
        .flat_map(|&(pol, pivot)| [fm.mk_bool(pol), pivot])
        .collect()
}

fn remove_first(lits: &mut FactList, pred: impl Fn(FactId) -> bool) -> bool {
    match lits.iter().position(|&l| pred(l)) {
        Some(pos) => {
            lits.remove(pos);
            true
        }
        None => false,
    }
}

/// Literal list concluded by resolving `premises` left to right.
///
/// `pivots[i]` links premise `i + 1` to the clause accumulated so far.
pub fn chain_resolvent(
    fm: &FactManager,
    premises: &[FactId],
    pivots: &[(bool, FactId)],
) -> Result<FactList> {
    if premises.len() < 2 || pivots.len() + 1 != premises.len() {
        return Err(ProofError::invalid_step(
            "CHAIN_RESOLUTION",
            format!(
                "{} premises need {} pivots, found {}",
                premises.len(),
                premises.len().saturating_sub(1),
                pivots.len()
            ),
        ));
    }

    let (pol0, pivot0) = pivots[0];
    let mut acc = first_premise_literals(fm, premises[0], pol0, pivot0);
    for (&premise, &(pol, pivot)) in premises[1..].iter().zip(pivots) {
        if !remove_first(&mut acc, |l| matches_lhs(fm, l, pol, pivot)) {
            return Err(ProofError::invalid_step(
                "CHAIN_RESOLUTION",
                format!(
                    "pivot {} does not occur with polarity {} in ({})",
                    fm.display(pivot),
                    pol,
                    fm.display_list(&acc)
                ),
            ));
        }
        let mut lits = premise_literals(fm, premise, pol, pivot);
        if !remove_first(&mut lits, |l| matches_rhs(fm, l, pol, pivot)) {
            return Err(ProofError::invalid_step(
                "CHAIN_RESOLUTION",
                format!(
                    "premise {} does not contain the complement of pivot {}",
                    fm.display(premise),
                    fm.display(pivot)
                ),
            ));
        }
        acc.extend(lits);
    }
    Ok(acc)
}

/// Decide whether the conclusion of a chain resolution is a singleton
/// clause, using only the shape of its premises.
///
/// A conclusion that is not a disjunction is always a singleton. Otherwise
/// the premises are scanned from last to first for a disjunction clause that
/// contains the conclusion as a literal. If there is none, the conclusion is
/// a disjunction clause. If there is one, the conclusion is a singleton
/// exactly when that occurrence survives: it is neither the literal removed
/// by the premise's own link nor eliminated by any later link.
pub fn chain_conclusion_is_singleton(
    fm: &FactManager,
    conclusion: FactId,
    premises: &[FactId],
    pivots: &[(bool, FactId)],
) -> bool {
    if !fm.is_or(conclusion) {
        return true;
    }
    for (i, &premise) in premises.iter().enumerate().rev() {
        if !fm.is_or(premise) {
            continue;
        }
        let own_singleton = match i {
            0 => pivots
                .first()
                .is_some_and(|&(pol, pivot)| matches_lhs(fm, premise, pol, pivot)),
            _ => pivots
                .get(i - 1)
                .is_some_and(|&(pol, pivot)| matches_rhs(fm, premise, pol, pivot)),
        };
        if own_singleton || !fm.children(premise).contains(&conclusion) {
            continue;
        }
        if i > 0 {
            let (pol, pivot) = pivots[i - 1];
            if matches_rhs(fm, conclusion, pol, pivot) {
                return false;
            }
        }
        let later = pivots.get(i..).unwrap_or(&[]);
        return !later
            .iter()
            .any(|&(pol, pivot)| eliminates(fm, conclusion, pivot, pol));
    }
    false
}
