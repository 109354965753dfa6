//! Crowding literal elimination.
//!
//! Conflict analysis resolves with a clause once per variable, but when a
//! literal occurs several times in the accumulated clause the engine
//! silently removes every copy. Replaying the links as a chain resolution
//! removes one copy per link, so some literals survive: they crowd the
//! computed conclusion.
//!
//! For each crowding literal the link that eliminates it is duplicated once
//! per surviving copy, right after the last link that introduces the
//! literal. A duplicated clause may bring in literals of its own that are not
//! in the target clause; those are queued and eliminated the same way. Every
//! literal queued this way is introduced by a strictly later link than the
//! literal that caused it, which bounds the work by the number of distinct
//! literals.

use certiz_core::{FactId, FactList, FactManager, ProofError, Result};
use certiz_proof::resolution::{eliminates, matches_rhs};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::smallvec;
use tracing::{debug, trace};

/// One premise of a resolution chain with the pivot linking it to the clause
/// accumulated before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionLink {
    /// Clause fact of the premise
    pub clause: FactId,
    /// Pivot atom, absent for the first link
    pub pivot: Option<FactId>,
    /// Whether the pivot occurs positively in the accumulated clause
    pub pos_first: bool,
}

impl ResolutionLink {
    /// The link opening a chain.
    pub fn first(clause: FactId) -> Self {
        Self {
            clause,
            pivot: None,
            pos_first: true,
        }
    }

    /// A link resolving `clause` on `pivot`.
    pub fn new(clause: FactId, pivot: FactId, pos_first: bool) -> Self {
        Self {
            clause,
            pivot: Some(pivot),
            pos_first,
        }
    }

    /// Literals this link adds to the accumulated clause, counting the one it
    /// resolves away.
    pub fn literals(&self, fm: &FactManager) -> FactList {
        let singleton = self
            .pivot
            .is_some_and(|pivot| matches_rhs(fm, self.clause, self.pos_first, pivot));
        if fm.is_or(self.clause) && !singleton {
            fm.children(self.clause).into()
        } else {
            smallvec![self.clause]
        }
    }
}

/// Index of the last link whose clause contains `lit`.
pub fn find_last_inclusion(
    fm: &FactManager,
    links: &[ResolutionLink],
    lit: FactId,
) -> Option<usize> {
    links
        .iter()
        .rposition(|link| fm.is_or(link.clause) && link.literals(fm).contains(&lit))
}

/// Index of the first link after `from` that resolves `lit` away.
pub fn find_killer(
    fm: &FactManager,
    links: &[ResolutionLink],
    lit: FactId,
    from: usize,
) -> Option<usize> {
    (from + 1..links.len()).find(|&j| {
        let link = &links[j];
        link.pivot
            .is_some_and(|pivot| eliminates(fm, lit, pivot, link.pos_first))
    })
}

/// Copy of `links` with `times` copies of `link` inserted at `at`.
///
/// Returns the new sequence and the number of inserted links.
pub fn insert_copies(
    links: &[ResolutionLink],
    at: usize,
    link: ResolutionLink,
    times: usize,
) -> (Vec<ResolutionLink>, usize) {
    let at = at.min(links.len());
    let mut out = Vec::with_capacity(links.len() + times);
    out.extend_from_slice(&links[..at]);
    out.extend(std::iter::repeat_n(link, times));
    out.extend_from_slice(&links[at..]);
    (out, times)
}

/// Duplicate links of `links` until resolving them yields no literal outside
/// `target`.
///
/// `naive` is the literal list obtained by resolving `links` as they are.
/// Returns `None` when no literal crowds the result, and the augmented link
/// sequence otherwise. Fails with [`ProofError::UnresolvedCrowdingLiteral`]
/// when no later link eliminates a crowding literal and with
/// [`ProofError::CrowdingLoop`] when the introduction order is violated.
pub fn eliminate_crowding_literals(
    fm: &FactManager,
    links: &[ResolutionLink],
    naive: &[FactId],
    target: &[FactId],
) -> Result<Option<Vec<ResolutionLink>>> {
    let in_target: FxHashSet<FactId> = target.iter().copied().collect();

    // surviving copies per crowding literal, in first-seen order
    let mut counts: FxHashMap<FactId, usize> = FxHashMap::default();
    let mut order = Vec::new();
    for &lit in naive.iter().filter(|l| !in_target.contains(l)) {
        let count = counts.entry(lit).or_insert(0);
        if *count == 0 {
            order.push(lit);
        }
        *count += 1;
    }
    if order.is_empty() {
        return Ok(None);
    }
    debug!(
        "{} crowding literals: {}",
        order.len(),
        fm.display_list(&order)
    );

    let mut introduced: FxHashMap<FactId, usize> = FxHashMap::default();
    let mut queue: Vec<(FactId, usize)> = Vec::with_capacity(order.len());
    for lit in order {
        let index = find_last_inclusion(fm, links, lit)
            .ok_or_else(|| ProofError::UnresolvedCrowdingLiteral(fm.display(lit).to_string()))?;
        introduced.insert(lit, index);
        queue.push((lit, index));
    }
    queue.sort_by_key(|&(_, index)| index);

    // links inserted right after each original link
    let mut extra_after = vec![0usize; links.len()];
    let mut current = links.to_vec();
    let mut processed = FxHashSet::default();

    let mut i = 0;
    while i < queue.len() {
        let (lit, intro) = queue[i];
        i += 1;
        if !processed.insert(lit) {
            return Err(ProofError::CrowdingLoop(fm.display(lit).to_string()));
        }

        let killer = find_killer(fm, links, lit, intro)
            .ok_or_else(|| ProofError::UnresolvedCrowdingLiteral(fm.display(lit).to_string()))?;
        let link = links[killer];
        let occurrences = counts.get(&lit).copied().unwrap_or(0);
        trace!(
            "crowding literal {} x{}: introduced by link {}, eliminated by link {}",
            fm.display(lit),
            occurrences,
            intro,
            killer
        );

        let pivot = link.pivot.unwrap_or(link.clause);
        for new_lit in link.literals(fm) {
            if matches_rhs(fm, new_lit, link.pos_first, pivot) || in_target.contains(&new_lit) {
                continue;
            }
            let index = match introduced.get(&new_lit) {
                Some(&index) => index,
                None => {
                    let index = find_last_inclusion(fm, links, new_lit).unwrap_or(killer);
                    trace!(
                        "new crowding literal {} from link {}",
                        fm.display(new_lit),
                        index
                    );
                    introduced.insert(new_lit, index);
                    let at = queue
                        .iter()
                        .rposition(|&(_, other)| other < index)
                        .map_or(0, |p| p + 1);
                    queue.insert(at.max(i), (new_lit, index));
                    index
                }
            };
            if index <= intro {
                return Err(ProofError::CrowdingLoop(fm.display(new_lit).to_string()));
            }
            *counts.entry(new_lit).or_insert(0) += occurrences;
        }

        if occurrences == 0 {
            continue;
        }
        let base = intro + extra_after[..intro].iter().sum::<usize>();
        let at = base + 1 + extra_after[intro];
        let (next, added) = insert_copies(&current, at, link, occurrences);
        current = next;
        extra_after[intro] += added;
        debug!(
            "duplicated link {} ({}) {} times after link {}",
            killer,
            fm.display(link.clause),
            added,
            intro
        );
    }

    Ok(Some(current))
}
