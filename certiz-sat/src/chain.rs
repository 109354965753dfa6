//! Resolution chains recorded during conflict analysis.
//!
//! Each learned clause is derived by one chain: the conflicting clause
//! followed by the reason clauses the engine resolved against. The builder
//! collects those links while analysis runs and, when the learned clause is
//! known, turns them into checked proof steps.
//!
//! Closing a chain takes four passes:
//! 1. literals removed by clause minimization are justified by links to
//!    their reasons, inserted after the recorded links
//! 2. the links are resolved as they are
//! 3. crowding literals of that result are eliminated by duplicating links
//! 4. the chain step is emitted, followed by factoring and reordering steps
//!    that give the learned clause its exact shape

use crate::cnf::CnfMap;
use crate::crowding::{ResolutionLink, eliminate_crowding_literals};
use crate::reason::ReasonProvider;
use certiz_core::{FactId, FactList, FactManager, Lit, ProofConfig, ProofError, Result};
use certiz_proof::resolution::{chain_resolvent, literals_to_fact, pivot_args};
use certiz_proof::{ProofRule, ProofStep, ProofStepBuffer};
use rustc_hash::FxHashSet;
use smallvec::smallvec;
use tracing::{debug, trace};

/// Lifecycle of a [`ResolutionChainBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainState {
    /// No chain started yet
    #[default]
    Idle,
    /// Links are being recorded
    Accumulating,
    /// The last chain was closed; a new one may start
    Closed,
}

/// Configuration for resolution chains.
#[derive(Debug, Clone, Default)]
pub struct ChainConfig {
    /// Compare every derived conclusion against the checker.
    pub pedantic: bool,
}

impl From<&ProofConfig> for ChainConfig {
    fn from(config: &ProofConfig) -> Self {
        Self {
            pedantic: config.pedantic,
        }
    }
}

/// Statistics for resolution chains.
#[derive(Debug, Clone, Default)]
pub struct ChainStats {
    /// Chains closed
    pub chains: u64,
    /// Chains with a single link, which need no step
    pub trivial_chains: u64,
    /// Links recorded by the engine
    pub links: u64,
    /// Links added for minimized literals
    pub redundant_links: u64,
    /// Crowded chains
    pub crowded_chains: u64,
    /// Links duplicated to remove crowding literals
    pub duplicated_links: u64,
}

/// Collects the links of one chain at a time.
#[derive(Debug, Default)]
pub struct ResolutionChainBuilder {
    config: ChainConfig,
    state: ChainState,
    links: Vec<ResolutionLink>,
    redundant: Vec<Lit>,
    stats: ChainStats,
}

impl ResolutionChainBuilder {
    /// Create a builder.
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Links recorded so far in the open chain.
    pub fn links(&self) -> &[ResolutionLink] {
        &self.links
    }

    /// Get statistics.
    pub fn stats(&self) -> &ChainStats {
        &self.stats
    }

    /// Open a chain with `clause` as its first premise.
    pub fn start(&mut self, clause: FactId) -> Result<()> {
        if self.state == ChainState::Accumulating {
            return Err(ProofError::State(
                "resolution chain started twice".to_string(),
            ));
        }
        self.links.clear();
        self.redundant.clear();
        self.links.push(ResolutionLink::first(clause));
        self.state = ChainState::Accumulating;
        Ok(())
    }

    /// Append a link to the open chain.
    pub fn add_link(&mut self, link: ResolutionLink) -> Result<()> {
        self.expect_open("add a link")?;
        if link.pivot.is_none() {
            return Err(ProofError::State(
                "only the first link may omit its pivot".to_string(),
            ));
        }
        self.links.push(link);
        self.stats.links += 1;
        Ok(())
    }

    /// Defer `lit`, removed by clause minimization, until the chain closes.
    pub fn add_redundant_lit(&mut self, lit: Lit) -> Result<()> {
        self.expect_open("add a redundant literal")?;
        self.redundant.push(lit);
        Ok(())
    }

    /// Close the chain with the clause `conclusion_lits` and return the proof
    /// steps deriving it, oldest first.
    ///
    /// A chain of a single link derives nothing and yields no step. A failed
    /// close still closes the chain and drops its links.
    pub fn end<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        cnf: &CnfMap,
        reasons: &R,
        conclusion_lits: &[Lit],
    ) -> Result<Vec<(FactId, ProofStep)>> {
        self.expect_open("close")?;
        let result = self.close(fm, cnf, reasons, conclusion_lits);
        if let Err(err) = &result {
            debug!("abandoning resolution chain: {}", err);
            self.links.clear();
            self.redundant.clear();
            self.state = ChainState::Closed;
        }
        result
    }

    fn close<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        cnf: &CnfMap,
        reasons: &R,
        conclusion_lits: &[Lit],
    ) -> Result<Vec<(FactId, ProofStep)>> {
        let conclusion = cnf.clause_fact(fm, conclusion_lits)?;
        trace!(
            "closing chain of {} links for {}",
            self.links.len(),
            fm.display(conclusion)
        );

        let in_conclusion: FxHashSet<Lit> = conclusion_lits.iter().copied().collect();
        let mut visited = FxHashSet::default();
        let mut active = FxHashSet::default();
        let pos = self.links.len();
        for lit in std::mem::take(&mut self.redundant) {
            self.process_redundant_lit(
                fm,
                cnf,
                reasons,
                lit,
                &in_conclusion,
                &mut visited,
                &mut active,
                pos,
            )?;
        }

        let mut links = std::mem::take(&mut self.links);
        self.state = ChainState::Closed;
        self.stats.chains += 1;
        if links.len() == 1 {
            debug!(
                "chain for {} has a single premise, no step",
                fm.display(conclusion)
            );
            self.stats.trivial_chains += 1;
            return Ok(Vec::new());
        }

        let facts = cnf.clause_literals(conclusion_lits)?;
        let target: FactList = if facts.len() == 1 {
            smallvec![conclusion]
        } else {
            facts
        };

        let (mut premises, mut pivots) = Self::split(&links)?;
        let mut lits = chain_resolvent(fm, &premises, &pivots)?;
        if literals_to_fact(fm, &lits) != conclusion {
            if let Some(augmented) = eliminate_crowding_literals(fm, &links, &lits, &target)? {
                self.stats.crowded_chains += 1;
                self.stats.duplicated_links += (augmented.len() - links.len()) as u64;
                links = augmented;
                (premises, pivots) = Self::split(&links)?;
                lits = chain_resolvent(fm, &premises, &pivots)?;
                debug!(
                    "crowded chain for {} extended to {} links",
                    fm.display(conclusion),
                    links.len()
                );
            }
        }

        let mut buffer = ProofStepBuffer::new(self.config.pedantic);
        let args = pivot_args(fm, &pivots);
        let derived = buffer.add_step(fm, ProofRule::ChainResolution, premises, args, None)?;
        buffer.factor_reorder_elim_double_neg(fm, derived, &lits, conclusion)?;
        Ok(buffer.take())
    }

    fn expect_open(&self, action: &str) -> Result<()> {
        if self.state == ChainState::Accumulating {
            Ok(())
        } else {
            Err(ProofError::State(format!(
                "cannot {action} in state {:?}",
                self.state
            )))
        }
    }

    fn split(links: &[ResolutionLink]) -> Result<(Vec<FactId>, Vec<(bool, FactId)>)> {
        let premises = links.iter().map(|l| l.clause).collect();
        let pivots = links[1..]
            .iter()
            .map(|l| {
                l.pivot
                    .map(|pivot| (l.pos_first, pivot))
                    .ok_or_else(|| ProofError::State("link without pivot".to_string()))
            })
            .collect::<Result<_>>()?;
        Ok((premises, pivots))
    }

    /// Justify the removal of `lit` by links inserted at `pos`.
    ///
    /// The link for `lit` resolves with its reason and precedes the links of
    /// the reason's own literals that are not in the conclusion, which are
    /// processed first.
    #[allow(clippy::too_many_arguments)]
    fn process_redundant_lit<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        cnf: &CnfMap,
        reasons: &R,
        lit: Lit,
        in_conclusion: &FxHashSet<Lit>,
        visited: &mut FxHashSet<Lit>,
        active: &mut FxHashSet<Lit>,
        pos: usize,
    ) -> Result<()> {
        if visited.contains(&lit) {
            return Ok(());
        }
        if !active.insert(lit) {
            let fact = cnf.fact(lit)?;
            return Err(ProofError::cyclic(fm, fact));
        }

        let pivot = cnf.atom(lit)?;
        let link = match reasons.reason(lit.var()) {
            None => {
                trace!("redundant {} resolved with its unit negation", lit);
                ResolutionLink::new(cnf.fact(!lit)?, pivot, !lit.is_negated())
            }
            Some(reason) => {
                for &other in reason.iter().filter(|r| r.var() != lit.var()) {
                    if !in_conclusion.contains(&other) {
                        self.process_redundant_lit(
                            fm,
                            cnf,
                            reasons,
                            other,
                            in_conclusion,
                            visited,
                            active,
                            pos,
                        )?;
                    }
                }
                trace!("redundant {} resolved with its reason", lit);
                ResolutionLink::new(cnf.clause_fact(fm, &reason)?, pivot, !lit.is_negated())
            }
        };

        active.remove(&lit);
        visited.insert(lit);
        self.links.insert(pos.min(self.links.len()), link);
        self.stats.redundant_links += 1;
        Ok(())
    }
}
