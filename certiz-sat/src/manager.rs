//! Proofs of unsatisfiability from the boolean engine.
//!
//! [`SatProofManager`] listens to conflict analysis: every learned clause is
//! recorded as a resolution chain over the clauses the engine resolved
//! against. Those steps are kept in a [`LazyProofChain`] because the premises
//! of a chain are often justified only later, or never if they are inputs.
//!
//! When the engine derives the empty clause, [`SatProofManager::finalize_proof`]
//! resolves the conflicting clause against explanations of its literals and
//! keeps expanding open leaves that were propagated until only inputs remain.

use crate::chain::{ChainConfig, ChainStats, ResolutionChainBuilder};
use crate::cnf::CnfMap;
use crate::crowding::ResolutionLink;
use crate::reason::ReasonProvider;
use certiz_core::{FactId, FactManager, Lit, ProofConfig, ProofError, Result};
use certiz_proof::{LazyProofChain, ProofNodeRef, ProofRule, ProofStepBuffer};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace, warn};

/// Statistics for SAT proof production.
#[derive(Debug, Clone, Default)]
pub struct SatProofStats {
    /// Literals explained by their reasons
    pub explained_lits: u64,
    /// Explanations dropped because they would prove a literal from itself
    pub cyclic_explanations: u64,
    /// Rounds of the finalization fixpoint
    pub fixpoint_rounds: u64,
}

/// Producer of resolution proofs for the boolean engine.
#[derive(Debug)]
pub struct SatProofManager {
    config: ProofConfig,
    cnf: CnfMap,
    builder: ResolutionChainBuilder,
    chain: LazyProofChain,
    inputs: FxHashSet<FactId>,
    stats: SatProofStats,
}

impl Default for SatProofManager {
    fn default() -> Self {
        Self::new(ProofConfig::default())
    }
}

impl SatProofManager {
    /// Create a manager.
    pub fn new(config: ProofConfig) -> Self {
        Self {
            builder: ResolutionChainBuilder::new(ChainConfig::from(&config)),
            config,
            cnf: CnfMap::new(),
            chain: LazyProofChain::new(),
            inputs: FxHashSet::default(),
            stats: SatProofStats::default(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    /// Literal/fact table.
    pub fn cnf(&self) -> &CnfMap {
        &self.cnf
    }

    /// Steps recorded so far.
    pub fn lazy_chain(&self) -> &LazyProofChain {
        &self.chain
    }

    /// Statistics of the chain builder.
    pub fn chain_stats(&self) -> &ChainStats {
        self.builder.stats()
    }

    /// Get statistics.
    pub fn stats(&self) -> &SatProofStats {
        &self.stats
    }

    /// Register `fact` as the meaning of `lit`.
    pub fn register_lit(&mut self, fm: &mut FactManager, lit: Lit, fact: FactId) -> Result<()> {
        self.cnf.register(fm, lit, fact)
    }

    /// Register an input clause and return its fact.
    pub fn register_input_clause(&mut self, fm: &mut FactManager, clause: &[Lit]) -> Result<FactId> {
        let fact = self.cnf.clause_fact(fm, clause)?;
        trace!("input clause {}", fm.display(fact));
        self.inputs.insert(fact);
        Ok(fact)
    }

    /// Register an input unit clause and return its fact.
    pub fn register_input_lit(&mut self, fm: &mut FactManager, lit: Lit) -> Result<FactId> {
        self.register_input_clause(fm, &[lit])
    }

    /// Input facts, sorted by handle.
    pub fn inputs(&self) -> Vec<FactId> {
        let mut inputs: Vec<FactId> = self.inputs.iter().copied().collect();
        inputs.sort_unstable();
        inputs
    }

    /// Open a chain with the clause the engine is analyzing.
    pub fn start_res_chain(&mut self, fm: &mut FactManager, start: &[Lit]) -> Result<()> {
        let clause = self.cnf.clause_fact(fm, start)?;
        trace!("start chain with {}", fm.display(clause));
        self.builder.start(clause)
    }

    /// Resolve with `clause` on its literal `lit`.
    pub fn add_resolution_step(
        &mut self,
        fm: &mut FactManager,
        clause: &[Lit],
        lit: Lit,
    ) -> Result<()> {
        let fact = self.cnf.clause_fact(fm, clause)?;
        let pivot = self.cnf.atom(lit)?;
        // a negative lit occurs as is in the clause and as its atom in the
        // accumulated clause
        self.builder
            .add_link(ResolutionLink::new(fact, pivot, lit.is_negated()))
    }

    /// Resolve away `lit` of the accumulated clause with the unit clause of
    /// its negation.
    ///
    /// A redundant literal was removed by clause minimization; it is
    /// justified through its reason when the chain closes.
    pub fn add_unit_resolution_step(&mut self, lit: Lit, redundant: bool) -> Result<()> {
        if redundant {
            trace!("redundant literal {} deferred", lit);
            return self.builder.add_redundant_lit(lit);
        }
        let unit = self.cnf.fact(!lit)?;
        let pivot = self.cnf.atom(lit)?;
        self.builder
            .add_link(ResolutionLink::new(unit, pivot, !lit.is_negated()))
    }

    /// Close the open chain as a proof of the learned clause `clause`.
    pub fn end_res_chain<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        reasons: &R,
        clause: &[Lit],
    ) -> Result<FactId> {
        let steps = self.builder.end(fm, &self.cnf, reasons, clause)?;
        let conclusion = self.cnf.clause_fact(fm, clause)?;
        if self.chain.has_step(conclusion) && !steps.is_empty() {
            debug!("keeping earlier proof of {}", fm.display(conclusion));
        }
        self.chain.add_steps(steps);
        Ok(conclusion)
    }

    /// Close the open chain as a proof of the unit clause `lit`.
    pub fn end_res_chain_lit<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        reasons: &R,
        lit: Lit,
    ) -> Result<FactId> {
        self.end_res_chain(fm, reasons, &[lit])
    }

    /// Justify `lit` by resolving its reason clause against explanations of
    /// the other literals in it.
    ///
    /// Returns the facts the explanation rests on. A literal without a reason
    /// is left as it is.
    pub fn explain_lit<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        reasons: &R,
        lit: Lit,
    ) -> Result<FxHashSet<FactId>> {
        let mut explainer = Explainer::default();
        let mut premises = FxHashSet::default();
        self.explain(fm, reasons, lit, &mut premises, &mut explainer)?;
        Ok(premises)
    }

    /// Build the proof of `false` from the conflicting clause `conflict`.
    ///
    /// Every literal of the conflict is false; its negation is explained and
    /// resolved away. Open leaves that stand for propagated literals are then
    /// explained until none is left. With closedness checking enabled, a leaf
    /// that is neither an input nor explainable is a
    /// [`ProofError::NonClosedProof`].
    pub fn finalize_proof<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        reasons: &R,
        conflict: &[Lit],
    ) -> Result<ProofNodeRef> {
        let ff = fm.mk_false();
        let conflict_fact = self.cnf.clause_fact(fm, conflict)?;
        info!("finalizing proof from conflict {}", fm.display(conflict_fact));
        if conflict_fact == ff {
            return Ok(self.get_proof(fm));
        }

        let mut seen = FxHashSet::default();
        let conflict: Vec<Lit> = conflict.iter().copied().filter(|l| seen.insert(*l)).collect();

        let mut explainer = Explainer::default();
        let mut premises = FxHashSet::default();
        let mut children = vec![conflict_fact];
        let mut args = Vec::with_capacity(2 * conflict.len());
        for &lit in &conflict {
            let mut child_premises = FxHashSet::default();
            self.explain(fm, reasons, !lit, &mut child_premises, &mut explainer)?;
            let negation = self.cnf.fact(!lit)?;
            children.push(negation);
            args.push(fm.mk_bool(!lit.is_negated()));
            args.push(self.cnf.atom(lit)?);
            premises.extend(child_premises);
            premises.insert(negation);
        }

        let mut buffer = ProofStepBuffer::new(self.config.pedantic);
        buffer.add_step(fm, ProofRule::ChainResolution, children, args, Some(ff))?;
        for (conclusion, step) in buffer.take() {
            self.chain.force_add_step(conclusion, step);
        }

        loop {
            self.stats.fixpoint_rounds += 1;
            let proof = self.chain.get_proof_for(ff);
            let mut expanded = false;
            for fact in proof.free_assumptions() {
                if premises.contains(&fact) || self.inputs.contains(&fact) {
                    continue;
                }
                match self.cnf.lit_of(fact) {
                    None => {
                        trace!("clause leaf {}", fm.display(fact));
                    }
                    Some(lit) => {
                        trace!("literal leaf {} ({})", fm.display(fact), lit);
                        expanded = true;
                        let mut child_premises = FxHashSet::default();
                        self.explain(fm, reasons, lit, &mut child_premises, &mut explainer)?;
                        premises.extend(child_premises);
                    }
                }
                premises.insert(fact);
            }
            debug!(
                "fixpoint round {}: {} premises",
                self.stats.fixpoint_rounds,
                premises.len()
            );
            if !expanded {
                break;
            }
        }

        let proof = self.get_proof(fm);
        if self.config.check_closedness {
            let open: Vec<FactId> = proof
                .free_assumptions()
                .into_iter()
                .filter(|f| !self.inputs.contains(f))
                .collect();
            if !open.is_empty() {
                warn!("proof of false has {} open leaves", open.len());
                return Err(ProofError::non_closed(fm, &open));
            }
        }
        info!("proof of false has {} nodes", proof.dag_size());
        Ok(proof)
    }

    /// Build the proof of `false` from a conflict on the single literal `lit`.
    pub fn finalize_proof_lit<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        reasons: &R,
        lit: Lit,
    ) -> Result<ProofNodeRef> {
        self.finalize_proof(fm, reasons, &[lit])
    }

    /// Current proof of `false`; an assumption of `false` if none was built.
    pub fn get_proof(&self, fm: &FactManager) -> ProofNodeRef {
        self.chain.get_proof_for(fm.mk_false())
    }

    fn explain<R: ReasonProvider + ?Sized>(
        &mut self,
        fm: &mut FactManager,
        reasons: &R,
        lit: Lit,
        premises: &mut FxHashSet<FactId>,
        explainer: &mut Explainer,
    ) -> Result<()> {
        if let Some(known) = explainer.done.get(&lit) {
            premises.extend(known.iter().copied());
            return Ok(());
        }
        let lit_fact = self.cnf.fact(lit)?;
        let Some(reason) = reasons.reason(lit.var()) else {
            trace!("{} has no reason", fm.display(lit_fact));
            return Ok(());
        };
        if !reason.contains(&lit) {
            trace!("{} is not implied by its variable's reason", lit);
            return Ok(());
        }
        if reason.contains(&!lit) || !explainer.active.insert(lit) {
            return Err(ProofError::cyclic(fm, lit_fact));
        }

        let mut seen = FxHashSet::default();
        let reason: Vec<Lit> = reason.into_iter().filter(|l| seen.insert(*l)).collect();
        let clause = self.cnf.clause_fact(fm, &reason)?;
        let mut local = FxHashSet::default();
        local.insert(clause);

        let mut children = vec![clause];
        let mut args = Vec::with_capacity(2 * reason.len());
        for &other in reason.iter().filter(|&&l| l != lit) {
            self.explain(fm, reasons, !other, &mut local, explainer)?;
            let negation = self.cnf.fact(!other)?;
            children.push(negation);
            args.push(fm.mk_bool(!other.is_negated()));
            args.push(self.cnf.atom(other)?);
            local.insert(negation);
        }
        explainer.active.remove(&lit);
        premises.extend(local.iter().copied());

        if children.len() > 1 {
            if local.contains(&lit_fact) {
                warn!(
                    "explanation of {} rests on itself, step dropped",
                    fm.display(lit_fact)
                );
                self.stats.cyclic_explanations += 1;
            } else {
                let mut buffer = ProofStepBuffer::new(self.config.pedantic);
                buffer.add_step(
                    fm,
                    ProofRule::ChainResolution,
                    children,
                    args,
                    Some(lit_fact),
                )?;
                self.chain.add_steps(buffer.take());
                self.stats.explained_lits += 1;
                trace!("explained {}", fm.display(lit_fact));
            }
        }
        explainer.done.insert(lit, local);
        Ok(())
    }
}

/// Bookkeeping shared by the explanations of one request.
#[derive(Debug, Default)]
struct Explainer {
    active: FxHashSet<Lit>,
    done: FxHashMap<Lit, FxHashSet<FactId>>,
}
