//! Mapping between SAT literals and facts.
//!
//! The CNF layer introduces one SAT variable per Boolean atom. A positive
//! literal stands for the atom itself and a negative one for its negation,
//! so both polarities are interned up front and looked up without touching
//! the fact manager again.

use certiz_core::{FactId, FactList, FactManager, Lit, ProofError, Result, Var};
use certiz_proof::resolution::literals_to_fact;
use rustc_hash::FxHashMap;

/// Bidirectional literal/fact table.
#[derive(Debug, Default, Clone)]
pub struct CnfMap {
    atoms: FxHashMap<Var, FactId>,
    negations: FxHashMap<Var, FactId>,
    lits: FxHashMap<FactId, Lit>,
}

impl CnfMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check whether no variable is registered.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Register `fact` as the meaning of `lit`.
    ///
    /// A negative literal must be given a negation; the variable's atom is the
    /// fact under it. Registering a variable twice with the same atom is a
    /// no-op, with a different one a [`ProofError::State`].
    pub fn register(&mut self, fm: &mut FactManager, lit: Lit, fact: FactId) -> Result<()> {
        let atom = if lit.is_negated() {
            fm.not_inner(fact).ok_or_else(|| {
                ProofError::State(format!(
                    "negative literal {} mapped to non-negation {}",
                    lit,
                    fm.display(fact)
                ))
            })?
        } else {
            fact
        };

        let var = lit.var();
        if let Some(&known) = self.atoms.get(&var) {
            if known == atom {
                return Ok(());
            }
            return Err(ProofError::State(format!(
                "variable {} already stands for {}, not {}",
                var,
                fm.display(known),
                fm.display(atom)
            )));
        }

        let negation = fm.mk_not(atom);
        self.atoms.insert(var, atom);
        self.negations.insert(var, negation);
        self.lits.insert(atom, Lit::pos(var));
        self.lits.insert(negation, Lit::neg(var));
        Ok(())
    }

    /// Fact of `lit`, if its variable is registered.
    pub fn fact_of(&self, lit: Lit) -> Option<FactId> {
        let table = if lit.is_negated() {
            &self.negations
        } else {
            &self.atoms
        };
        table.get(&lit.var()).copied()
    }

    /// Fact of `lit`.
    pub fn fact(&self, lit: Lit) -> Result<FactId> {
        self.fact_of(lit)
            .ok_or_else(|| ProofError::State(format!("literal {lit} has no fact")))
    }

    /// Atom of the variable of `lit`, used as a resolution pivot.
    pub fn atom(&self, lit: Lit) -> Result<FactId> {
        self.fact(Lit::pos(lit.var()))
    }

    /// Literal standing for `fact`, if any.
    pub fn lit_of(&self, fact: FactId) -> Option<Lit> {
        self.lits.get(&fact).copied()
    }

    /// Literal facts of a clause, sorted by handle and without duplicates.
    pub fn clause_literals(&self, lits: &[Lit]) -> Result<FactList> {
        let mut facts = lits
            .iter()
            .map(|&lit| self.fact(lit))
            .collect::<Result<FactList>>()?;
        facts.sort_unstable();
        facts.dedup();
        Ok(facts)
    }

    /// Fact of a clause: `false` when empty, the literal itself for a unit
    /// clause, a disjunction otherwise.
    ///
    /// Literal order does not matter, so every permutation of a clause maps to
    /// the same fact.
    pub fn clause_fact(&self, fm: &mut FactManager, lits: &[Lit]) -> Result<FactId> {
        let facts = self.clause_literals(lits)?;
        Ok(literals_to_fact(fm, &facts))
    }
}
