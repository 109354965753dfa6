//! Translation into the rules of the tactic-based Lean checker.
//!
//! Every step carries a clause as its first argument, like Alethe steps do.
//! Term-level rules (`symm`, `trans`, `cong`, ...) carry `(cl res)`; the
//! clausal ones carry the list of literals the tactics resolve on.
//!
//! Chain resolutions and congruences are broken into binary steps. Their
//! intermediate results are keyed by placeholder applications unique to the
//! original conclusion, so two chains never share a partial step by
//! accident.
//!
//! | Internal rule | Lean steps |
//! |---|---|
//! | `SCOPE` | `scope` over `(cl (not A1) ... (not An) F)` |
//! | `IMPLIES_ELIM` | `impliesElim`, or the scope clause directly after a `SCOPE` |
//! | `CHAIN_RESOLUTION`, `RESOLUTION` | `R0P`/`R1P` per link, then `R0`/`R1` |
//! | `CONG` | `reflP`, one `congP` per argument but the last, then `cong` |
//! | `REORDERING` | `reorder` with the premise position of each literal |
//! | `CNF_AND_POS` | `cnfAndPos` |
//! | `SYMM` | `symm`, or `negSymm` for disequalities |
//! | `EQ_RESOLVE`, `AND_ELIM`, `REFL`, `TRANS`, `THEORY_REWRITE` | one step |
//!
//! Other rules become counted `unknown` steps.

use super::TranslationStats;
use crate::node::{ProofNode, ProofNodeRef};
use crate::resolution::{chain_conclusion_is_singleton, chain_resolvent, clause_literals, pivot_pairs};
use crate::rewrite::{ProofRewriter, ProofTranslator, RewriteConfig};
use crate::rule::{LeanRule, ProofRule, RuleTag};
use crate::store::ProofStore;
use certiz_core::{FactId, FactManager, ProofConfig, ProofError, Result};
use tracing::{trace, warn};

/// Translator from the internal calculus to Lean checker steps.
#[derive(Debug, Clone, Default)]
pub struct LeanTranslator {
    config: ProofConfig,
    stats: TranslationStats,
}

impl LeanTranslator {
    /// Create a translator.
    pub fn new(config: ProofConfig) -> Self {
        Self {
            config,
            stats: TranslationStats::default(),
        }
    }

    /// Get statistics.
    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    /// Translate the proof rooted at `root` into a fresh store and return the
    /// translated root.
    pub fn translate_proof(
        &mut self,
        fm: &mut FactManager,
        root: &ProofNodeRef,
    ) -> Result<ProofNodeRef> {
        let mut rewriter = ProofRewriter::with_config(RewriteConfig::from(&self.config));
        let mut target = ProofStore::new();
        rewriter.process(fm, root, self, &mut target)
    }

    #[allow(clippy::too_many_arguments)]
    fn emit(
        &mut self,
        fm: &FactManager,
        target: &mut ProofStore,
        key: FactId,
        rule: LeanRule,
        clause: FactId,
        children: &[FactId],
        args: Vec<FactId>,
    ) -> Result<()> {
        target.add_target_step(fm, key, rule, clause, children, args)?;
        self.stats.steps_emitted += 1;
        Ok(())
    }

    /// One step proving `(cl res)` from the premises and arguments of `node`.
    fn term_step(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: LeanRule,
    ) -> Result<()> {
        let res = node.conclusion();
        let clause = fm.mk_clause([res]);
        self.emit(fm, target, res, rule, clause, &node.child_conclusions(), node.args().to_vec())
    }

    /// `(cl (not A1) ... (not An) F)`, with `false` as `F` when the scope
    /// concludes a negation. `res` is the fact the step is keyed by.
    fn scope_step(
        &mut self,
        fm: &mut FactManager,
        res: FactId,
        body: FactId,
        assumptions: &[FactId],
        target: &mut ProofStore,
    ) -> Result<()> {
        let mut lits: Vec<FactId> = assumptions.iter().map(|&a| fm.mk_not(a)).collect();
        lits.push(if fm.is_false(body) { body } else { Self::consequent(fm, res)? });
        let clause = fm.mk_clause(lits);
        self.emit(fm, target, res, LeanRule::Scope, clause, &[body], assumptions.to_vec())
    }

    /// Second operand of an implication or a binary disjunction.
    fn consequent(fm: &FactManager, res: FactId) -> Result<FactId> {
        match fm.children(res) {
            [_, rhs] => Ok(*rhs),
            _ => Err(ProofError::invalid_step(
                LeanRule::Scope,
                format!("{} has no consequent", fm.display(res)),
            )),
        }
    }

    fn implies_elim(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let premise = node
            .children()
            .first()
            .ok_or_else(|| ProofError::invalid_step(LeanRule::ImpliesElim, "missing premise"))?;
        if premise.rule().is(ProofRule::Scope) {
            if let [body] = premise.children() {
                trace!("eliminating scope of {} directly", fm.display(premise.conclusion()));
                return self.scope_step(fm, res, body.conclusion(), premise.args(), target);
            }
        }
        let clause = Self::literal_clause(fm, res);
        self.emit(
            fm,
            target,
            res,
            LeanRule::ImpliesElim,
            clause,
            &node.child_conclusions(),
            node.args().to_vec(),
        )
    }

    /// The disjuncts of `f` as a clause.
    fn literal_clause(fm: &mut FactManager, f: FactId) -> FactId {
        let lits = clause_literals(fm, f);
        fm.mk_clause(lits)
    }

    fn symm(&mut self, fm: &mut FactManager, node: &ProofNode, target: &mut ProofStore) -> Result<()> {
        let rule = if fm.is_not(node.conclusion()) {
            LeanRule::NegSymm
        } else {
            LeanRule::Symm
        };
        let res = node.conclusion();
        let clause = fm.mk_clause([res]);
        self.emit(fm, target, res, rule, clause, &node.child_conclusions(), vec![])
    }

    /// `reflP` on the operator, then one `congP` per argument. Each partial
    /// step equates the operator applied to a prefix of the arguments.
    fn cong(&mut self, fm: &mut FactManager, node: &ProofNode, target: &mut ProofStore) -> Result<()> {
        let res = node.conclusion();
        let op = *node
            .args()
            .last()
            .ok_or_else(|| ProofError::invalid_step(LeanRule::Cong, "missing operator"))?;
        let name = fm
            .name(op)
            .map(str::to_owned)
            .ok_or_else(|| ProofError::invalid_step(LeanRule::Cong, "operator is not a symbol"))?;
        let premises = node.child_conclusions();
        let Some((&last, partial)) = premises.split_last() else {
            return Err(ProofError::invalid_step(LeanRule::Cong, "no premises"));
        };

        let refl = fm.mk_app("@reflP", [res]);
        let op_eq = fm.mk_eq(op, op);
        let clause = fm.mk_clause([op_eq]);
        self.emit(fm, target, refl, LeanRule::ReflPartial, clause, &[], vec![op])?;

        let mut cur = refl;
        let mut lhs = Vec::with_capacity(premises.len());
        let mut rhs = Vec::with_capacity(premises.len());
        for (i, &premise) in partial.iter().enumerate() {
            let [a, b] = Self::sides(fm, premise)?;
            lhs.push(a);
            rhs.push(b);
            let l = fm.mk_app(&name, lhs.iter().copied());
            let r = fm.mk_app(&name, rhs.iter().copied());
            let eq = fm.mk_eq(l, r);
            let clause = fm.mk_clause([eq]);
            let index = fm.mk_int(i as i64);
            let next = fm.mk_app("@congP", [res, index]);
            self.emit(fm, target, next, LeanRule::CongPartial, clause, &[cur, premise], vec![])?;
            cur = next;
        }
        let clause = fm.mk_clause([res]);
        self.emit(fm, target, res, LeanRule::Cong, clause, &[cur, last], vec![])
    }

    fn sides(fm: &FactManager, eq: FactId) -> Result<[FactId; 2]> {
        match fm.children(eq) {
            [a, b] if !fm.is_not(eq) => Ok([*a, *b]),
            _ => Err(ProofError::invalid_step(
                LeanRule::CongPartial,
                format!("{} is not an equality", fm.display(eq)),
            )),
        }
    }

    /// Binary resolutions `R0P`/`R1P` over placeholders and a final
    /// `R0`/`R1`.
    ///
    /// Each step carries the pivot and two flags telling whether its first
    /// and second premise are read as singleton clauses. Only assumptions and
    /// equality resolutions can be singletons: other steps already print
    /// their literals.
    fn chain_resolution(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let premises = node.child_conclusions();
        let pivots = pivot_pairs(fm, node.args())?;
        if premises.len() < 2 || pivots.len() + 1 != premises.len() {
            return Err(ProofError::invalid_step(
                LeanRule::R0,
                format!("{} premises with {} pivots", premises.len(), pivots.len()),
            ));
        }

        let (pol0, pivot0) = pivots[0];
        let mut first_singleton = Self::prints_whole(node, 0)
            && !(fm.is_or(premises[0]) && !(pol0 && premises[0] == pivot0));
        let mut cur = premises[0];
        let last = premises.len() - 1;
        for i in 1..last {
            let (pol, pivot) = pivots[i - 1];
            let flags = [
                fm.mk_bool(first_singleton),
                fm.mk_bool(Self::second_singleton(fm, node, i, pol, pivot)),
            ];
            let lits = chain_resolvent(fm, &premises[..=i], &pivots[..i])?;
            let clause = fm.mk_clause(lits);
            let index = fm.mk_int(i as i64);
            let next = fm.mk_app("@resolvent", [res, index]);
            let rule = if pol { LeanRule::R0Partial } else { LeanRule::R1Partial };
            self.emit(
                fm,
                target,
                next,
                rule,
                clause,
                &[cur, premises[i]],
                vec![pivot, flags[0], flags[1]],
            )?;
            cur = next;
            // later links resolve against the placeholder's literal list
            first_singleton = false;
        }

        let (pol, pivot) = pivots[last - 1];
        let flags = [
            fm.mk_bool(first_singleton),
            fm.mk_bool(Self::second_singleton(fm, node, last, pol, pivot)),
        ];
        let clause = if !chain_conclusion_is_singleton(fm, res, &premises, &pivots) {
            Self::literal_clause(fm, res)
        } else if fm.is_false(res) {
            fm.mk_clause([])
        } else {
            fm.mk_clause([res])
        };
        let rule = if pol { LeanRule::R0 } else { LeanRule::R1 };
        self.emit(
            fm,
            target,
            res,
            rule,
            clause,
            &[cur, premises[last]],
            vec![pivot, flags[0], flags[1]],
        )
    }

    /// Check whether premise `i` of `node` is printed as a unit clause of
    /// its whole conclusion.
    fn prints_whole(node: &ProofNode, i: usize) -> bool {
        node.children().get(i).is_some_and(|child| {
            matches!(
                child.rule().internal(),
                Some(ProofRule::Assume | ProofRule::EqResolve)
            )
        })
    }

    fn second_singleton(
        fm: &FactManager,
        node: &ProofNode,
        i: usize,
        pol: bool,
        pivot: FactId,
    ) -> bool {
        let premise = node.child_conclusions()[i];
        Self::prints_whole(node, i) && !(fm.is_or(premise) && !(!pol && premise == pivot))
    }

    /// `reorder` of the premise clause, with the premise position of every
    /// literal of the conclusion.
    fn reorder(&mut self, fm: &mut FactManager, node: &ProofNode, target: &mut ProofStore) -> Result<()> {
        let res = node.conclusion();
        let premise = node
            .child_conclusions()
            .first()
            .copied()
            .ok_or_else(|| ProofError::invalid_step(LeanRule::Reorder, "missing premise"))?;
        let from = clause_literals(fm, premise);
        let to = clause_literals(fm, res);
        let mut positions = Vec::with_capacity(to.len());
        for lit in &to {
            let pos = from.iter().position(|l| l == lit).ok_or_else(|| {
                ProofError::invalid_step(
                    LeanRule::Reorder,
                    format!("{} does not occur in {}", fm.display(*lit), fm.display(premise)),
                )
            })?;
            positions.push(fm.mk_int(pos as i64));
        }
        let clause = fm.mk_clause(to);
        self.emit(fm, target, res, LeanRule::Reorder, clause, &[premise], positions)
    }

    fn cnf_and_pos(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
    ) -> Result<()> {
        let res = node.conclusion();
        let clause = Self::literal_clause(fm, res);
        self.emit(fm, target, res, LeanRule::CnfAndPos, clause, &[], node.args().to_vec())
    }

    fn unknown(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNode,
        target: &mut ProofStore,
        rule: ProofRule,
    ) -> Result<()> {
        warn!("no Lean rule for {}, trusting {}", rule, fm.display(node.conclusion()));
        *self.stats.unsupported.entry(rule).or_insert(0) += 1;
        self.term_step(fm, node, target, LeanRule::Unknown)
    }
}

impl ProofTranslator for LeanTranslator {
    fn name(&self) -> &str {
        "lean"
    }

    fn should_translate(&self, _fm: &FactManager, node: &ProofNode) -> bool {
        node.rule()
            .internal()
            .is_some_and(|rule| rule != ProofRule::Assume)
    }

    fn translate(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNodeRef,
        target: &mut ProofStore,
    ) -> Result<bool> {
        let RuleTag::Internal(rule) = node.rule() else {
            return Ok(false);
        };
        trace!("translating {} for {}", rule, fm.display(node.conclusion()));
        self.stats.nodes_translated += 1;

        match rule {
            ProofRule::Scope => {
                let body = node
                    .child_conclusions()
                    .first()
                    .copied()
                    .ok_or_else(|| ProofError::invalid_step(LeanRule::Scope, "missing body"))?;
                self.scope_step(fm, node.conclusion(), body, node.args(), target)?
            }
            ProofRule::ImpliesElim => self.implies_elim(fm, node, target)?,
            ProofRule::EqResolve => self.term_step(fm, node, target, LeanRule::EqResolve)?,
            ProofRule::AndElim => self.term_step(fm, node, target, LeanRule::AndElim)?,
            ProofRule::Refl => self.term_step(fm, node, target, LeanRule::Refl)?,
            ProofRule::TheoryRewrite => self.term_step(fm, node, target, LeanRule::ThTrustValid)?,
            ProofRule::Trans => self.term_step(fm, node, target, LeanRule::Trans)?,
            ProofRule::Symm => self.symm(fm, node, target)?,
            ProofRule::Cong => self.cong(fm, node, target)?,
            ProofRule::Resolution | ProofRule::ChainResolution => {
                self.chain_resolution(fm, node, target)?
            }
            ProofRule::Reordering => self.reorder(fm, node, target)?,
            ProofRule::CnfAndPos => self.cnf_and_pos(fm, node, target)?,
            _ => self.unknown(fm, node, target, rule)?,
        }
        Ok(true)
    }
}
