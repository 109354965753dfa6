//! From conflict analysis to a closed Alethe certificate.

use certiz_core::{FactManager, Lit, ProofConfig, ProofError, Var, init_test_tracing};
use certiz_proof::{AletheRule, ProofManager, ProofRule, RuleTag};
use certiz_sat::{SatProofManager, TrailReasons};

struct Problem {
    fm: FactManager,
    sat: SatProofManager,
    a: Lit,
    b: Lit,
    c: Lit,
}

/// (a b) (a ~b) (~a c) (~a ~c)
fn problem(config: ProofConfig) -> Problem {
    let mut fm = FactManager::new();
    let mut sat = SatProofManager::new(config);
    let mut lits = Vec::new();
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        let lit = Lit::pos(Var::new(i as u32));
        let atom = fm.mk_var(name);
        sat.register_lit(&mut fm, lit, atom).unwrap();
        lits.push(lit);
    }
    let (a, b, c) = (lits[0], lits[1], lits[2]);
    for clause in [[a, b], [a, !b], [!a, c], [!a, !c]] {
        sat.register_input_clause(&mut fm, &clause).unwrap();
    }
    Problem { fm, sat, a, b, c }
}

/// Decide ~a, propagate b, conflict on (a ~b), learn (a); then propagate c
/// at level zero and conflict on (~a ~c).
fn refute(p: &mut Problem) -> certiz_proof::ProofNodeRef {
    let Problem { fm, sat, a, b, c } = p;
    let (a, b, c) = (*a, *b, *c);

    let mut trail = TrailReasons::new();
    trail.add_reason([b, a]);
    sat.start_res_chain(fm, &[a, !b]).unwrap();
    sat.add_resolution_step(fm, &[b, a], b).unwrap();
    let learned = sat.end_res_chain_lit(fm, &trail, a).unwrap();
    assert_eq!(fm.display(learned).to_string(), "a");

    let mut trail = TrailReasons::new();
    trail.add_reason([a]);
    trail.add_reason([c, !a]);
    sat.finalize_proof(fm, &trail, &[!a, !c]).unwrap()
}

#[test]
fn test_learned_unit_is_factored() {
    init_test_tracing();
    let mut p = problem(ProofConfig::pedantic());
    refute(&mut p);

    let fa = p.sat.cnf().fact(p.a).unwrap();
    let factoring = p.sat.lazy_chain().step(fa).unwrap();
    assert_eq!(factoring.rule, ProofRule::Factoring);
    assert_eq!(
        p.fm.display(factoring.children[0]).to_string(),
        "(or a a)"
    );
    assert_eq!(p.sat.chain_stats().crowded_chains, 0);
}

#[test]
fn test_refutation_rests_on_inputs() {
    let mut p = problem(ProofConfig::pedantic());
    let proof = refute(&mut p);

    assert!(p.fm.is_false(proof.conclusion()));
    let inputs = p.sat.inputs();
    let free = proof.free_assumptions();
    assert_eq!(free.len(), 4);
    assert!(free.iter().all(|f| inputs.contains(f)));
    assert_eq!(p.sat.stats().explained_lits, 1);
}

#[test]
fn test_certificate_is_closed() {
    let mut p = problem(ProofConfig::pedantic());
    let proof = refute(&mut p);

    let mut manager = ProofManager::new(ProofConfig::pedantic());
    let inputs = p.sat.inputs();
    let out = manager.final_proof(&mut p.fm, &proof, &inputs).unwrap();
    assert!(out.free_assumptions().is_empty());
    assert_eq!(manager.translation_stats().unsupported_total(), 0);

    let mut contractions = 0;
    out.for_each_post_order(|n| {
        if n.rule() == RuleTag::Alethe(AletheRule::DuplicatedLiterals) {
            contractions += 1;
        }
    });
    assert!(contractions >= 1);
}

#[test]
fn test_missing_input_is_reported() {
    let mut p = problem(ProofConfig::default());
    let proof = refute(&mut p);

    let mut manager = ProofManager::default();
    let mut inputs = p.sat.inputs();
    inputs.pop();
    let err = manager.final_proof(&mut p.fm, &proof, &inputs).unwrap_err();
    assert!(matches!(err, ProofError::NonClosedProof(_)));
}
