//! Property-based tests for resolution chains

use certiz_core::{FactManager, Lit, ProofConfig, Var};
use certiz_proof::ProofRule;
use certiz_sat::SatProofManager;
use proptest::prelude::*;

fn manager(n: u32) -> (FactManager, SatProofManager, Vec<Lit>) {
    let mut fm = FactManager::new();
    let mut sat = SatProofManager::new(ProofConfig::pedantic());
    let mut lits = Vec::new();
    for i in 0..n {
        let lit = Lit::pos(Var::new(i));
        let atom = fm.mk_var(&format!("x{}", i));
        sat.register_lit(&mut fm, lit, atom).unwrap();
        lits.push(lit);
    }
    (fm, sat, lits)
}

proptest! {
    /// Resolving a clause with unit negations of some of its literals
    /// derives the remaining literals in any requested order
    #[test]
    fn unit_resolution_derives_remaining(
        signs in prop::collection::vec(proptest::bool::ANY, 2..8),
        removed in prop::collection::vec(proptest::bool::ANY, 8),
        rotate in 0usize..8,
    ) {
        let n = signs.len();
        let (mut fm, mut sat, vars) = manager(n as u32);
        let clause: Vec<Lit> = vars
            .iter()
            .zip(&signs)
            .map(|(&v, &neg)| if neg { !v } else { v })
            .collect();

        sat.start_res_chain(&mut fm, &clause).unwrap();
        let mut kept = Vec::new();
        for (i, &lit) in clause.iter().enumerate() {
            if removed[i] {
                sat.add_unit_resolution_step(lit, false).unwrap();
            } else {
                kept.push(lit);
            }
        }
        if !kept.is_empty() {
            let r = rotate % kept.len();
            kept.rotate_left(r);
        }

        let learned = sat.end_res_chain(&mut fm, &(), &kept).unwrap();
        prop_assert_eq!(learned, sat.cnf().clause_fact(&mut fm, &kept).unwrap());
        if removed[..n].iter().any(|&r| r) {
            prop_assert!(sat.lazy_chain().has_step(learned));
        }
    }

    /// A literal shared by every clause of a chain crowds the naive
    /// resolvent once per link, and each extra copy costs one duplicate of
    /// the link that eliminates it
    #[test]
    fn crowding_copies_match_occurrences(k in 1u32..6) {
        // x0..xk, then d and g
        let (mut fm, mut sat, vars) = manager(k + 3);
        let x = &vars[..=k as usize];
        let d = vars[k as usize + 1];
        let g = vars[k as usize + 2];

        sat.start_res_chain(&mut fm, &[x[0], d]).unwrap();
        for i in 1..=k as usize {
            sat.add_resolution_step(&mut fm, &[!x[i - 1], x[i], d], !x[i - 1]).unwrap();
        }
        sat.add_resolution_step(&mut fm, &[!d, g], !d).unwrap();
        let learned = sat.end_res_chain(&mut fm, &(), &[x[k as usize], g]).unwrap();

        prop_assert_eq!(sat.chain_stats().duplicated_links, u64::from(k));
        let mut fact = learned;
        let mut rules = Vec::new();
        while let Some(step) = sat.lazy_chain().step(fact) {
            rules.push(step.rule);
            if step.rule == ProofRule::ChainResolution {
                prop_assert_eq!(step.children.len(), k as usize + 2 + k as usize);
                break;
            }
            fact = step.children[0];
        }
        prop_assert_eq!(rules.last(), Some(&ProofRule::ChainResolution));
        prop_assert!(rules.contains(&ProofRule::Factoring));
    }
}
