/*
    Unit production removal
*/

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use super::{NormalizeErrorType, PhaseResult};
use crate::grammar::{push_unique, Alternative, Grammar, Rewrite, Rules, Symbol};

/// What to do when unit productions form a cycle such as `A -> B`, `B -> A`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitCyclePolicy {
    // Every member ends up with the union of the cycle's other alternatives
    #[default]
    Collapse,
    // Give up with `UnitCycleDetected`
    Fail,
}

fn unit_target(alternative: &Alternative) -> Option<&str> {
    match alternative.as_slice() {
        [Symbol::Nonterminal(target)] => Some(target),
        _ => None,
    }
}

fn walk<'a>(
    node: &'a str,
    edges: &BTreeMap<&'a str, Vec<&'a str>>,
    path: &mut Vec<&'a str>,
    finished: &mut BTreeSet<&'a str>,
) -> Option<Vec<String>> {
    if let Some(position) = path.iter().position(|visited| *visited == node) {
        return Some(path[position..].iter().map(|name| name.to_string()).collect());
    }
    if finished.contains(node) {
        return None;
    }

    path.push(node);
    for next in edges.get(node).into_iter().flatten() {
        if let Some(cycle) = walk(*next, edges, path, finished) {
            return Some(cycle);
        }
    }
    path.pop();
    finished.insert(node);
    None
}

/// Finds a cycle of unit productions, ignoring `A -> A`. The members are
/// returned in the order they point to each other.
pub fn find_unit_cycle(rules: &Rules) -> Option<Vec<String>> {
    let edges: BTreeMap<&str, Vec<&str>> = rules.iter()
        .map(|(lhs, rewrite)| {
            let targets = rewrite.iter()
                .filter_map(unit_target)
                .filter(|target| *target != lhs.as_str())
                .collect();
            (lhs.as_str(), targets)
        })
        .collect();

    let mut finished = BTreeSet::new();
    edges.keys().find_map(|root| walk(*root, &edges, &mut Vec::new(), &mut finished))
}

// One scan: every unit alternative is swapped for the current alternatives of
// its target. A target already spliced into a left-hand side is not spliced
// again, which is what breaks cycles.
fn splice_pass(rules: &Rules, absorbed: &mut BTreeMap<String, BTreeSet<String>>) -> (Rules, bool) {
    let mut changed = false;
    let mut next = Rules::new();

    for (lhs, rewrite) in rules {
        let seen = absorbed
            .entry(lhs.clone())
            .or_insert_with(|| BTreeSet::from([lhs.clone()]));
        let mut out = Rewrite::new();

        for alternative in rewrite {
            match unit_target(alternative) {
                None => {
                    push_unique(&mut out, alternative.clone());
                }
                Some(target) => {
                    changed = true;
                    if seen.insert(target.to_string()) {
                        trace!("splicing {} into {}", target, lhs);
                        for spliced in rules.get(target).into_iter().flatten() {
                            push_unique(&mut out, spliced.clone());
                        }
                    } else {
                        trace!("dropping {} -> {}, already spliced", lhs, target);
                    }
                }
            }
        }
        next.insert(lhs.clone(), out);
    }

    (next, changed)
}

/// Replaces every `A -> B` by the alternatives of `B`, repeating until no unit
/// production is left.
pub fn eliminate_unit_productions(grammar: &mut Grammar, policy: UnitCyclePolicy) -> PhaseResult<()> {
    if let Some(cycle) = find_unit_cycle(&grammar.rules) {
        match policy {
            UnitCyclePolicy::Fail => return Err(NormalizeErrorType::UnitCycleDetected(cycle)),
            UnitCyclePolicy::Collapse => debug!("collapsing unit cycle {}", cycle.join(" -> ")),
        }
    }

    // A -> A derives nothing new
    let mut rules: Rules = grammar.rules.iter()
        .map(|(lhs, rewrite)| {
            let kept = rewrite.iter()
                .filter(|alternative| unit_target(alternative) != Some(lhs.as_str()))
                .cloned()
                .collect();
            (lhs.clone(), kept)
        })
        .collect();

    let mut absorbed = BTreeMap::new();
    let mut passes = 0;
    loop {
        let (next, changed) = splice_pass(&rules, &mut absorbed);
        rules = next;
        passes += 1;
        if !changed {
            break;
        }
    }
    debug!("unit productions resolved after {} passes", passes);

    grammar.rules = rules;
    Ok(())
}
