use std::collections::{BTreeSet, VecDeque};

use log::debug;

use crate::grammar::Grammar;

/// Nonterminals reachable from the start symbol, the start symbol included
pub fn reachable(grammar: &Grammar) -> BTreeSet<String> {
    let mut accessible = BTreeSet::from([grammar.start_symbol.clone()]);
    let mut queue = VecDeque::from([grammar.start_symbol.clone()]);

    while let Some(current) = queue.pop_front() {
        for symbol in grammar.rewrite(&current).iter().flatten() {
            if let Some(name) = symbol.nonterminal() {
                if accessible.insert(name.to_string()) {
                    queue.push_back(name.to_string());
                }
            }
        }
    }

    accessible
}

/// Drops every nonterminal, and its rule, that the start symbol can not reach.
/// Terminals are left alone.
pub fn prune_unreachable(grammar: &mut Grammar) {
    let accessible = reachable(grammar);

    let before = grammar.nonterminals.len();
    grammar.nonterminals.retain(|nonterminal| accessible.contains(nonterminal));
    grammar.rules.retain(|lhs, _| accessible.contains(lhs));

    debug!("pruned {} unreachable nonterminals", before - grammar.nonterminals.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::samples;

    #[test]
    fn unreferenced_self_loop_is_pruned() {
        let mut grammar = samples::variant();
        grammar.nonterminals.insert("Z".to_string());
        let self_loop = grammar.alternative("Z");
        grammar.rules.insert("Z".to_string(), vec![self_loop]);

        prune_unreachable(&mut grammar);

        assert!(!grammar.nonterminals.contains("Z"));
        assert!(!grammar.rules.contains_key("Z"));
    }

    #[test]
    fn unreachable_rules_go_with_their_symbols() {
        let mut grammar = samples::variant();

        prune_unreachable(&mut grammar);

        assert!(!grammar.nonterminals.contains("C"));
        assert!(grammar.rewrite("C").is_empty());
        for kept in ["S", "A", "B", "D"] {
            assert!(grammar.nonterminals.contains(kept));
        }
        assert_eq!(grammar.terminals.len(), 2);
    }

    #[test]
    fn start_without_rules_is_reachable() {
        let grammar = crate::grammar::Grammar::from_literal(&["S", "A"], &["a"], &[("A", &["a"])], "S");

        assert_eq!(reachable(&grammar), BTreeSet::from(["S".to_string()]));
    }
}
