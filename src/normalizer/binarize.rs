use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use log::debug;

use super::allocator::SymbolAllocator;
use super::PhaseResult;
use crate::grammar::{format_alternative, push_unique, Alternative, Grammar, Rewrite, Rules, Symbol};

type Pairs = BTreeMap<(Symbol, Symbol), String>;

// Folds the last two symbols into one nonterminal until two are left
fn binarize_alternative(
    alternative: &Alternative,
    pairs: &mut Pairs,
    allocator: &mut SymbolAllocator,
) -> PhaseResult<Alternative> {
    let mut alternative = alternative.clone();

    while alternative.len() > 2 {
        let tail = alternative.split_off(alternative.len() - 2);
        let key = (tail[0].clone(), tail[1].clone());
        let name = match pairs.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let name = allocator.fresh()?;
                debug!("{} -> {}", name, format_alternative(&tail));
                entry.insert(name).clone()
            }
        };
        alternative.push(Symbol::Nonterminal(name));
    }

    Ok(alternative)
}

/// Breaks every alternative longer than two symbols into a chain of binary
/// ones. A trailing pair seen before, in any rule, reuses its nonterminal.
pub fn binarize(grammar: &mut Grammar, allocator: &mut SymbolAllocator) -> PhaseResult<()> {
    let mut pairs = Pairs::new();
    let mut rules = Rules::new();

    for (lhs, rewrite) in &grammar.rules {
        let mut out = Rewrite::new();
        for alternative in rewrite {
            push_unique(&mut out, binarize_alternative(alternative, &mut pairs, allocator)?);
        }
        rules.insert(lhs.clone(), out);
    }

    for ((left, right), name) in pairs {
        grammar.nonterminals.insert(name.clone());
        rules.insert(name, vec![vec![left, right]]);
    }
    grammar.rules = rules;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::samples;
    use crate::normalizer::allocator::AllocatorConfig;

    fn allocator_for(grammar: &Grammar) -> SymbolAllocator {
        SymbolAllocator::new(
            AllocatorConfig::default(),
            grammar.nonterminals.iter().chain(grammar.terminals.iter()).cloned(),
        )
    }

    #[test]
    fn length_k_needs_k_minus_two_symbols() {
        let mut grammar = samples::long_production();
        let mut allocator = allocator_for(&grammar);

        binarize(&mut grammar, &mut allocator).unwrap();

        // YZ -> B, then XB -> C
        assert_eq!(allocator.allocated(), &["B".to_string(), "C".to_string()]);
        assert_eq!(grammar.rewrite("A"), &[grammar.alternative("WC")]);
        assert_eq!(grammar.rewrite("C"), &[grammar.alternative("XB")]);
        assert_eq!(grammar.rewrite("B"), &[grammar.alternative("YZ")]);
    }

    #[test]
    fn trailing_pairs_are_shared() {
        let mut grammar = crate::grammar::Grammar::from_literal(
            &["S", "A", "B", "C", "D"],
            &["a"],
            &[("S", &["ABC", "DBC", "AB"]), ("A", &["a"]), ("B", &["a"]), ("C", &["a"]), ("D", &["a"])],
            "S",
        );
        let mut allocator = allocator_for(&grammar);

        binarize(&mut grammar, &mut allocator).unwrap();

        assert_eq!(allocator.allocated(), &["E".to_string()]);
        assert_eq!(grammar.rewrite("S"), &[
            grammar.alternative("AE"),
            grammar.alternative("DE"),
            grammar.alternative("AB"),
        ]);
    }

    #[test]
    fn short_alternatives_untouched() {
        let mut grammar = samples::unit_chain();
        let before = grammar.clone();
        let mut allocator = allocator_for(&grammar);

        binarize(&mut grammar, &mut allocator).unwrap();

        assert_eq!(grammar, before);
    }
}
