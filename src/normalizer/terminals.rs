use std::collections::BTreeMap;

use log::debug;

use super::allocator::SymbolAllocator;
use super::PhaseResult;
use crate::grammar::{push_unique, Alternative, Grammar, Rewrite, Rules, Symbol};

fn isolator_for(
    terminal: &str,
    isolated: &mut BTreeMap<String, String>,
    allocator: &mut SymbolAllocator,
) -> PhaseResult<String> {
    if let Some(nonterminal) = isolated.get(terminal) {
        return Ok(nonterminal.clone());
    }

    let nonterminal = allocator.fresh()?;
    debug!("{} -> {}", nonterminal, terminal);
    isolated.insert(terminal.to_string(), nonterminal.clone());
    Ok(nonterminal)
}

fn isolate_alternative(
    alternative: &Alternative,
    isolated: &mut BTreeMap<String, String>,
    allocator: &mut SymbolAllocator,
) -> PhaseResult<Alternative> {
    if alternative.len() < 2 || !alternative.iter().any(Symbol::is_terminal) {
        return Ok(alternative.clone());
    }

    alternative.iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(terminal) => isolator_for(terminal, isolated, allocator).map(Symbol::Nonterminal),
            nonterminal => Ok(nonterminal.clone()),
        })
        .collect()
}

/// Moves terminals out of every alternative with two or more symbols. Each
/// distinct terminal gets one fresh nonterminal whose only alternative is the
/// terminal itself.
pub fn isolate_terminals(grammar: &mut Grammar, allocator: &mut SymbolAllocator) -> PhaseResult<()> {
    let mut isolated = BTreeMap::new();
    let mut rules = Rules::new();

    for (lhs, rewrite) in &grammar.rules {
        let mut out = Rewrite::new();
        for alternative in rewrite {
            push_unique(&mut out, isolate_alternative(alternative, &mut isolated, allocator)?);
        }
        rules.insert(lhs.clone(), out);
    }

    for (terminal, nonterminal) in isolated {
        grammar.nonterminals.insert(nonterminal.clone());
        rules.insert(nonterminal, vec![vec![Symbol::Terminal(terminal)]]);
    }
    grammar.rules = rules;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::samples;
    use crate::normalizer::allocator::AllocatorConfig;
    use crate::normalizer::NormalizeErrorType;

    fn allocator_for(grammar: &Grammar, config: AllocatorConfig) -> SymbolAllocator {
        SymbolAllocator::new(config, grammar.nonterminals.iter().chain(grammar.terminals.iter()).cloned())
    }

    #[test]
    fn one_nonterminal_per_terminal() {
        let mut grammar = crate::grammar::Grammar::from_literal(
            &["S", "A"],
            &["a", "b"],
            &[("S", &["aA", "Ab", "a"]), ("A", &["ab", "b"])],
            "S",
        );
        let mut allocator = allocator_for(&grammar, AllocatorConfig::default());

        isolate_terminals(&mut grammar, &mut allocator).unwrap();

        // a -> B, b -> C, both minted once
        assert_eq!(allocator.allocated(), &["B".to_string(), "C".to_string()]);
        assert!(grammar.has_alternative("S", "BA"));
        assert!(grammar.has_alternative("S", "AC"));
        assert!(grammar.has_alternative("S", "a"));
        assert!(grammar.has_alternative("A", "BC"));
        assert!(grammar.has_alternative("A", "b"));
        assert_eq!(grammar.rewrite("B"), &[grammar.alternative("a")]);
        assert_eq!(grammar.rewrite("C"), &[grammar.alternative("b")]);
    }

    #[test]
    fn multi_symbol_alternatives_end_up_terminal_free() {
        let mut grammar = samples::arithmetic();
        let mut allocator = allocator_for(&grammar, AllocatorConfig::default());

        isolate_terminals(&mut grammar, &mut allocator).unwrap();

        for alternative in grammar.rules.values().flatten().filter(|alternative| alternative.len() > 1) {
            assert!(alternative.iter().all(|symbol| !symbol.is_terminal()));
        }
        assert_eq!(allocator.allocated().len(), 4);
    }

    #[test]
    fn allocation_failure_is_reported() {
        let mut grammar = samples::nullable_middle();
        let config = AllocatorConfig { alphabet: vec!['A', 'B', 'X'], max_suffix: 0 };
        let mut allocator = allocator_for(&grammar, config);

        let error = isolate_terminals(&mut grammar, &mut allocator).unwrap_err();

        assert_eq!(error, NormalizeErrorType::SymbolSpaceExhausted { capacity: 3 });
    }
}
