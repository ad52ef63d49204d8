use log::debug;

use super::allocator::SymbolAllocator;
use super::PhaseResult;
use crate::grammar::{Grammar, Symbol};

// Plain two-level scan over every alternative of every rule
pub fn start_on_right_side(grammar: &Grammar) -> bool {
    grammar.rules.values()
        .flatten()
        .flatten()
        .any(|symbol| symbol.nonterminal() == Some(grammar.start_symbol.as_str()))
}

/// Makes sure the start symbol never shows up on a right-hand side by putting
/// a fresh `S' -> S` in front of it when it does.
pub fn isolate_start_symbol(grammar: &mut Grammar, allocator: &mut SymbolAllocator) -> PhaseResult<()> {
    if !start_on_right_side(grammar) {
        debug!("start symbol {} is already isolated", grammar.start_symbol);
        return Ok(());
    }

    let new_start = allocator.fresh()?;
    let old_start = std::mem::replace(&mut grammar.start_symbol, new_start.clone());
    debug!("isolating start symbol {} behind {}", old_start, new_start);

    grammar.nonterminals.insert(new_start.clone());
    grammar.rules.insert(new_start, vec![vec![Symbol::Nonterminal(old_start)]]);
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
    fn new_start_when_start_is_used() {
        let mut grammar = samples::variant();
        let mut allocator = allocator_for(&grammar);

        isolate_start_symbol(&mut grammar, &mut allocator).unwrap();

        assert_eq!(grammar.start_symbol, "E");
        assert!(grammar.nonterminals.contains("E"));
        assert!(grammar.has_alternative("E", "S"));
        assert!(!start_on_right_side(&grammar));
        // The old rules still mention S
        assert!(grammar.has_alternative("A", "AS"));
    }

    #[test]
    fn isolated_start_left_alone() {
        let mut grammar = samples::nullable_middle();
        let before = grammar.clone();
        let mut allocator = allocator_for(&grammar);

        isolate_start_symbol(&mut grammar, &mut allocator).unwrap();

        assert_eq!(grammar, before);
        assert!(allocator.allocated().is_empty());
    }

    #[test]
    fn isolation_is_idempotent() {
        let mut grammar = samples::arithmetic();
        let mut allocator = allocator_for(&grammar);

        isolate_start_symbol(&mut grammar, &mut allocator).unwrap();
        let once = grammar.clone();
        isolate_start_symbol(&mut grammar, &mut allocator).unwrap();

        assert_eq!(grammar, once);
        assert_eq!(allocator.allocated().len(), 1);
    }
}
