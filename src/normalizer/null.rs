/*
    Null (ε) production removal
*/

use std::collections::BTreeSet;

use itertools::Itertools;
use log::{debug, trace};

use crate::grammar::{push_unique, Alternative, Grammar, Rewrite, Rules, Symbol};

fn is_nullable(symbol: &Symbol, nullable: &BTreeSet<String>) -> bool {
    symbol.nonterminal().is_some_and(|name| nullable.contains(name))
}

/// Every nonterminal that can derive ε. Starts from the rules with a literal ε
/// alternative and grows until no alternative made only of nullable symbols
/// is left under a non-nullable left-hand side.
pub fn nullable_symbols(rules: &Rules) -> BTreeSet<String> {
    let mut nullable: BTreeSet<String> = rules.iter()
        .filter(|(_, rewrite)| rewrite.iter().any(Vec::is_empty))
        .map(|(lhs, _)| lhs.clone())
        .collect();

    loop {
        let grown = rules.iter()
            .filter(|(lhs, _)| !nullable.contains(*lhs))
            .filter(|(_, rewrite)| rewrite.iter()
                .any(|alternative| alternative.iter().all(|symbol| is_nullable(symbol, &nullable))))
            .map(|(lhs, _)| lhs.clone())
            .collect_vec();

        if grown.is_empty() {
            return nullable;
        }
        nullable.extend(grown);
    }
}

/// Every way of dropping a non-empty subset of the nullable occurrences in
/// `alternative`. A result can be empty; callers decide what to do with it.
pub fn removal_variants(alternative: &Alternative, nullable: &BTreeSet<String>) -> Vec<Alternative> {
    let positions = alternative.iter()
        .positions(|symbol| is_nullable(symbol, nullable))
        .collect_vec();

    (1..=positions.len())
        .flat_map(|size| positions.iter().copied().combinations(size))
        .map(|dropped| alternative.iter()
            .enumerate()
            .filter(|(index, _)| !dropped.contains(index))
            .map(|(_, symbol)| symbol.clone())
            .collect())
        .collect()
}

fn rewrite_without_nulls(rewrite: &Rewrite, nullable: &BTreeSet<String>) -> Rewrite {
    let mut next = Rewrite::new();
    for alternative in rewrite.iter().filter(|alternative| !alternative.is_empty()) {
        push_unique(&mut next, alternative.clone());
    }

    let stripped = next.clone();
    for alternative in &stripped {
        for variant in removal_variants(alternative, nullable) {
            if !variant.is_empty() {
                push_unique(&mut next, variant);
            }
        }
    }
    next
}

/// Drops every ε alternative and, for each alternative mentioning nullable
/// symbols, adds all the alternatives with some of them left out. Whether the
/// start symbol could derive ε is kept in `accepts_empty`.
pub fn eliminate_null_productions(grammar: &mut Grammar) {
    let nullable = nullable_symbols(&grammar.rules);
    debug!("nullable nonterminals: {:?}", nullable);

    if nullable.contains(&grammar.start_symbol) {
        debug!("start symbol {} derives the empty string", grammar.start_symbol);
        grammar.accepts_empty = true;
    }

    let rules: Rules = grammar.rules.iter()
        .map(|(lhs, rewrite)| {
            let next = rewrite_without_nulls(rewrite, &nullable);
            trace!("{}: {} alternatives became {}", lhs, rewrite.len(), next.len());
            (lhs.clone(), next)
        })
        .collect();

    grammar.rules = rules;
}
