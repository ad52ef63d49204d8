/*
    This module decides whether a grammar derives a word
*/

pub mod cyk;
pub mod earley;

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::grammar::Grammar;

// Every word over `terminals` of at most `max_length` symbols, shortest first
pub fn words(terminals: &BTreeSet<String>, max_length: usize) -> impl Iterator<Item = Vec<String>> + '_ {
    std::iter::once(Vec::new()).chain((1..=max_length).flat_map(move |length| {
        (0..length)
            .map(move |_| terminals.iter().cloned())
            .multi_cartesian_product()
    }))
}

// A word the two grammars do not agree on
#[derive(Debug, PartialEq)]
pub struct Disagreement {
    pub word: Vec<String>,
    pub original: bool,
    pub normalized: bool,
}

/// Compares the original grammar (through Earley) against its normal form
/// (through CYK) on every word up to `max_length`. Returns the first word
/// only one of them derives.
pub fn find_disagreement(original: &Grammar, normalized: &Grammar, max_length: usize) -> Option<Disagreement> {
    words(&original.terminals, max_length)
        .map(|word| Disagreement {
            original: earley::recognise(original, &word),
            normalized: cyk::recognise(normalized, &word),
            word,
        })
        .find(|outcome| outcome.original != outcome.normalized)
}
