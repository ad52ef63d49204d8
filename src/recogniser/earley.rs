use crate::grammar::{Grammar, Symbol};
use crate::normalizer::null::nullable_symbols;

#[derive(Debug, Clone, PartialEq)]
struct Item<'g> {
    lhs: &'g str,
    alternative: &'g [Symbol],
    dot: usize,
    origin: usize,
}

impl<'g> Item<'g> {
    fn next_symbol(&self) -> Option<&'g Symbol> {
        self.alternative.get(self.dot)
    }

    fn advanced(&self) -> Self {
        Item {
            dot: self.dot + 1,
            ..self.clone()
        }
    }
}

fn add<'g>(set: &mut Vec<Item<'g>>, item: Item<'g>) {
    if !set.contains(&item) {
        set.push(item);
    }
}

/// Earley membership test for any context-free grammar, ε alternatives and
/// unit cycles included. Nullable nonterminals are stepped over at prediction
/// time so completions inside one set are never missed.
pub fn recognise(grammar: &Grammar, word: &[String]) -> bool {
    let nullable = nullable_symbols(&grammar.rules);
    let start = grammar.start_symbol.as_str();
    let mut sets: Vec<Vec<Item>> = vec![Vec::new(); word.len() + 1];

    for alternative in grammar.rewrite(start) {
        add(&mut sets[0], Item { lhs: start, alternative, dot: 0, origin: 0 });
    }

    for position in 0..=word.len() {
        let mut index = 0;
        while index < sets[position].len() {
            let item = sets[position][index].clone();
            index += 1;

            match item.next_symbol() {
                None => {
                    let parents: Vec<Item> = sets[item.origin].iter()
                        .filter(|parent| parent.next_symbol().and_then(Symbol::nonterminal) == Some(item.lhs))
                        .map(Item::advanced)
                        .collect();
                    for parent in parents {
                        add(&mut sets[position], parent);
                    }
                }
                Some(Symbol::Nonterminal(name)) => {
                    for alternative in grammar.rewrite(name) {
                        add(&mut sets[position], Item { lhs: name, alternative, dot: 0, origin: position });
                    }
                    if nullable.contains(name) {
                        add(&mut sets[position], item.advanced());
                    }
                }
                Some(Symbol::Terminal(terminal)) => {
                    if word.get(position) == Some(terminal) {
                        add(&mut sets[position + 1], item.advanced());
                    }
                }
            }
        }
    }

    sets[word.len()].iter()
        .any(|item| item.lhs == start && item.origin == 0 && item.next_symbol().is_none())
}
