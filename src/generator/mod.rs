/*
    This module generates sentences
*/

use rand::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;

// Past this depth only the quickest way out of each nonterminal is taken
const DEPTH_LIMIT: usize = 8;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // No derivation of the nonterminal ever ends in terminals only
    NonTerminating(String),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::NonTerminating(nonterminal) => write!(f, "Nonterminal `{}` never derives a sentence", nonterminal),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<Vec<String>, GenerateError>;

// Height of the shallowest derivation tree for each nonterminal that has one
type Heights<'g> = BTreeMap<&'g str, usize>;

fn alternative_height(alternative: &Alternative, heights: &Heights) -> Option<usize> {
    alternative.iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(_) => Some(0),
            Symbol::Nonterminal(name) => heights.get(name.as_str()).copied(),
        })
        .try_fold(0, |height, symbol_height| symbol_height.map(|h| height.max(h)))
        .map(|height| height + 1)
}

fn derivation_heights(grammar: &Grammar) -> Heights {
    let mut heights = Heights::new();
    loop {
        let mut changed = false;
        for (lhs, rewrite) in &grammar.rules {
            let best = rewrite.iter().filter_map(|alternative| alternative_height(alternative, &heights)).min();
            if let Some(height) = best {
                if heights.get(lhs.as_str()).map_or(true, |&old| height < old) {
                    heights.insert(lhs.as_str(), height);
                    changed = true;
                }
            }
        }
        if !changed {
            return heights;
        }
    }
}

pub fn generate(grammar: &Grammar, rng: &mut impl Rng) -> GenResult {
    generate_with_override(grammar, &grammar.start_symbol, rng)
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override(grammar: &Grammar, start: &str, rng: &mut impl Rng) -> GenResult {
    let heights = derivation_heights(grammar);
    let mut sentence = Vec::new();
    generate_nonterminal(start, grammar, &heights, rng, 0, &mut sentence)?;
    Ok(sentence)
}

fn generate_nonterminal(
    nonterminal: &str,
    grammar: &Grammar,
    heights: &Heights,
    rng: &mut impl Rng,
    depth: usize,
    sentence: &mut Vec<String>,
) -> Result<(), GenerateError> {
    let rewrite = grammar.rules
        .get(nonterminal)
        .ok_or_else(|| GenerateError::new(
            Stage::Generation,
            GenerateErrorType::UndefinedNonterminal(nonterminal.to_string())
        ))?;

    // Alternatives that can never finish are never picked
    let finishing: Vec<&Alternative> = rewrite.iter()
        .filter(|alternative| alternative_height(alternative, heights).is_some())
        .collect();

    let alternative = if depth < DEPTH_LIMIT {
        finishing.choose(rng).copied()
    } else {
        finishing.iter().copied().min_by_key(|alternative| alternative_height(alternative, heights))
    }
    .ok_or_else(|| GenerateError::new(
        Stage::Generation,
        GenerateErrorType::NonTerminating(nonterminal.to_string())
    ))?;

    for symbol in alternative {
        match symbol {
            Symbol::Nonterminal(name) => generate_nonterminal(name, grammar, heights, rng, depth + 1, sentence)?,
            Symbol::Terminal(terminal) => sentence.push(terminal.clone()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;

    use super::*;
    use crate::grammar::samples;
    use crate::recogniser::earley;

    #[test]
    fn sentences_belong_to_the_grammar() {
        let mut rng = StdRng::seed_from_u64(7);

        for grammar in [samples::variant(), samples::arithmetic(), samples::nullable_start()] {
            for _ in 0..20 {
                let sentence = generate(&grammar, &mut rng).unwrap();
                assert!(earley::recognise(&grammar, &sentence), "{:?} is not derivable", sentence);
            }
        }
    }

    #[test]
    fn same_seed_same_sentence() {
        let grammar = samples::arithmetic();

        let first = generate(&grammar, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = generate(&grammar, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn override_start() {
        let grammar = samples::unit_chain();

        assert_eq!(generate_with_override(&grammar, "C", &mut StdRng::seed_from_u64(0)), Ok(vec!["d".to_string()]));
    }

    #[test]
    fn undefined_and_endless_nonterminals() {
        let grammar = Grammar::from_literal(&["S", "L", "U"], &["a"], &[("S", &["U", "L"]), ("L", &["aL"])], "S");
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(generate(&grammar, &mut rng).unwrap_err().error, GenerateErrorType::NonTerminating("S".to_string()));
        assert_eq!(
            generate_with_override(&grammar, "U", &mut rng).unwrap_err().error,
            GenerateErrorType::UndefinedNonterminal("U".to_string())
        );
    }
}
