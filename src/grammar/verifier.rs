use std::fmt::Display;

use super::{format_alternative, Alternative, Grammar, Symbol};
use crate::error_handling::{Error, ErrorType, Errors, Stage};
use crate::normalizer::reachability::reachable;

#[derive(Debug, PartialEq, Clone)]
pub enum MalformedKind {
    // The start symbol is not in Vn
    UndefinedStartSymbol(String),
    // A rule is keyed by something that is not in Vn
    UndefinedLeftHandSide(String),
    // A production uses a symbol of the wrong kind or one that was never declared
    UndefinedSymbol { lhs: String, symbol: String },
    // A name is both a terminal and a nonterminal
    AmbiguousSymbol(String),
}

impl ErrorType for MalformedKind {}

impl Display for MalformedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedKind::UndefinedStartSymbol(start) => write!(f, "Start symbol `{}` is not a nonterminal", start),
            MalformedKind::UndefinedLeftHandSide(lhs) => write!(f, "Rule for `{}`, which is not a nonterminal", lhs),
            MalformedKind::UndefinedSymbol { lhs, symbol } => write!(f, "Rule for `{}` uses undeclared symbol `{}`", lhs, symbol),
            MalformedKind::AmbiguousSymbol(name) => write!(f, "`{}` is declared as both a terminal and a nonterminal", name),
        }
    }
}

pub type MalformedError = Error<MalformedKind>;

fn malformed(error: MalformedKind) -> MalformedError {
    Error::new(Stage::Validation, error)
}

fn is_declared(symbol: &Symbol, grammar: &Grammar) -> bool {
    match symbol {
        Symbol::Nonterminal(name) => grammar.nonterminals.contains(name),
        Symbol::Terminal(name) => grammar.terminals.contains(name),
    }
}

fn get_alternative_undefined_symbols(lhs: &str, alternative: &Alternative, grammar: &Grammar) -> Errors<MalformedKind> {
    alternative.iter()
        .filter(|symbol| !is_declared(symbol, grammar))
        .map(|symbol| malformed(MalformedKind::UndefinedSymbol {
            lhs: lhs.to_owned(),
            symbol: symbol.name().to_owned()
        }))
        .collect()
}

fn get_undefined_symbols(grammar: &Grammar) -> Errors<MalformedKind> {
    // Flatten the undefined symbols of every alternative of every rule
    grammar.rules.iter()
        .flat_map(|(lhs, rewrite)| rewrite.iter().map(move |alternative| (lhs, alternative)))
        .flat_map(|(lhs, alternative)| get_alternative_undefined_symbols(lhs, alternative, grammar))
        .collect()
}

fn get_undefined_left_hand_sides(grammar: &Grammar) -> Errors<MalformedKind> {
    grammar.rules.keys()
        .filter(|lhs| !grammar.nonterminals.contains(*lhs))
        .map(|lhs| malformed(MalformedKind::UndefinedLeftHandSide(lhs.clone())))
        .collect()
}

fn get_ambiguous_symbols(grammar: &Grammar) -> Errors<MalformedKind> {
    grammar.nonterminals.intersection(&grammar.terminals)
        .map(|name| malformed(MalformedKind::AmbiguousSymbol(name.clone())))
        .collect()
}

/// Checks that the grammar only talks about symbols it declares. Every
/// problem is reported, not just the first.
pub fn verify_grammar(grammar: &Grammar) -> Result<(), Errors<MalformedKind>> {
    let mut errors = Vec::new();

    if !grammar.nonterminals.contains(&grammar.start_symbol) {
        errors.push(malformed(MalformedKind::UndefinedStartSymbol(grammar.start_symbol.clone())));
    }
    errors.extend(get_ambiguous_symbols(grammar));
    errors.extend(get_undefined_left_hand_sides(grammar));
    errors.extend(get_undefined_symbols(grammar));

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}

// A way a grammar falls short of Chomsky normal form
#[derive(Debug, PartialEq, Clone)]
pub enum CnfViolation {
    StartOnRightHandSide { lhs: String },
    NullProduction { lhs: String },
    UnitProduction { lhs: String, target: String },
    Unreachable(String),
    BadShape { lhs: String, alternative: String },
}

impl Display for CnfViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfViolation::StartOnRightHandSide { lhs } => write!(f, "Start symbol appears in a production of `{}`", lhs),
            CnfViolation::NullProduction { lhs } => write!(f, "`{}` has an ε production", lhs),
            CnfViolation::UnitProduction { lhs, target } => write!(f, "Unit production `{} -> {}`", lhs, target),
            CnfViolation::Unreachable(nonterminal) => write!(f, "`{}` is not reachable from the start symbol", nonterminal),
            CnfViolation::BadShape { lhs, alternative } => write!(f, "`{} -> {}` is neither a terminal nor two nonterminals", lhs, alternative),
        }
    }
}

fn alternative_violation(lhs: &str, alternative: &Alternative, start: &str) -> Option<CnfViolation> {
    let bad_shape = || CnfViolation::BadShape {
        lhs: lhs.to_owned(),
        alternative: format_alternative(alternative)
    };

    if alternative.iter().any(|symbol| symbol.nonterminal() == Some(start)) {
        return Some(CnfViolation::StartOnRightHandSide { lhs: lhs.to_owned() });
    }

    match alternative.as_slice() {
        [] => Some(CnfViolation::NullProduction { lhs: lhs.to_owned() }),
        [Symbol::Terminal(_)] => None,
        [Symbol::Nonterminal(target)] => Some(CnfViolation::UnitProduction {
            lhs: lhs.to_owned(),
            target: target.clone()
        }),
        [Symbol::Nonterminal(_), Symbol::Nonterminal(_)] => None,
        _ => Some(bad_shape()),
    }
}

/// Lists every way the grammar breaks Chomsky normal form. Empty means the
/// grammar is in normal form.
pub fn verify_cnf(grammar: &Grammar) -> Vec<CnfViolation> {
    let accessible = reachable(grammar);

    let unreachable = grammar.nonterminals.iter()
        .filter(|nonterminal| !accessible.contains(*nonterminal))
        .map(|nonterminal| CnfViolation::Unreachable(nonterminal.clone()));

    grammar.rules.iter()
        .flat_map(|(lhs, rewrite)| rewrite.iter()
            .filter_map(move |alternative| alternative_violation(lhs, alternative, &grammar.start_symbol)))
        .chain(unreachable)
        .collect()
}
