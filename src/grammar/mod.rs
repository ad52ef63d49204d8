/*
    This module is for storing and manipulating grammars
*/

pub mod samples;
pub mod verifier;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;

// Written in place of an empty alternative, both in literals and in dumps
pub const EPSILON: &str = "ε";

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
        }
    }

    pub fn nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::Nonterminal(name) => Some(name),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// The symbols in a single alternative. An empty alternative is ε.
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

// Left-hand side to its alternatives, kept ordered so dumps are reproducible
pub type Rules = BTreeMap<String, Rewrite>;

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub nonterminals: BTreeSet<String>,
    pub terminals: BTreeSet<String>,
    pub rules: Rules,
    pub start_symbol: String,
    // The start symbol derived ε before normalization stripped it
    pub accepts_empty: bool,
}

/// Pushes `alternative` unless the rewrite already has it. Returns whether it
/// was added.
pub fn push_unique(rewrite: &mut Rewrite, alternative: Alternative) -> bool {
    if rewrite.contains(&alternative) {
        false
    } else {
        rewrite.push(alternative);
        true
    }
}

/// Formats an alternative the way it would be written in a literal. Names are
/// run together when every one is a single character and spaced otherwise.
pub fn format_alternative(alternative: &[Symbol]) -> String {
    if alternative.is_empty() {
        EPSILON.to_string()
    } else if alternative.iter().all(|symbol| symbol.name().chars().count() == 1) {
        alternative.iter().map(Symbol::name).collect()
    } else {
        alternative.iter().map(Symbol::name).join(" ")
    }
}

impl Grammar {
    /// Builds a grammar from the classic single-character literal form: every
    /// character of a production is one symbol, `ε` or the empty string is an
    /// ε alternative. Characters not in `nonterminals` become terminals; the
    /// verifier reports the ones missing from `terminals` too.
    pub fn from_literal(
        nonterminals: &[&str],
        terminals: &[&str],
        rules: &[(&str, &[&str])],
        start_symbol: &str,
    ) -> Grammar {
        let nonterminals: BTreeSet<String> = nonterminals.iter().map(|s| s.to_string()).collect();
        let terminals: BTreeSet<String> = terminals.iter().map(|s| s.to_string()).collect();

        let mut rule_map = Rules::new();
        for (lhs, productions) in rules {
            let rewrite = rule_map.entry(lhs.to_string()).or_default();
            for production in productions.iter() {
                rewrite.push(literal_alternative(production, &nonterminals));
            }
        }

        Grammar {
            nonterminals,
            terminals,
            rules: rule_map,
            start_symbol: start_symbol.to_string(),
            accepts_empty: false,
        }
    }

    /// The alternatives of `nonterminal`, empty when it has no rule.
    pub fn rewrite(&self, nonterminal: &str) -> &[Alternative] {
        self.rules.get(nonterminal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }
}

fn literal_alternative(production: &str, nonterminals: &BTreeSet<String>) -> Alternative {
    if production == EPSILON {
        return Vec::new();
    }

    production
        .chars()
        .map(|c| c.to_string())
        .map(|name| {
            if nonterminals.contains(&name) {
                Symbol::Nonterminal(name)
            } else {
                Symbol::Terminal(name)
            }
        })
        .collect()
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vn: [{}]", self.nonterminals.iter().join(", "))?;
        writeln!(f, "Vt: [{}]", self.terminals.iter().join(", "))?;
        writeln!(f, "Start: {}", self.start_symbol)?;
        if self.accepts_empty {
            writeln!(f, "Accepts empty string")?;
        }
        writeln!(f, "Productions:")?;
        for (lhs, rewrite) in &self.rules {
            let alternatives = rewrite.iter().map(|alternative| format_alternative(alternative)).join(" | ");
            writeln!(f, "  {} -> {}", lhs, alternatives)?;
        }
        Ok(())
    }
}
