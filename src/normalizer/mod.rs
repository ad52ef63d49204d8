/*
    This module rewrites grammars into Chomsky normal form
*/

pub mod allocator;
pub mod binarize;
pub mod null;
pub mod reachability;
pub mod start;
pub mod terminals;
pub mod unit;

use std::fmt::Display;

use itertools::Itertools;
use log::{debug, info};

use crate::error_handling::*;
use crate::grammar::verifier::{verify_grammar, MalformedKind};
use crate::grammar::Grammar;
use allocator::{AllocatorConfig, SymbolAllocator};
use unit::UnitCyclePolicy;

#[derive(Debug, PartialEq)]
pub enum NormalizeErrorType {
    // Every name the allocator may hand out is taken
    SymbolSpaceExhausted { capacity: usize },
    // Unit productions loop back on themselves and the policy says to stop
    UnitCycleDetected(Vec<String>),
    // The input grammar does not hold together
    MalformedGrammar(MalformedKind),
}

impl ErrorType for NormalizeErrorType {}

impl Display for NormalizeErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeErrorType::SymbolSpaceExhausted { capacity } => write!(f, "Ran out of fresh nonterminals (all {} names are taken)", capacity),
            NormalizeErrorType::UnitCycleDetected(cycle) => write!(f, "Unit productions form a cycle: {}", cycle.join(" -> ")),
            NormalizeErrorType::MalformedGrammar(kind) => write!(f, "Malformed grammar: {}", kind),
        }
    }
}

pub type NormalizeError = Error<NormalizeErrorType>;
pub type NormalizeErrors = Errors<NormalizeErrorType>;

// What a single phase returns, before it is tagged with its stage
pub type PhaseResult<T> = std::result::Result<T, NormalizeErrorType>;
pub type NormalizeResult<T> = std::result::Result<T, NormalizeErrors>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub allocator: AllocatorConfig,
    pub unit_cycles: UnitCyclePolicy,
}

fn at(stage: Stage) -> impl FnOnce(NormalizeErrorType) -> NormalizeErrors {
    move |error| vec![NormalizeError::new(stage, error)]
}

/// Runs the six phases in order: isolate the start symbol, remove null
/// productions, remove unit productions, prune unreachable nonterminals,
/// isolate terminals, binarize.
///
/// Null removal can create unit productions and unit removal can strand
/// nonterminals, so each phase comes after the ones whose leftovers it cleans
/// up. Every phase runs exactly once.
#[derive(Debug, Default)]
pub struct NormalizationPipeline {
    config: PipelineConfig,
}

impl NormalizationPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        NormalizationPipeline { config }
    }

    /// Normalizes `grammar`, consuming it. On failure nothing of the half
    /// rewritten grammar is handed back.
    pub fn normalize(&self, grammar: Grammar) -> NormalizeResult<Grammar> {
        verify_grammar(&grammar).map_err(|errors| {
            errors.into_iter()
                .map(|error| error.map(NormalizeErrorType::MalformedGrammar))
                .collect_vec()
        })?;

        let mut grammar = grammar;
        let mut allocator = SymbolAllocator::new(
            self.config.allocator.clone(),
            grammar.nonterminals.iter().chain(grammar.terminals.iter()).cloned(),
        );
        info!("normalizing grammar with {} productions", grammar.production_count());

        start::isolate_start_symbol(&mut grammar, &mut allocator).map_err(at(Stage::StartSymbol))?;
        null::eliminate_null_productions(&mut grammar);
        debug!("{} productions after null removal", grammar.production_count());
        unit::eliminate_unit_productions(&mut grammar, self.config.unit_cycles).map_err(at(Stage::UnitProductions))?;
        debug!("{} productions after unit removal", grammar.production_count());
        reachability::prune_unreachable(&mut grammar);
        terminals::isolate_terminals(&mut grammar, &mut allocator).map_err(at(Stage::Terminals))?;
        binarize::binarize(&mut grammar, &mut allocator).map_err(at(Stage::Binarization))?;

        info!(
            "normalized into {} productions using {} fresh nonterminals",
            grammar.production_count(),
            allocator.allocated().len()
        );
        Ok(grammar)
    }
}
