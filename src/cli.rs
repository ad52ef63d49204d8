use clap::{ArgAction, Parser, ValueEnum};

use crate::grammar::{samples, Grammar};
use crate::normalizer::allocator::AllocatorConfig;
use crate::normalizer::unit::UnitCyclePolicy;
use crate::normalizer::PipelineConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SampleGrammar {
    /// S, A, B, C, D over {a, b}, with ε, unit rules and an unreachable C
    Variant,
    /// A -> B -> C -> d
    UnitChain,
    /// A and B point at each other
    UnitCycle,
    /// A -> aBc with a nullable B
    NullableMiddle,
    /// Left-recursive expressions over x, +, * and parentheses
    Arithmetic,
    /// A single four-symbol production
    LongProduction,
    /// The start symbol derives ε
    NullableStart,
}

impl SampleGrammar {
    pub fn grammar(self) -> Grammar {
        match self {
            SampleGrammar::Variant => samples::variant(),
            SampleGrammar::UnitChain => samples::unit_chain(),
            SampleGrammar::UnitCycle => samples::unit_cycle(),
            SampleGrammar::NullableMiddle => samples::nullable_middle(),
            SampleGrammar::Arithmetic => samples::arithmetic(),
            SampleGrammar::LongProduction => samples::long_production(),
            SampleGrammar::NullableStart => samples::nullable_start(),
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Built-in grammar to normalize
    #[arg(value_enum, default_value_t = SampleGrammar::Variant)]
    pub grammar: SampleGrammar,

    /// Highest numeric suffix for fresh nonterminals (default: 9)
    #[arg(long, value_name = "DEPTH")]
    pub suffix_depth: Option<usize>,

    /// Only hand out the single letters A-Z as fresh nonterminals
    #[arg(long, conflicts_with = "suffix_depth")]
    pub single_letters: bool,

    /// Stop on a cycle of unit productions instead of collapsing it
    #[arg(long)]
    pub fail_on_unit_cycle: bool,

    /// Random sentences of the input to check against the result (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 0)]
    pub samples: u32,

    /// Compare both grammars on every word up to this length
    #[arg(long, value_name = "LENGTH")]
    pub max_length: Option<usize>,

    /// Seed for sentence sampling (default: random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// More logging, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        let allocator = if self.single_letters {
            AllocatorConfig::single_letters()
        } else {
            let defaults = AllocatorConfig::default();
            AllocatorConfig {
                max_suffix: self.suffix_depth.unwrap_or(defaults.max_suffix),
                ..defaults
            }
        };

        let unit_cycles = if self.fail_on_unit_cycle {
            UnitCyclePolicy::Fail
        } else {
            UnitCyclePolicy::Collapse
        };

        PipelineConfig { allocator, unit_cycles }
    }
}
