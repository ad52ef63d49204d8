mod cli;
mod error_handling;
mod generator;
mod grammar;
mod normalizer;
mod recogniser;

use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use grammar::verifier::verify_cnf;
use grammar::Grammar;
use normalizer::NormalizationPipeline;
use recogniser::{cyk, find_disagreement};

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

// Samples sentences of the input and makes sure the normal form derives them
fn check_samples(original: &Grammar, normalized: &Grammar, amount: u32, seed: Option<u64>) -> bool {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut all_accepted = true;
    for _ in 0..amount {
        match generator::generate(original, &mut rng) {
            Ok(sentence) => {
                let accepted = cyk::recognise(normalized, &sentence);
                let shown = if sentence.is_empty() { grammar::EPSILON.to_string() } else { sentence.concat() };
                println!("  {:<24} {}", shown, if accepted { "accepted" } else { "REJECTED" });
                all_accepted &= accepted;
            }
            Err(e) => {
                eprintln!("{}", e);
                all_accepted = false;
            }
        }
    }
    all_accepted
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logger(cli.verbose);

    let original = cli.grammar.grammar();
    println!("Input grammar:\n{}", original);

    let pipeline = NormalizationPipeline::new(cli.pipeline_config());
    let normalized = match pipeline.normalize(original.clone()) {
        Ok(normalized) => normalized,
        Err(errors) => {
            for e in errors {
                eprintln!("{}", e);
            }
            return ExitCode::FAILURE;
        }
    };
    println!("Chomsky normal form:\n{}", normalized);

    let violations = verify_cnf(&normalized);
    if !violations.is_empty() {
        eprintln!("Result is not in normal form:\n  {}", violations.iter().join("\n  "));
        return ExitCode::FAILURE;
    }

    let mut ok = true;
    if cli.samples > 0 {
        println!("Sampled sentences:");
        ok &= check_samples(&original, &normalized, cli.samples, cli.seed);
    }

    if let Some(max_length) = cli.max_length {
        info!("comparing languages up to length {}", max_length);
        match find_disagreement(&original, &normalized, max_length) {
            None => println!("Both grammars agree on every word up to length {}", max_length),
            Some(disagreement) => {
                println!(
                    "`{}`: input {}, normal form {}",
                    disagreement.word.concat(),
                    if disagreement.original { "derives it" } else { "does not" },
                    if disagreement.normalized { "derives it" } else { "does not" }
                );
                ok = false;
            }
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
