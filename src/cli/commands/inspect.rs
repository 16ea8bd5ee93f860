//! Inspect command - summarize a saved model

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::JsonModelRepository,
    cli::output::{format_number, print_kv, print_section},
    ports::ModelRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved model")]
pub struct InspectArgs {
    /// Model file to inspect
    pub model: PathBuf,

    /// Number of strongest estimates to list
    #[arg(long, short = 'n', default_value_t = 10)]
    pub top: usize,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let repository = JsonModelRepository::new();
    let model = repository
        .load(&args.model)
        .with_context(|| format!("failed to load model from {}", args.model.display()))?;
    let table = model.to_table()?;

    print_section("Model Summary");
    print_kv("File", &args.model.display().to_string());
    print_kv("Format version", &model.version.to_string());
    print_kv("Stored estimates", &format_number(model.entry_count()));
    if let Some(episodes) = model.metadata.episodes_trained {
        print_kv("Episodes trained", &format_number(episodes));
    }
    if let Some(seed) = model.metadata.seed {
        print_kv("Seed", &seed.to_string());
    }

    if !table.is_empty() {
        let mut estimates: Vec<f64> = table.iter().map(|(_, v)| *v).collect();
        estimates.sort_by(|a, b| a.partial_cmp(b).expect("estimates are finite"));
        let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
        print_kv("Min estimate", &format!("{:.4}", estimates[0]));
        print_kv(
            "Max estimate",
            &format!("{:.4}", estimates[estimates.len() - 1]),
        );
        print_kv("Mean estimate", &format!("{mean:.4}"));

        let mut strongest: Vec<(String, f64)> = model
            .entries()
            .map(|(key, estimate)| (key.clone(), *estimate))
            .collect();
        strongest.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .expect("estimates are finite")
        });

        println!("\nStrongest estimates:");
        for (key, estimate) in strongest.iter().take(args.top) {
            println!("  {key:24} {estimate:>12.4}");
        }
    }

    Ok(())
}
