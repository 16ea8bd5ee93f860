//! Fetch command - download a preset model

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::{JsonModelRepository, RemoteModelSource},
    cli::output::{format_number, print_kv, print_section},
    ports::ModelRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Download a preset model")]
pub struct FetchArgs {
    /// URL of the model document
    pub url: String,

    /// Where to store the downloaded model
    #[arg(long, short = 'O', default_value = "model.json")]
    pub output: PathBuf,
}

pub fn execute(args: FetchArgs) -> Result<()> {
    let source = RemoteModelSource::new();
    let model = source
        .fetch(&args.url)
        .with_context(|| format!("failed to fetch model from {}", args.url))?;

    // Re-parse into a table to reject documents that are valid JSON but
    // not a valid model before anything lands on disk.
    let table = model.to_table()?;

    let repository = JsonModelRepository::new();
    repository
        .save(&model, &args.output)
        .with_context(|| format!("failed to save model to {}", args.output.display()))?;

    print_section("Model Downloaded");
    print_kv("Source", &args.url);
    print_kv("Saved to", &args.output.display().to_string());
    print_kv("Stored estimates", &format_number(table.len()));

    Ok(())
}
