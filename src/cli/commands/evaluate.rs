//! Evaluate command - run a frozen model without learning

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::JsonModelRepository,
    agent::QAgent,
    app::AgentConfig,
    cli::output::{format_number, print_kv, print_section},
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline},
    ports::ModelRepository,
    sim::World,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained model")]
pub struct EvaluateArgs {
    /// Model file to evaluate
    pub model: PathBuf,

    /// Number of episodes to run
    #[arg(long, short = 'e', default_value_t = 500)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let repository = JsonModelRepository::new();
    let model = repository
        .load(&args.model)
        .with_context(|| format!("failed to load model from {}", args.model.display()))?;

    // Greedy evaluation: the exploration override is off and the table
    // is never updated.
    let agent_config = AgentConfig::new().with_exploration_rate(0.0);
    let mut agent = QAgent::from_model(&model, agent_config)?;
    let mut world = World::new(args.seed.map(|s| s.wrapping_add(1)));

    let training_config = TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
        learning: false,
        ..TrainingConfig::default()
    };

    let mut pipeline = TrainingPipeline::new(training_config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline.run(&mut agent, &mut world)?;

    print_section("Evaluation Results");
    print_kv("Model", &args.model.display().to_string());
    print_kv("Stored estimates", &format_number(agent.table_size()));
    print_kv("Episodes", &format_number(result.episodes));
    print_kv(
        "Tubes cleared",
        &format!(
            "{} ({:.1}%)",
            format_number(result.passes),
            result.pass_rate * 100.0
        ),
    );
    print_kv("Best streak", &result.best_streak.to_string());

    Ok(())
}
