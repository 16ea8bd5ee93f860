//! Train command - run the learning loop and save the resulting model

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::JsonModelRepository,
    agent::{QAgent, TrainingMetadata},
    app::AgentConfig,
    cli::output::{format_number, print_kv, print_section},
    pipeline::{MetricsObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    ports::ModelRepository,
    sim::World,
};

#[derive(Parser, Debug)]
#[command(about = "Train the agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of episodes to train
    #[arg(long, short = 'e', default_value_t = 20_000)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained model
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Existing model to continue training from
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Optional path for a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Learning rate alpha (0.0-1.0)
    #[arg(long, default_value_t = crate::app::config::DEFAULT_LEARNING_RATE)]
    pub alpha: f64,

    /// Discount factor gamma (0.0-1.0)
    #[arg(long, default_value_t = crate::app::config::DEFAULT_DISCOUNT)]
    pub gamma: f64,

    /// Probability of the random exploration branch
    #[arg(long, default_value_t = crate::app::config::DEFAULT_EXPLORATION_RATE)]
    pub exploration: f64,

    /// Jump probability on exact value ties
    #[arg(long, default_value_t = crate::app::config::DEFAULT_TIE_BREAK_JUMP_PROB)]
    pub tie_break_jump: f64,

    /// Buffer entries kept across episode boundaries
    #[arg(long, default_value_t = crate::app::config::DEFAULT_REPLAY_TAIL)]
    pub tail: usize,

    /// Base reward for a cleared tube
    #[arg(long, default_value_t = crate::pipeline::training::DEFAULT_PASS_REWARD)]
    pub pass_reward: f64,

    /// Base reward magnitude for a crash
    #[arg(long, default_value_t = crate::pipeline::training::DEFAULT_CRASH_REWARD)]
    pub crash_reward: f64,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let agent_config = AgentConfig::new()
        .with_learning_rate(args.alpha)
        .with_discount(args.gamma)
        .with_exploration_rate(args.exploration)
        .with_tie_break_jump_prob(args.tie_break_jump)
        .with_replay_tail(args.tail);

    let repository = JsonModelRepository::new();

    let mut agent = match &args.resume {
        Some(path) => {
            let model = repository
                .load(path)
                .with_context(|| format!("failed to load model from {}", path.display()))?;
            let agent = QAgent::from_model(&model, agent_config)?;
            println!(
                "Resuming from {} ({} estimates)",
                path.display(),
                format_number(agent.table_size())
            );
            agent
        }
        None => QAgent::new(agent_config)?,
    };

    let mut world = World::new(args.seed.map(|s| s.wrapping_add(1)));

    let training_config = TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
        pass_reward: args.pass_reward,
        crash_reward: args.crash_reward,
        learning: true,
    };

    let mut pipeline = TrainingPipeline::new(training_config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline = pipeline.with_observer(Box::new(MetricsObserver::new()));

    let result = pipeline.run(&mut agent, &mut world)?;

    print_section("Training Complete");
    print_kv("Episodes", &format_number(result.episodes));
    print_kv(
        "Tubes cleared",
        &format!(
            "{} ({:.1}%)",
            format_number(result.passes),
            result.pass_rate * 100.0
        ),
    );
    print_kv("Crashes", &format_number(result.crashes));
    print_kv("Best streak", &result.best_streak.to_string());
    print_kv("Stored estimates", &format_number(agent.table_size()));

    if let Some(output_path) = &args.output {
        let metadata = TrainingMetadata {
            episodes_trained: Some(result.episodes),
            seed: args.seed,
            saved_at: None,
        };
        let model = agent.export_model(metadata);
        repository
            .save(&model, output_path)
            .with_context(|| format!("failed to save model to {}", output_path.display()))?;
        println!("\nModel saved to: {}", output_path.display());
    }

    if let Some(summary_path) = &args.summary {
        result
            .save(summary_path)
            .with_context(|| format!("failed to write summary to {}", summary_path.display()))?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}
