//! Evaluate command - Play a saved matchbox agent against an opponent without learning

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::OpponentKind,
        output::{print_kv, print_result, print_section},
    },
    menace::SavedMatchboxAgent,
    pipeline::{MetricsObserver, ProgressObserver, Session, TrainingConfig, TrainingPipeline},
    ports::FrozenAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained matchbox agent")]
pub struct EvaluateArgs {
    /// Path to a saved matchbox agent
    pub agent: PathBuf,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Heuristic)]
    pub opponent: OpponentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Randomize which side opens before every game
    #[arg(long, default_value_t = false)]
    pub shuffle_seats: bool,

    /// Exploration rate of the heuristic opponent
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize)]
struct EvaluationExport<'a> {
    agent_file: String,
    agent_name: &'a str,
    opponent: String,
    games_trained: Option<usize>,
    trained_against: &'a [String],
    result: &'a crate::pipeline::TrainingResult,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading trained agent from: {}", args.agent.display());
    let saved = SavedMatchboxAgent::load_from_file(&args.agent)?;
    let agent = saved.to_agent(args.seed)?;

    print_section("Loaded Agent");
    print_kv("Name", &saved.profile.name);
    if let Some(games) = saved.metadata.games_trained {
        print_kv("Games trained", &games.to_string());
    }
    if !saved.metadata.opponents.is_empty() {
        print_kv("Trained against", &saved.metadata.opponents.join(", "));
    }
    print_kv("Resignation policy", &saved.policy.to_string());

    let opponent = args
        .opponent
        .build(args.seed.map(|seed| seed.wrapping_add(1)), args.epsilon)?;

    let config = TrainingConfig {
        episodes: args.games,
        seed: args.seed,
        shuffle_seats: args.shuffle_seats,
    };
    let mut pipeline = TrainingPipeline::new(config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline = pipeline.with_observer(Box::new(MetricsObserver::new()));

    let mut session = Session::new(Box::new(FrozenAgent::new(Box::new(agent))), opponent);
    let result = pipeline.run(&mut session)?;

    print_section(&format!("Evaluation vs {}", args.opponent));
    print_result(&result);

    if let Some(path) = &args.export {
        let export = EvaluationExport {
            agent_file: args.agent.display().to_string(),
            agent_name: &saved.profile.name,
            opponent: args.opponent.to_string(),
            games_trained: saved.metadata.games_trained,
            trained_against: &saved.metadata.opponents,
            result: &result,
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export).context("Failed to write evaluation")?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}
