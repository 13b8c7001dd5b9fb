//! Train command - Train a matchbox or Monte-Carlo learner

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::{LearnerKind, OpponentKind},
        output::{print_kv, print_result, print_section, print_table_stats},
    },
    menace::{
        MatchboxAgent, MatchboxAgentBuilder, ReinforcementValues, ResignationPolicy,
        SavedMatchboxAgent, TableStats, TrainingMetadata,
    },
    monte_carlo::MonteCarloAgent,
    pipeline::{
        MetricsObserver, ProgressObserver, Session, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    ports::Agent,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train a learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Type of learner to train
    #[arg(value_enum)]
    pub learner: LearnerKind,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Output file for the trained agent (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Randomize which side opens before every game
    #[arg(long, default_value_t = false)]
    pub shuffle_seats: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Print learned-table statistics after training
    #[arg(long = "stats", default_value_t = false)]
    pub show_stats: bool,

    /// Reward schedule for matchbox learners (win,draw,loss)
    #[arg(long, default_value = "3,1,-1")]
    pub reward: String,

    /// What a matchbox learner does with an empty box (resign or uniform-fallback)
    #[arg(long, default_value_t = ResignationPolicy::Resign)]
    pub resignation: ResignationPolicy,

    /// Keep at least one bead per move in every reinforced matchbox
    #[arg(long, default_value_t = false)]
    pub infinite_exploration: bool,

    /// Exploration rate of the heuristic opponent
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    learner: String,
    opponent: String,
    training: TrainingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<TableStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values_learned: Option<usize>,
    seed: Option<u64>,
    shuffle_seats: bool,
}

/// Parse a "win,draw,loss" reward schedule.
pub(crate) fn parse_reward(value: &str) -> Result<ReinforcementValues> {
    let parts: Vec<i16> = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i16>()
                .map_err(|_| anyhow!("Invalid reward component '{}' in '{value}'", part.trim()))
        })
        .collect::<Result<_>>()?;

    match parts.as_slice() {
        [win, draw, loss] => Ok(ReinforcementValues {
            win: *win,
            draw: *draw,
            loss: *loss,
        }),
        _ => bail!("Reward schedule '{value}' must have three values: win,draw,loss"),
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let learner: Box<dyn Agent> = match args.learner {
        LearnerKind::Matchbox => {
            let mut builder = MatchboxAgentBuilder::new()
                .reinforcement(parse_reward(&args.reward)?)
                .resignation_policy(args.resignation)
                .infinite_exploration(args.infinite_exploration);
            if let Some(seed) = args.seed {
                builder = builder.seed(seed);
            }
            Box::new(builder.build()?)
        }
        LearnerKind::MonteCarlo => Box::new(MonteCarloAgent::new("Monte-Carlo", args.seed)),
    };
    let opponent = args
        .opponent
        .build(args.seed.map(|seed| seed.wrapping_add(1)), args.epsilon)?;

    print_section(&format!("Training {} vs {}", args.learner, args.opponent));
    print_kv("Games", &args.games.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

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

    let mut session = Session::new(learner, opponent);
    let result = pipeline.run(&mut session)?;

    print_section("Training Results");
    print_result(&result);

    let (learner, _) = session.into_agents();
    let mut summary = TrainingSummaryFile {
        learner: args.learner.to_string(),
        opponent: args.opponent.to_string(),
        training: result.clone(),
        table: None,
        values_learned: None,
        seed: args.seed,
        shuffle_seats: args.shuffle_seats,
    };

    if let Some(agent) = learner.as_any().downcast_ref::<MatchboxAgent>() {
        let stats = agent.table().stats();
        if args.show_stats {
            print_section("Matchbox Table");
            print_table_stats(&stats);
        }
        summary.table = Some(stats);

        if let Some(path) = &args.output {
            let metadata = TrainingMetadata {
                games_trained: Some(agent.games_trained()),
                opponents: vec![args.opponent.to_string()],
                seed: args.seed,
                agent_player: (!args.shuffle_seats).then_some(Player::X),
            };
            SavedMatchboxAgent::from_agent(agent, metadata).save_to_file(path)?;
            println!("\nSaved trained agent to {}", path.display());
        }
    } else if let Some(agent) = learner.as_any().downcast_ref::<MonteCarloAgent>() {
        summary.values_learned = Some(agent.values().len());
        if args.show_stats {
            print_kv("States valued", &agent.values().len().to_string());
        }
        if let Some(path) = &args.output {
            agent.save_values(path)?;
            println!("\nSaved value table to {}", path.display());
        }
    }

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
        to_writer_pretty(file, &summary).context("Failed to write training summary")?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
