//! Play command - Interactive game against a built-in or saved agent

use std::{
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    agents::HumanAgent,
    cli::{config::OpponentKind, output::print_section},
    menace::SavedMatchboxAgent,
    pipeline::Session,
    ports::Agent,
    tictactoe::GameOutcome,
};

#[derive(Parser, Debug)]
#[command(about = "Play a game from the terminal")]
pub struct PlayArgs {
    /// Saved matchbox agent to play against (overrides --opponent)
    #[arg(long)]
    pub agent: Option<PathBuf>,

    /// Built-in opponent
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Heuristic)]
    pub opponent: OpponentKind,

    /// Take the first move as X
    #[arg(long, default_value_t = false)]
    pub human_first: bool,

    /// Name shown for the human player
    #[arg(long, default_value = "Human")]
    pub name: String,

    /// Random seed for the computer player
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let computer: Box<dyn Agent> = match &args.agent {
        Some(path) => Box::new(SavedMatchboxAgent::load_from_file(path)?.to_agent(args.seed)?),
        None => args.opponent.build(args.seed, 0.0)?,
    };
    let human = HumanAgent::new(args.name.clone(), BufReader::new(io::stdin()), io::stdout());

    let mut session = Session::new(Box::new(human), computer);
    if !args.human_first {
        session.swap_seats();
    }

    print_section(&format!(
        "{} ({}) vs {} ({})",
        session.agent_a().profile(),
        session.agent_a_seat().symbol(),
        session.agent_b().profile(),
        session.agent_a_seat().opponent().symbol()
    ));

    let report = session.run_episode()?;

    println!("\n{}", session.engine().render_grid());
    match report.outcome {
        GameOutcome::Win(seat) => {
            let winner = session.agent_at(seat).name().to_string();
            if report.was_forfeit() {
                println!("{winner} wins by forfeit.");
            } else {
                println!("{winner} wins!");
            }
        }
        GameOutcome::Draw => println!("It's a draw."),
    }

    Ok(())
}
