//! Session driver: seats two agents at one engine and plays episodes

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{GameEngine, GameOutcome, Move, Player},
};

/// Everything that happened in one episode.
///
/// `rewards` is indexed by agent (A first), not by seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub outcome: GameOutcome,
    pub moves: Vec<Move>,
    pub agent_a_seat: Player,
    pub rewards: [f64; 2],
    /// Seat that resigned from an empty matchbox, if any.
    pub resigned: Option<Player>,
}

impl EpisodeReport {
    pub fn reward_a(&self) -> f64 {
        self.rewards[0]
    }

    pub fn reward_b(&self) -> f64 {
        self.rewards[1]
    }

    /// True if the game ended by forfeit rather than on the board.
    pub fn was_forfeit(&self) -> bool {
        self.resigned.is_some()
    }
}

/// A game engine plus the two agents playing on it.
///
/// The engine only holds board state, so the session can lend it to one agent
/// while mutating the other.
pub struct Session {
    engine: GameEngine,
    agents: [Box<dyn Agent>; 2],
    agent_a_seat: Player,
}

impl Session {
    /// Seat `agent_a` as X and `agent_b` as O.
    pub fn new(agent_a: Box<dyn Agent>, agent_b: Box<dyn Agent>) -> Self {
        Self {
            engine: GameEngine::new(),
            agents: [agent_a, agent_b],
            agent_a_seat: Player::X,
        }
    }

    /// Seat the two agents in random order.
    pub fn shuffled<R: Rng>(
        agent_a: Box<dyn Agent>,
        agent_b: Box<dyn Agent>,
        rng: &mut R,
    ) -> Self {
        let mut session = Self::new(agent_a, agent_b);
        if rng.random::<bool>() {
            session.swap_seats();
        }
        session
    }

    /// Exchange colours between the agents for the next episode.
    pub fn swap_seats(&mut self) {
        self.agent_a_seat = self.agent_a_seat.opponent();
    }

    pub fn agent_a_seat(&self) -> Player {
        self.agent_a_seat
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn agent_a(&self) -> &dyn Agent {
        self.agents[0].as_ref()
    }

    pub fn agent_b(&self) -> &dyn Agent {
        self.agents[1].as_ref()
    }

    pub fn agent_a_mut(&mut self) -> &mut dyn Agent {
        self.agents[0].as_mut()
    }

    pub fn agent_b_mut(&mut self) -> &mut dyn Agent {
        self.agents[1].as_mut()
    }

    /// Agent currently holding `seat`.
    pub fn agent_at(&self, seat: Player) -> &dyn Agent {
        self.agents[self.index_of(seat)].as_ref()
    }

    pub fn into_agents(self) -> (Box<dyn Agent>, Box<dyn Agent>) {
        let [agent_a, agent_b] = self.agents;
        (agent_a, agent_b)
    }

    fn index_of(&self, seat: Player) -> usize {
        if seat == self.agent_a_seat { 0 } else { 1 }
    }

    /// Clear the board and tell both agents a new episode is starting.
    pub fn reset(&mut self) {
        self.engine.reset();
        for agent in &mut self.agents {
            agent.reset_for_new_episode(&self.engine);
        }
    }

    /// Play one game from the opening position and hand out rewards.
    ///
    /// A resigning agent forfeits: it is credited with a loss and its opponent
    /// with a win.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if an agent proposes a move the engine
    /// rejects, and propagates any other agent error. Both agents are credited
    /// before the first learning error is returned.
    pub fn run_episode(&mut self) -> Result<EpisodeReport> {
        self.reset();
        debug!(
            x = %self.agent_at(Player::X).name(),
            o = %self.agent_at(Player::O).name(),
            "episode start"
        );

        let mut resigned = None;
        let outcome = loop {
            if let Some(outcome) = self.engine.outcome() {
                break outcome;
            }

            let mover = self.engine.current_player();
            let index = self.index_of(mover);
            match self.agents[index].select_action(&self.engine) {
                Ok(position) => {
                    if !self.engine.make_move(position) {
                        return Err(Error::IllegalMove {
                            agent: self.agents[index].name().to_string(),
                            position: position.to_string(),
                        });
                    }
                }
                Err(Error::PlayerResigned { agent, state }) => {
                    warn!(agent = %agent, state = %state, "agent resigned, forfeiting game");
                    resigned = Some(mover);
                    break GameOutcome::Win(mover.opponent());
                }
                Err(err) => return Err(err),
            }
        };

        let rewards = [
            outcome.reward_for(self.agent_a_seat),
            outcome.reward_for(self.agent_a_seat.opponent()),
        ];
        let mut first_error = None;
        for (agent, reward) in self.agents.iter_mut().zip(rewards) {
            if let Err(err) = agent.on_episode_end(reward) {
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        debug!(?outcome, moves = self.engine.history().len(), "episode end");
        Ok(EpisodeReport {
            outcome,
            moves: self.engine.history().to_vec(),
            agent_a_seat: self.agent_a_seat,
            rewards,
            resigned,
        })
    }
}
