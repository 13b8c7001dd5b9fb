use std::any::Any;

use menace_engine::{
    Error, Result,
    agents::{HeuristicAgent, RandomAgent},
    menace::{Matchbox, MatchboxAgent, MatchboxAgentBuilder, MatchboxTable},
    monte_carlo::MonteCarloAgent,
    pipeline::{MetricsObserver, Session, TrainingConfig, TrainingPipeline},
    ports::{Agent, AgentProfile, FrozenAgent},
    tictactoe::{GameEngine, GameOutcome, Player, Position},
};

/// Always answers with the same cell, legal or not.
struct Stubborn {
    profile: AgentProfile,
    position: Position,
}

impl Agent for Stubborn {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn select_action(&mut self, _engine: &GameEngine) -> Result<Position> {
        Ok(self.position)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Plays randomly but fails whenever it is told the result.
struct SoreLoser {
    inner: RandomAgent,
}

impl Agent for SoreLoser {
    fn profile(&self) -> &AgentProfile {
        self.inner.profile()
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        self.inner.select_action(engine)
    }

    fn on_episode_end(&mut self, _reward: f64) -> Result<()> {
        Err(Error::InvalidConfiguration {
            message: "refuses to learn".to_string(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn reset_clears_both_agents_buffers() {
    let opening = GameEngine::new();
    let mut menace = MatchboxAgent::new("MENACE", Some(1));
    let mut random = RandomAgent::new("Random", Some(2));
    menace.select_action(&opening).unwrap();
    random.select_action(&opening).unwrap();
    assert_eq!(menace.pending_actions().len(), 1);
    assert_eq!(random.state_buffer().len(), 1);

    let mut session = Session::new(Box::new(menace), Box::new(random));
    session.reset();

    let menace = session
        .agent_a()
        .as_any()
        .downcast_ref::<MatchboxAgent>()
        .unwrap();
    assert!(menace.pending_actions().is_empty());
    assert!(menace.state_buffer().is_empty());
    let random = session
        .agent_b()
        .as_any()
        .downcast_ref::<RandomAgent>()
        .unwrap();
    assert!(random.state_buffer().is_empty());
    assert_eq!(session.engine(), &opening);
}

#[test]
fn learning_error_still_credits_the_other_agent() {
    let mut session = Session::new(
        Box::new(SoreLoser {
            inner: RandomAgent::new("Sore", Some(8)),
        }),
        Box::new(MonteCarloAgent::new("MC", Some(9))),
    );

    assert!(matches!(
        session.run_episode(),
        Err(Error::InvalidConfiguration { .. })
    ));

    let learner = session
        .agent_b()
        .as_any()
        .downcast_ref::<MonteCarloAgent>()
        .unwrap();
    assert!(!learner.values().is_empty());
    assert!(learner.state_buffer().is_empty());
}

#[test]
fn illegal_agent_move_is_reported() {
    let stubborn = Stubborn {
        profile: AgentProfile::new("Stubborn"),
        position: Position::new(1, 1),
    };
    let mut session = Session::new(
        Box::new(stubborn),
        Box::new(HeuristicAgent::new("Heuristic", Some(1))),
    );

    // The heuristic takes a corner after X claims the center; X then repeats itself.
    match session.run_episode() {
        Err(Error::IllegalMove { agent, position }) => {
            assert_eq!(agent, "Stubborn");
            assert_eq!(position, "(1, 1)");
        }
        other => panic!("expected illegal move, got {other:?}"),
    }
}

#[test]
fn resignation_is_scored_as_a_forfeit() {
    // Every reply O could face comes from a box without beads.
    let mut table = MatchboxTable::empty();
    for index in 0..9 {
        let mut probe = GameEngine::new();
        assert!(probe.make_move(Position::from_index(index).unwrap()));
        table.insert(probe.state_string(), Matchbox::default());
    }
    let quitter = MatchboxAgentBuilder::new()
        .name("Quitter")
        .table(table)
        .build()
        .unwrap();
    let mut session = Session::new(
        Box::new(RandomAgent::new("Random", Some(4))),
        Box::new(quitter),
    );

    let report = session.run_episode().unwrap();

    assert_eq!(report.resigned, Some(Player::O));
    assert!(report.was_forfeit());
    assert_eq!(report.outcome, GameOutcome::Win(Player::X));
    assert_eq!(report.rewards, [1.0, 0.0]);
    assert_eq!(report.moves.len(), 1);
}

#[test]
fn rewards_follow_agents_across_seat_swaps() {
    let mut session = Session::new(
        Box::new(HeuristicAgent::new("A", Some(1))),
        Box::new(RandomAgent::new("B", Some(2))),
    );
    session.swap_seats();
    let report = session.run_episode().unwrap();

    assert_eq!(report.agent_a_seat, Player::O);
    assert_eq!(report.moves[0].player, Player::X);
    assert_eq!(report.reward_a(), report.outcome.reward_for(Player::O));
    assert_eq!(report.reward_b(), report.outcome.reward_for(Player::X));
}

#[test]
fn training_is_reproducible_for_a_seed() {
    let run = || {
        let mut session = Session::new(
            Box::new(MatchboxAgent::new("MENACE", None)),
            Box::new(RandomAgent::new("Random", None)),
        );
        let config = TrainingConfig {
            episodes: 40,
            seed: Some(7),
            shuffle_seats: true,
        };
        TrainingPipeline::new(config).run(&mut session).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn heuristic_dominates_random_as_x() {
    let mut session = Session::new(
        Box::new(HeuristicAgent::new("Heuristic", None)),
        Box::new(RandomAgent::new("Random", None)),
    );
    let config = TrainingConfig {
        episodes: 200,
        seed: Some(11),
        shuffle_seats: false,
    };
    let result = TrainingPipeline::new(config)
        .with_observer(Box::new(MetricsObserver::new()))
        .run(&mut session)
        .unwrap();

    assert_eq!(result.total_games, 200);
    assert!(result.wins > result.losses * 10, "{result:?}");
}

#[test]
fn monte_carlo_learns_values_during_training() {
    let mut session = Session::new(
        Box::new(MonteCarloAgent::new("MC", None)),
        Box::new(RandomAgent::new("Random", None)),
    );
    let config = TrainingConfig {
        episodes: 50,
        seed: Some(3),
        shuffle_seats: false,
    };
    TrainingPipeline::new(config).run(&mut session).unwrap();

    let agent = session
        .agent_a()
        .as_any()
        .downcast_ref::<MonteCarloAgent>()
        .expect("agent A is the Monte-Carlo learner");
    let opening = GameEngine::new().state_string();
    assert_eq!(agent.values().visits(&opening), 50);
    let value = agent.state_value(&opening).unwrap();
    assert!((0.0..=1.0).contains(&value));
}

#[test]
fn frozen_agent_does_not_learn() {
    let agent = MatchboxAgent::new("MENACE", Some(5));
    let table_before = agent.table().clone();
    let mut session = Session::new(
        Box::new(FrozenAgent::new(Box::new(agent))),
        Box::new(RandomAgent::new("Random", Some(6))),
    );
    let config = TrainingConfig {
        episodes: 20,
        seed: Some(5),
        shuffle_seats: false,
    };
    TrainingPipeline::new(config).run(&mut session).unwrap();

    let (frozen, _) = session.into_agents();
    let agent = frozen
        .as_any()
        .downcast_ref::<MatchboxAgent>()
        .expect("frozen wrapper exposes the inner agent");
    assert_eq!(agent.table(), &table_before);
}
