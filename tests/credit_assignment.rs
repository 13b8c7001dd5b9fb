use menace_engine::{
    Error,
    menace::{Matchbox, MatchboxAgent, MatchboxAgentBuilder, MatchboxTable, ResignationPolicy},
    monte_carlo::MonteCarloAgent,
    ports::Agent,
    tictactoe::{BoardState, GameEngine, Position},
};

fn engine_at(state: &str) -> GameEngine {
    GameEngine::from_board(BoardState::from_state_string(state).expect("valid board"))
}

/// Table holding a single box for `state` with the given weights.
fn single_box_table(state: &str, beads: &[(Position, u32)]) -> MatchboxTable {
    let mut matchbox = Matchbox::new(beads.iter().map(|(pos, _)| *pos), 0);
    for (pos, count) in beads {
        matchbox.reinforce(*pos, *count as i16);
    }
    let mut table = MatchboxTable::empty();
    table.insert(state, matchbox);
    table
}

#[test]
fn monte_carlo_value_converges_to_one_after_repeated_wins() {
    let engine = engine_at("X--\n-O-\n---");
    let state = engine.state_string();
    let mut agent = MonteCarloAgent::new("MC", Some(2024));

    for _ in 0..25 {
        agent.reset_for_new_episode(&engine);
        agent.select_action(&engine).unwrap();
        agent.on_episode_end(1.0).unwrap();
    }

    assert_eq!(agent.state_value(&state), Some(1.0));
    assert_eq!(agent.values().visits(&state), 25);
}

#[test]
fn monte_carlo_credits_every_state_of_the_episode() {
    let mut agent = MonteCarloAgent::new("MC", Some(8));
    let first = GameEngine::new();
    let second = engine_at("XO-\n---\n---");

    agent.select_action(&first).unwrap();
    agent.select_action(&second).unwrap();
    agent.on_episode_end(0.5).unwrap();

    assert_eq!(agent.state_value(&first.state_string()), Some(0.5));
    assert_eq!(agent.state_value(&second.state_string()), Some(0.5));
    assert_eq!(agent.values().len(), 2);
}

#[test]
fn loss_removes_one_bead_from_each_visited_pair() {
    let mut agent = MatchboxAgent::new("MENACE", Some(17));
    let engines = [GameEngine::new(), engine_at("XO-\n---\n---")];

    let mut visited = Vec::new();
    for engine in &engines {
        let state = engine.state_string();
        let before = agent.matchbox(&state).unwrap().clone();
        let chosen = agent.select_action(engine).unwrap();
        visited.push((state, chosen, before));
    }
    agent.on_episode_end(0.0).unwrap();

    for (state, chosen, before) in visited {
        let after = agent.matchbox(&state).unwrap();
        assert_eq!(after.weight(chosen), before.weight(chosen) - 1);
        for (pos, count) in before.beads().filter(|(pos, _)| *pos != chosen) {
            assert_eq!(after.weight(pos), count, "untouched move {pos} changed");
        }
    }
}

#[test]
fn draw_adds_one_bead() {
    let mut agent = MatchboxAgent::new("MENACE", Some(5));
    let engine = GameEngine::new();
    let chosen = agent.select_action(&engine).unwrap();
    agent.on_episode_end(0.5).unwrap();
    assert_eq!(agent.weight(&engine.state_string(), chosen), Some(5));
}

#[test]
fn bead_counts_never_go_negative() {
    let state = "XO-\n---\n---";
    let engine = engine_at(state);
    let table = single_box_table(state, &[(Position::new(0, 2), 1)]);
    let mut agent = MatchboxAgentBuilder::new()
        .seed(3)
        .table(table)
        .build()
        .unwrap();

    assert_eq!(agent.select_action(&engine).unwrap(), Position::new(0, 2));
    agent.on_episode_end(0.0).unwrap();
    assert_eq!(agent.weight(state, Position::new(0, 2)), Some(0));

    // The box is now empty; with the default policy the agent resigns and
    // nothing further is recorded, so the weight stays at zero.
    assert!(agent.select_action(&engine).is_err());
    agent.on_episode_end(0.0).unwrap();
    assert_eq!(agent.weight(state, Position::new(0, 2)), Some(0));
}

#[test]
fn empty_matchbox_resigns_under_strict_policy() {
    let state = "XO-\n---\n---";
    let engine = engine_at(state);
    let table = single_box_table(state, &[]);
    let mut agent = MatchboxAgentBuilder::new()
        .name("Quitter")
        .table(table)
        .build()
        .unwrap();

    match agent.select_action(&engine) {
        Err(Error::PlayerResigned { agent, state: resigned_at }) => {
            assert_eq!(agent, "Quitter");
            assert_eq!(resigned_at, state);
        }
        other => panic!("expected resignation, got {other:?}"),
    }
    assert!(agent.pending_actions().is_empty());
}

#[test]
fn empty_matchbox_falls_back_to_legal_moves_under_permissive_policy() {
    let state = "XO-\n---\n---";
    let engine = engine_at(state);
    let mut agent = MatchboxAgentBuilder::new()
        .seed(99)
        .resignation_policy(ResignationPolicy::UniformFallback)
        .table(single_box_table(state, &[]))
        .build()
        .unwrap();

    for _ in 0..50 {
        let chosen = agent.select_action(&engine).unwrap();
        assert!(engine.is_legal(chosen));
    }
}

#[test]
fn sampling_ignores_beads_on_occupied_cells() {
    // A stale box may still carry beads for cells that are now taken.
    let state = "XO-\n---\n---";
    let engine = engine_at(state);
    let table = single_box_table(
        state,
        &[(Position::new(0, 0), 50), (Position::new(2, 2), 1)],
    );
    let mut agent = MatchboxAgentBuilder::new()
        .seed(11)
        .table(table)
        .build()
        .unwrap();

    for _ in 0..30 {
        assert_eq!(agent.select_action(&engine).unwrap(), Position::new(2, 2));
    }
}

#[test]
fn infinite_exploration_keeps_every_move_available() {
    let state = "XO-\n---\n---";
    let engine = engine_at(state);
    let table = single_box_table(
        state,
        &[(Position::new(0, 2), 1), (Position::new(1, 1), 0)],
    );
    let mut agent = MatchboxAgentBuilder::new()
        .seed(1)
        .infinite_exploration(true)
        .table(table)
        .build()
        .unwrap();

    assert_eq!(agent.select_action(&engine).unwrap(), Position::new(0, 2));
    agent.on_episode_end(0.0).unwrap();

    let matchbox = agent.matchbox(state).unwrap();
    assert_eq!(matchbox.weight(Position::new(0, 2)), 1);
    assert_eq!(matchbox.weight(Position::new(1, 1)), 1);
}

#[test]
fn infinite_exploration_refills_legal_moves_missing_from_the_box() {
    let state = "XO-\n---\n---";
    let engine = engine_at(state);
    let table = single_box_table(
        state,
        &[(Position::new(0, 2), 1), (Position::new(1, 1), 0)],
    );
    let mut agent = MatchboxAgentBuilder::new()
        .seed(2)
        .infinite_exploration(true)
        .table(table)
        .build()
        .unwrap();

    agent.select_action(&engine).unwrap();
    agent.on_episode_end(0.0).unwrap();

    let matchbox = agent.matchbox(state).unwrap();
    let starved: Vec<Position> = engine
        .legal_moves()
        .into_iter()
        .filter(|&pos| matchbox.weight(pos) == 0)
        .collect();
    assert!(starved.is_empty(), "legal moves left without beads: {starved:?}");
    assert_eq!(matchbox.move_count(), 7);
}

#[test]
fn forced_reply_is_never_reinforced() {
    let state = "XOX\nXOO\nOX-";
    let engine = engine_at(state);
    let mut agent = MatchboxAgent::new("MENACE", Some(0));
    let stats_before = agent.table().stats();

    assert_eq!(agent.select_action(&engine).unwrap(), Position::new(2, 2));
    agent.on_episode_end(1.0).unwrap();

    assert_eq!(agent.table().stats(), stats_before);
}
