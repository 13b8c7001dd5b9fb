use menace_engine::{
    Error,
    tictactoe::{BoardState, Cell, GameEngine, Player, Position, STATE_SPACE},
};
use proptest::prelude::*;
use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

#[test]
fn every_state_integer_round_trips() {
    for value in 0..STATE_SPACE {
        let board = BoardState::from_state_int(value).expect("value is in range");
        assert_eq!(board.to_state_int(), value);

        let reparsed = BoardState::from_state_string(&board.to_state_string())
            .expect("encoded string must parse");
        assert_eq!(reparsed, board, "string round trip failed for {value}");
    }
}

#[test]
fn integers_past_the_state_space_are_rejected() {
    for value in [STATE_SPACE, STATE_SPACE + 1, u32::MAX] {
        assert!(matches!(
            BoardState::from_state_int(value),
            Err(Error::StateOutOfRange { .. })
        ));
    }
}

#[test]
fn reference_board_encodings() {
    let board = BoardState::from_state_string("X--\n-O-\n--X").unwrap();
    assert_eq!(board.get(Position::new(0, 0)), Some(Cell::X));
    assert_eq!(board.get(Position::new(1, 1)), Some(Cell::O));
    assert_eq!(board.get(Position::new(2, 2)), Some(Cell::X));
    assert_eq!(board.to_move, Player::O);

    let expected = u32::from_str_radix("100020001", 3).unwrap();
    assert_eq!(board.to_state_int(), expected);
    assert_eq!(BoardState::from_state_int(expected).unwrap(), board);
    assert_eq!(board.to_state_string(), "X--\n-O-\n--X");
}

#[test]
fn malformed_state_strings_are_parse_errors() {
    assert!(matches!(
        BoardState::from_state_string("X--\n-O-"),
        Err(Error::InvalidBoardShape { .. })
    ));
    assert!(matches!(
        BoardState::from_state_string("X--\n-O-\n--XX"),
        Err(Error::InvalidBoardShape { .. })
    ));
    assert!(matches!(
        BoardState::from_state_string("X--\n-Q-\n--X"),
        Err(Error::InvalidCellCharacter { character: 'Q', row: 1, column: 1 })
    ));
}

#[test]
fn unreachable_boards_still_decode() {
    // Nine O marks can never arise in play but is a valid encoding.
    let board = BoardState::from_state_int(STATE_SPACE - 1).unwrap();
    assert_eq!(board.to_state_string(), "OOO\nOOO\nOOO");
    assert_eq!(board.to_move, Player::X);
    assert!(board.legal_moves().is_empty());
}

fn play_random_game(seed: u64, max_moves: usize) -> Vec<BoardState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = GameEngine::new();
    let mut boards = vec![*engine.board()];
    while !engine.is_finished() && boards.len() <= max_moves {
        let moves = engine.legal_moves();
        let position = *moves.choose(&mut rng).expect("unfinished game has moves");
        assert!(engine.make_move(position));
        boards.push(*engine.board());
    }
    boards
}

proptest! {
    #[test]
    fn state_int_round_trip(value in 0u32..STATE_SPACE) {
        let board = BoardState::from_state_int(value).unwrap();
        prop_assert_eq!(board.to_state_int(), value);
    }

    #[test]
    fn reachable_boards_round_trip_through_strings(seed in any::<u64>(), max_moves in 0usize..9) {
        for board in play_random_game(seed, max_moves) {
            let parsed = BoardState::from_state_string(&board.to_state_string()).unwrap();
            prop_assert_eq!(parsed, board);
            prop_assert_eq!(parsed.to_move, board.to_move);
        }
    }

    #[test]
    fn mark_counts_stay_balanced(seed in any::<u64>()) {
        for board in play_random_game(seed, 9) {
            let diff = board.count(Player::X) as i64 - board.count(Player::O) as i64;
            prop_assert!(diff == 0 || diff == 1, "difference was {}", diff);
        }
    }
}
