//! End-to-end games and positions on the bundled tic-tac-toe board.

use mcts_search::boards::tic_tac_toe::{TTTPlayer, TicTacToeBoard};
use mcts_search::mcts::{search, search_with_config, DEFAULT_EXPLORATION_CONSTANT};
use mcts_search::random::{seeded_generator, RandomGenerator};
use mcts_search::{Board, Budget, ExpansionOrder, GameOutcome, SearchConfig};

#[test]
fn empty_board_returns_a_cell() {
    let board = TicTacToeBoard::default();
    let best = search(
        board.clone(),
        TTTPlayer::X,
        Budget::Iterations(5000),
        DEFAULT_EXPLORATION_CONSTANT,
        Some(2024),
    )
    .unwrap();

    assert!(board.get_available_moves().contains(&best));
    assert_eq!(board.get_available_moves().len(), 9);
}

#[test]
fn takes_the_immediate_win() {
    let board = TicTacToeBoard::from_cells("XX- --- ---", TTTPlayer::X).unwrap();
    for seed in 0..20 {
        let best = search(
            board.clone(),
            TTTPlayer::X,
            Budget::Iterations(2000),
            DEFAULT_EXPLORATION_CONSTANT,
            Some(seed),
        )
        .unwrap();
        assert_eq!(best, (0, 2), "seed {seed}");
    }
}

#[test]
fn takes_the_immediate_win_wherever_it_is() {
    let board = TicTacToeBoard::from_cells("--- --- -XX", TTTPlayer::X).unwrap();
    for seed in 0..20 {
        let best = search(
            board.clone(),
            TTTPlayer::X,
            Budget::Iterations(2000),
            DEFAULT_EXPLORATION_CONSTANT,
            Some(seed),
        )
        .unwrap();
        assert_eq!(best, (2, 0), "seed {seed}");
    }
}

#[test]
fn takes_the_immediate_win_with_random_expansion() {
    let config = SearchConfig {
        expansion_order: ExpansionOrder::Random,
        ..Default::default()
    };
    for (cells, win) in [("XX- --- ---", (0, 2)), ("--- --- -XX", (2, 0))] {
        let board = TicTacToeBoard::from_cells(cells, TTTPlayer::X).unwrap();
        for seed in 0..20 {
            let best = search_with_config(
                board.clone(),
                TTTPlayer::X,
                Budget::Iterations(2000),
                &config,
                Some(seed),
            )
            .unwrap();
            assert_eq!(best, win, "{cells} seed {seed}");
        }
    }
}

#[test]
fn blocks_the_opponent() {
    let board = TicTacToeBoard::from_cells("OO- --- ---", TTTPlayer::X).unwrap();
    let blocked = (0..20)
        .filter(|&seed| {
            search(
                board.clone(),
                TTTPlayer::X,
                Budget::Iterations(3000),
                DEFAULT_EXPLORATION_CONSTANT,
                Some(seed),
            )
            .unwrap()
                == (0, 2)
        })
        .count();

    assert!(blocked >= 19, "blocked in only {blocked} of 20 searches");
}

#[test]
fn repeated_search_with_same_seed_is_identical() {
    let board = TicTacToeBoard::from_cells("X-- --- --O", TTTPlayer::X).unwrap();
    let moves: Vec<(u8, u8)> = (0..3)
        .map(|_| {
            search(
                board.clone(),
                TTTPlayer::X,
                Budget::Iterations(1500),
                DEFAULT_EXPLORATION_CONSTANT,
                Some(77),
            )
            .unwrap()
        })
        .collect();

    assert!(moves.windows(2).all(|w| w[0] == w[1]));
}

/// The engine plays O against a uniformly random X through the one-shot `search` with its
/// default settings. Perfect play never loses to a random opponent, so losses must stay rare.
#[test]
fn rarely_loses_to_a_random_opponent() {
    const GAMES: u64 = 200;
    let mut opponent = seeded_generator(Some(12345));
    let mut losses = 0;

    for game in 0..GAMES {
        let mut board = TicTacToeBoard::default();
        let mut ply = 0u64;
        while !board.is_terminal() {
            let b_move = match board.get_current_player() {
                TTTPlayer::X => {
                    let moves = board.get_available_moves();
                    *opponent.choose(&moves).unwrap()
                }
                TTTPlayer::O => search(
                    board.clone(),
                    TTTPlayer::O,
                    Budget::Iterations(3000),
                    DEFAULT_EXPLORATION_CONSTANT,
                    Some(game * 16 + ply),
                )
                .unwrap(),
            };
            board.perform_move(&b_move).unwrap();
            ply += 1;
        }

        if board.get_outcome() == GameOutcome::Win(TTTPlayer::X) {
            losses += 1;
        }
    }

    assert!(
        losses * 20 < GAMES,
        "lost {losses} of {GAMES} games to a random opponent"
    );
}
