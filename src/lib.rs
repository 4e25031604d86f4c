//! Monte Carlo tree search with UCB1 selection and random rollouts.
//!
//! This library provides a generic implementation of the Monte Carlo Tree Search (MCTS) algorithm
//! for two-player, zero-sum, perfect-information games. Any game implementing the `Board` trait
//! can be searched; a tic-tac-toe board ships with the crate.
//!
//! Each iteration descends the tree with UCB1, expands one untried move, plays a random game to
//! the end and credits the result to every node on the path, from the point of view of the
//! player who made the move into that node. The recommended move is the root child with the
//! most visits.
//!
//! # Example
//!
//! ```rust
//! use mcts_search::boards::tic_tac_toe::{TTTPlayer, TicTacToeBoard};
//! use mcts_search::config::Budget;
//! use mcts_search::mcts::{MonteCarloTreeSearch, DEFAULT_EXPLORATION_CONSTANT};
//!
//! // X to move, with an immediate win on the top row
//! let board = TicTacToeBoard::from_cells("XX- OO- ---", TTTPlayer::X).unwrap();
//!
//! // Create and configure a new MCTS search instance using the builder
//! let mut mcts = MonteCarloTreeSearch::builder(board)
//!     .with_exploration_constant(DEFAULT_EXPLORATION_CONSTANT)
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//!
//! // Run the search for a number of iterations
//! mcts.run(Budget::Iterations(1000)).unwrap();
//!
//! // Get the most visited move
//! let best_move = mcts.get_best_move().unwrap();
//! assert_eq!(best_move, (0, 2));
//! ```
//!
//! For a one-shot call use [`mcts::search`].

/// Contains the `Board` trait and the `GameOutcome` enum that define the interface for a game.
pub mod board;
/// Contains pre-made implementations of the `Board` trait for common games.
pub mod boards;
/// Search budgets and tunable parameters.
pub mod config;
/// The crate error type and `Result` alias.
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Root-parallel search over independent trees.
pub mod parallel;
/// UCB1, the per-node reward and the robust-child rule.
pub mod policy;
/// Contains the `RandomGenerator` trait and the default seeded generator.
pub mod random;

pub use board::{Board, GameOutcome};
pub use config::{Budget, ExpansionOrder, SearchConfig};
pub use error::{MctsError, Result};
pub use mcts::{search, search_with_config, MonteCarloTreeSearch};
