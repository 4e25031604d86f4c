use crate::board::{Board, GameOutcome};

/// Represents a single node in the Monte Carlo search tree.
///
/// A node stores only the move that led to it, never a board: the engine rebuilds the
/// state of a node by replaying moves from the root while it descends.
#[derive(Debug, Clone)]
pub struct MctsNode<T: Board> {
    /// The depth of the node in the tree.
    pub height: u32,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<T::Move>,
    /// The player who made `prev_move`. `None` for the root node.
    pub prev_player: Option<T::Player>,
    /// The player whose turn it is in this node's game state.
    pub current_player: T::Player,
    /// The outcome of the game at this node.
    pub outcome: GameOutcome<T::Player>,
    /// The number of completed simulations that passed through this node.
    pub visits: u32,
    /// Accumulated reward, from the point of view of `credited_player()`.
    pub score: f64,
    /// Legal moves of this node's state that have no child yet.
    pub untried_moves: Vec<T::Move>,
}

impl<T: Board> MctsNode<T> {
    /// Creates the root node for `board`.
    pub fn root(board: &T) -> Self {
        Self::from_board(0, None, None, board)
    }

    /// Creates the node reached by `prev_player` playing `prev_move`, with `board` already
    /// advanced past that move.
    pub fn child(height: u32, prev_move: T::Move, prev_player: T::Player, board: &T) -> Self {
        Self::from_board(height, Some(prev_move), Some(prev_player), board)
    }

    fn from_board(
        height: u32,
        prev_move: Option<T::Move>,
        prev_player: Option<T::Player>,
        board: &T,
    ) -> Self {
        let outcome = board.get_outcome();
        let untried_moves = if outcome.is_terminal() {
            Vec::new()
        } else {
            board.get_available_moves()
        };
        MctsNode {
            height,
            prev_move,
            prev_player,
            current_player: board.get_current_player(),
            outcome,
            visits: 0,
            score: 0.0,
            untried_moves,
        }
    }

    /// The player whose interests `score` measures: the one who moved into this node, or the
    /// player to move for the root.
    pub fn credited_player(&self) -> T::Player {
        self.prev_player.unwrap_or(self.current_player)
    }

    /// Average reward per visit.
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / f64::from(self.visits)
        }
    }

    /// Returns `true` once every legal move has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }
}
