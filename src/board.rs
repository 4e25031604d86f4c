use crate::error::Result;
use std::fmt::Debug;

/// The central trait of the library, defining the interface for a game state.
///
/// To use the MCTS algorithm with a custom game, this trait must be implemented.
/// The engine never keeps a board inside the tree: it clones the root board once per
/// iteration and replays moves on that copy, so `Clone` should be cheap.
pub trait Board: Clone + Debug {
    /// The type representing a move in the game. This could be a simple `u8` for a board position
    /// or a more complex struct for games with intricate actions.
    type Move: Clone + PartialEq + Debug;

    /// The type identifying a player.
    type Player: Copy + PartialEq + Debug;

    /// Returns the player whose turn it is to make a move.
    fn get_current_player(&self) -> Self::Player;

    /// Returns the current outcome of the game.
    fn get_outcome(&self) -> GameOutcome<Self::Player>;

    /// Returns a list of all legal moves available from the current state.
    ///
    /// The order of this list is the order in which `ExpansionOrder::InOrder` expands moves.
    fn get_available_moves(&self) -> Vec<Self::Move>;

    /// Applies a given move to the board, modifying its state.
    ///
    /// Fails with `MctsError::IllegalMove` if `b_move` is not one of `get_available_moves()`.
    fn perform_move(&mut self, b_move: &Self::Move) -> Result<()>;

    /// Returns a new board with `b_move` applied, leaving `self` untouched.
    fn apply(&self, b_move: &Self::Move) -> Result<Self> {
        let mut next = self.clone();
        next.perform_move(b_move)?;
        Ok(next)
    }

    /// Returns `true` once the game is over.
    fn is_terminal(&self) -> bool {
        self.get_outcome().is_terminal()
    }
}

/// Represents the possible outcomes of a game.
///
/// Outcomes name the player they refer to instead of carrying a sign, so every node on a
/// backpropagation path can decide for itself whether the result was good for it.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum GameOutcome<P> {
    /// The game is still ongoing.
    InProgress,
    /// The given player has won.
    Win(P),
    /// The given player has lost.
    Loss(P),
    /// The game has ended in a draw.
    Draw,
}

impl<P: Copy + PartialEq> GameOutcome<P> {
    /// Returns `true` for every outcome except `InProgress`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns `true` if the outcome is a win for `player`.
    ///
    /// In a two-player game a loss for the opponent is a win for `player`.
    pub fn is_win_for(&self, player: P) -> bool {
        match *self {
            GameOutcome::Win(winner) => winner == player,
            GameOutcome::Loss(loser) => loser != player,
            GameOutcome::InProgress | GameOutcome::Draw => false,
        }
    }

    /// The winning player, if the outcome names one directly.
    pub fn winner(&self) -> Option<P> {
        match *self {
            GameOutcome::Win(winner) => Some(winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::GameOutcome;

    #[test]
    fn win_and_loss_are_read_per_player() {
        let win: GameOutcome<u8> = GameOutcome::Win(1);
        assert!(win.is_win_for(1));
        assert!(!win.is_win_for(2));
        assert_eq!(win.winner(), Some(1));

        let loss: GameOutcome<u8> = GameOutcome::Loss(1);
        assert!(!loss.is_win_for(1));
        assert!(loss.is_win_for(2));
        assert_eq!(loss.winner(), None);
    }

    #[test]
    fn draw_and_in_progress_reward_nobody() {
        let draw: GameOutcome<u8> = GameOutcome::Draw;
        assert!(draw.is_terminal());
        assert!(!draw.is_win_for(1));
        assert!(!draw.is_win_for(2));

        let ongoing: GameOutcome<u8> = GameOutcome::InProgress;
        assert!(!ongoing.is_terminal());
        assert!(!ongoing.is_win_for(1));
    }
}
