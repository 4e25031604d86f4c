use crate::board::{Board, GameOutcome};
use crate::error::{MctsError, Result};
use std::fmt;

/// The eight winning lines, as cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A tic-tac-toe mark, which doubles as the player identity.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum TTTPlayer {
    X,
    O,
}

impl TTTPlayer {
    pub fn opponent(self) -> Self {
        match self {
            TTTPlayer::X => TTTPlayer::O,
            TTTPlayer::O => TTTPlayer::X,
        }
    }
}

impl fmt::Display for TTTPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TTTPlayer::X => write!(f, "X"),
            TTTPlayer::O => write!(f, "O"),
        }
    }
}

/// An implementation of the `Board` trait for the game of Tic-Tac-Toe.
///
/// The board is represented by a 9-element array in row-major order.
/// A move is a `(row, col)` pair, both in `0..3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeBoard {
    current_player: TTTPlayer,
    field: [Option<TTTPlayer>; 9],
    outcome: GameOutcome<TTTPlayer>,
}

impl TicTacToeBoard {
    /// Creates an empty board with `first_player` to move.
    pub fn new(first_player: TTTPlayer) -> Self {
        Self {
            current_player: first_player,
            field: [None; 9],
            outcome: GameOutcome::InProgress,
        }
    }

    /// Parses nine cells written as `X`, `O` or `-`, row by row. Whitespace and `/` are
    /// ignored, so `"XX- --- ---"` and `"XX-/---/---"` describe the same board.
    ///
    /// The player to move is given explicitly; the mark counts are not checked, which
    /// allows positions such as `"OO- --- ---"` with X to move.
    pub fn from_cells(cells: &str, to_move: TTTPlayer) -> Result<Self> {
        let mut field = [None; 9];
        let mut count = 0;
        for ch in cells.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            if count == field.len() {
                return Err(MctsError::InvalidBoard(format!(
                    "more than 9 cells in {cells:?}"
                )));
            }
            field[count] = match ch {
                'X' | 'x' => Some(TTTPlayer::X),
                'O' | 'o' => Some(TTTPlayer::O),
                '-' | '.' | '_' => None,
                other => {
                    return Err(MctsError::InvalidBoard(format!(
                        "unexpected cell {other:?} in {cells:?}"
                    )));
                }
            };
            count += 1;
        }
        if count != field.len() {
            return Err(MctsError::InvalidBoard(format!(
                "expected 9 cells, found {count} in {cells:?}"
            )));
        }

        let mut board = Self {
            current_player: to_move,
            field,
            outcome: GameOutcome::InProgress,
        };
        board.outcome = board.compute_outcome();
        Ok(board)
    }

    /// The mark in a cell, if any. Out-of-range coordinates read as empty.
    pub fn cell(&self, row: u8, col: u8) -> Option<TTTPlayer> {
        if row < 3 && col < 3 {
            self.field[usize::from(row * 3 + col)]
        } else {
            None
        }
    }

    fn compute_outcome(&self) -> GameOutcome<TTTPlayer> {
        for [a, b, c] in LINES {
            if let Some(player) = self.field[a] {
                if self.field[b] == Some(player) && self.field[c] == Some(player) {
                    return GameOutcome::Win(player);
                }
            }
        }

        if self.field.iter().any(|x| x.is_none()) {
            GameOutcome::InProgress
        } else {
            GameOutcome::Draw
        }
    }
}

impl Default for TicTacToeBoard {
    /// Creates a new Tic-Tac-Toe board with player 'X' starting.
    fn default() -> Self {
        TicTacToeBoard::new(TTTPlayer::X)
    }
}

impl Board for TicTacToeBoard {
    type Move = (u8, u8);
    type Player = TTTPlayer;

    fn get_current_player(&self) -> TTTPlayer {
        self.current_player
    }

    fn get_outcome(&self) -> GameOutcome<TTTPlayer> {
        self.outcome
    }

    fn get_available_moves(&self) -> Vec<Self::Move> {
        if self.outcome.is_terminal() {
            return Vec::new();
        }

        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| ((i / 3) as u8, (i % 3) as u8))
            .collect()
    }

    fn perform_move(&mut self, b_move: &Self::Move) -> Result<()> {
        let (row, col) = *b_move;
        if self.outcome.is_terminal() {
            return Err(MctsError::IllegalMove(format!(
                "{b_move:?}: the game is already over"
            )));
        }
        if row >= 3 || col >= 3 {
            return Err(MctsError::IllegalMove(format!("{b_move:?}: off the board")));
        }
        let index = usize::from(row * 3 + col);
        if self.field[index].is_some() {
            return Err(MctsError::IllegalMove(format!("{b_move:?}: cell is taken")));
        }

        self.field[index] = Some(self.current_player);
        self.current_player = self.current_player.opponent();
        self.outcome = self.compute_outcome();
        Ok(())
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.field.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let marks: Vec<String> = cells
                .iter()
                .map(|cell| match cell {
                    Some(player) => player.to_string(),
                    None => " ".to_string(),
                })
                .collect();
            writeln!(f, " {} ", marks.join(" | "))?;
        }
        Ok(())
    }
}
