//! Search configuration and budgets.

use crate::error::{MctsError, Result};
use std::time::Duration;

/// Default UCB1 exploration constant, √2.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Default reward of a drawn rollout: half a win.
pub const DEFAULT_DRAW_REWARD: f64 = 0.5;

/// Default number of nodes the tree arena reserves up front.
pub const DEFAULT_NODE_CAPACITY: usize = 4096;

/// How much work a search may do. Checked only between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Run exactly this many iterations.
    Iterations(u32),
    /// Keep starting iterations until this much wall-clock time has elapsed.
    Time(Duration),
}

impl Budget {
    /// Rejects zero iteration counts and zero durations.
    pub fn validate(&self) -> Result<()> {
        match self {
            Budget::Iterations(0) => Err(MctsError::InvalidBudget(
                "iteration count must be positive".to_string(),
            )),
            Budget::Time(limit) if limit.is_zero() => Err(MctsError::InvalidBudget(
                "time budget must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Which untried move the expansion step materializes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionOrder {
    /// The first untried move, in the order the board listed them.
    #[default]
    InOrder,
    /// A uniformly random untried move, drawn from the search's random generator.
    Random,
}

/// Tunable parameters of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Weight of the exploration term in UCB1.
    pub exploration_constant: f64,
    /// Reward credited to every node on the path when a rollout ends in a draw.
    /// Wins are worth 1 and losses 0.
    pub draw_reward: f64,
    /// Which untried move is expanded when no decisive move is pending.
    pub expansion_order: ExpansionOrder,
    /// Expand an untried move that wins on the spot before any other untried move.
    pub decisive_moves_first: bool,
    /// Initial capacity of the tree arena.
    pub node_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            draw_reward: DEFAULT_DRAW_REWARD,
            expansion_order: ExpansionOrder::InOrder,
            decisive_moves_first: true,
            node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }
}

impl SearchConfig {
    /// Checks that the exploration constant is finite and non-negative and that the draw
    /// reward lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MctsError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if !(0.0..=1.0).contains(&self.draw_reward) {
            return Err(MctsError::InvalidConfig(format!(
                "draw reward must lie in [0, 1], got {}",
                self.draw_reward
            )));
        }
        Ok(())
    }
}
