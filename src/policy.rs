//! Scoring rules shared by the sequential and the root-parallel search: UCB1 for descending
//! the tree, the per-node reward used by backpropagation, and the robust-child rule for the
//! final move.

use crate::board::GameOutcome;

/// Calculates the UCB1 (Upper Confidence Bound 1) value of a child.
///
/// `parent_visits` is the visit count of the node being descended from.
pub fn ucb_value(parent_visits: u32, child_score: f64, child_visits: u32, exploration: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    let visits = f64::from(child_visits);
    child_score / visits + exploration * f64::sqrt(f64::ln(f64::from(parent_visits)) / visits)
}

/// The reward a rollout `outcome` is worth to `player`: 1 for a win, `draw_reward` for a draw,
/// 0 for a loss.
pub fn reward<P: Copy + PartialEq>(outcome: &GameOutcome<P>, player: P, draw_reward: f64) -> f64 {
    if outcome.is_win_for(player) {
        1.0
    } else if matches!(outcome, GameOutcome::Draw) {
        draw_reward
    } else {
        0.0
    }
}

/// Statistics of one root child, as reported to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<M> {
    pub b_move: M,
    pub visits: u32,
    pub score: f64,
}

impl<M> ChildStats<M> {
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / f64::from(self.visits)
        }
    }
}

/// Picks the robust child: most visits, then best mean score, then the earliest entry.
pub fn select_robust_child<M>(children: &[ChildStats<M>]) -> Option<&ChildStats<M>> {
    let mut best: Option<&ChildStats<M>> = None;
    for child in children {
        let is_better = match best {
            None => true,
            Some(current) => {
                child.visits > current.visits
                    || (child.visits == current.visits && child.mean_score() > current.mean_score())
            }
        };
        if is_better {
            best = Some(child);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(b_move: u8, visits: u32, score: f64) -> ChildStats<u8> {
        ChildStats {
            b_move,
            visits,
            score,
        }
    }

    #[test]
    fn ucb_matches_formula() {
        let c = std::f64::consts::SQRT_2;
        let expected = 3.0 / 5.0 + c * (f64::ln(20.0) / 5.0).sqrt();
        assert!((ucb_value(20, 3.0, 5, c) - expected).abs() < 1e-12);
    }

    #[test]
    fn ucb_without_exploration_is_the_mean() {
        assert!((ucb_value(100, 7.0, 10, 0.0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn ucb_of_unvisited_child_is_infinite() {
        assert_eq!(ucb_value(10, 0.0, 0, 1.0), f64::INFINITY);
    }

    #[test]
    fn reward_is_relative_to_the_player() {
        let x_won: GameOutcome<char> = GameOutcome::Win('X');
        assert_eq!(reward(&x_won, 'X', 0.0), 1.0);
        assert_eq!(reward(&x_won, 'O', 0.0), 0.0);

        let x_lost: GameOutcome<char> = GameOutcome::Loss('X');
        assert_eq!(reward(&x_lost, 'X', 0.5), 0.0);
        assert_eq!(reward(&x_lost, 'O', 0.5), 1.0);

        let draw: GameOutcome<char> = GameOutcome::Draw;
        assert_eq!(reward(&draw, 'X', 0.0), 0.0);
        assert_eq!(reward(&draw, 'O', 0.5), 0.5);
    }

    #[test]
    fn robust_child_prefers_visits_over_mean() {
        let children = vec![stats(0, 10, 10.0), stats(1, 30, 3.0), stats(2, 20, 19.0)];
        assert_eq!(select_robust_child(&children).map(|c| c.b_move), Some(1));
    }

    #[test]
    fn robust_child_breaks_ties_by_mean_then_order() {
        let by_mean = vec![stats(0, 10, 2.0), stats(1, 10, 6.0), stats(2, 10, 4.0)];
        assert_eq!(select_robust_child(&by_mean).map(|c| c.b_move), Some(1));

        let by_order = vec![stats(4, 10, 5.0), stats(5, 10, 5.0)];
        assert_eq!(select_robust_child(&by_order).map(|c| c.b_move), Some(4));
    }

    #[test]
    fn robust_child_of_nothing_is_none() {
        let children: Vec<ChildStats<u8>> = Vec::new();
        assert!(select_robust_child(&children).is_none());
    }
}
