//! Root-parallel search.
//!
//! Each worker grows its own tree from its own copy of the board with its own generator,
//! so no tree is ever shared between threads. Root statistics are merged once every worker
//! has finished.

use crate::board::Board;
use crate::config::{Budget, SearchConfig};
use crate::error::{MctsError, Result};
use crate::mcts::MonteCarloTreeSearch;
use crate::policy::{select_robust_child, ChildStats};
use log::debug;
use rayon::prelude::*;

/// Outcome of a root-parallel search.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelSearchResult<M> {
    pub best_move: M,
    /// Root child statistics summed over all workers.
    pub root_children: Vec<ChildStats<M>>,
    /// Iterations performed by all workers together.
    pub iterations: u64,
}

/// Runs `workers` independent searches on the rayon pool and picks the robust child of the
/// merged root statistics.
///
/// Worker `i` is seeded with `seed + i`, so a fixed seed gives a fixed result regardless of
/// thread scheduling. Every worker spends the whole `budget`.
pub fn search_parallel<T>(
    board: &T,
    budget: Budget,
    config: &SearchConfig,
    workers: usize,
    seed: Option<u64>,
) -> Result<ParallelSearchResult<T::Move>>
where
    T: Board + Send + Sync,
    T::Move: Send,
    T::Player: Send,
{
    if workers == 0 {
        return Err(MctsError::InvalidConfig(
            "at least one worker is required".to_string(),
        ));
    }
    budget.validate()?;
    config.validate()?;

    let base_seed = seed.unwrap_or_else(rand::random);
    let per_worker: Vec<(u32, Vec<ChildStats<T::Move>>)> = (0..workers)
        .into_par_iter()
        .map(|worker| -> Result<(u32, Vec<ChildStats<T::Move>>)> {
            let mut mcts = MonteCarloTreeSearch::builder(board.clone())
                .with_config(config.clone())
                .with_seed(base_seed.wrapping_add(worker as u64))
                .build()?;
            let stats = mcts.run(budget)?;
            debug!(
                "worker {worker}: {} iterations, {} nodes",
                stats.iterations, stats.tree_size
            );
            Ok((stats.iterations, mcts.root_child_stats()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut iterations = 0u64;
    let mut merged: Vec<ChildStats<T::Move>> = Vec::new();
    for (worker_iterations, children) in per_worker {
        iterations += u64::from(worker_iterations);
        for child in children {
            match merged.iter_mut().find(|m| m.b_move == child.b_move) {
                Some(existing) => {
                    existing.visits += child.visits;
                    existing.score += child.score;
                }
                None => merged.push(child),
            }
        }
    }

    let best_move = select_robust_child(&merged)
        .map(|child| child.b_move.clone())
        .ok_or(MctsError::NoChildren)?;
    Ok(ParallelSearchResult {
        best_move,
        root_children: merged,
        iterations,
    })
}
