use crate::board::{Board, GameOutcome};
use crate::config::{Budget, ExpansionOrder, SearchConfig};
use crate::error::{MctsError, Result};
use crate::mcts_node::MctsNode;
use crate::policy::{reward, select_robust_child, ucb_value, ChildStats};
use crate::random::{seeded_generator, DefaultRandomGenerator, RandomGenerator};
use ego_tree::{NodeId, NodeRef, Tree};
use log::{debug, trace};
use std::time::{Duration, Instant};

pub use crate::config::{DEFAULT_EXPLORATION_CONSTANT, DEFAULT_NODE_CAPACITY};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the search tree, the board the search started from, the random number generator,
/// and the configuration for the search. The tree lives in an arena and is dropped with the
/// search; nothing carries over to the next move.
pub struct MonteCarloTreeSearch<T: Board, K: RandomGenerator = DefaultRandomGenerator> {
    tree: Tree<MctsNode<T>>,
    root_board: T,
    random: K,
    config: SearchConfig,
    iterations: u32,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// This provides a convenient way to configure the MCTS search with different parameters.
pub struct MonteCarloTreeSearchBuilder<T: Board, K: RandomGenerator = DefaultRandomGenerator> {
    board: T,
    random_generator: K,
    config: SearchConfig,
}

impl<T: Board> MonteCarloTreeSearchBuilder<T, DefaultRandomGenerator> {
    /// Creates a new builder with the given initial board state and an unseeded generator.
    pub fn new(board: T) -> Self {
        Self {
            board,
            random_generator: seeded_generator(None),
            config: SearchConfig::default(),
        }
    }
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearchBuilder<T, K> {
    /// Sets the random number generator for the MCTS search.
    pub fn with_random_generator<R: RandomGenerator>(
        self,
        rg: R,
    ) -> MonteCarloTreeSearchBuilder<T, R> {
        MonteCarloTreeSearchBuilder {
            board: self.board,
            random_generator: rg,
            config: self.config,
        }
    }

    /// Uses the default generator seeded with `seed`.
    pub fn with_seed(self, seed: u64) -> MonteCarloTreeSearchBuilder<T, DefaultRandomGenerator> {
        self.with_random_generator(seeded_generator(Some(seed)))
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, exploration_constant: f64) -> Self {
        self.config.exploration_constant = exploration_constant;
        self
    }

    /// Sets the reward a drawn rollout is worth.
    pub fn with_draw_reward(mut self, draw_reward: f64) -> Self {
        self.config.draw_reward = draw_reward;
        self
    }

    /// Sets which untried move is expanded when no decisive move is pending.
    pub fn with_expansion_order(mut self, expansion_order: ExpansionOrder) -> Self {
        self.config.expansion_order = expansion_order;
        self
    }

    /// Enables or disables expanding immediately winning moves before all others.
    pub fn with_decisive_moves_first(mut self, decisive_moves_first: bool) -> Self {
        self.config.decisive_moves_first = decisive_moves_first;
        self
    }

    /// Sets how many nodes the tree reserves up front.
    pub fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.config.node_capacity = node_capacity;
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    ///
    /// Fails with `MctsError::NoLegalMoves` if the board is already finished.
    pub fn build(self) -> Result<MonteCarloTreeSearch<T, K>> {
        MonteCarloTreeSearch::new(self.board, self.random_generator, self.config)
    }
}

impl<T: Board> MonteCarloTreeSearch<T, DefaultRandomGenerator> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(board: T) -> MonteCarloTreeSearchBuilder<T, DefaultRandomGenerator> {
        MonteCarloTreeSearchBuilder::new(board)
    }
}

/// Summary of a completed `run`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    /// Iterations performed by this run.
    pub iterations: u32,
    /// Nodes in the tree, root included.
    pub tree_size: usize,
    /// Height of the deepest node.
    pub max_depth: u32,
    pub elapsed: Duration,
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearch<T, K> {
    /// Creates a new `MonteCarloTreeSearch` instance.
    ///
    /// It is recommended to use the builder pattern via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(board: T, rg: K, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        if board.is_terminal() || board.get_available_moves().is_empty() {
            return Err(MctsError::NoLegalMoves);
        }

        let root = MctsNode::root(&board);
        let tree = Tree::with_capacity(root, config.node_capacity);
        Ok(Self {
            tree,
            root_board: board,
            random: rg,
            config,
            iterations: 0,
        })
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<T>> {
        &self.tree
    }

    /// Returns a reference to the root node of the search tree.
    pub fn get_root(&self) -> NodeRef<'_, MctsNode<T>> {
        self.tree.root()
    }

    /// Returns the configuration the search was built with.
    pub fn get_config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of completed iterations since the search was built.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Runs the search until `budget` is used up.
    ///
    /// The budget is only checked between iterations; an iteration in progress always finishes.
    pub fn run(&mut self, budget: Budget) -> Result<SearchStats> {
        budget.validate()?;
        let started = Instant::now();
        let before = self.iterations;

        match budget {
            Budget::Iterations(n) => self.iterate_n_times(n)?,
            Budget::Time(limit) => {
                while started.elapsed() < limit {
                    self.do_iteration()?;
                }
            }
        }

        let stats = SearchStats {
            iterations: self.iterations - before,
            tree_size: self.tree.nodes().count(),
            max_depth: self.tree.values().map(|node| node.height).max().unwrap_or(0),
            elapsed: started.elapsed(),
        };
        debug!(
            "search finished: {} iterations, {} nodes, depth {}, {:?}",
            stats.iterations, stats.tree_size, stats.max_depth, stats.elapsed
        );
        Ok(stats)
    }

    /// Runs the MCTS search for a specified number of iterations.
    pub fn iterate_n_times(&mut self, n: u32) -> Result<()> {
        for _ in 0..n {
            self.do_iteration()?;
        }
        Ok(())
    }

    /// Performs one full iteration of the MCTS algorithm (Selection, Expansion, Simulation,
    /// Backpropagation). Returns the node the rollout started from.
    pub fn do_iteration(&mut self) -> Result<NodeId> {
        let mut board = self.root_board.clone();
        let mut node_id = self.tree.root().id();

        while let Some(child_id) = self.select_child(node_id) {
            if let Some(b_move) = &self.node(child_id).value().prev_move {
                board.perform_move(b_move)?;
            }
            node_id = child_id;
        }

        if let Some(child_id) = self.expand_node(node_id, &mut board)? {
            node_id = child_id;
        }

        let outcome = self.simulate(board)?;
        self.backpropagate(node_id, &outcome);
        self.iterations += 1;

        trace!(
            "iteration {}: rollout from height {} ended {:?}",
            self.iterations,
            self.node(node_id).value().height,
            outcome
        );
        Ok(node_id)
    }

    /// Statistics of the root's children, in insertion order.
    pub fn root_child_stats(&self) -> Vec<ChildStats<T::Move>> {
        self.tree
            .root()
            .children()
            .filter_map(|child| {
                let data = child.value();
                data.prev_move.clone().map(|b_move| ChildStats {
                    b_move,
                    visits: data.visits,
                    score: data.score,
                })
            })
            .collect()
    }

    /// Returns the move of the robust child: the root child with the most visits, ties broken
    /// by mean score and then by insertion order.
    ///
    /// Fails with `MctsError::NoChildren` if no iteration has expanded the root yet.
    pub fn get_best_move(&self) -> Result<T::Move> {
        let children = self.root_child_stats();
        select_robust_child(&children)
            .map(|child| child.b_move.clone())
            .ok_or(MctsError::NoChildren)
    }

    fn node(&self, node_id: NodeId) -> NodeRef<'_, MctsNode<T>> {
        self.tree
            .get(node_id)
            .expect("node ids are only handed out by this tree")
    }

    /// Selects the child to descend into using the UCB1 formula.
    ///
    /// Returns `None` while the node still has untried moves, or when it has no children at all.
    fn select_child(&self, node_id: NodeId) -> Option<NodeId> {
        let node = self.node(node_id);
        if !node.value().is_fully_expanded() {
            return None;
        }

        let parent_visits = node.value().visits;
        let mut best: Option<(NodeId, f64)> = None;
        for child in node.children() {
            let data = child.value();
            debug_assert!(data.visits > 0, "selection reached an unvisited child");
            let ucb = ucb_value(
                parent_visits,
                data.score,
                data.visits,
                self.config.exploration_constant,
            );
            if best.is_none_or(|(_, max_ucb)| ucb > max_ucb) {
                best = Some((child.id(), ucb));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Expands one untried move of `node_id`, advancing `board` past it.
    ///
    /// A move that wins on the spot goes first when `decisive_moves_first` is set; otherwise
    /// the configured `ExpansionOrder` decides.
    ///
    /// Returns `None` if the node has nothing left to expand.
    fn expand_node(&mut self, node_id: NodeId, board: &mut T) -> Result<Option<NodeId>> {
        let mut node = self
            .tree
            .get_mut(node_id)
            .expect("node ids are only handed out by this tree");
        let data = node.value();
        if data.untried_moves.is_empty() {
            return Ok(None);
        }

        let mover = data.current_player;
        let decisive = if self.config.decisive_moves_first {
            find_decisive_move(&data.untried_moves, &*board, mover)?
        } else {
            None
        };
        let index = match (decisive, self.config.expansion_order) {
            (Some(index), _) => index,
            (None, ExpansionOrder::InOrder) => 0,
            (None, ExpansionOrder::Random) => self.random.next_index(data.untried_moves.len()),
        };
        let b_move = data.untried_moves.remove(index);
        let height = data.height + 1;

        board.perform_move(&b_move)?;
        let child = MctsNode::child(height, b_move, mover, board);
        Ok(Some(node.append(child).id()))
    }

    /// Simulates a random playout from `board` until the game ends.
    fn simulate(&mut self, mut board: T) -> Result<GameOutcome<T::Player>> {
        loop {
            let outcome = board.get_outcome();
            if outcome.is_terminal() {
                return Ok(outcome);
            }

            let moves = board.get_available_moves();
            match self.random.choose(&moves) {
                Some(b_move) => board.perform_move(b_move)?,
                None => return Ok(GameOutcome::Draw),
            }
        }
    }

    /// Propagates the result of a simulation back up the tree, updating node statistics.
    ///
    /// Every node is credited from the point of view of the player who moved into it.
    fn backpropagate(&mut self, node_id: NodeId, outcome: &GameOutcome<T::Player>) {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if let Some(mut node) = self.tree.get_mut(id) {
                let data = node.value();
                data.visits += 1;
                data.score += reward(outcome, data.credited_player(), self.config.draw_reward);
            }
            current = self.tree.get(id).and_then(|node| node.parent()).map(|p| p.id());
        }
    }
}

/// Index of the first move in `moves` that wins the game for `mover` on the spot.
fn find_decisive_move<T: Board>(
    moves: &[T::Move],
    board: &T,
    mover: T::Player,
) -> Result<Option<usize>> {
    for (index, b_move) in moves.iter().enumerate() {
        if board.apply(b_move)?.get_outcome().is_win_for(mover) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Searches `board` and returns the recommended move for `player_to_move`.
///
/// A fresh tree is built for the call and dropped afterwards. Passing the same `rng_seed`
/// with the same board and budget returns the same move. Every other parameter takes its
/// `SearchConfig` default; see [`search_with_config`].
pub fn search<T: Board>(
    board: T,
    player_to_move: T::Player,
    budget: Budget,
    exploration_constant: f64,
    rng_seed: Option<u64>,
) -> Result<T::Move> {
    let config = SearchConfig {
        exploration_constant,
        ..Default::default()
    };
    search_with_config(board, player_to_move, budget, &config, rng_seed)
}

/// Like [`search`], with every parameter taken from `config`.
pub fn search_with_config<T: Board>(
    board: T,
    player_to_move: T::Player,
    budget: Budget,
    config: &SearchConfig,
    rng_seed: Option<u64>,
) -> Result<T::Move> {
    budget.validate()?;
    let actual = board.get_current_player();
    if actual != player_to_move {
        return Err(MctsError::PlayerMismatch {
            expected: format!("{player_to_move:?}"),
            actual: format!("{actual:?}"),
        });
    }

    let mut mcts = MonteCarloTreeSearch::builder(board)
        .with_config(config.clone())
        .with_random_generator(seeded_generator(rng_seed))
        .build()?;
    mcts.run(budget)?;
    mcts.get_best_move()
}
