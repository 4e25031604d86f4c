extern crate mcts_search;

use clap::Parser;
use flexi_logger::Logger;
use log::info;
use mcts_search::boards::tic_tac_toe::{TTTPlayer, TicTacToeBoard};
use mcts_search::config::{Budget, SearchConfig, DEFAULT_DRAW_REWARD};
use mcts_search::mcts::{MonteCarloTreeSearch, DEFAULT_EXPLORATION_CONSTANT};
use mcts_search::parallel::search_parallel;
use mcts_search::policy::ChildStats;
use mcts_search::random::{seeded_generator, RandomGenerator};
use mcts_search::{Board, GameOutcome};
use std::error::Error;
use std::io::{self, BufRead, Write};

/// Play tic-tac-toe against the MCTS engine, which always plays O.
#[derive(Parser, Debug)]
#[command(name = "tic_tac_toe")]
struct Cli {
    /// Iterations per engine move
    #[arg(short = 'i', long, default_value_t = 20000)]
    iterations: u32,

    /// UCB1 exploration constant
    #[arg(short = 'c', long, default_value_t = DEFAULT_EXPLORATION_CONSTANT)]
    exploration: f64,

    /// Reward of a drawn rollout (wins are 1, losses 0)
    #[arg(long, default_value_t = DEFAULT_DRAW_REWARD)]
    draw_reward: f64,

    /// Seed for the engine and the random opponent
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Read X's moves from stdin instead of playing a random opponent
    #[arg(long, default_value_t = false)]
    human: bool,

    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 1)]
    games: usize,

    /// Independent search trees per engine move
    #[arg(short = 'w', long, default_value_t = 1)]
    workers: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;
    let cli = Cli::parse();

    let config = SearchConfig {
        exploration_constant: cli.exploration,
        draw_reward: cli.draw_reward,
        ..Default::default()
    };
    let mut opponent = seeded_generator(cli.seed);
    let (mut x_wins, mut o_wins, mut draws) = (0, 0, 0);

    for game in 0..cli.games {
        let outcome = play_game(&cli, &config, &mut opponent, game as u64)?;
        match outcome {
            GameOutcome::Win(TTTPlayer::X) => x_wins += 1,
            GameOutcome::Win(TTTPlayer::O) => o_wins += 1,
            _ => draws += 1,
        }
    }

    println!("X wins: {x_wins}, O wins: {o_wins}, draws: {draws}");
    Ok(())
}

fn play_game(
    cli: &Cli,
    config: &SearchConfig,
    opponent: &mut impl RandomGenerator,
    game: u64,
) -> Result<GameOutcome<TTTPlayer>, Box<dyn Error>> {
    let mut board = TicTacToeBoard::default();
    let mut ply = 0u64;

    while !board.is_terminal() {
        let b_move = match board.get_current_player() {
            TTTPlayer::X if cli.human => {
                println!("{board}");
                read_human_move(&board)?
            }
            TTTPlayer::X => {
                let moves = board.get_available_moves();
                *opponent.choose(&moves).ok_or("no legal moves for X")?
            }
            TTTPlayer::O => {
                let seed = cli.seed.map(|s| s.wrapping_add(game * 16 + ply));
                engine_move(&board, cli, config, seed)?
            }
        };
        info!("{:?} plays {:?}", board.get_current_player(), b_move);
        board.perform_move(&b_move)?;
        ply += 1;
    }

    println!("{board}");
    match board.get_outcome() {
        GameOutcome::Win(player) => println!("{player} wins"),
        _ => println!("Tie"),
    }
    Ok(board.get_outcome())
}

fn engine_move(
    board: &TicTacToeBoard,
    cli: &Cli,
    config: &SearchConfig,
    seed: Option<u64>,
) -> Result<(u8, u8), Box<dyn Error>> {
    let budget = Budget::Iterations(cli.iterations);
    if cli.workers > 1 {
        let result = search_parallel(board, budget, config, cli.workers, seed)?;
        print_chances(&result.root_children);
        return Ok(result.best_move);
    }

    let mut mcts = MonteCarloTreeSearch::builder(board.clone())
        .with_config(config.clone())
        .with_random_generator(seeded_generator(seed))
        .build()?;
    mcts.run(budget)?;
    print_chances(&mcts.root_child_stats());
    Ok(mcts.get_best_move()?)
}

fn print_chances(children: &[ChildStats<(u8, u8)>]) {
    for child in children {
        println!(
            "Move: {:?} = {:.2?}% over {} visits",
            child.b_move,
            child.mean_score() * 100.0,
            child.visits
        );
    }
}

/// Prompts until the user enters a legal `row col` pair (1-based).
fn read_human_move(board: &TicTacToeBoard) -> Result<(u8, u8), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter row and column (1-3 each): ");
        io::stdout().flush()?;
        let line = lines.next().ok_or("stdin closed")??;
        let numbers: Vec<u8> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        if let [row @ 1..=3, col @ 1..=3] = numbers[..] {
            let b_move = (row - 1, col - 1);
            if board.get_available_moves().contains(&b_move) {
                return Ok(b_move);
            }
        }
        println!("That is not a free cell, try again.");
    }
}
