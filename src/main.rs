use chess_core::game::{
    action::{MoveOutcome, PcnMove},
    fen::Fen,
    piece::PieceKind,
    position::{Position, Status},
};
#[cfg(feature = "perft")]
use chess_core::game::perft::PerftConfig;
use clap::{Parser, Subcommand};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows the position, its status and the legal moves of the side to move (DEFAULT)
    Moves {
        /// Starting position as a FEN string.
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Plays a sequence of moves in coordinate notation (e2e4, a7a8q)
    Play {
        /// Starting position as a FEN string.
        #[arg(short, long)]
        position: Option<String>,
        moves: Vec<String>,
    },
    /// Plays random legal moves until the game ends
    Random {
        /// Starting position as a FEN string.
        #[arg(short, long)]
        position: Option<String>,
        /// Maximum number of plies to play
        #[arg(long, default_value_t = 200)]
        plies: u32,
        /// Seed of the random number generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Runs perft (generating all moves up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Starting position as a FEN string.
        #[arg(short, long)]
        position: Option<String>,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
        /// Counts legal moves at horizon nodes instead of playing each of them
        #[arg(short)]
        bulk: bool,

        /// Does not show the board and other decorations
        #[arg(long)]
        no_board: bool,
    },
}

fn load(fen: Option<String>) -> Position {
    let (position, warnings) = Position::load(fen.as_deref().unwrap_or(Fen::INITIAL));
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
    position
}

fn print_status(status: Status) {
    let state = if status.is_checkmate {
        "checkmate"
    } else if status.is_stalemate {
        "stalemate"
    } else if status.in_check {
        "check"
    } else {
        "in play"
    };
    println!("{} to move: {state}", status.active_colour);
}

fn print_moves(position: &Position) {
    let moves = position
        .moves()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    println!("{} legal moves: {}", moves.len(), moves.join(" "));
}

/// Applies a move, answering a promotion with the given choice (queen by default).
fn submit(position: &mut Position, pcn: PcnMove) -> MoveOutcome {
    match position.apply_move(pcn.mv) {
        MoveOutcome::AppliedPendingPromotion { .. } => {
            position.resolve_promotion(pcn.promoting_to.unwrap_or(PieceKind::Queen))
        }
        outcome => outcome,
    }
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    match args.command.unwrap_or(Command::Moves { position: None }) {
        Command::Moves { position } => {
            let position = load(position);
            println!("{position}");
            print_status(position.status());
            print_moves(&position);
        }
        Command::Play { position, moves } => {
            let mut position = load(position);
            for text in moves {
                let pcn = match text.parse::<PcnMove>() {
                    Ok(pcn) => pcn,
                    Err(e) => {
                        eprintln!("{text}: {e}");
                        break;
                    }
                };
                let outcome = submit(&mut position, pcn);
                println!("{pcn}: {outcome:?}");
                if !outcome.is_applied() {
                    break;
                }
            }
            println!("{position}");
            print_status(position.status());
        }
        Command::Random {
            position,
            plies,
            seed,
        } => {
            let mut position = load(position);
            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            let mut played = vec![];
            for _ in 0..plies {
                let Some(&mv) = position.moves().choose(&mut rng) else {
                    break;
                };
                let promoting_to = PieceKind::PROMOTIONS.choose(&mut rng).copied();
                let pcn = PcnMove { mv, promoting_to };
                if let MoveOutcome::AppliedPendingPromotion { .. } = position.apply_move(mv) {
                    position.resolve_promotion(promoting_to.unwrap_or(PieceKind::Queen));
                    played.push(pcn.to_string());
                } else {
                    played.push(mv.to_string());
                }
            }
            println!("{}", played.join(" "));
            println!("{position}");
            print_status(position.status());
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            position,
            depth,
            divide,
            iterative,
            bench,
            bulk,
            no_board,
        } => {
            let position = load(position);

            PerftConfig {
                depth,
                divide,
                iterative,
                bench,
                bulk_counting: bulk,
                show_board: !no_board,
            }
            .go(&position)
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("chess-core has not been compiled with feature `perft`");
        }
    }
}
