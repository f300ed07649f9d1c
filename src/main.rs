use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oleg_chess::engines::engine_trait::EngineKind;
use oleg_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use oleg_chess::game_state::chess_types::Color;
use oleg_chess::game_state::game_state::GameState;
use oleg_chess::move_generation::perft::{perft, perft_divide};
use oleg_chess::search::negamax::SearchConfig;
use oleg_chess::session::game_session::{run_stdio_loop, GameSession};
use oleg_chess::utils::long_algebraic::{move_to_long_algebraic, play_long_algebraic};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Log filter directive, e.g. `debug` or `oleg_chess=trace`; overrides RUST_LOG
    #[clap(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        #[clap(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[clap(long, default_value = "4")]
        depth: u8,
        /// Print the node count below every root move
        #[clap(long)]
        divide: bool,
    },
    /// Pick a move for a position
    Bestmove {
        #[clap(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        /// Moves in long algebraic notation played from the FEN first
        #[clap(long, num_args = 0.., value_name = "MOVE")]
        moves: Vec<String>,
        #[clap(long, default_value = "3")]
        depth: u8,
        #[clap(long, value_enum, default_value = "negamax")]
        engine: EngineKind,
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Play a game over stdin/stdout
    Play {
        #[clap(long, value_enum, default_value = "white")]
        color: Side,
        #[clap(long, value_enum, default_value = "negamax")]
        engine: EngineKind,
        #[clap(long, default_value = "3")]
        depth: u8,
        #[clap(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Perft { fen, depth, divide } => {
            let mut game_state = GameState::from_fen(&fen)?;
            let total = if divide {
                let mut total = 0;
                for (mv, nodes) in perft_divide(&mut game_state, depth)? {
                    writeln!(out, "{}: {}", move_to_long_algebraic(mv), nodes)?;
                    total += nodes;
                }
                writeln!(out)?;
                total
            } else {
                perft(&mut game_state, depth)?
            };
            writeln!(out, "Nodes searched: {}", total)?;
        }
        Command::Bestmove {
            fen,
            moves,
            depth,
            engine,
            seed,
        } => {
            let mut game_state = GameState::from_fen(&fen)?;
            for text in &moves {
                play_long_algebraic(&mut game_state, text)?;
            }
            let mut engine = engine.build(SearchConfig { depth }, seed);
            let output = engine.choose_move(&mut game_state)?;
            match output.best_move {
                Some(mv) => writeln!(out, "bestmove {}", move_to_long_algebraic(mv))?,
                None => writeln!(out, "bestmove 0000")?,
            }
        }
        Command::Play {
            color,
            engine,
            depth,
            seed,
        } => {
            let mut session = GameSession::new(engine.build(SearchConfig { depth }, seed));
            session.start_game(color.into(), None)?;
            info!("waiting for commands on stdin");
            run_stdio_loop(&mut session, io::stdin().lock(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "oleg_chess failed");
            ExitCode::FAILURE
        }
    }
}
