//! Game session driven by a remote move list, plus a line-based stdio front-end.
//!
//! The collaborator reports the full list of moves played so far after every
//! event; the session keeps its position in sync with that list and asks the
//! engine for a reply whenever it is its turn.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_apply::revert_move;
use crate::utils::long_algebraic::{move_to_long_algebraic, play_long_algebraic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    Move(String),
    Resign,
}

pub struct GameSession {
    game_state: GameState,
    engine: Box<dyn Engine>,
    color: Color,
    initial_fen: String,
    applied_moves: Vec<String>,
}

impl GameSession {
    /// Session playing White from the standard starting position.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            game_state: GameState::new_game(),
            engine,
            color: Color::White,
            initial_fen: STARTING_POSITION_FEN.to_owned(),
            applied_moves: Vec::new(),
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn applied_moves(&self) -> &[String] {
        &self.applied_moves
    }

    /// Reset to `initial_fen` (the standard start when `None`) playing `color`.
    ///
    /// A bad FEN is rejected and the current game is kept.
    pub fn start_game(&mut self, color: Color, initial_fen: Option<&str>) -> ChessResult<()> {
        let fen = initial_fen.unwrap_or(STARTING_POSITION_FEN);
        let game_state = GameState::from_fen(fen)?;

        self.game_state = game_state;
        self.color = color;
        self.initial_fen = fen.to_owned();
        self.applied_moves.clear();
        self.engine.new_game();

        info!(?color, fen, engine = self.engine.name(), "game started");
        Ok(())
    }

    /// Whether the engine is the side to move.
    pub fn is_our_turn(&self) -> bool {
        self.game_state.side_to_move == self.color
    }

    /// Rebuild the position from the initial FEN and the complete move list.
    pub fn on_game_full(&mut self, moves: &[&str]) -> ChessResult<Option<SessionReply>> {
        self.replay_all(moves)?;
        self.play_next_move()
    }

    /// Catch up with a move list that extends the one already applied.
    ///
    /// A list that is shorter or disagrees with the applied prefix, as after
    /// a takeback, triggers a full replay instead.
    pub fn on_game_state(&mut self, moves: &[&str]) -> ChessResult<Option<SessionReply>> {
        let extends_applied = moves.len() >= self.applied_moves.len()
            && self
                .applied_moves
                .iter()
                .zip(moves)
                .all(|(applied, &reported)| applied == reported);

        if extends_applied {
            let suffix = &moves[self.applied_moves.len()..];
            self.apply_suffix(suffix)?;
        } else {
            debug!(
                applied = self.applied_moves.len(),
                reported = moves.len(),
                "move list diverged, replaying"
            );
            self.replay_all(moves)?;
        }

        self.play_next_move()
    }

    fn replay_all(&mut self, moves: &[&str]) -> ChessResult<()> {
        let mut game_state = GameState::from_fen(&self.initial_fen)?;
        for text in moves {
            play_long_algebraic(&mut game_state, text)?;
        }
        debug!(plies = moves.len(), "replayed full move list");

        self.game_state = game_state;
        self.applied_moves = moves.iter().map(|&text| text.to_owned()).collect();
        Ok(())
    }

    /// Apply `suffix` in place, unwinding every move of it on failure.
    fn apply_suffix(&mut self, suffix: &[&str]) -> ChessResult<()> {
        for (played, text) in suffix.iter().enumerate() {
            if let Err(err) = play_long_algebraic(&mut self.game_state, text) {
                for _ in 0..played {
                    revert_move(&mut self.game_state)?;
                }
                return Err(err);
            }
        }

        self.applied_moves
            .extend(suffix.iter().map(|&text| text.to_owned()));
        Ok(())
    }

    fn play_next_move(&mut self) -> ChessResult<Option<SessionReply>> {
        if !self.is_our_turn() {
            return Ok(None);
        }

        let output = self.engine.choose_move(&mut self.game_state)?;
        let reply = match output.best_move {
            Some(mv) => {
                let text = move_to_long_algebraic(mv);
                info!(mv = %text, score = ?output.score, nodes = output.nodes, "playing move");
                SessionReply::Move(text)
            }
            None => {
                info!("no legal move, resigning");
                SessionReply::Resign
            }
        };
        Ok(Some(reply))
    }
}

fn write_reply(out: &mut impl Write, reply: Option<SessionReply>) -> io::Result<()> {
    match reply {
        Some(SessionReply::Move(text)) => writeln!(out, "bestmove {}", text),
        Some(SessionReply::Resign) => writeln!(out, "resign"),
        None => Ok(()),
    }
}

fn parse_color(token: Option<&str>) -> Result<Color, String> {
    match token.map(str::to_ascii_lowercase).as_deref() {
        Some("white" | "w") => Ok(Color::White),
        Some("black" | "b") => Ok(Color::Black),
        Some(other) => Err(format!("unknown color '{}'", other)),
        None => Err("missing color after 'newgame'".to_owned()),
    }
}

/// Returns `Ok(true)` when the loop should stop.
fn handle_command(
    session: &mut GameSession,
    line: &str,
    out: &mut impl Write,
) -> io::Result<bool> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(false);
    }

    let mut parts = trimmed.split_whitespace();
    let cmd = parts.next().unwrap_or_default();

    let result = match cmd {
        "newgame" => {
            let color = parse_color(parts.next());
            let fen = match parts.next() {
                Some("fen") => Some(parts.collect::<Vec<_>>().join(" ")),
                Some(other) => {
                    writeln!(out, "error unexpected token '{}'", other)?;
                    return Ok(false);
                }
                None => None,
            };
            color.and_then(|color| {
                session
                    .start_game(color, fen.as_deref())
                    .and_then(|()| session.on_game_full(&[]))
                    .map_err(|err| err.to_string())
            })
        }
        "moves" => {
            let moves: Vec<&str> = parts.collect();
            session.on_game_state(&moves).map_err(|err| err.to_string())
        }
        "quit" => return Ok(true),
        other => Err(format!("unknown command '{}'", other)),
    };

    match result {
        Ok(reply) => write_reply(out, reply)?,
        Err(message) => {
            warn!(command = trimmed, %message, "rejected input");
            writeln!(out, "error {}", message)?;
        }
    }
    Ok(false)
}

/// Serve the line protocol until `quit` or end of input.
pub fn run_stdio_loop(
    session: &mut GameSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let should_quit = handle_command(session, &line, out)?;
        out.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}
