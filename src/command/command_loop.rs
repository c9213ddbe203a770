//! Line-oriented command front-end over a [`GameRecord`].
//!
//! Reads commands from stdin, keeps the current game, and prints responses on
//! stdout. Failed commands report `info string <command> error: ...` and the
//! loop keeps running.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_record::GameRecord;
use crate::game_state::game_state::GameState;
use crate::moves::move_list::{parse_compact_moves, parse_long_algebraic_moves};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::utils::bitboard_display::{bitboard_to_squares, bitboard_to_string};
use crate::utils::piece_table::PieceTable;
use crate::utils::render_game_state::{render_game_state, Orientation};

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = CommandState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct CommandState {
    record: GameRecord,
    table: PieceTable,
}

impl CommandState {
    fn new() -> Self {
        Self {
            record: GameRecord::default(),
            table: PieceTable::standard(),
        }
    }

    /// Handle one line. Returns `Ok(true)` when the loop should stop.
    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let result = match cmd {
            "position" => self.handle_position(&args),
            "moves" => self.handle_moves(&args),
            "compactmoves" => self.handle_compact_moves(&args),
            "fen" => writeln!(out, "{}", self.record.current().get_fen()).map_err(io_error),
            "compact" => self
                .record
                .current()
                .get_compact()
                .and_then(|text| writeln!(out, "{text}").map_err(io_error)),
            "board" => self.handle_board(&args, out),
            "history" => self.handle_history(out),
            "pieces" => self.handle_pieces(out),
            "bitboard" => self.handle_bitboard(&args, out),
            "set" => self.handle_set(&args),
            "undo" => self.record.undo().and_then(|undone| {
                if undone.is_none() {
                    writeln!(out, "info string nothing to undo").map_err(io_error)?;
                }
                Ok(())
            }),
            "quit" => return Ok(true),
            other => {
                debug!(command = other, "ignoring unknown command");
                Ok(())
            }
        };

        if let Err(err) = result {
            writeln!(out, "info string {cmd} error: {err}")?;
        }

        Ok(false)
    }

    fn handle_position(&mut self, args: &[&str]) -> BoardResult<()> {
        let moves_at = args.iter().position(|tok| *tok == "moves");
        let (setup, moves) = match moves_at {
            Some(index) => (&args[..index], &args[index + 1..]),
            None => (args, &args[args.len()..]),
        };

        let start = match setup.split_first() {
            Some((&"startpos", [])) => GameState::new_game(),
            Some((&"fen", fields)) if !fields.is_empty() => GameState::from_fen(&fields.join(" "))?,
            Some((&"compact", [text])) => GameState::from_compact(text)?,
            Some((other, _)) => {
                return Err(BoardError::ParseError(format!(
                    "unsupported position form '{other}'"
                )))
            }
            None => return Err(BoardError::ParseError("incomplete position command".to_owned())),
        };

        // Validate the whole list before touching the session.
        let parsed = parse_long_algebraic_moves(&moves.join(" "), &start)?;
        let mut record = GameRecord::new(start);
        for mv in parsed {
            record.push(mv)?;
        }

        self.record = record;
        Ok(())
    }

    fn handle_moves(&mut self, args: &[&str]) -> BoardResult<()> {
        let parsed = parse_long_algebraic_moves(&args.join(" "), self.record.current())?;
        for mv in parsed {
            self.record.push(mv)?;
        }
        Ok(())
    }

    fn handle_compact_moves(&mut self, args: &[&str]) -> BoardResult<()> {
        let parsed = parse_compact_moves(&args.concat(), self.record.current())?;
        for mv in parsed {
            self.record.push(mv)?;
        }
        Ok(())
    }

    fn handle_board(&self, args: &[&str], out: &mut impl Write) -> BoardResult<()> {
        let orientation = match args.first() {
            None => Orientation::LightBottom,
            Some(&"flip") => Orientation::DarkBottom,
            Some(other) => return Err(BoardError::ParseError(format!("unknown board option '{other}'"))),
        };
        writeln!(out, "{}", render_game_state(self.record.current(), orientation)).map_err(io_error)
    }

    fn handle_history(&self, out: &mut impl Write) -> BoardResult<()> {
        writeln!(out, "start {}", self.record.start().get_fen()).map_err(io_error)?;
        writeln!(out, "moves {}", self.record.to_long_algebraic()).map_err(io_error)?;
        match self.record.to_compact() {
            Ok(compact) => writeln!(out, "compactmoves {compact}").map_err(io_error),
            Err(err) => writeln!(out, "info string compact history unavailable: {err}").map_err(io_error),
        }
    }

    fn handle_pieces(&mut self, out: &mut impl Write) -> BoardResult<()> {
        let table = &self.table;
        let game_state = self.record.current_mut();

        for color in Color::ALL {
            let mut line = String::from(table.side_letter(color));
            for kind in PieceKind::ALL {
                let squares = game_state
                    .piece_list(kind, color)
                    .iter()
                    .map(|sq| square_to_algebraic(*sq))
                    .collect::<BoardResult<Vec<_>>>()?;
                if squares.is_empty() {
                    continue;
                }
                line.push(' ');
                line.push(table.letter_for(color, kind));
                line.push(':');
                line.push_str(&squares.join(","));
            }
            writeln!(out, "{line}").map_err(io_error)?;
        }
        Ok(())
    }

    fn handle_bitboard(&mut self, args: &[&str], out: &mut impl Write) -> BoardResult<()> {
        let selector = args
            .first()
            .ok_or_else(|| BoardError::ParseError("missing bitboard selector".to_owned()))?;
        let type_code = match selector.to_ascii_lowercase().as_str() {
            "empty" => 0,
            "all" => 7,
            "king" => PieceKind::King.code(),
            "queen" => PieceKind::Queen.code(),
            "rook" => PieceKind::Rook.code(),
            "knight" => PieceKind::Knight.code(),
            "bishop" => PieceKind::Bishop.code(),
            "pawn" => PieceKind::Pawn.code(),
            other => return Err(BoardError::ParseError(format!("unknown bitboard selector '{other}'"))),
        };

        let color = match args.get(1) {
            Some(letter) => self
                .table
                .side_for_letter(letter)
                .ok_or_else(|| BoardError::ParseError(format!("unknown side '{letter}'")))?,
            None if type_code == 0 => Color::Light,
            None => return Err(BoardError::ParseError("missing side for bitboard".to_owned())),
        };

        let bitboard = self.record.current_mut().bitboard_by_code(type_code, color.code())?;
        debug!(selector = %selector, squares = ?bitboard_to_squares(bitboard), "bitboard query");
        writeln!(out, "{}", bitboard_to_string(bitboard)).map_err(io_error)
    }

    /// Edit one square. The edited position becomes the start of a fresh
    /// record, since the old move list no longer leads to it.
    fn handle_set(&mut self, args: &[&str]) -> BoardResult<()> {
        let [square, piece] = args else {
            return Err(BoardError::ParseError("usage: set <square> <piece|->".to_owned()));
        };

        let square = algebraic_to_square(square)?;
        let code = match *piece {
            "-" => PieceCode::NONE,
            letter => {
                let mut chars = letter.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return Err(BoardError::ParseError(format!("invalid piece '{letter}'")));
                };
                let (color, kind) = self
                    .table
                    .piece_for_letter(ch)
                    .ok_or_else(|| BoardError::ParseError(format!("invalid piece '{letter}'")))?;
                PieceCode::new(color, kind)
            }
        };

        let mut edited = self.record.current().clone();
        edited.set_piece(square as usize, code)?;
        self.record = GameRecord::new(edited);
        Ok(())
    }
}

fn io_error(err: io::Error) -> BoardError {
    BoardError::InvalidArgument(format!("output failed: {err}"))
}
