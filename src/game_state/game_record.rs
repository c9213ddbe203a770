use tracing::debug;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::game_state::GameState;
use crate::moves::move_codec::{compact_to_move_in, long_algebraic_to_move_in};
use crate::moves::move_descriptions::Move;
use crate::moves::move_list::{format_compact_moves, format_long_algebraic_moves};

/// A starting position plus the moves played from it.
///
/// `current` is always the start position with every recorded move applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    start: GameState,
    moves: Vec<Move>,
    current: GameState,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new(GameState::new_game())
    }
}

impl GameRecord {
    pub fn new(start: GameState) -> Self {
        Self {
            current: start.clone(),
            start,
            moves: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        Ok(Self::new(GameState::from_fen(fen)?))
    }

    /// Apply `mv` to the current position and record it. A move that fails to
    /// apply is not recorded.
    pub fn push(&mut self, mv: Move) -> BoardResult<()> {
        self.current.make_move(mv)?;
        self.moves.push(mv);
        Ok(())
    }

    pub fn play_long_algebraic(&mut self, token: &str) -> BoardResult<Move> {
        let mv = long_algebraic_to_move_in(token, &self.current)?;
        self.push(mv)?;
        Ok(mv)
    }

    pub fn play_compact(&mut self, pair: &str) -> BoardResult<Move> {
        let mv = compact_to_move_in(pair, &self.current)?;
        self.push(mv)?;
        Ok(mv)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn start(&self) -> &GameState {
        &self.start
    }

    pub fn current(&self) -> &GameState {
        &self.current
    }

    /// Mutable access for index reads on the current position.
    pub fn current_mut(&mut self) -> &mut GameState {
        &mut self.current
    }

    pub fn to_long_algebraic(&self) -> String {
        format_long_algebraic_moves(&self.moves)
    }

    pub fn to_compact(&self) -> BoardResult<String> {
        format_compact_moves(&self.moves)
    }

    /// Keep the first `ply` moves and rebuild the current position from the
    /// start.
    pub fn rewind(&mut self, ply: usize) -> BoardResult<()> {
        if ply > self.moves.len() {
            return Err(BoardError::InvalidArgument(format!(
                "cannot rewind to ply {ply}; only {} moves recorded",
                self.moves.len()
            )));
        }

        let mut replay = self.start.clone();
        for mv in &self.moves[..ply] {
            replay.make_move(*mv)?;
        }

        debug!(from = self.moves.len(), to = ply, "rewound game record");
        self.moves.truncate(ply);
        self.current = replay;
        Ok(())
    }

    /// Drop the last move. Returns it, or `None` when nothing was played.
    pub fn undo(&mut self) -> BoardResult<Option<Move>> {
        let Some(last) = self.moves.last().copied() else {
            return Ok(None);
        };
        self.rewind(self.moves.len() - 1)?;
        Ok(Some(last))
    }
}

#[cfg(test)]
mod tests {
    use super::GameRecord;
    use crate::errors::BoardError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{Move, MoveFlag};

    #[test]
    fn records_and_replays_moves() {
        let mut record = GameRecord::default();
        for token in ["e2e4", "e7e5", "g1f3"] {
            record.play_long_algebraic(token).expect("move should play");
        }

        assert_eq!(record.moves().len(), 3);
        assert_eq!(record.to_long_algebraic(), "e2e4 e7e5 g1f3");
        assert_eq!(
            record.current().get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        assert_eq!(record.start().get_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn compact_moves_play_into_the_same_position() {
        let mut by_lan = GameRecord::default();
        by_lan.play_long_algebraic("e2e4").expect("plays");
        by_lan.play_long_algebraic("c7c5").expect("plays");

        let compact = by_lan.to_compact().expect("encodes");
        let mut by_compact = GameRecord::default();
        by_compact.play_compact(&compact[0..2]).expect("plays");
        by_compact.play_compact(&compact[2..4]).expect("plays");

        assert_eq!(by_compact, by_lan);
    }

    #[test]
    fn rewind_and_undo() {
        let mut record = GameRecord::default();
        for token in ["d2d4", "d7d5", "c2c4", "e7e6"] {
            record.play_long_algebraic(token).expect("move should play");
        }
        let after_two = {
            let mut game = GameState::new_game();
            game.make_move(record.moves()[0]).expect("applies");
            game.make_move(record.moves()[1]).expect("applies");
            game
        };

        record.rewind(2).expect("rewind within range");
        assert_eq!(record.current(), &after_two);
        assert_eq!(record.to_long_algebraic(), "d2d4 d7d5");

        assert_eq!(record.undo().expect("undo").map(|mv| mv.raw()), Some(Move::new(51, 35, MoveFlag::DoublePawnPush).raw()));
        assert_eq!(record.undo().expect("undo").map(|mv| mv.to()), Some(27));
        assert_eq!(record.undo().expect("undo"), None);
        assert_eq!(record.current().get_fen(), STARTING_POSITION_FEN);

        assert!(matches!(record.rewind(1), Err(BoardError::InvalidArgument(_))));
    }

    #[test]
    fn failed_move_is_not_recorded() {
        let mut record = GameRecord::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(record.play_long_algebraic("a2a4").is_err());
        assert!(record.moves().is_empty());
        assert_eq!(record.current(), record.start());
    }
}
