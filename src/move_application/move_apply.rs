//! Move applier: the state transition from one position to the next.
//!
//! Only structure is checked (there must be a piece on the source square).
//! King safety, blocked paths and turn order are not validated; callers that
//! need legality put a checker in front of this.

use tracing::{debug, trace};

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::ROOK_HOME_SQUARES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{Move, MoveFlag};
use crate::utils::algebraic::{square_file, square_rank};

impl GameState {
    /// Apply `mv` in place. See [`apply_move`].
    pub fn make_move(&mut self, mv: Move) -> BoardResult<()> {
        apply_move(self, mv)
    }
}

pub fn apply_move(game_state: &mut GameState, mv: Move) -> BoardResult<()> {
    let from = mv.from();
    let to = mv.to();
    let flag = mv.flag();

    let Some((mover, moved_kind)) = game_state.piece_at(from).piece() else {
        return Err(BoardError::InvalidArgument(format!("no piece on from-square {from}")));
    };
    if from == to {
        return Err(BoardError::InvalidArgument(format!("move {from}->{to} does not leave its square")));
    }

    let enemy_pawn = PieceCode::new(mover.opposite(), PieceKind::Pawn);

    // Resolve the capture square before anything moves.
    let en_passant_square = (flag == MoveFlag::EnPassant
        && moved_kind == PieceKind::Pawn
        && game_state.piece_at(to).is_empty())
    .then(|| match mover {
        Color::Light => to.checked_sub(8),
        Color::Dark => to.checked_add(8).filter(|sq| *sq < 64),
    })
    .flatten()
    .filter(|sq| game_state.piece_at(*sq) == enemy_pawn);

    let captured = game_state.take_piece(en_passant_square.unwrap_or(to));
    game_state.relocate_piece(from, to);

    if moved_kind == PieceKind::King {
        game_state.castling_rights &= !(kingside_right(mover) | queenside_right(mover));

        if flag == MoveFlag::Castle {
            castle_rook(game_state, mover, to);
        }
    }

    if let Some(promoted) = mv.promotion_kind() {
        if moved_kind == PieceKind::Pawn {
            game_state.take_piece(to);
            game_state.put_piece(to, PieceCode::new(mover, promoted));
        }
    }

    let double_push = flag == MoveFlag::DoublePawnPush
        && moved_kind == PieceKind::Pawn
        && square_file(from) == square_file(to)
        && square_rank(from).abs_diff(square_rank(to)) == 2;
    let enemy_alongside = (square_file(to) > 0 && game_state.piece_at(to - 1) == enemy_pawn)
        || (square_file(to) < 7 && game_state.piece_at(to + 1) == enemy_pawn);

    game_state.double_push_file = double_push.then_some(square_file(from));
    game_state.en_passant_file = (double_push && enemy_alongside).then_some(square_file(from));

    for (rook_home, right) in ROOK_HOME_SQUARES {
        if from == rook_home || to == rook_home {
            game_state.castling_rights &= !right;
        }
    }

    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.ply = game_state.ply.saturating_add(1);

    if moved_kind == PieceKind::Pawn || !captured.is_empty() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }

    debug_assert!(game_state.indices_consistent(), "indices drifted from mailbox");
    trace!(
        from,
        to,
        ?flag,
        captured = captured.raw(),
        ply = game_state.ply,
        "applied move"
    );

    Ok(())
}

/// Move the castling rook next to a king that just landed on `king_to`.
fn castle_rook(game_state: &mut GameState, color: Color, king_to: Square) {
    let (rook_from, rook_to) = match square_file(king_to) {
        6 => (king_to + 1, king_to - 1),
        2 => (king_to - 2, king_to + 1),
        _ => {
            debug!(king_to, "castle flag on a king move that does not land on c or g file");
            return;
        }
    };

    let rook = PieceCode::new(color, PieceKind::Rook);
    if game_state.piece_at(rook_from) != rook || !game_state.piece_at(rook_to).is_empty() {
        debug!(rook_from, rook_to, "no rook to castle with");
        return;
    }

    game_state.relocate_piece(rook_from, rook_to);
}
