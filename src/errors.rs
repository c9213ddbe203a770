//! Errors used throughout the board library.
//!
//! `BoardError` is the single error type returned by the codecs, the position
//! store and the move applier. Codec violations are detected eagerly during
//! import and never leave a `GameState` partially updated, so callers can
//! report the error and keep using the previous position.

use thiserror::Error;

/// Unified error type for the board library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// FEN or compact text does not match the expected grammar.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Castling field contains characters other than `KQkq`, duplicates, or
    /// is empty.
    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    /// En-passant target is on the wrong rank for the side to move, or no
    /// enemy pawn stands behind it.
    #[error("invalid en passant target: {0}")]
    InvalidEnPassantTarget(String),

    /// Out-of-range square, invalid piece type/color pair, or a value that
    /// cannot be represented in the requested format.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A move or square token could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Compact transport text could not be decoded.
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
