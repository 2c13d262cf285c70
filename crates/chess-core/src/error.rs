//! Error types for the game-annotation core.

use thiserror::Error;

/// Why a transcript was rejected. Import is all-or-nothing: any of these
/// means no part of the transcript reached the move tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("transcript contains no moves")]
    Empty,

    #[error("transcript does not start from the standard position")]
    NonStandardStart,

    #[error("malformed movetext at byte {offset}: {token:?}")]
    Malformed { offset: usize, token: String },

    #[error("illegal or unreadable move {san:?} at ply {ply}")]
    IllegalMove { ply: usize, san: String },
}

/// Failure to derive a position from a move list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("cursor {cursor} is past the end of a {len}-move line")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("no move at main-line index {0}")]
    NoSuchMove(usize),

    #[error("move {parent_index} has no variation {selector}")]
    NoSuchVariation { parent_index: usize, selector: usize },

    #[error("offset {offset} is past the end of a {len}-move variation")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("unreadable notation {san:?} at ply {ply}")]
    InvalidSan { ply: usize, san: String },

    #[error("illegal move {san:?} at ply {ply}")]
    IllegalMove { ply: usize, san: String },

    #[error("default display index {index} is past the end of a {len}-move line")]
    DefaultIndexOutOfRange { index: usize, len: usize },
}

/// Failure to read or write the embedded game blob.
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("game does not replay: {0}")]
    Replay(#[from] ReplayError),
}

/// Reasons the editor refuses to hand out a finished game.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("white player is not set")]
    MissingWhite,

    #[error("black player is not set")]
    MissingBlack,

    #[error("result is not set")]
    MissingResult,

    #[error("game has no moves")]
    NoMoves,

    #[error("a variation is still being edited")]
    VariationInProgress,

    #[error("default display index {index} is past the end of a {len}-move line")]
    DefaultIndexOutOfRange { index: usize, len: usize },
}
