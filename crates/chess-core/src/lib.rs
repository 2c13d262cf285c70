//! Annotated chess games for club articles.
//!
//! A game is a main line of SAN moves, each of which may carry a comment,
//! a strength symbol and alternative lines. Boards are never stored: the
//! [`replay`] module derives every position from notation. [`editor`] builds
//! games, [`viewer`] browses them, [`pgn`] imports and exports transcripts,
//! and [`blob`] is the JSON form embedded in article documents.

pub mod blob;
pub mod editor;
pub mod error;
pub mod game_data;
pub mod notation;
pub mod pgn;
pub mod replay;
pub mod viewer;

pub use blob::GameNode;
pub use editor::{Editor, Mode};
pub use error::{BlobError, ImportError, ReplayError, SubmitError};
pub use game_data::{Cursor, Game, GameResult, Move, MoveList, Strength, VariationPointer};
pub use notation::NotationLocale;
pub use viewer::GameViewer;
