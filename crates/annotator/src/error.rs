//! CLI error types

use std::path::PathBuf;

use chess_core::{BlobError, ImportError, ReplayError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot import {}: {source}", path.display())]
    Import {
        path: PathBuf,
        source: ImportError,
    },

    #[error("Invalid game blob: {0}")]
    Blob(#[from] BlobError),

    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    #[error("Bad file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
