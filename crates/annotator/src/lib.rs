//! Command-line front end for importing, browsing and exporting annotated
//! games.

pub mod commands;
pub mod config;
pub mod error;
