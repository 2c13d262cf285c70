//! Command parsing and execution.

use std::path::{Path, PathBuf};

use chess_core::{blob, notation, pgn, Editor, Game, GameNode, GameViewer, VariationPointer};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;

pub const USAGE: &str = "\
Usage:
  annotator import <file.pgn> [--default-move N]
  annotator import-dir <dir>
  annotator show <blob.json> [--ply N] [--variation PARENT:SELECTOR:OFFSET]
  annotator export <blob.json>";

/// Which position `show` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Default,
    Ply(usize),
    Variation {
        pointer: VariationPointer,
        offset: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Import {
        path: PathBuf,
        default_move: Option<usize>,
    },
    ImportDir {
        dir: PathBuf,
    },
    Show {
        path: PathBuf,
        selection: Selection,
    },
    Export {
        path: PathBuf,
    },
}

fn parse_number(flag: &str, value: Option<&String>) -> Result<usize, AppError> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| AppError::Usage(format!("{flag} expects a number")))
}

fn parse_variation(value: Option<&String>) -> Result<Selection, AppError> {
    let bad = || AppError::Usage("--variation expects PARENT:SELECTOR:OFFSET".to_string());
    let parts: Vec<usize> = value
        .ok_or_else(bad)?
        .split(':')
        .map(|p| p.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| bad())?;
    match parts.as_slice() {
        [parent, selector, offset] => Ok(Selection::Variation {
            pointer: VariationPointer::new(*parent, *selector),
            offset: *offset,
        }),
        _ => Err(bad()),
    }
}

impl Command {
    /// Parse arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Command, AppError> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| AppError::Usage("missing command".to_string()))?;
        let target = rest
            .first()
            .map(PathBuf::from)
            .ok_or_else(|| AppError::Usage(format!("{name} expects a path")))?;

        let mut default_move = None;
        let mut selection = Selection::Default;

        let mut i = 1;
        while i < rest.len() {
            match rest[i].as_str() {
                "--default-move" if name == "import" => {
                    default_move = Some(parse_number("--default-move", rest.get(i + 1))?);
                    i += 2;
                }
                "--ply" if name == "show" => {
                    selection = Selection::Ply(parse_number("--ply", rest.get(i + 1))?);
                    i += 2;
                }
                "--variation" if name == "show" => {
                    selection = parse_variation(rest.get(i + 1))?;
                    i += 2;
                }
                other => return Err(AppError::Usage(format!("unexpected argument: {other}"))),
            }
        }

        match name.as_str() {
            "import" => Ok(Command::Import {
                path: target,
                default_move,
            }),
            "import-dir" => Ok(Command::ImportDir { dir: target }),
            "show" => Ok(Command::Show {
                path: target,
                selection,
            }),
            "export" => Ok(Command::Export { path: target }),
            other => Err(AppError::Usage(format!("unknown command: {other}"))),
        }
    }
}

async fn read_text(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn render_blob(config: &Config, game: &Game) -> Result<String, AppError> {
    let text = if config.pretty {
        blob::to_blob_pretty(game)?
    } else {
        blob::to_blob(game)?
    };
    Ok(text)
}

/// Import one transcript file and return its game.
pub async fn import_game(path: &Path, default_move: Option<usize>) -> Result<Game, AppError> {
    let text = read_text(path).await?;
    if let Some(event) = pgn::extract_header(&text, "Event") {
        info!(path = %path.display(), event = %event, "Importing transcript");
    }

    let editor = Editor::new()
        .import_transcript(&text)
        .map_err(|source| AppError::Import {
            path: path.to_path_buf(),
            source,
        })?;

    let editor = match default_move {
        Some(ply) if ply > editor.game().main_line.len() => {
            return Err(AppError::Usage(format!(
                "--default-move {ply} is past the end of a {}-move game",
                editor.game().main_line.len()
            )));
        }
        Some(ply) => editor.go_to(ply).mark_default_display(),
        None => editor,
    };

    info!(
        path = %path.display(),
        plies = editor.game().main_line.len(),
        "Imported transcript"
    );
    Ok(editor.game().clone())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

/// Import every `*.pgn` in `dir`, writing `<name>.json` next to each.
/// A bad transcript is logged and skipped.
pub async fn import_dir(config: &Config, dir: &Path) -> Result<ImportSummary, AppError> {
    let pattern = format!("{}/*.pgn", dir.display());
    let files: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(|p| p.ok()).collect();

    if files.is_empty() {
        warn!("No transcripts found in {}", dir.display());
    }

    let mut summary = ImportSummary::default();
    for path in &files {
        let game = match import_game(path, None).await {
            Ok(game) => game,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                summary.failed += 1;
                continue;
            }
        };
        let out = path.with_extension("json");
        tokio::fs::write(&out, render_blob(config, &game)?)
            .await
            .map_err(|source| AppError::Write {
                path: out.clone(),
                source,
            })?;
        summary.imported += 1;
    }

    info!(
        imported = summary.imported,
        failed = summary.failed,
        "Finished importing {}",
        dir.display()
    );
    Ok(summary)
}

fn select(viewer: &mut GameViewer, selection: Selection) -> Result<(), AppError> {
    match selection {
        Selection::Default => {}
        Selection::Ply(ply) => {
            if ply > viewer.game().main_line.len() {
                return Err(AppError::Usage(format!("no main-line ply {ply}")));
            }
            viewer.select_main(ply);
        }
        Selection::Variation { pointer, offset } => {
            let found = viewer.select_variation_move(pointer, offset.saturating_sub(1));
            if !found {
                return Err(AppError::Usage(format!(
                    "no variation {}:{} with a move {offset}",
                    pointer.parent_index, pointer.variation_selector
                )));
            }
            if offset == 0 {
                viewer.rewind();
            }
        }
    }
    Ok(())
}

/// Describe the selected position of a stored game: players, FEN, side to
/// move and the move list. Corrupt blobs print their raw text instead.
pub fn describe(config: &Config, text: &str, selection: Selection) -> Result<String, AppError> {
    let game = match GameNode::from_text(text) {
        GameNode::Game(game) => game,
        GameNode::Corrupt { raw, reason } => {
            warn!("Showing raw content of unreadable game: {reason}");
            return Ok(raw);
        }
    };

    let mut viewer = GameViewer::new(game);
    select(&mut viewer, selection)?;

    let game = viewer.game();
    let to_move = if viewer.white_to_move()? { "White" } else { "Black" };
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n", game.white_player, game.black_player));
    out.push_str(&format!("FEN: {}\n", viewer.fen()?));
    out.push_str(&format!("To move: {to_move}\n"));
    out.push_str(&notation::move_list_text(game, config.locale));
    out.push('\n');
    Ok(out)
}

pub async fn run(config: &Config, command: Command) -> Result<String, AppError> {
    match command {
        Command::Import { path, default_move } => {
            let game = import_game(&path, default_move).await?;
            render_blob(config, &game)
        }
        Command::ImportDir { dir } => {
            let summary = import_dir(config, &dir).await?;
            Ok(format!(
                "{} imported, {} failed",
                summary.imported, summary.failed
            ))
        }
        Command::Show { path, selection } => {
            let text = read_text(&path).await?;
            describe(config, &text, selection)
        }
        Command::Export { path } => {
            let text = read_text(&path).await?;
            let game = blob::from_blob(&text)?;
            Ok(pgn::export_transcript(&game))
        }
    }
}
