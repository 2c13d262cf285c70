//! Position replay engine.
//!
//! Positions are never stored. Every board shown by the editor or viewer is
//! rebuilt here by replaying SAN from the standard starting position, so a
//! move list is the single source of truth for what the board looks like.

use shakmaty::{fen::Fen, san::SanPlus, Chess, EnPassantMode, Position};

use crate::error::ReplayError;
use crate::game_data::{Cursor, Game, Move, VariationPointer};

/// Replay moves in order from the starting position.
pub fn replay<'a, I>(moves: I) -> Result<Chess, ReplayError>
where
    I: IntoIterator<Item = &'a Move>,
{
    let mut pos = Chess::default();
    for (i, mv) in moves.into_iter().enumerate() {
        play_san(&mut pos, &mv.san, i + 1)?;
    }
    Ok(pos)
}

/// Apply one SAN move to `pos`. `ply` is only used for error reporting.
pub(crate) fn play_san(pos: &mut Chess, san: &str, ply: usize) -> Result<(), ReplayError> {
    let san_plus: SanPlus = san.parse().map_err(|_| ReplayError::InvalidSan {
        ply,
        san: san.to_string(),
    })?;
    let mv = san_plus
        .san
        .to_move(&*pos)
        .map_err(|_| ReplayError::IllegalMove {
            ply,
            san: san.to_string(),
        })?;
    pos.play_unchecked(mv);
    Ok(())
}

/// Position after the first `cursor` main-line moves.
pub fn compute_position(main_line: &[Move], cursor: usize) -> Result<Chess, ReplayError> {
    if cursor > main_line.len() {
        return Err(ReplayError::CursorOutOfRange {
            cursor,
            len: main_line.len(),
        });
    }
    replay(&main_line[..cursor])
}

/// Position after `offset` moves of a variation. The main line is replayed
/// up to (not including) the move the variation replaces.
pub fn compute_variation_position(
    main_line: &[Move],
    pointer: VariationPointer,
    offset: usize,
) -> Result<Chess, ReplayError> {
    let parent = main_line
        .get(pointer.parent_index)
        .ok_or(ReplayError::NoSuchMove(pointer.parent_index))?;
    let variation = parent
        .variations
        .get(pointer.variation_selector)
        .ok_or(ReplayError::NoSuchVariation {
            parent_index: pointer.parent_index,
            selector: pointer.variation_selector,
        })?;
    if offset > variation.len() {
        return Err(ReplayError::OffsetOutOfRange {
            offset,
            len: variation.len(),
        });
    }
    replay(
        main_line[..pointer.parent_index]
            .iter()
            .chain(&variation[..offset]),
    )
}

pub fn compute_cursor_position(main_line: &[Move], cursor: &Cursor) -> Result<Chess, ReplayError> {
    match *cursor {
        Cursor::MainLine(ply) => compute_position(main_line, ply),
        Cursor::Variation { pointer, offset } => {
            compute_variation_position(main_line, pointer, offset)
        }
    }
}

pub fn fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Check that the main line and every variation replay legally and that the
/// default display index lies on the main line.
pub fn validate_game(game: &Game) -> Result<(), ReplayError> {
    let len = game.main_line.len();
    compute_position(&game.main_line, len)?;

    for (parent_index, mv) in game.main_line.iter().enumerate() {
        for (selector, variation) in mv.variations.iter().enumerate() {
            let pointer = VariationPointer::new(parent_index, selector);
            compute_variation_position(&game.main_line, pointer, variation.len())?;
        }
    }

    if game.default_display_index > len {
        return Err(ReplayError::DefaultIndexOutOfRange {
            index: game.default_display_index,
            len,
        });
    }
    Ok(())
}
