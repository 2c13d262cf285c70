//! Read-only browsing of an embedded game.

use shakmaty::{Chess, Color, Position};

use crate::error::ReplayError;
use crate::game_data::{Cursor, Game, MoveList, VariationPointer};
use crate::replay;

/// Navigation state over a game that is never modified.
#[derive(Debug, Clone)]
pub struct GameViewer {
    game: Game,
    cursor: Cursor,
}

impl GameViewer {
    /// Open at the game's default display position.
    pub fn new(game: Game) -> Self {
        let start = game.default_display_index.min(game.main_line.len());
        Self {
            game,
            cursor: Cursor::MainLine(start),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn in_variation(&self) -> bool {
        matches!(self.cursor, Cursor::Variation { .. })
    }

    fn active_variation(&self, pointer: VariationPointer) -> Option<&MoveList> {
        self.game.variation(pointer)
    }

    /// Length of the line the cursor is moving along.
    fn line_len(&self) -> usize {
        match self.cursor {
            Cursor::MainLine(_) => self.game.main_line.len(),
            Cursor::Variation { pointer, .. } => {
                self.active_variation(pointer).map_or(0, |v| v.len())
            }
        }
    }

    fn set_offset(&mut self, to: usize) {
        let to = to.min(self.line_len());
        self.cursor = match self.cursor {
            Cursor::MainLine(_) => Cursor::MainLine(to),
            Cursor::Variation { pointer, .. } => Cursor::Variation { pointer, offset: to },
        };
    }

    fn offset(&self) -> usize {
        match self.cursor {
            Cursor::MainLine(ply) => ply,
            Cursor::Variation { offset, .. } => offset,
        }
    }

    pub fn step_forward(&mut self) {
        self.set_offset(self.offset() + 1);
    }

    pub fn step_back(&mut self) {
        self.set_offset(self.offset().saturating_sub(1));
    }

    /// Back to the start of the current line.
    pub fn rewind(&mut self) {
        self.set_offset(0);
    }

    pub fn at_start(&self) -> bool {
        self.offset() == 0
    }

    pub fn at_end(&self) -> bool {
        self.offset() == self.line_len()
    }

    /// Jump to a main-line ply; ignored while a variation is being browsed.
    pub fn select_main(&mut self, ply: usize) {
        if let Cursor::MainLine(_) = self.cursor {
            self.set_offset(ply);
        }
    }

    /// Show the position after move `move_index` of a variation. Returns
    /// false when the pointer or index does not exist.
    pub fn select_variation_move(&mut self, pointer: VariationPointer, move_index: usize) -> bool {
        match self.active_variation(pointer) {
            Some(variation) if move_index < variation.len() => {
                self.cursor = Cursor::Variation {
                    pointer,
                    offset: move_index + 1,
                };
                true
            }
            _ => false,
        }
    }

    /// Leave a variation, landing just after the move it was an alternative to.
    pub fn exit_variation(&mut self) {
        if let Cursor::Variation { pointer, .. } = self.cursor {
            self.cursor = Cursor::MainLine(pointer.parent_index + 1);
        }
    }

    pub fn position(&self) -> Result<Chess, ReplayError> {
        replay::compute_cursor_position(&self.game.main_line, &self.cursor)
    }

    pub fn fen(&self) -> Result<String, ReplayError> {
        self.position().map(|pos| replay::fen(&pos))
    }

    pub fn white_to_move(&self) -> Result<bool, ReplayError> {
        self.position().map(|pos| pos.turn() == Color::White)
    }
}
