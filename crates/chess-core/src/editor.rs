//! Move-tree editor.
//!
//! An [`Editor`] is a value: every operation borrows the current editor and
//! returns the next one, leaving the receiver untouched. Two modes exist,
//! browsing/extending the main line and drafting a variation; the draft only
//! becomes part of the game on [`Editor::commit_variation`].

use shakmaty::{san::SanPlus, uci::UciMove, Chess, Color, Position, Role, Square};

use crate::error::{ImportError, ReplayError, SubmitError};
use crate::game_data::{Game, GameResult, Move, MoveList, Strength, VariationPointer};
use crate::pgn;
use crate::replay;

/// Alternative line being recorded against one main-line move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationDraft {
    /// Main-line index of the move this draft replaces.
    pub parent_index: usize,
    pub moves: MoveList,
    resume_cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    MainLine,
    Variation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Editor {
    game: Game,
    cursor: usize,
    draft: Option<VariationDraft>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing game with the cursor at the main-line tip.
    pub fn from_game(game: Game) -> Self {
        let cursor = game.main_line.len();
        Self {
            game,
            cursor,
            draft: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Main-line cursor: number of plies shown on the main board.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn draft(&self) -> Option<&VariationDraft> {
        self.draft.as_ref()
    }

    pub fn mode(&self) -> Mode {
        if self.draft.is_some() {
            Mode::Variation
        } else {
            Mode::MainLine
        }
    }

    /// The list that moves are appended to and undone from.
    pub fn active_line(&self) -> &[Move] {
        match &self.draft {
            Some(draft) => &draft.moves,
            None => &self.game.main_line,
        }
    }

    /// Position on display: the main-line cursor, or the tip of the draft.
    pub fn position(&self) -> Result<Chess, ReplayError> {
        match &self.draft {
            Some(draft) => replay::replay(
                self.game.main_line[..draft.parent_index]
                    .iter()
                    .chain(&draft.moves),
            ),
            None => replay::compute_position(&self.game.main_line, self.cursor),
        }
    }

    pub fn fen(&self) -> Result<String, ReplayError> {
        self.position().map(|pos| replay::fen(&pos))
    }

    pub fn turn(&self) -> Result<Color, ReplayError> {
        self.position().map(|pos| pos.turn())
    }

    fn tip_position(&self) -> Result<Chess, ReplayError> {
        match &self.draft {
            Some(_) => self.position(),
            None => replay::replay(&self.game.main_line),
        }
    }

    fn with(&self, edit: impl FnOnce(&mut Editor)) -> Editor {
        let mut next = self.clone();
        edit(&mut next);
        next
    }

    /// Play `from`-`to` at the tip of the active line. Illegal gestures leave
    /// the editor unchanged. A pawn reaching the last rank without an explicit
    /// `promotion` becomes a queen.
    pub fn apply_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Editor {
        let pos = match self.tip_position() {
            Ok(pos) => pos,
            Err(e) => {
                tracing::warn!("Cannot replay active line: {e}");
                return self.clone();
            }
        };

        let Some(mv) = resolve_move(&pos, from, to, promotion) else {
            tracing::debug!(%from, %to, "Rejected illegal move");
            return self.clone();
        };
        let san = SanPlus::from_move(pos, mv).to_string();

        self.with(|next| match &mut next.draft {
            Some(draft) => draft.moves.push(Move::new(san)),
            None => {
                next.game.main_line.push(Move::new(san));
                next.cursor = next.game.main_line.len();
            }
        })
    }

    /// Drop the last move of the active line. The board is re-derived by
    /// replay, so nothing else needs rewinding.
    pub fn undo_last_move(&self) -> Editor {
        if self.active_line().is_empty() {
            return self.clone();
        }
        self.with(|next| match &mut next.draft {
            Some(draft) => {
                draft.moves.pop();
            }
            None => {
                next.game.main_line.pop();
                let len = next.game.main_line.len();
                next.cursor = next.cursor.min(len);
                next.game.default_display_index = next.game.default_display_index.min(len);
            }
        })
    }

    /// Set comment and strength of the newest move in the active line.
    pub fn annotate_last_move(&self, comment: &str, strength: Strength) -> Editor {
        if self.active_line().is_empty() {
            return self.clone();
        }
        self.with(|next| {
            let line = match &mut next.draft {
                Some(draft) => &mut draft.moves,
                None => &mut next.game.main_line,
            };
            if let Some(last) = line.last_mut() {
                last.comment = comment.to_string();
                last.strength = strength;
            }
        })
    }

    /// Begin recording an alternative to the main-line move at 1-based `ply`.
    /// The draft starts from the position before that move.
    pub fn start_variation(&self, ply: usize) -> Editor {
        if self.draft.is_some() || ply == 0 || ply > self.game.main_line.len() {
            tracing::debug!(ply, "Ignored start_variation");
            return self.clone();
        }
        self.with(|next| {
            next.draft = Some(VariationDraft {
                parent_index: ply - 1,
                moves: Vec::new(),
                resume_cursor: next.cursor,
            });
        })
    }

    /// Attach the draft to its parent move and return to the main line, just
    /// after that move. Empty drafts cannot be committed.
    pub fn commit_variation(&self) -> Editor {
        match &self.draft {
            Some(draft) if !draft.moves.is_empty() => {}
            _ => return self.clone(),
        }
        self.with(|next| {
            let Some(draft) = next.draft.take() else {
                return;
            };
            if let Some(parent) = next.game.main_line.get_mut(draft.parent_index) {
                parent.variations.push(draft.moves);
                next.cursor = draft.parent_index + 1;
            }
        })
    }

    pub fn cancel_variation(&self) -> Editor {
        if self.draft.is_none() {
            return self.clone();
        }
        self.with(|next| {
            if let Some(draft) = next.draft.take() {
                next.cursor = draft.resume_cursor;
            }
        })
    }

    /// Remove every variation attached to main-line move `move_index`.
    pub fn clear_variations(&self, move_index: usize) -> Editor {
        if move_index >= self.game.main_line.len() {
            return self.clone();
        }
        self.with(|next| {
            if let Some(mv) = next.game.main_line.get_mut(move_index) {
                mv.variations.clear();
            }
        })
    }

    /// Pointer to the most recently committed variation of a move, if any.
    pub fn last_variation(&self, move_index: usize) -> Option<VariationPointer> {
        let count = self.game.main_line.get(move_index)?.variations.len();
        count
            .checked_sub(1)
            .map(|selector| VariationPointer::new(move_index, selector))
    }

    pub fn go_to(&self, ply: usize) -> Editor {
        if self.draft.is_some() {
            return self.clone();
        }
        self.with(|next| next.cursor = ply.min(next.game.main_line.len()))
    }

    pub fn step_back(&self) -> Editor {
        self.go_to(self.cursor.saturating_sub(1))
    }

    pub fn step_forward(&self) -> Editor {
        self.go_to(self.cursor + 1)
    }

    pub fn rewind(&self) -> Editor {
        self.go_to(0)
    }

    /// Make the current main-line position the one shown first in the article.
    pub fn mark_default_display(&self) -> Editor {
        if self.draft.is_some() {
            return self.clone();
        }
        self.with(|next| next.game.default_display_index = next.cursor)
    }

    pub fn with_white(&self, name: &str) -> Editor {
        self.with(|next| next.game.white_player = name.to_string())
    }

    pub fn with_black(&self, name: &str) -> Editor {
        self.with(|next| next.game.black_player = name.to_string())
    }

    pub fn with_result(&self, result: GameResult) -> Editor {
        self.with(|next| next.game.result = result)
    }

    /// Replace the whole game with an imported transcript. On error the
    /// caller keeps its current editor.
    pub fn import_transcript(&self, text: &str) -> Result<Editor, ImportError> {
        let game = pgn::import_transcript(text)?;
        Ok(Editor::from_game(game))
    }

    pub fn can_insert(&self) -> bool {
        self.insert().is_ok()
    }

    /// Finished game, ready to embed in a document.
    pub fn insert(&self) -> Result<Game, SubmitError> {
        if self.draft.is_some() {
            return Err(SubmitError::VariationInProgress);
        }
        self.game.validate_for_submission()?;
        Ok(self.game.clone())
    }
}

fn resolve_move(
    pos: &Chess,
    from: Square,
    to: Square,
    promotion: Option<Role>,
) -> Option<shakmaty::Move> {
    let uci = UciMove::Normal {
        from,
        to,
        promotion,
    };
    match uci.to_move(pos) {
        Ok(mv) => Some(mv),
        Err(_) if promotion.is_none() => UciMove::Normal {
            from,
            to,
            promotion: Some(Role::Queen),
        }
        .to_move(pos)
        .ok(),
        Err(_) => None,
    }
}
