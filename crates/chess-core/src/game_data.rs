use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::error::SubmitError;

/// Move-strength annotation shown next to a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strength {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "??")]
    Blunder,
    #[serde(rename = "?")]
    Mistake,
    #[serde(rename = "?!")]
    Dubious,
    #[serde(rename = "!?")]
    Interesting,
    #[serde(rename = "!")]
    Good,
    #[serde(rename = "!!")]
    Brilliant,
}

impl Strength {
    pub const ALL: [Strength; 7] = [
        Strength::None,
        Strength::Blunder,
        Strength::Mistake,
        Strength::Dubious,
        Strength::Interesting,
        Strength::Good,
        Strength::Brilliant,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Strength::None => "",
            Strength::Blunder => "??",
            Strength::Mistake => "?",
            Strength::Dubious => "?!",
            Strength::Interesting => "!?",
            Strength::Good => "!",
            Strength::Brilliant => "!!",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Strength> {
        Strength::ALL.into_iter().find(|s| s.symbol() == symbol)
    }

    /// Standard PGN numeric annotation glyph ($1..$6), if any.
    pub fn nag(self) -> Option<u8> {
        match self {
            Strength::None => None,
            Strength::Good => Some(1),
            Strength::Mistake => Some(2),
            Strength::Brilliant => Some(3),
            Strength::Blunder => Some(4),
            Strength::Interesting => Some(5),
            Strength::Dubious => Some(6),
        }
    }

    pub fn from_nag(nag: u8) -> Option<Strength> {
        Strength::ALL.into_iter().find(|s| s.nag() == Some(nag))
    }
}

/// Game result as offered by the editor's result picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    #[serde(rename = "", alias = "*")]
    Unset,
    #[serde(rename = "1-0")]
    WhiteWins,
    #[serde(rename = "0-1")]
    BlackWins,
    #[serde(rename = "1/2", alias = "1/2-1/2")]
    Draw,
}

impl GameResult {
    /// Map a PGN `Result` value. `*` and anything unrecognised is `Unset`.
    pub fn from_tag(value: &str) -> GameResult {
        match value.trim() {
            "1-0" => GameResult::WhiteWins,
            "0-1" => GameResult::BlackWins,
            "1/2-1/2" | "1/2" | "½-½" => GameResult::Draw,
            _ => GameResult::Unset,
        }
    }

    /// Short form used in the blob and on screen.
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::Unset => "",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2",
        }
    }

    /// Full PGN marker.
    pub fn pgn_marker(self) -> &'static str {
        match self {
            GameResult::Unset => "*",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }

    pub fn is_set(self) -> bool {
        self != GameResult::Unset
    }
}

/// A single ply with its annotations and any alternatives to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Move {
    pub san: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub strength: Strength,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<MoveList>,
}

impl Move {
    pub fn new(san: impl Into<String>) -> Self {
        Self {
            san: san.into(),
            ..Self::default()
        }
    }

    pub fn has_annotation(&self) -> bool {
        !self.comment.is_empty() || self.strength != Strength::None
    }
}

/// Main line or one variation.
pub type MoveList = Vec<Move>;

/// A recorded game as embedded in an article.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "moves", default)]
    pub main_line: MoveList,
    #[serde(rename = "white", default)]
    pub white_player: String,
    #[serde(rename = "black", default)]
    pub black_player: String,
    #[serde(default)]
    pub result: GameResult,
    #[serde(rename = "defaultMove", default)]
    pub default_display_index: usize,
}

impl Game {
    pub fn main_line_sans(&self) -> Vec<String> {
        self.main_line.iter().map(|m| m.san.clone()).collect()
    }

    pub fn variation(&self, pointer: VariationPointer) -> Option<&MoveList> {
        self.main_line
            .get(pointer.parent_index)?
            .variations
            .get(pointer.variation_selector)
    }

    /// Check the fields the editor requires before a game can be inserted.
    pub fn validate_for_submission(&self) -> Result<(), SubmitError> {
        if self.white_player.trim().is_empty() {
            return Err(SubmitError::MissingWhite);
        }
        if self.black_player.trim().is_empty() {
            return Err(SubmitError::MissingBlack);
        }
        if !self.result.is_set() {
            return Err(SubmitError::MissingResult);
        }
        if self.main_line.is_empty() {
            return Err(SubmitError::NoMoves);
        }
        if self.default_display_index > self.main_line.len() {
            return Err(SubmitError::DefaultIndexOutOfRange {
                index: self.default_display_index,
                len: self.main_line.len(),
            });
        }
        Ok(())
    }
}

/// Names one variation: the main-line move it replaces and which of that
/// move's alternatives is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariationPointer {
    pub parent_index: usize,
    pub variation_selector: usize,
}

impl VariationPointer {
    pub fn new(parent_index: usize, variation_selector: usize) -> Self {
        Self {
            parent_index,
            variation_selector,
        }
    }

    /// Side that plays the first move of the variation.
    pub fn first_mover(self) -> Color {
        if self.parent_index % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Which position is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Number of main-line plies played.
    MainLine(usize),
    /// Position after `offset` moves of the pointed-to variation.
    Variation {
        pointer: VariationPointer,
        offset: usize,
    },
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::MainLine(0)
    }
}
