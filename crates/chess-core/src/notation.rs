//! Move-list rendering and localized piece letters.
//!
//! Localization is display-only. Stored notation is always canonical English
//! SAN; nothing produced by [`localize_san`] should be fed back into a game.

use std::fmt;
use std::str::FromStr;

use crate::game_data::{Game, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotationLocale {
    #[default]
    English,
    Czech,
    German,
}

impl NotationLocale {
    /// Localized letter for an English piece letter. Other characters pass through.
    fn piece_letter(self, c: char) -> char {
        match (self, c) {
            (NotationLocale::English, _) => c,
            (NotationLocale::Czech, 'Q') => 'D',
            (NotationLocale::Czech, 'R') => 'V',
            (NotationLocale::Czech, 'B') => 'S',
            (NotationLocale::Czech, 'N') => 'J',
            (NotationLocale::German, 'Q') => 'D',
            (NotationLocale::German, 'R') => 'T',
            (NotationLocale::German, 'B') => 'L',
            (NotationLocale::German, 'N') => 'S',
            _ => c,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            NotationLocale::English => "en",
            NotationLocale::Czech => "cs",
            NotationLocale::German => "de",
        }
    }
}

impl FromStr for NotationLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(NotationLocale::English),
            "cs" | "cz" | "czech" => Ok(NotationLocale::Czech),
            "de" | "german" => Ok(NotationLocale::German),
            other => Err(format!("unknown notation locale: {other}")),
        }
    }
}

impl fmt::Display for NotationLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Replace piece letters (K, Q, R, B, N) with the locale's letters.
pub fn localize_san(san: &str, locale: NotationLocale) -> String {
    san.chars().map(|c| locale.piece_letter(c)).collect()
}

/// Move-number label for the ply at 0-based `ply_index`: `"3."` before a
/// white move, `"3..."` before a black move that opens a line or follows
/// an interruption, nothing otherwise.
pub fn move_label(ply_index: usize, interrupted: bool) -> Option<String> {
    let number = ply_index / 2 + 1;
    if ply_index % 2 == 0 {
        Some(format!("{number}."))
    } else if interrupted {
        Some(format!("{number}..."))
    } else {
        None
    }
}

/// How moves and their annotations are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovetextStyle {
    /// Canonical PGN: `$n` glyphs and `{}` comments.
    Pgn,
    /// Reading form: localized letters, symbols glued to the move, quoted comments.
    Display(NotationLocale),
}

impl MovetextStyle {
    fn move_tokens(self, mv: &Move, tokens: &mut Vec<String>) {
        match self {
            MovetextStyle::Pgn => {
                tokens.push(mv.san.clone());
                if let Some(nag) = mv.strength.nag() {
                    tokens.push(format!("${nag}"));
                }
                if !mv.comment.is_empty() {
                    tokens.push(format!("{{{}}}", mv.comment.replace('}', "")));
                }
            }
            MovetextStyle::Display(locale) => {
                tokens.push(format!(
                    "{}{}",
                    localize_san(&mv.san, locale),
                    mv.strength.symbol()
                ));
                if !mv.comment.is_empty() {
                    tokens.push(format!("\"{}\"", mv.comment));
                }
            }
        }
    }
}

const OPEN: &str = "(";
const CLOSE: &str = ")";

fn line_tokens(
    moves: &[Move],
    first_ply: usize,
    with_variations: bool,
    style: MovetextStyle,
    tokens: &mut Vec<String>,
) {
    let mut interrupted = true;
    for (i, mv) in moves.iter().enumerate() {
        let ply = first_ply + i;
        if let Some(label) = move_label(ply, interrupted) {
            tokens.push(label);
        }
        style.move_tokens(mv, tokens);
        interrupted = !mv.comment.is_empty();

        if with_variations {
            for variation in mv.variations.iter().filter(|v| !v.is_empty()) {
                tokens.push(OPEN.to_string());
                // One level only: alternatives are never nested further.
                line_tokens(variation, ply, false, style, tokens);
                tokens.push(CLOSE.to_string());
                interrupted = true;
            }
        }
    }
}

/// Render a main line with its variations as space-separated movetext,
/// breaking lines before they exceed `width` when given.
pub fn write_movetext(main_line: &[Move], style: MovetextStyle, width: Option<usize>) -> String {
    let mut tokens = Vec::new();
    line_tokens(main_line, 0, true, style, &mut tokens);
    join_tokens(&tokens, width)
}

pub(crate) fn join_tokens(tokens: &[String], width: Option<usize>) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    let mut prev: Option<&str> = None;

    for token in tokens {
        let token_len = token.chars().count();
        let glued = prev == Some(OPEN) || token == CLOSE;
        if prev.is_some() && !glued {
            if width.is_some_and(|w| line_len + 1 + token_len > w) {
                out.push('\n');
                line_len = 0;
            } else {
                out.push(' ');
                line_len += 1;
            }
        }
        out.push_str(token);
        line_len += token_len;
        prev = Some(token.as_str());
    }
    out
}

/// Human-readable move list as shown under the board.
pub fn move_list_text(game: &Game, locale: NotationLocale) -> String {
    let mut text = write_movetext(&game.main_line, MovetextStyle::Display(locale), None);
    if game.result.is_set() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(game.result.as_str());
    }
    text
}
