//! PGN transcript import and export, with a regex tokenizer.
//!
//! Import is the only place untrusted notation enters a [`Game`], so it is
//! strict: every movetext token must be recognised and every move must be
//! legal, or the whole transcript is rejected.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use shakmaty::{san::SanPlus, Chess, Position};

use crate::error::ImportError;
use crate::game_data::{Game, GameResult, Move, MoveList, Strength};
use crate::notation::{self, MovetextStyle};

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Width export wraps movetext at.
const EXPORT_LINE_WIDTH: usize = 79;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\s*(\w+)\s+"((?:[^"\\]|\\.)*)"\s*\]"#).expect("tag pattern compiles")
});

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<comment>\{[^}]*\})",
        r"|(?P<open_comment>\{)",
        r"|(?P<line_comment>;[^\n]*)",
        r"|(?P<nag>\$\d+)",
        r"|(?P<open>\()",
        r"|(?P<close>\))",
        r"|(?P<result>1-0|0-1|1/2-1/2|\*)",
        r"|(?P<number>\d+\.+)",
        r"|(?P<san>(?:O-O-O|O-O|0-0-0|0-0|[KQRBN][a-h]?[1-8]?x?[a-h][1-8]|[a-h](?:x[a-h])?[1-8](?:=[QRBN])?)[+#]?)(?P<suffix>[!?]{1,2})?",
        r"|(?P<junk>\S+)",
    ))
    .expect("token pattern compiles")
});

/// Tag values the importer cares about.
#[derive(Debug, Default)]
struct Tags {
    white: Option<String>,
    black: Option<String>,
    result: Option<String>,
    setup: Option<String>,
    fen: Option<String>,
}

impl Tags {
    fn set(&mut self, key: &str, value: String) {
        match key {
            "White" => self.white = Some(value),
            "Black" => self.black = Some(value),
            "Result" => self.result = Some(value),
            "SetUp" => self.setup = Some(value),
            "FEN" => self.fen = Some(value),
            _ => {}
        }
    }

    fn non_standard_start(&self) -> bool {
        match &self.fen {
            Some(fen) => fen.trim() != STANDARD_START_FEN && self.setup.as_deref() != Some("0"),
            None => false,
        }
    }
}

/// Board state of one line being read: the main line or a variation at
/// some depth.
struct Line {
    pos: Chess,
    /// Position before the line's latest move; `None` until it has one.
    before_last: Option<Chess>,
    /// Ply number of the line's next move.
    next_ply: usize,
}

impl Line {
    fn new(pos: Chess, next_ply: usize) -> Self {
        Self {
            pos,
            before_last: None,
            next_ply,
        }
    }
}

/// Movetext walk state. `lines[0]` is the main line and `lines[d]` the
/// variation open at depth `d`. Every depth is replayed for legality; only
/// the main line and depth-1 variations are stored.
struct Builder {
    main: MoveList,
    lines: Vec<Line>,
    /// Depth-1 variation being collected, with the index of the move it replaces.
    variation: Option<(usize, MoveList)>,
    result: Option<GameResult>,
}

impl Builder {
    fn new() -> Self {
        Self {
            main: Vec::new(),
            lines: vec![Line::new(Chess::default(), 1)],
            variation: None,
            result: None,
        }
    }

    fn depth(&self) -> usize {
        self.lines.len() - 1
    }

    /// Last move of the line currently being read, if it is one we keep.
    fn last_move(&mut self) -> Option<&mut Move> {
        match self.depth() {
            0 => self.main.last_mut(),
            1 => self.variation.as_mut()?.1.last_mut(),
            _ => None,
        }
    }

    /// A variation replaces the latest move of the enclosing line.
    fn open(&mut self, offset: usize) -> Result<(), ImportError> {
        let malformed = || ImportError::Malformed {
            offset,
            token: "(".to_string(),
        };
        let enclosing = self.lines.last().ok_or_else(malformed)?;
        let start = enclosing.before_last.clone().ok_or_else(malformed)?;
        let line = Line::new(start, enclosing.next_ply - 1);

        if self.depth() == 0 {
            let parent_index = self.main.len().checked_sub(1).ok_or_else(malformed)?;
            self.variation = Some((parent_index, Vec::new()));
        }
        self.lines.push(line);
        Ok(())
    }

    fn close(&mut self, offset: usize) -> Result<(), ImportError> {
        if self.depth() == 0 {
            return Err(ImportError::Malformed {
                offset,
                token: ")".to_string(),
            });
        }
        if self.depth() == 1 {
            let finished = self.variation.take().filter(|(_, moves)| !moves.is_empty());
            if let Some((parent_index, moves)) = finished {
                if let Some(parent) = self.main.get_mut(parent_index) {
                    parent.variations.push(moves);
                }
            }
        } else {
            tracing::debug!(depth = self.depth(), "Dropped nested variation");
        }
        self.lines.pop();
        Ok(())
    }

    fn play(&mut self, san: &str, strength: Strength) -> Result<(), ImportError> {
        let depth = self.depth();
        let Some(line) = self.lines.last_mut() else {
            return Ok(());
        };
        let before = line.pos.clone();
        let canonical = play_checked(&mut line.pos, san, line.next_ply)?;
        line.before_last = Some(before);
        line.next_ply += 1;

        let mv = Move {
            strength,
            ..Move::new(canonical)
        };
        match depth {
            0 => self.main.push(mv),
            1 => {
                if let Some((_, moves)) = self.variation.as_mut() {
                    moves.push(mv);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn comment(&mut self, text: &str) {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return;
        }
        if let Some(mv) = self.last_move() {
            if mv.comment.is_empty() {
                mv.comment = text;
            } else {
                mv.comment.push(' ');
                mv.comment.push_str(&text);
            }
        }
    }

    fn nag(&mut self, nag: &str) {
        let Some(strength) = nag.parse::<u8>().ok().and_then(Strength::from_nag) else {
            return;
        };
        if let Some(mv) = self.last_move() {
            mv.strength = strength;
        }
    }
}

/// Parse and play one SAN move, returning its canonical spelling.
fn play_checked(pos: &mut Chess, san: &str, ply: usize) -> Result<String, ImportError> {
    let illegal = || ImportError::IllegalMove {
        ply,
        san: san.to_string(),
    };
    let normalized = san.replace('0', "O");
    let san_plus: SanPlus = normalized.parse().map_err(|_| illegal())?;
    let mv = san_plus.san.to_move(&*pos).map_err(|_| illegal())?;
    let canonical = SanPlus::from_move(pos.clone(), mv.clone()).to_string();
    pos.play_unchecked(mv);
    Ok(canonical)
}

/// SANs, NAGs and results must end at whitespace, a delimiter, or the end.
fn ends_cleanly(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | ')' | '{' | ';' | '$'),
    }
}

fn unescape_tag(value: &str) -> String {
    value.replace("\\\"", "\"").replace("\\\\", "\\")
}

fn escape_tag(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Read the tag-pair section. Returns the tags and the byte offset where
/// movetext starts.
fn read_tags(text: &str) -> Result<(Tags, usize), ImportError> {
    let mut tags = Tags::default();
    let mut offset = 0;

    loop {
        let rest = &text[offset..];
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();

        if !trimmed.starts_with('[') {
            return Ok((tags, offset));
        }
        let cap = TAG_RE.captures(trimmed).ok_or_else(|| ImportError::Malformed {
            offset,
            token: trimmed.lines().next().unwrap_or_default().to_string(),
        })?;
        tags.set(&cap[1], unescape_tag(&cap[2]));
        offset += cap[0].len();
    }
}

fn token_kind<'t>(cap: &Captures<'t>) -> Option<(&'static str, regex::Match<'t>)> {
    const KINDS: [&str; 10] = [
        "comment",
        "open_comment",
        "line_comment",
        "nag",
        "open",
        "close",
        "result",
        "number",
        "san",
        "junk",
    ];
    KINDS
        .iter()
        .find_map(|&kind| cap.name(kind).map(|m| (kind, m)))
}

/// Parse a transcript into a game. Players and result come from the tag
/// pairs (empty when absent); the movetext's result marker is used only
/// when there is no `Result` tag. Reading stops at the first result marker.
pub fn import_transcript(text: &str) -> Result<Game, ImportError> {
    let text = text.trim_start_matches('\u{feff}');
    let (tags, movetext_start) = read_tags(text)?;
    if tags.non_standard_start() {
        return Err(ImportError::NonStandardStart);
    }

    let mut builder = Builder::new();

    for cap in TOKEN_RE.captures_iter(&text[movetext_start..]) {
        let Some((kind, m)) = token_kind(&cap) else {
            continue;
        };
        let offset = movetext_start + m.start();
        let end = movetext_start + m.end();
        let malformed = || ImportError::Malformed {
            offset,
            token: m.as_str().to_string(),
        };

        match kind {
            "comment" => {
                let body = m.as_str();
                builder.comment(&body[1..body.len() - 1]);
            }
            "line_comment" => builder.comment(&m.as_str()[1..]),
            "nag" => {
                if !ends_cleanly(text, end) {
                    return Err(malformed());
                }
                builder.nag(&m.as_str()[1..]);
            }
            "open" => builder.open(offset)?,
            "close" => builder.close(offset)?,
            "number" => {}
            "san" => {
                let whole_end = movetext_start + cap.get(0).map_or(m.end(), |all| all.end());
                if !ends_cleanly(text, whole_end) {
                    return Err(malformed());
                }
                let strength = cap
                    .name("suffix")
                    .and_then(|s| Strength::from_symbol(s.as_str()))
                    .unwrap_or_default();
                builder.play(m.as_str(), strength)?;
            }
            "result" => {
                if builder.depth() != 0 || !ends_cleanly(text, end) {
                    return Err(malformed());
                }
                builder.result = Some(GameResult::from_tag(m.as_str()));
                break;
            }
            _ => return Err(malformed()),
        }
    }

    if builder.depth() != 0 {
        return Err(ImportError::Malformed {
            offset: text.len(),
            token: "(".to_string(),
        });
    }
    if builder.main.is_empty() {
        return Err(ImportError::Empty);
    }

    let result = match tags.result.as_deref() {
        Some(tag) => GameResult::from_tag(tag),
        None => builder.result.unwrap_or_default(),
    };

    tracing::debug!(
        plies = builder.main.len(),
        result = result.as_str(),
        "Imported transcript"
    );

    Ok(Game {
        main_line: builder.main,
        white_player: player_name(tags.white),
        black_player: player_name(tags.black),
        result,
        default_display_index: 0,
    })
}

/// `?` is the PGN placeholder for an unknown player.
fn player_name(tag: Option<String>) -> String {
    match tag {
        Some(name) if name.trim() != "?" => name.trim().to_string(),
        _ => String::new(),
    }
}

/// Write a game as PGN: the three tags the editor knows about, then
/// movetext with `$n` strengths, `{}` comments and `()` variations.
pub fn export_transcript(game: &Game) -> String {
    let mut out = String::new();
    for (key, value) in [
        ("White", game.white_player.as_str()),
        ("Black", game.black_player.as_str()),
        ("Result", game.result.pgn_marker()),
    ] {
        out.push_str(&format!("[{key} \"{}\"]\n", escape_tag(value)));
    }
    out.push('\n');

    let movetext = notation::write_movetext(
        &game.main_line,
        MovetextStyle::Pgn,
        Some(EXPORT_LINE_WIDTH),
    );
    if !movetext.is_empty() {
        out.push_str(&movetext);
        out.push(' ');
    }
    out.push_str(game.result.pgn_marker());
    out.push('\n');
    out
}

/// Extract a string value from a PGN header (e.g. Event, Site).
pub fn extract_header(pgn: &str, header_name: &str) -> Option<String> {
    let pattern = format!(r#"\[{}\s+"([^"]*)"\]"#, regex::escape(header_name));
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(pgn)?.get(1)?.as_str().to_string();
    if value.is_empty() { None } else { Some(value) }
}
