//! JSON blob embedded in the article's `chess-game` node.
//!
//! Shape: `{ moves: [{san, comment, strength, variations?}], white, black,
//! result, defaultMove }`. The surrounding rich-text document is someone
//! else's format; this module only produces and consumes the blob.

use serde_json::Value as JsonValue;

use crate::error::BlobError;
use crate::game_data::Game;
use crate::replay;

pub fn to_blob(game: &Game) -> Result<String, BlobError> {
    Ok(serde_json::to_string(game)?)
}

pub fn to_blob_pretty(game: &Game) -> Result<String, BlobError> {
    Ok(serde_json::to_string_pretty(game)?)
}

/// Parse a blob and check that it replays.
pub fn from_blob(text: &str) -> Result<Game, BlobError> {
    let game: Game = serde_json::from_str(text)?;
    replay::validate_game(&game)?;
    Ok(game)
}

/// Node attributes arrive as an already-parsed JSON object.
pub fn from_value(value: JsonValue) -> Result<Game, BlobError> {
    let game: Game = serde_json::from_value(value)?;
    replay::validate_game(&game)?;
    Ok(game)
}

/// Content of a `chess-game` node as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameNode {
    Game(Game),
    /// Unusable payload, kept verbatim so the page can show it instead.
    Corrupt { raw: String, reason: String },
}

impl GameNode {
    /// Read a node's text content. Empty text is the empty default game;
    /// anything that fails to parse or replay degrades to [`GameNode::Corrupt`].
    pub fn from_text(text: &str) -> GameNode {
        if text.trim().is_empty() {
            return GameNode::Game(Game::default());
        }
        match from_blob(text) {
            Ok(game) => GameNode::Game(game),
            Err(e) => {
                tracing::warn!("Corrupt chess-game node: {e}");
                GameNode::Corrupt {
                    raw: text.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match self {
            GameNode::Game(game) => Some(game),
            GameNode::Corrupt { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::{GameResult, Move, Strength};
    use serde_json::json;

    fn sample() -> Game {
        let mut main_line: Vec<Move> = ["e4", "e5", "Nf3"]
            .iter()
            .map(|s| Move::new(*s))
            .collect();
        main_line[1].variations.push(vec![Move::new("c5")]);
        main_line[2].strength = Strength::Good;
        main_line[2].comment = "natural".into();
        Game {
            main_line,
            white_player: "Novak".into(),
            black_player: "Svoboda".into(),
            result: GameResult::Draw,
            default_display_index: 2,
        }
    }

    #[test]
    fn test_blob_shape() {
        let value: JsonValue = serde_json::from_str(&to_blob(&sample()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "moves": [
                    {"san": "e4", "comment": "", "strength": ""},
                    {"san": "e5", "comment": "", "strength": "",
                     "variations": [[{"san": "c5", "comment": "", "strength": ""}]]},
                    {"san": "Nf3", "comment": "natural", "strength": "!"}
                ],
                "white": "Novak",
                "black": "Svoboda",
                "result": "1/2",
                "defaultMove": 2
            })
        );
    }

    #[test]
    fn test_blob_round_trip() {
        let game = sample();
        assert_eq!(from_blob(&to_blob(&game).unwrap()).unwrap(), game);
    }

    #[test]
    fn test_lenient_field_defaults() {
        let game = from_value(json!({
            "moves": [{"san": "d4"}],
            "white": "A",
            "black": "B",
            "result": "1/2-1/2"
        }))
        .unwrap();
        assert_eq!(game.result, GameResult::Draw);
        assert_eq!(game.default_display_index, 0);
        assert_eq!(game.main_line[0].strength, Strength::None);
    }

    #[test]
    fn test_empty_node_is_default_game() {
        assert_eq!(GameNode::from_text("  "), GameNode::Game(Game::default()));
    }

    #[test]
    fn test_non_json_degrades() {
        let node = GameNode::from_text("<p>not a game</p>");
        assert!(matches!(node, GameNode::Corrupt { ref raw, .. } if raw == "<p>not a game</p>"));
        assert!(node.game().is_none());
    }

    #[test]
    fn test_wrong_shape_degrades() {
        let node = GameNode::from_text(r#"{"moves": "e4 e5"}"#);
        assert!(matches!(node, GameNode::Corrupt { .. }));
        let node = GameNode::from_text(r#"{"moves": [{"san": "e4", "strength": "???"}]}"#);
        assert!(matches!(node, GameNode::Corrupt { .. }));
    }

    #[test]
    fn test_unreplayable_blob_degrades() {
        let node = GameNode::from_text(r#"{"moves": [{"san": "e4"}, {"san": "e4"}]}"#);
        assert!(matches!(node, GameNode::Corrupt { .. }));
        let node = GameNode::from_text(r#"{"moves": [{"san": "e4"}], "defaultMove": 9}"#);
        assert!(matches!(node, GameNode::Corrupt { .. }));
    }
}
