//! Transcript import through to the embedded blob and back.

mod common;

use chess_core::replay::compute_position;
use chess_core::{
    blob, notation, pgn, Cursor, Editor, GameNode, GameResult, GameViewer, NotationLocale,
    Strength, VariationPointer,
};
use common::ground_truth;
use shakmaty::{Position, Square};

const OPERA: &str = r#"[Event "Paris"]
[White "Morphy, Paul"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 {A poor move} 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4
Nf6 7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5?! (9... Qc7 10. O-O-O) 10. Nxb5! cxb5 11. Bxb5+
Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17.
Rd8# 1-0
"#;

const OPERA_SANS: [&str; 33] = [
    "e4", "e5", "Nf3", "d6", "d4", "Bg4", "dxe5", "Bxf3", "Qxf3", "dxe5", "Bc4", "Nf6", "Qb3",
    "Qe7", "Nc3", "c6", "Bg5", "b5", "Nxb5", "cxb5", "Bxb5+", "Nbd7", "O-O-O", "Rd8", "Rxd7",
    "Rxd7", "Rd1", "Qe6", "Bxd7+", "Nxd7", "Qb8+", "Nxb8", "Rd8#",
];

#[test]
fn test_imported_game_replays_to_final_position() {
    let game = pgn::import_transcript(OPERA).unwrap();
    assert_eq!(game.main_line_sans(), OPERA_SANS);
    assert_eq!(game.white_player, "Morphy, Paul");
    assert_eq!(game.result, GameResult::WhiteWins);

    let end = compute_position(&game.main_line, game.main_line.len()).unwrap();
    assert_eq!(end.board(), ground_truth(&OPERA_SANS).board());
    assert!(end.is_checkmate());

    assert_eq!(game.main_line[5].comment, "A poor move");
    assert_eq!(game.main_line[17].strength, Strength::Dubious);
    assert_eq!(game.main_line[18].strength, Strength::Good);
    assert_eq!(game.main_line[17].variations[0].len(), 2);
}

#[test]
fn test_edit_embed_and_export() {
    let editor = Editor::new()
        .import_transcript(OPERA)
        .unwrap()
        .go_to(18)
        .mark_default_display()
        .start_variation(19)
        .apply_move(Square::C3, Square::D5, None)
        .commit_variation();
    assert_eq!(editor.cursor(), 19);

    let game = editor.insert().unwrap();
    assert_eq!(game.default_display_index, 18);
    assert_eq!(game.main_line[18].variations[0][0].san, "Nd5");

    let text = blob::to_blob(&game).unwrap();
    let node = GameNode::from_text(&text);
    assert_eq!(node.game(), Some(&game));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["defaultMove"], 18);
    assert_eq!(value["result"], "1-0");
    assert_eq!(value["moves"][17]["strength"], "?!");
    assert_eq!(blob::from_value(value).unwrap(), game);

    let exported = pgn::export_transcript(&game);
    assert!(exported.starts_with("[White \"Morphy, Paul\"]\n"));
    assert!(exported.contains("Nd5)"));
    let reimported = pgn::import_transcript(&exported).unwrap();
    assert_eq!(reimported.main_line, game.main_line);
}

#[test]
fn test_viewer_opens_embedded_game_at_default() {
    let game = Editor::new()
        .import_transcript(OPERA)
        .unwrap()
        .go_to(18)
        .mark_default_display()
        .insert()
        .unwrap();

    let mut viewer = GameViewer::new(game);
    assert_eq!(viewer.cursor(), Cursor::MainLine(18));
    assert_eq!(
        viewer.position().unwrap().board(),
        ground_truth(&OPERA_SANS[..18]).board()
    );

    assert!(viewer.select_variation_move(VariationPointer::new(17, 0), 1));
    assert_eq!(
        viewer.position().unwrap().board(),
        ground_truth(&[&OPERA_SANS[..17], &["Qc7", "O-O-O"][..]].concat()).board()
    );
    viewer.exit_variation();
    assert_eq!(viewer.cursor(), Cursor::MainLine(18));
}

#[test]
fn test_czech_move_list() {
    let text = "[Result \"1/2-1/2\"]\n\n1. Nf3 d5 2. g3 Bg4 3. Bg2 Nd7 1/2-1/2";
    let game = pgn::import_transcript(text).unwrap();
    assert_eq!(
        notation::move_list_text(&game, NotationLocale::Czech),
        "1. Jf3 d5 2. g3 Sg4 3. Sg2 Jd7 1/2"
    );
    assert_eq!(
        notation::move_list_text(&game, NotationLocale::German),
        "1. Sf3 d5 2. g3 Lg4 3. Lg2 Sd7 1/2"
    );
}
