//! End-to-end editing scenarios: gestures on the board, variations and
//! the game that is finally embedded.

mod common;

use chess_core::replay::{compute_position, compute_variation_position};
use chess_core::{
    blob, Editor, GameNode, GameResult, Mode, Strength, SubmitError, VariationPointer,
};
use common::{ground_truth, moves, open_game, play};
use shakmaty::{Position, Role, Square};

#[test]
fn test_every_prefix_matches_ground_truth() {
    let sans = [
        "d4", "Nf6", "c4", "e6", "Nc3", "Bb4", "Qc2", "O-O", "a3", "Bxc3+", "Qxc3",
    ];
    let line = moves(&sans);
    for cursor in 0..=sans.len() {
        let pos = compute_position(&line, cursor).unwrap();
        assert_eq!(pos.board(), ground_truth(&sans[..cursor]).board(), "cursor {cursor}");
        assert_eq!(pos.turn(), ground_truth(&sans[..cursor]).turn());
    }
}

#[test]
fn test_gestures_record_canonical_san() {
    let editor = open_game();
    assert_eq!(editor.game().main_line_sans(), vec!["e4", "e5", "Nf3"]);
    assert_eq!(editor.cursor(), 3);
}

#[test]
fn test_undo_then_replay_same_gesture() {
    let editor = open_game();
    let again = editor
        .undo_last_move()
        .apply_move(Square::G1, Square::F3, None);
    assert_eq!(again.game(), editor.game());
}

#[test]
fn test_illegal_gesture_leaves_editor_unchanged() {
    let editor = open_game();
    // Nothing stands on e3.
    let after = editor.apply_move(Square::E3, Square::E4, None);
    assert_eq!(after.game().main_line.len(), 3);
    assert_eq!(after.cursor(), 3);
    assert_eq!(after, editor);

    let blocked = editor.apply_move(Square::E8, Square::E6, None);
    assert_eq!(blocked, editor);
}

#[test]
fn test_variation_replaces_move_and_returns_after_it() {
    let editor = open_game()
        .start_variation(2)
        .apply_move(Square::B8, Square::C6, None);
    assert_eq!(editor.mode(), Mode::Variation);

    let editor = editor.commit_variation();
    assert_eq!(editor.mode(), Mode::MainLine);
    assert_eq!(editor.cursor(), 2);

    let e5 = &editor.game().main_line[1];
    assert_eq!(e5.variations.len(), 1);
    assert_eq!(e5.variations[0][0].san, "Nc6");

    let pos = compute_variation_position(
        &editor.game().main_line,
        VariationPointer::new(1, 0),
        1,
    )
    .unwrap();
    assert_eq!(pos.board(), ground_truth(&["e4", "Nc6"]).board());
}

#[test]
fn test_cancelled_variation_leaves_no_trace() {
    let editor = open_game()
        .start_variation(1)
        .apply_move(Square::D2, Square::D4, None)
        .commit_variation()
        .go_to(1);
    assert_eq!(editor.start_variation(2).cancel_variation(), editor);

    let cancelled = editor
        .start_variation(3)
        .apply_move(Square::F1, Square::C4, None)
        .cancel_variation();
    assert_eq!(cancelled, editor);
}

#[test]
fn test_clear_variations_is_idempotent() {
    let editor = open_game()
        .start_variation(1)
        .apply_move(Square::D2, Square::D4, None)
        .commit_variation();
    let once = editor.clear_variations(0);
    assert!(once.game().main_line[0].variations.is_empty());
    assert_eq!(once.clear_variations(0), once);
}

#[test]
fn test_promotion_defaults_to_queen() {
    let editor = play(
        Editor::new(),
        &[
            (Square::H2, Square::H4),
            (Square::G7, Square::G5),
            (Square::H4, Square::G5),
            (Square::H7, Square::H6),
            (Square::G5, Square::H6),
            (Square::F8, Square::G7),
            (Square::H6, Square::G7),
            (Square::G8, Square::F6),
        ],
    );
    assert_eq!(editor.game().main_line.len(), 8);

    let queen = editor.apply_move(Square::G7, Square::G8, None);
    assert_eq!(queen.game().main_line.last().unwrap().san, "g8=Q+");
    let knight = editor.apply_move(Square::G7, Square::H8, Some(Role::Knight));
    assert_eq!(knight.game().main_line.last().unwrap().san, "gxh8=N");
}

#[test]
fn test_insert_requires_players_and_result() {
    let editor = open_game().annotate_last_move("develops", Strength::Good);
    assert_eq!(editor.insert(), Err(SubmitError::MissingWhite));

    let editor = editor.with_white("Novak").with_black("Dvorak");
    assert_eq!(editor.insert(), Err(SubmitError::MissingResult));

    let editor = editor.with_result(GameResult::Draw);
    let game = editor.insert().unwrap();
    assert_eq!(game.main_line[2].strength, Strength::Good);
    assert_eq!(game.main_line[2].comment, "develops");

    let drafting = editor.start_variation(3);
    assert_eq!(drafting.insert(), Err(SubmitError::VariationInProgress));
}

#[test]
fn test_editing_after_marking_default_stays_embeddable() {
    let editor = open_game()
        .mark_default_display()
        .undo_last_move()
        .undo_last_move()
        .with_white("Novak")
        .with_black("Dvorak")
        .with_result(GameResult::BlackWins);
    assert_eq!(editor.game().default_display_index, 1);

    let game = editor.insert().unwrap();
    let text = blob::to_blob(&game).unwrap();
    assert_eq!(blob::from_blob(&text).unwrap(), game);
    assert_eq!(GameNode::from_text(&text), GameNode::Game(game));
}

#[test]
fn test_unfinished_transcript_imports_without_result() {
    let editor = Editor::new().import_transcript("1. e4 e5 2. Nf3 *").unwrap();
    assert_eq!(editor.game().main_line_sans(), vec!["e4", "e5", "Nf3"]);
    assert_eq!(editor.game().result, GameResult::Unset);
    assert_eq!(editor.game().default_display_index, 0);
    assert_eq!(editor.cursor(), 3);
    assert!(!editor.can_insert());
}

#[test]
fn test_failed_import_keeps_current_editor() {
    let editor = open_game();
    assert!(editor.import_transcript("1. e4 e5 2. Ke3 *").is_err());
    assert_eq!(editor.game().main_line.len(), 3);
}
