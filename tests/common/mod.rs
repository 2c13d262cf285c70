#![allow(dead_code)]

use chess_core::{Editor, Move};
use shakmaty::{san::San, Chess, Position, Square};

/// Replay SAN directly with shakmaty, independent of the replay module.
pub fn ground_truth(sans: &[&str]) -> Chess {
    let mut pos = Chess::default();
    for san in sans {
        let san: San = san.parse().unwrap();
        let mv = san.to_move(&pos).unwrap();
        pos = pos.play(mv).unwrap();
    }
    pos
}

pub fn moves(sans: &[&str]) -> Vec<Move> {
    sans.iter().map(|s| Move::new(*s)).collect()
}

/// Play a sequence of (from, to) gestures without promotions.
pub fn play(editor: Editor, gestures: &[(Square, Square)]) -> Editor {
    gestures
        .iter()
        .fold(editor, |ed, (from, to)| ed.apply_move(*from, *to, None))
}

/// 1. e4 e5 2. Nf3
pub fn open_game() -> Editor {
    play(
        Editor::new(),
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
        ],
    )
}
