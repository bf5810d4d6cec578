//! Stable position keys for opening lines.
//!
//! Keys are move-counter-stripped FENs of the position a line reaches, so
//! transposing lines share a key. Groundwork for transposition-aware
//! matching; the prefix matcher itself never reads them.

use shakmaty::{fen::Fen, san::San, Chess, EnPassantMode, Position};

/// Play a SAN line out from the standard starting position and return a
/// key for the final position. `None` if any token fails to parse or is
/// illegal in sequence.
pub fn position_key_for_line(moves_san: &[String]) -> Option<String> {
    let mut pos = Chess::default();

    for move_san in moves_san {
        let san: San = move_san.parse().ok()?;
        let mv = san.to_move(&pos).ok()?;
        pos.play_unchecked(mv);
    }

    let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
    Some(normalize_fen(&fen))
}

/// Strips move counters from FEN, keeping only position + side + castling + ep.
pub fn normalize_fen(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
