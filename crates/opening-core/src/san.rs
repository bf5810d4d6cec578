//! SAN token normalization for stable textual comparison.
//!
//! Opening lines are matched against game moves as plain text, so both
//! sides must agree on castling notation and suffix glyphs. Normalization
//! runs once per candidate at catalog-load time and once per game at match
//! time; it must be deterministic across runs.

/// Canonicalize a single SAN token.
///
/// Strips trailing annotation glyphs (`!!`, `?!`, ...), then a single
/// trailing check/mate marker (`+` or `#`), collapses internal whitespace,
/// and maps legacy castling digits (`0-0`, `0-0-0`) to letters. Piece
/// letters, disambiguation and promotion suffixes are left intact.
pub fn normalize(token: &str) -> String {
    let mut s = token.split_whitespace().collect::<Vec<_>>().join(" ");

    while s.ends_with('!') || s.ends_with('?') {
        s.pop();
    }
    if s.ends_with('+') || s.ends_with('#') {
        s.pop();
    }

    match s.as_str() {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        _ => s,
    }
}

/// Normalize a move sequence element-wise, preserving order.
pub fn normalize_line(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| normalize(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_mapping() {
        assert_eq!(normalize("0-0"), "O-O");
        assert_eq!(normalize("0-0-0"), "O-O-O");
        assert_eq!(normalize("O-O"), "O-O");
    }

    #[test]
    fn test_suffix_stripping() {
        assert_eq!(normalize("Nf3+"), "Nf3");
        assert_eq!(normalize("Qh7#"), "Qh7");
        assert_eq!(normalize("Qh5!!"), "Qh5");
        assert_eq!(normalize("exd5?!"), "exd5");
        assert_eq!(normalize("Rxe8+!"), "Rxe8");
    }

    #[test]
    fn test_leaves_semantics_intact() {
        assert_eq!(normalize("e8=Q"), "e8=Q");
        assert_eq!(normalize("Nbd7"), "Nbd7");
        assert_eq!(normalize("exd5"), "exd5");
    }

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(normalize("  Nf3 "), "Nf3");
        assert_eq!(normalize("  0-0  "), "O-O");
    }

    #[test]
    fn test_idempotence() {
        for token in ["e4", "Nf3+", "Qh5!!", "exd5?!", "0-0", "0-0-0+", "e8=Q#", "Nf3+!?", ""] {
            let once = normalize(token);
            assert_eq!(normalize(&once), once, "not idempotent for {token:?}");
        }
    }

    #[test]
    fn test_normalize_line_preserves_order() {
        let line = vec!["e4".to_string(), "c5".to_string(), "Nf3+".to_string()];
        assert_eq!(normalize_line(&line), vec!["e4", "c5", "Nf3"]);
    }
}
