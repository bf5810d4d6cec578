//! Longest-prefix matching of game moves against catalog opening lines.

use serde::{Deserialize, Serialize};

use crate::san;

/// Minimum matched plies for a whole-catalog scan. Short shared prefixes
/// (e.g. `1.d4 d5 2.c4`) overlap dozens of unrelated lines, so a global
/// match below this floor is noise.
pub const DEFAULT_GLOBAL_MIN_MATCH_PLIES: usize = 6;

/// One opening line from the catalog dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningCandidate {
    pub eco: String,
    pub name: String,
    /// Original move text as authored, kept for display.
    pub line_pgn: String,
    /// Move tokens extracted from `line_pgn`, numbers and result markers stripped.
    pub line_moves_san: Vec<String>,
    /// Declared line length; falls back to the extracted token count.
    pub line_plies: usize,
    pub position_key: Option<String>,
    /// `line_moves_san` pre-normalized at load time so matching never
    /// renormalizes candidates per comparison.
    pub line_san_normalized: Vec<String>,
}

/// Result of matching one game against a candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpeningMatch {
    pub eco: String,
    pub name: String,
    pub line_pgn: String,
    /// Number of leading plies that matched exactly.
    pub match_ply: usize,
    pub line_plies: usize,
    pub position_key: Option<String>,
}

/// Find the best-matching line in a candidate set already scoped to a
/// single ECO code. The bucket is already narrow, so any shared prefix
/// counts, however short.
pub fn find_best_match(
    game_moves_san: &[String],
    candidates: &[OpeningCandidate],
) -> Option<OpeningMatch> {
    best_match(game_moves_san, candidates, 1)
}

/// Scan an entire candidate set, requiring at least `min_match_plies`
/// matched plies (default [`DEFAULT_GLOBAL_MIN_MATCH_PLIES`]).
pub fn find_best_match_global(
    game_moves_san: &[String],
    all_candidates: &[OpeningCandidate],
    min_match_plies: Option<usize>,
) -> Option<OpeningMatch> {
    let floor = min_match_plies.unwrap_or(DEFAULT_GLOBAL_MIN_MATCH_PLIES);
    best_match(game_moves_san, all_candidates, floor)
}

/// Shared matching loop. A candidate's score is the length of the longest
/// common prefix with the game; ties prefer the longer declared line (the
/// more specific named variation), then the earliest-encountered candidate.
fn best_match(
    game_moves_san: &[String],
    candidates: &[OpeningCandidate],
    min_match_plies: usize,
) -> Option<OpeningMatch> {
    if game_moves_san.is_empty() || candidates.is_empty() {
        return None;
    }

    let game_normalized = san::normalize_line(game_moves_san);
    // A zero-length shared prefix is no match at all.
    let floor = min_match_plies.max(1);

    let mut best: Option<(usize, &OpeningCandidate)> = None;
    for candidate in candidates {
        let match_ply = common_prefix_len(&game_normalized, &candidate.line_san_normalized);
        if match_ply < floor {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_ply, best_candidate)) => {
                match_ply > best_ply
                    || (match_ply == best_ply && candidate.line_plies > best_candidate.line_plies)
            }
        };
        if better {
            best = Some((match_ply, candidate));
        }
    }

    best.map(|(match_ply, candidate)| OpeningMatch {
        eco: candidate.eco.clone(),
        name: candidate.name.clone(),
        line_pgn: candidate.line_pgn.clone(),
        match_ply,
        line_plies: candidate.line_plies,
        position_key: candidate.position_key.clone(),
    })
}

fn common_prefix_len(a: &[String], b: &[String]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(eco: &str, name: &str, moves: &[&str], line_plies: usize) -> OpeningCandidate {
        let line_moves_san: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        OpeningCandidate {
            eco: eco.to_string(),
            name: name.to_string(),
            line_pgn: moves.join(" "),
            line_san_normalized: san::normalize_line(&line_moves_san),
            line_moves_san,
            line_plies,
            position_key: None,
        }
    }

    fn moves(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_prefix_match_length() {
        let cands = [candidate(
            "C60",
            "Ruy Lopez: Morphy Defense",
            &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"],
            6,
        )];
        let m = find_best_match(&moves(&["e4", "e5", "Nf3", "Nc6"]), &cands).unwrap();
        assert_eq!(m.match_ply, 4);
        assert_eq!(m.eco, "C60");
    }

    #[test]
    fn test_mismatch_truncates_prefix() {
        let cands = [candidate("C20", "King's Pawn Game", &["e4", "e5", "Nf3"], 3)];
        let m = find_best_match(&moves(&["e4", "c5"]), &cands).unwrap();
        assert_eq!(m.match_ply, 1);
    }

    #[test]
    fn test_no_shared_prefix_is_no_match() {
        let cands = [candidate("A00", "Polish Opening", &["b4"], 1)];
        assert!(find_best_match(&moves(&["e4", "e5"]), &cands).is_none());
    }

    #[test]
    fn test_empty_inputs() {
        let cands = [candidate("B20", "Sicilian Defense", &["e4", "c5"], 2)];
        assert!(find_best_match(&[], &cands).is_none());
        assert!(find_best_match(&moves(&["e4"]), &[]).is_none());
    }

    #[test]
    fn test_tie_break_prefers_longer_line() {
        let game = moves(&["e4", "e5", "Nf3", "Nc6"]);
        let cands = [
            candidate("C44", "Open Game", &["e4", "e5", "Nf3", "Nc6"], 4),
            candidate(
                "C50",
                "Italian Game",
                &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "c3", "Nf6"],
                8,
            ),
        ];
        let m = find_best_match(&game, &cands).unwrap();
        assert_eq!(m.match_ply, 4);
        assert_eq!(m.eco, "C50");
        assert_eq!(m.line_plies, 8);
    }

    #[test]
    fn test_full_tie_keeps_first_seen() {
        let game = moves(&["e4", "e5"]);
        let cands = [
            candidate("C20", "King's Pawn Game", &["e4", "e5"], 2),
            candidate("C20", "Open Game", &["e4", "e5"], 2),
        ];
        let m = find_best_match(&game, &cands).unwrap();
        assert_eq!(m.name, "King's Pawn Game");
    }

    #[test]
    fn test_global_floor_excludes_short_matches() {
        let game = moves(&["d4", "d5", "c4", "b5"]);
        let cands = [candidate(
            "D06",
            "Queen's Gambit",
            &["d4", "d5", "c4", "e6", "Nc3", "Nf6"],
            6,
        )];
        // 3 plies shared, below the default floor of 6.
        assert!(find_best_match_global(&game, &cands, None).is_none());
        // Explicit lower floor admits it.
        let m = find_best_match_global(&game, &cands, Some(3)).unwrap();
        assert_eq!(m.match_ply, 3);
    }

    #[test]
    fn test_game_moves_are_normalized_against_candidates() {
        let cands = [candidate(
            "C60",
            "Ruy Lopez",
            &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O"],
            9,
        )];
        let game = moves(&[
            "e4", "e5", "Nf3!?", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "0-0",
        ]);
        let m = find_best_match_global(&game, &cands, None).unwrap();
        assert_eq!(m.match_ply, 9);
    }
}
