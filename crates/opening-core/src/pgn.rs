//! PGN parsing utilities — lightweight regex-based parser.

use regex::Regex;

use crate::game_data::ImportedGame;

/// Parse a single-game PGN string into an `ImportedGame`.
///
/// Returns `None` when the text contains no moves (abandoned stubs) or
/// starts from a non-standard position.
pub fn parse_pgn(pgn: &str) -> Option<ImportedGame> {
    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).ok()?;

    let mut white = "Unknown".to_string();
    let mut black = "Unknown".to_string();
    let mut result = "*".to_string();
    let mut date = None;
    let mut eco = None;
    let mut setup = None;

    for cap in header_re.captures_iter(pgn) {
        let key = &cap[1];
        let value = cap[2].to_string();
        match key {
            "White" => white = value,
            "Black" => black = value,
            "Result" => result = value,
            "Date" => date = Some(value),
            "ECO" => eco = Some(value),
            "SetUp" => setup = Some(value),
            _ => {}
        }
    }

    // Games from a custom starting position cannot be matched against
    // opening lines played from the standard start.
    if setup.as_deref() == Some("1") {
        return None;
    }

    let moves = extract_moves(pgn);
    if moves.is_empty() {
        return None;
    }

    Some(ImportedGame {
        white,
        black,
        result,
        date,
        eco,
        moves,
        pgn: pgn.to_string(),
    })
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
fn extract_moves(pgn: &str) -> Vec<String> {
    // Remove headers
    let header_re = Regex::new(r"\[[^\]]*\]").unwrap();
    let no_headers = header_re.replace_all(pgn, "");

    // Remove comments
    let comment_re = Regex::new(r"\{[^}]*\}").unwrap();
    let no_comments = comment_re.replace_all(&no_headers, "");

    // Remove variations
    let variation_re = Regex::new(r"\([^)]*\)").unwrap();
    let no_variations = variation_re.replace_all(&no_comments, "");

    let move_re =
        Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap();

    move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split a multi-game PGN file into one string per game.
///
/// Games are delimited by their `[Event ...]` header; text before the
/// first header is ignored.
pub fn split_games(text: &str) -> Vec<String> {
    let mut games: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim_start().starts_with("[Event ") && !current.trim().is_empty() {
            games.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        games.push(current);
    }

    games
}
