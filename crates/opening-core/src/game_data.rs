use serde::{Deserialize, Serialize};

/// One game as received from an import source.
///
/// `eco` is the provider-declared classification; enrichment reads it but
/// never rewrites it. The app-determined classification lives in the
/// enrichment output, stored alongside this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedGame {
    pub white: String,
    pub black: String,
    pub result: String, // "1-0", "0-1", "1/2-1/2", "*"
    pub date: Option<String>,
    pub eco: Option<String>,
    pub moves: Vec<String>, // SAN notation, one token per ply
    pub pgn: String,
}
