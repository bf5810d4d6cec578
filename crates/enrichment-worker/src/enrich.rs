//! Per-game opening enrichment.
//!
//! Runs inline in the import loop, once per game, inside the caller's
//! persistence transaction. Nothing here may fail: a game that cannot be
//! matched keeps its provider-declared ECO and gets no derived name.

use serde::Serialize;
use tracing::debug;

use opening_core::game_data::ImportedGame;
use opening_core::matcher::{self, OpeningMatch};

use crate::catalog::OpeningCatalog;

/// App-determined opening fields for one imported game. Persisted
/// alongside the provider-declared fields, never instead of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentResult {
    /// The ECO code the app believes is correct. Defaults to the
    /// provider's declared code; overridden only when a whole-catalog
    /// match proves the declared code wrong.
    pub determined_eco: Option<String>,
    pub opening_name: Option<String>,
    pub opening_line_pgn: Option<String>,
    pub match_ply: Option<usize>,
}

/// Decide the final ECO code and opening name for one imported game.
pub fn enrich(game: &ImportedGame, catalog: &OpeningCatalog) -> EnrichmentResult {
    let provider_eco = game
        .eco
        .as_deref()
        .map(str::trim)
        .filter(|eco| !eco.is_empty())
        .map(str::to_string);

    let mut result = EnrichmentResult {
        determined_eco: provider_eco.clone(),
        ..EnrichmentResult::default()
    };

    if game.moves.is_empty() {
        return result;
    }

    match provider_eco {
        Some(eco) => {
            // Fast path: only lines filed under the declared code.
            let bucket = catalog.candidates_by_eco(&eco);
            if let Some(m) = matcher::find_best_match(&game.moves, &bucket) {
                // The declared code checked out; `determined_eco` already
                // carries it.
                apply_match(&mut result, &m);
                return result;
            }

            // Nothing under the declared code fits the moves played, so
            // the declaration is suspect. A whole-catalog match overrides
            // it; otherwise it stands, unverified.
            if let Some(m) = matcher::find_best_match_global(&game.moves, &catalog.all_candidates(), None)
            {
                debug!(declared = %eco, determined = %m.eco, "Provider ECO overridden by global match");
                apply_match(&mut result, &m);
                result.determined_eco = Some(m.eco);
            }
        }
        None => {
            if let Some(m) = matcher::find_best_match_global(&game.moves, &catalog.all_candidates(), None)
            {
                apply_match(&mut result, &m);
                result.determined_eco = Some(m.eco);
            }
        }
    }

    result
}

fn apply_match(result: &mut EnrichmentResult, m: &OpeningMatch) {
    result.opening_name = Some(m.name.clone());
    result.opening_line_pgn = Some(m.line_pgn.clone());
    result.match_ply = Some(m.match_ply);
}
