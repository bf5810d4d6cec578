//! Batch-enrich imported games with ECO opening classifications.
//!
//! Reads a multi-game PGN file, matches every game against the bundled
//! opening catalog, and writes the enriched records as JSON.
//!
//! Usage:
//!   cargo run --bin enrich-games -- games.pgn enriched.json

use std::env;
use std::fs;

use serde::Serialize;
use tracing::info;

use enrichment_worker::catalog;
use enrichment_worker::enrich::enrich;
use opening_core::pgn;

#[derive(Serialize)]
struct EnrichedGame {
    white: String,
    black: String,
    result: String,
    date: Option<String>,
    /// Provider-declared ECO, passed through untouched.
    provider_eco: Option<String>,
    determined_eco: Option<String>,
    opening_name: Option<String>,
    opening_line_pgn: Option<String>,
    match_ply: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev (OPENING_ASSETS_DIR etc.)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().collect();
    let input_path = args.get(1).map(|s| s.as_str()).unwrap_or("games.pgn");
    let output_path = args.get(2).map(|s| s.as_str()).unwrap_or("enriched.json");

    let text = fs::read_to_string(input_path)?;
    let games: Vec<_> = pgn::split_games(&text)
        .iter()
        .filter_map(|g| pgn::parse_pgn(g))
        .collect();

    info!(games = games.len(), input_path, "Parsed import file");

    let catalog = catalog::get_catalog().await;
    if catalog.is_empty() {
        info!("Opening catalog unavailable, provider codes pass through unenriched");
    }

    let mut matched = 0usize;
    let mut overridden = 0usize;
    let mut unmatched = 0usize;

    let mut enriched = Vec::with_capacity(games.len());
    for game in &games {
        let result = enrich(game, &catalog);

        match (&result.opening_name, &result.determined_eco) {
            (Some(_), determined) => {
                matched += 1;
                let declared = game.eco.as_deref().map(str::trim);
                if declared.is_some() && declared != determined.as_deref() {
                    overridden += 1;
                }
            }
            (None, _) => unmatched += 1,
        }

        enriched.push(EnrichedGame {
            white: game.white.clone(),
            black: game.black.clone(),
            result: game.result.clone(),
            date: game.date.clone(),
            provider_eco: game.eco.clone(),
            determined_eco: result.determined_eco,
            opening_name: result.opening_name,
            opening_line_pgn: result.opening_line_pgn,
            match_ply: result.match_ply,
        });
    }

    let json = serde_json::to_string_pretty(&enriched)?;
    fs::write(output_path, json)?;

    println!(
        "Done: {matched} matched ({overridden} overridden), {unmatched} unmatched out of {} games",
        games.len()
    );
    println!("Wrote to {output_path}");

    Ok(())
}
