//! In-memory opening catalog cache.
//!
//! The catalog is parsed from a bundled JSON dataset on first access and
//! cached for the process lifetime. A failed load degrades to an empty
//! catalog so imports proceed without opening enrichment, and the failure
//! is not cached: the next access retries from scratch.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use opening_core::matcher::OpeningCandidate;
use opening_core::position_key::position_key_for_line;
use opening_core::san;

use crate::config;
use crate::error::CatalogError;

/// Dataset file name inside the assets directory.
pub const CATALOG_FILE_NAME: &str = "openings.json";

/// Matches PGN move-number tokens: `1.`, `12.`, `3...`
static MOVE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.(\.\.)?$").unwrap());

/// Top-level shape of the bundled dataset document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    schema_version: u32,
    #[serde(default)]
    source: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    generated_at_iso: String,
    rows: Vec<CatalogRow>,
}

/// One dataset row. `plies` and `positionKey` only exist in schema v2;
/// unknown fields (`uci`, `epd`, ...) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRow {
    code: Option<String>,
    name: Option<String>,
    pgn: Option<String>,
    plies: Option<i64>,
    position_key: Option<String>,
}

/// Dataset provenance, zeroed for the empty catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogMetadata {
    pub schema_version: u32,
    pub source: String,
    pub source_url: String,
    pub generated_at_iso: String,
}

/// The loaded catalog: candidates grouped by ECO code plus a flat list.
/// Immutable after construction; accessors hand out copies so no caller
/// can mutate the shared cache.
#[derive(Debug, Default)]
pub struct OpeningCatalog {
    by_eco: HashMap<String, Vec<OpeningCandidate>>,
    all: Vec<OpeningCandidate>,
    metadata: CatalogMetadata,
}

impl OpeningCatalog {
    /// Functional empty catalog: every lookup misses, metadata is zeroed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All candidates declaring the given ECO code, in dataset order.
    pub fn candidates_by_eco(&self, eco: &str) -> Vec<OpeningCandidate> {
        self.by_eco.get(eco).cloned().unwrap_or_default()
    }

    /// Every candidate in dataset order.
    pub fn all_candidates(&self) -> Vec<OpeningCandidate> {
        self.all.clone()
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Parse the dataset document, skipping rows that fail validation.
pub fn parse_catalog(text: &str) -> Result<OpeningCatalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(text)?;

    let mut catalog = OpeningCatalog {
        metadata: CatalogMetadata {
            schema_version: file.schema_version,
            source: file.source,
            source_url: file.source_url,
            generated_at_iso: file.generated_at_iso,
        },
        ..OpeningCatalog::default()
    };

    for row in file.rows {
        if let Some(candidate) = candidate_from_row(row) {
            catalog
                .by_eco
                .entry(candidate.eco.clone())
                .or_default()
                .push(candidate.clone());
            catalog.all.push(candidate);
        }
    }

    Ok(catalog)
}

/// Validate one row into a candidate. Rows missing a code, name or move
/// line, or whose line yields zero tokens, are dropped.
fn candidate_from_row(row: CatalogRow) -> Option<OpeningCandidate> {
    let eco = non_empty(row.code)?;
    let name = non_empty(row.name)?;
    let line_pgn = non_empty(row.pgn)?;

    let line_moves_san = extract_line_moves(&line_pgn);
    if line_moves_san.is_empty() {
        return None;
    }

    let line_plies = match row.plies {
        Some(p) if p > 0 => p as usize,
        _ => line_moves_san.len(),
    };

    let line_san_normalized = san::normalize_line(&line_moves_san);
    let position_key = row
        .position_key
        .or_else(|| position_key_for_line(&line_san_normalized));

    Some(OpeningCandidate {
        eco,
        name,
        line_pgn,
        line_moves_san,
        line_plies,
        position_key,
        line_san_normalized,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extract move tokens from a move-number-annotated line such as
/// `1. e4 e5 2. Nf3 Nc6`.
fn extract_line_moves(line_pgn: &str) -> Vec<String> {
    line_pgn
        .split_whitespace()
        .filter(|token| !MOVE_NUMBER_RE.is_match(token))
        .filter(|token| !matches!(*token, "1-0" | "0-1" | "1/2-1/2" | "*"))
        .map(|token| token.to_string())
        .collect()
}

/// Read and parse the dataset from disk.
pub async fn load_catalog(path: &Path) -> Result<OpeningCatalog, CatalogError> {
    let text = tokio::fs::read_to_string(path).await?;
    let catalog = parse_catalog(&text)?;
    info!(
        candidates = catalog.len(),
        codes = catalog.by_eco.len(),
        source = %catalog.metadata.source,
        "Loaded opening catalog"
    );
    Ok(catalog)
}

/// Process-wide catalog cache.
///
/// Concurrent first callers share a single in-flight load. On failure the
/// caller gets [`OpeningCatalog::empty`] and nothing is cached, so the
/// next call retries the load.
pub struct CatalogService {
    cell: OnceCell<Arc<OpeningCatalog>>,
}

impl CatalogService {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    pub async fn get(&self, path: &Path) -> Arc<OpeningCatalog> {
        let loaded = self
            .cell
            .get_or_try_init(|| async { load_catalog(path).await.map(Arc::new) })
            .await;

        match loaded {
            Ok(catalog) => Arc::clone(catalog),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load opening catalog, continuing without enrichment"
                );
                Arc::new(OpeningCatalog::empty())
            }
        }
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl OpeningCatalog {
    /// Build a catalog from hand-made candidates, bypassing row validation.
    pub(crate) fn insert_for_tests(&mut self, candidate: OpeningCandidate) {
        self.by_eco
            .entry(candidate.eco.clone())
            .or_default()
            .push(candidate.clone());
        self.all.push(candidate);
    }
}

static CATALOG: CatalogService = CatalogService::new();

/// Global accessor used by the import pipeline.
pub async fn get_catalog() -> Arc<OpeningCatalog> {
    CATALOG.get(&config::catalog_path()).await
}
