//! Error types for loading and exporting the sheet.
//!
//! - [`LoadError`] - fetching or parsing the source CSV
//! - [`EngineError`] - failures surfaced by engine commands

use std::path::PathBuf;

use thiserror::Error;

/// Errors while fetching or parsing a table source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport-level HTTP failure (DNS, TLS, connection reset...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    Status { url: String, status: u16 },

    /// Malformed CSV.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Local file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source has no header row.
    #[error("Sheet has no header row")]
    NoHeaders,
}

/// Errors returned by [`crate::engine::Engine::dispatch`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load data: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to save file: {0:#}")]
    Export(anyhow::Error),

    #[error("Nothing to export")]
    NothingToExport,
}
