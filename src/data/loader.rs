use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

use super::model::Table;

// ---------------------------------------------------------------------------
// Table sources
// ---------------------------------------------------------------------------

/// Where the engine pulls its table from on every load.
pub trait TableSource {
    /// Fetch and parse the whole table.
    fn fetch(&self) -> Result<Table, LoadError>;

    /// Short human-readable origin, used in logs and the status bar.
    fn describe(&self) -> String;
}

/// The remote sheet's CSV export, fetched with a blocking GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TableSource for HttpSource {
    fn fetch(&self) -> Result<Table, LoadError> {
        log::debug!("GET {}", self.url);
        let response = reqwest::blocking::get(&self.url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes()?;
        parse_csv(body.as_ref())
    }

    fn describe(&self) -> String {
        "remote sheet".to_string()
    }
}

/// A CSV file on disk, e.g. a previous export.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileSource {
    fn fetch(&self) -> Result<Table, LoadError> {
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_csv(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse a header row followed by string rows.
///
/// Every cell is kept as text; rows with fewer fields than the header are
/// padded with empty cells. Blank or repeated header names are renamed
/// (`Unnamed: 2`, `Num.1`) so every cell keeps its own column.
pub fn parse_csv<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() {
        return Err(LoadError::NoHeaders);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Table::from_records(columns, records))
}
