use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Table;

/// Write `table` as CSV: header row, then every row in column order.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns)
        .context("writing CSV header")?;
    for (i, row) in table.rows.iter().enumerate() {
        wtr.write_record(table.record(row))
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export `table` to a file at `path`, replacing any existing file.
pub fn export_csv(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, std::io::BufWriter::new(file))
        .with_context(|| format!("exporting to {}", path.display()))
}
