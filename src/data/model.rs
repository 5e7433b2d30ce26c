use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Row – one record of the sheet
// ---------------------------------------------------------------------------

/// A single record: column_name → cell text.
///
/// Rows built through [`Table`] always carry every column of the table,
/// missing cells being stored as the empty string.
pub type Row = BTreeMap<String, String>;

/// Make header names usable as row keys: a blank header becomes
/// `Unnamed: <index>` and a repeated one gets a `.1`, `.2`... suffix, so no
/// two columns share a key.
pub fn unique_columns(columns: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    columns
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut n = 0;
            while seen.contains(&candidate) {
                n += 1;
                candidate = format!("{base}.{n}");
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Table – the complete loaded sheet
// ---------------------------------------------------------------------------

/// Ordered column names plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names in sheet order. Fixed once loaded.
    pub columns: Vec<String>,
    /// All rows in sheet order.
    pub rows: Vec<Row>,
}

impl Table {
    /// An empty table with the given header, made unique with
    /// [`unique_columns`].
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns: unique_columns(columns),
            rows: Vec::new(),
        }
    }

    /// Build a table from positional records.
    ///
    /// Short records are padded with empty cells, extra trailing fields are
    /// dropped.
    pub fn from_records<I, R, S>(columns: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Table::new(columns);
        for record in records {
            let mut values = record.into_iter();
            let row: Row = table
                .columns
                .iter()
                .map(|col| {
                    let value = values.next().map(Into::into).unwrap_or_default();
                    (col.clone(), value)
                })
                .collect();
            table.rows.push(row);
        }
        table
    }

    /// Same header, different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Append a row, filling absent columns with `""` and discarding keys
    /// that are not part of the header.
    pub fn push_row(&mut self, mut row: Row) {
        let normalised: Row = self
            .columns
            .iter()
            .map(|col| (col.clone(), row.remove(col).unwrap_or_default()))
            .collect();
        self.rows.push(normalised);
    }

    /// A row whose every cell is empty.
    pub fn blank_row(&self) -> Row {
        self.columns
            .iter()
            .map(|col| (col.clone(), String::new()))
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text at (row, column), `None` when either is out of range.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Cells of `row` in header order.
    pub fn record<'a>(&'a self, row: &'a Row) -> impl Iterator<Item = &'a str> + 'a {
        self.columns
            .iter()
            .map(move |col| row.get(col).map(String::as_str).unwrap_or(""))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
