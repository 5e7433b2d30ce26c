use std::collections::BTreeMap;

use super::model::Table;

// ---------------------------------------------------------------------------
// Runs of rows
// ---------------------------------------------------------------------------

/// `len` consecutive rows starting at `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub len: usize,
}

fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Merge runs of one column: every non-empty cell followed by at least one
/// empty cell, with the run length counting the anchor itself.
///
/// Empty cells above the first non-empty one belong to no run.
pub fn column_spans(table: &Table, column: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current: Option<Span> = None;

    for (i, row) in table.rows.iter().enumerate() {
        let cell = row.get(column).map(String::as_str).unwrap_or("");
        if is_blank(cell) {
            if let Some(span) = current.as_mut() {
                span.len += 1;
            }
            continue;
        }
        if let Some(span) = current.take() {
            spans.push(span);
        }
        current = Some(Span { row: i, len: 1 });
    }
    spans.extend(current);

    spans.retain(|s| s.len > 1);
    spans
}

/// Band index per row: starts at 1 and increments each time the trimmed
/// value of `column` differs from the previous row's. `None` when the table
/// lacks `column`.
pub fn bands(table: &Table, column: &str) -> Option<Vec<usize>> {
    if !table.has_column(column) {
        return None;
    }
    let mut band = 0;
    let mut last: Option<&str> = None;
    let indices = table
        .rows
        .iter()
        .map(|row| {
            let value = row.get(column).map(|v| v.trim()).unwrap_or("");
            if last != Some(value) {
                band += 1;
                last = Some(value);
            }
            band
        })
        .collect();
    Some(indices)
}

/// Contiguous rows sharing a band.
pub fn band_runs(bands: &[usize]) -> Vec<Span> {
    let mut runs: Vec<Span> = Vec::new();
    for (i, band) in bands.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if bands[run.row] == *band => run.len += 1,
            _ => runs.push(Span { row: i, len: 1 }),
        }
    }
    runs
}

// ---------------------------------------------------------------------------
// Overlay – derived, read-only presentation data
// ---------------------------------------------------------------------------

/// Spans and bands computed for a displayed table.
///
/// Never mutates the table it was computed from; lookups are by
/// (row, column name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    /// column → anchor row → span length (> 1 only).
    spans: BTreeMap<String, BTreeMap<usize, usize>>,
    /// column → covered row → anchor row.
    covered: BTreeMap<String, BTreeMap<usize, usize>>,
    bands: Option<Vec<usize>>,
}

impl Overlay {
    pub fn compute<'a>(
        table: &Table,
        merge_columns: impl IntoIterator<Item = &'a str>,
        group_column: &str,
    ) -> Self {
        let mut overlay = Overlay {
            bands: bands(table, group_column),
            ..Default::default()
        };

        for column in merge_columns {
            if !table.has_column(column) {
                continue;
            }
            let spans = column_spans(table, column);
            if spans.is_empty() {
                continue;
            }
            let anchors = overlay.spans.entry(column.to_string()).or_default();
            let covered = overlay.covered.entry(column.to_string()).or_default();
            for span in spans {
                anchors.insert(span.row, span.len);
                for row in span.row + 1..span.row + span.len {
                    covered.insert(row, span.row);
                }
            }
        }
        overlay
    }

    /// Length of the merge run anchored at (row, column), if any.
    pub fn span_at(&self, row: usize, column: &str) -> Option<usize> {
        self.spans.get(column)?.get(&row).copied()
    }

    /// Anchor row of the run covering an empty cell.
    pub fn anchor_of(&self, row: usize, column: &str) -> Option<usize> {
        self.covered.get(column)?.get(&row).copied()
    }

    /// All merge runs of `column`, top to bottom.
    pub fn spans(&self, column: &str) -> Vec<Span> {
        self.spans
            .get(column)
            .map(|m| m.iter().map(|(&row, &len)| Span { row, len }).collect())
            .unwrap_or_default()
    }

    /// Band index of `row`; `None` without a group column.
    pub fn band(&self, row: usize) -> Option<usize> {
        self.bands.as_ref()?.get(row).copied()
    }

    pub fn band_runs(&self) -> Vec<Span> {
        self.bands.as_deref().map(band_runs).unwrap_or_default()
    }
}
