use std::collections::{BTreeSet, HashMap};

use crate::config::TOKEN_SEPARATOR;

use super::model::Table;

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Active selections.
///
/// Both parts compose (a row must pass both); the UI keeps them mutually
/// exclusive by clearing one whenever the other is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected value of the group column, `None` = all.
    pub single: Option<String>,
    /// Selected tokens of the author column, empty = all.
    pub multi: BTreeSet<String>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.single.is_some() || !self.multi.is_empty()
    }

    /// Add `token` if absent, remove it otherwise.
    pub fn toggle(&mut self, token: &str) {
        if !self.multi.remove(token) {
            self.multi.insert(token.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Single-value filter
// ---------------------------------------------------------------------------

/// Rows whose `column` equals `target` exactly; the whole table when
/// `target` is `None`.
///
/// A table without `column` yields no rows for any target.
pub fn filter_single(table: &Table, column: &str, target: Option<&str>) -> Table {
    let Some(target) = target else {
        return table.clone();
    };
    let rows = table
        .rows
        .iter()
        .filter(|row| row.get(column).is_some_and(|v| v == target))
        .cloned()
        .collect();
    table.with_rows(rows)
}

/// Distinct non-empty values of `column`, sorted. Empty if the column is
/// absent.
pub fn single_values(table: &Table, column: &str) -> Vec<String> {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Multi-value filter
// ---------------------------------------------------------------------------

/// Trimmed comma-separated tokens of a cell.
pub fn split_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(TOKEN_SEPARATOR).map(str::trim)
}

/// Rows having at least one token of `column` in `selected` (logical OR).
///
/// An empty selection, or a table lacking `column`, returns the whole table.
pub fn filter_multi(table: &Table, column: &str, selected: &BTreeSet<String>) -> Table {
    if selected.is_empty() {
        return table.clone();
    }
    if !table.has_column(column) {
        log::warn!("Column '{column}' not found, multi-value filter ignored");
        return table.clone();
    }
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row.get(column)
                .is_some_and(|cell| split_tokens(cell).any(|t| selected.contains(t)))
        })
        .cloned()
        .collect();
    table.with_rows(rows)
}

/// Every distinct non-empty token of `column` with its number of
/// occurrences, most frequent first. Ties keep first-appearance order.
pub fn token_frequencies(table: &Table, column: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for cell in table.rows.iter().filter_map(|row| row.get(column)) {
        for token in split_tokens(cell).filter(|t| !t.is_empty()) {
            match slots.get(token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(token, counts.len());
                    counts.push((token.to_string(), 1));
                }
            }
        }
    }

    // stable: equal counts keep first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
