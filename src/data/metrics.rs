use std::fmt;

use super::model::Table;

/// Outcome of counting a designated column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metric {
    /// Rows with a non-blank value.
    Count(usize),
    /// The table has no such column.
    ColumnMissing(String),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Count(n) => write!(f, "Abstracts: {n}"),
            Metric::ColumnMissing(col) => write!(f, "Column '{col}' not found."),
        }
    }
}

/// Count rows whose `column` is non-empty after trimming.
pub fn count_non_empty(table: &Table, column: &str) -> Metric {
    if !table.has_column(column) {
        return Metric::ColumnMissing(column.to_string());
    }
    let n = table
        .rows
        .iter()
        .filter(|row| row.get(column).is_some_and(|v| !v.trim().is_empty()))
        .count();
    Metric::Count(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_not_counted() {
        let table = Table::from_records(
            vec!["Num".into()],
            vec![vec!["1"], vec![""], vec!["3"], vec!["  "]],
        );
        assert_eq!(count_non_empty(&table, "Num"), Metric::Count(2));
    }

    #[test]
    fn missing_column_is_distinct_from_zero() {
        let table = Table::new(vec!["Region".into()]);
        assert_eq!(
            count_non_empty(&table, "Num"),
            Metric::ColumnMissing("Num".into())
        );
        assert_eq!(
            count_non_empty(&Table::new(vec!["Num".into()]), "Num"),
            Metric::Count(0)
        );
    }

    #[test]
    fn display_text() {
        assert_eq!(Metric::Count(4).to_string(), "Abstracts: 4");
        assert_eq!(
            Metric::ColumnMissing("Num".into()).to_string(),
            "Column 'Num' not found."
        );
    }
}
