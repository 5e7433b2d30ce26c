//! Viewer configuration.
//!
//! Everything here is fixed at compile time: there is no config file and
//! no environment lookup (apart from `RUST_LOG` for the logger).

/// CSV export of the references sheet.
pub const SHEET_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/1XuGWm_gDG5edw9YkznTQGABTBah1Ptz9lfstoFdGVbA/export?format=csv&gid=49303292";

/// Separator between blocks of a multi-section cell.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Separator between tokens of a multi-value cell.
pub const TOKEN_SEPARATOR: char = ',';

/// Columns whose empty cells visually merge into the cell above.
pub const MERGE_COLUMNS: &[&str] = &[
    "Num",
    "Region",
    "country",
    "Autores",
    "Titulo",
    "Afiliation",
    "Resumo",
    "Num de Ref",
    "IA abstract 100 palavras",
    "IA keywords",
];

/// Known regions and their RGB background.
pub const REGION_COLORS: &[(&str, [u8; 3])] = &[
    ("Africa", [240, 230, 140]),
    ("Asia", [173, 216, 230]),
    ("Australia and New Zeland", [255, 235, 205]),
    ("Canada and EUA", [200, 200, 255]),
    ("Europe", [221, 160, 221]),
    ("Latin America", [152, 251, 152]),
    ("Eastern Mediterranean", [255, 182, 193]),
];

/// Which sheet columns play which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub sheet_url: String,
    /// Cells holding several references separated by a blank line.
    pub section_column: String,
    /// Single-value filter and banding column.
    pub group_column: String,
    /// Comma-separated author list.
    pub author_column: String,
    /// Column counted by the metric.
    pub count_column: String,
    pub merge_columns: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sheet_url: SHEET_CSV_URL.to_string(),
            section_column: "Ref".to_string(),
            group_column: "Region".to_string(),
            author_column: "Autores".to_string(),
            count_column: "Num".to_string(),
            merge_columns: MERGE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ViewerConfig {
    /// Merge columns, minus the section column which never merges.
    pub fn mergeable_columns(&self) -> impl Iterator<Item = &str> {
        self.merge_columns
            .iter()
            .map(String::as_str)
            .filter(move |c| *c != self.section_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_column_never_merges() {
        let mut config = ViewerConfig::default();
        config.merge_columns.push("Ref".to_string());

        let cols: Vec<&str> = config.mergeable_columns().collect();
        assert!(!cols.contains(&"Ref"));
        assert!(cols.contains(&"Region"));
        assert_eq!(cols.len(), MERGE_COLUMNS.len());
    }
}
