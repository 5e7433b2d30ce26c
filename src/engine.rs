use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::data::expand::expand_sections;
use crate::data::export::export_csv;
use crate::data::filter::{
    filter_multi, filter_single, single_values, token_frequencies, FilterState,
};
use crate::data::loader::{HttpSource, TableSource};
use crate::data::metrics::{count_non_empty, Metric};
use crate::data::model::Table;
use crate::data::overlay::Overlay;
use crate::error::{EngineError, LoadError};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Everything the UI can ask of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the table from the current source.
    Load,
    /// Fetch again; same as `Load`, logged as a reload.
    Reload,
    /// Select a group value, or `None` for all.
    SetSingleFilter(Option<String>),
    /// Add or remove one author from the selection.
    ToggleAuthor(String),
    ClearAuthors,
    /// Write the displayed table to a CSV file.
    Export(PathBuf),
}

// ---------------------------------------------------------------------------
// Display state
// ---------------------------------------------------------------------------

/// What the rendering layer shows after a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Filtered rows, all columns.
    pub table: Table,
    pub overlay: Overlay,
    pub metric: Option<Metric>,
    /// "Viewing: ..." caption.
    pub label: String,
}

impl DisplayState {
    /// `header: value` lines for one displayed row.
    pub fn row_details(&self, row: usize) -> Option<String> {
        let cells = self.table.rows.get(row)?;
        let lines: Vec<String> = self
            .table
            .columns
            .iter()
            .zip(self.table.record(cells))
            .map(|(header, value)| format!("{header}: {value}"))
            .collect();
        Some(format!("Selected row details:\n{}", lines.join("\n")))
    }
}

/// Result of a successful command: the new display plus a console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub display: DisplayState,
    pub notice: String,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Owns the loaded table and the filter selections.
///
/// The table is `None` until the first successful load; a failed load keeps
/// whatever was there before.
pub struct Engine {
    config: ViewerConfig,
    source: Box<dyn TableSource>,
    table: Option<Table>,
    filters: FilterState,
}

impl Engine {
    pub fn new(config: ViewerConfig, source: Box<dyn TableSource>) -> Self {
        Self {
            config,
            source,
            table: None,
            filters: FilterState::default(),
        }
    }

    /// Engine reading the configured remote sheet.
    pub fn remote(config: ViewerConfig) -> Self {
        let source = HttpSource::new(config.sheet_url.clone());
        Self::new(config, Box::new(source))
    }

    /// Replace the source used by the next `Load` / `Reload`.
    pub fn set_source(&mut self, source: Box<dyn TableSource>) {
        log::info!("Table source set to {}", source.describe());
        self.source = source;
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Apply `command` and return the resulting display.
    pub fn dispatch(&mut self, command: Command) -> Result<Update, EngineError> {
        let notice = match command {
            Command::Load => {
                self.load()?;
                "Data loaded successfully.".to_string()
            }
            Command::Reload => {
                log::info!("Reloading from {}", self.source.describe());
                self.load()?;
                "Data reloaded successfully.".to_string()
            }
            Command::SetSingleFilter(value) => {
                let notice = match &value {
                    Some(v) => format!("Filter applied: {v}"),
                    None => "Filter applied: all regions".to_string(),
                };
                self.filters.single = value;
                notice
            }
            Command::ToggleAuthor(name) => {
                self.filters.toggle(&name);
                self.author_notice()
            }
            Command::ClearAuthors => {
                self.filters.multi.clear();
                self.author_notice()
            }
            Command::Export(path) => {
                let display = self.display();
                if display.table.columns.is_empty() {
                    return Err(EngineError::NothingToExport);
                }
                export_csv(&display.table, &path).map_err(|e| {
                    log::error!("Export failed: {e:#}");
                    EngineError::Export(e)
                })?;
                log::info!("Exported {} rows to {}", display.table.len(), path.display());
                return Ok(Update {
                    display,
                    notice: format!("File saved to: {}", path.display()),
                });
            }
        };
        log::info!("{notice}");
        Ok(Update {
            display: self.display(),
            notice,
        })
    }

    fn load(&mut self) -> Result<(), LoadError> {
        let raw = self.source.fetch().map_err(|e| {
            log::error!("Failed to load from {}: {e}", self.source.describe());
            e
        })?;
        let table = expand_sections(&raw, &self.config.section_column);
        log::info!(
            "Loaded {} rows ({} after expansion) with columns {:?}",
            raw.len(),
            table.len(),
            table.columns
        );
        self.table = Some(table);
        self.filters = FilterState::default();
        Ok(())
    }

    fn author_notice(&self) -> String {
        if self.filters.multi.is_empty() {
            "Author filter removed, showing all.".to_string()
        } else {
            format!("Filter applied: {}", self.author_caption())
        }
    }

    fn author_caption(&self) -> String {
        let names: Vec<&str> = self.filters.multi.iter().map(String::as_str).collect();
        format!("Author(s) - {}", names.join(", "))
    }

    /// The filtered table with its derived overlay and metric.
    pub fn display(&self) -> DisplayState {
        let Some(full) = &self.table else {
            return DisplayState {
                label: self.view_label(),
                ..Default::default()
            };
        };
        let cfg = &self.config;
        let single = filter_single(full, &cfg.group_column, self.filters.single.as_deref());
        let table = filter_multi(&single, &cfg.author_column, &self.filters.multi);
        let overlay = Overlay::compute(&table, cfg.mergeable_columns(), &cfg.group_column);
        let metric = count_non_empty(&table, &cfg.count_column);

        DisplayState {
            table,
            overlay,
            metric: Some(metric),
            label: self.view_label(),
        }
    }

    pub fn view_label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(v) = &self.filters.single {
            parts.push(v.clone());
        }
        if !self.filters.multi.is_empty() {
            parts.push(self.author_caption());
        }
        if parts.is_empty() {
            "Viewing: All".to_string()
        } else {
            format!("Viewing: {}", parts.join(" | "))
        }
    }

    /// Group values offered by the single-value filter menu.
    pub fn region_choices(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|t| single_values(t, &self.config.group_column))
            .unwrap_or_default()
    }

    /// Authors with their row counts, most frequent first.
    pub fn author_choices(&self) -> Vec<(String, usize)> {
        self.table
            .as_ref()
            .map(|t| token_frequencies(t, &self.config.author_column))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::FileSource;
    use pretty_assertions::assert_eq;

    struct StaticSource(Table);

    impl TableSource for StaticSource {
        fn fetch(&self) -> Result<Table, LoadError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct FailingSource;

    impl TableSource for FailingSource {
        fn fetch(&self) -> Result<Table, LoadError> {
            Err(LoadError::NoHeaders)
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn sheet() -> Table {
        Table::from_records(
            ["Num", "Region", "Autores", "Ref", "Titulo"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            vec![
                vec!["1", "Asia", "Alice, Carol", "a1\n\na2", "T1"],
                vec!["2", "Asia", "Dave", "b1", "T2"],
                vec!["3", "Europe", "Bob", "c1\n\nc2\n\nc3", "T3"],
                vec!["", "Europe", "Alice", "d1", ""],
            ],
        )
    }

    fn loaded() -> Engine {
        let mut engine = Engine::new(ViewerConfig::default(), Box::new(StaticSource(sheet())));
        engine.dispatch(Command::Load).unwrap();
        engine
    }

    fn column(table: &Table, name: &str) -> Vec<String> {
        (0..table.len())
            .map(|i| table.cell(i, name).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn nothing_is_displayed_before_load() {
        let engine = Engine::new(ViewerConfig::default(), Box::new(FailingSource));
        let display = engine.display();
        assert!(display.table.is_empty());
        assert_eq!(display.metric, None);
        assert_eq!(display.label, "Viewing: All");
        assert!(engine.region_choices().is_empty());
    }

    #[test]
    fn load_expands_sections() {
        let engine = loaded();
        let table = engine.table().unwrap();
        assert_eq!(
            column(table, "Ref"),
            vec!["a1", "a2", "b1", "c1", "c2", "c3", "d1"]
        );
        assert_eq!(
            column(table, "Num"),
            vec!["1", "", "2", "3", "", "", ""]
        );
    }

    #[test]
    fn display_carries_overlay_and_metric() {
        let display = loaded().display();

        assert_eq!(display.metric, Some(Metric::Count(3)));
        assert_eq!(display.overlay.span_at(0, "Num"), Some(2));
        assert_eq!(display.overlay.span_at(3, "Num"), Some(4));
        assert_eq!(display.overlay.span_at(3, "Titulo"), Some(4));
        assert_eq!(display.overlay.span_at(0, "Ref"), None);
        assert_eq!(display.overlay.band(0), Some(1));
        assert_eq!(display.overlay.band(1), Some(2));
    }

    #[test]
    fn single_filter_selects_and_clears() {
        let mut engine = loaded();
        let update = engine
            .dispatch(Command::SetSingleFilter(Some("Europe".into())))
            .unwrap();
        assert_eq!(column(&update.display.table, "Num"), vec!["3", ""]);
        assert_eq!(update.display.label, "Viewing: Europe");
        assert_eq!(update.notice, "Filter applied: Europe");

        let update = engine.dispatch(Command::SetSingleFilter(None)).unwrap();
        assert_eq!(&update.display.table, engine.table().unwrap());
        assert_eq!(update.display.label, "Viewing: All");
    }

    #[test]
    fn author_toggles_compose_as_or() {
        let mut engine = loaded();
        engine.dispatch(Command::ToggleAuthor("Dave".into())).unwrap();
        let update = engine.dispatch(Command::ToggleAuthor("Bob".into())).unwrap();

        assert_eq!(column(&update.display.table, "Num"), vec!["2", "3"]);
        assert_eq!(update.display.label, "Viewing: Author(s) - Bob, Dave");
        assert_eq!(update.display.metric, Some(Metric::Count(2)));

        let update = engine.dispatch(Command::ToggleAuthor("Bob".into())).unwrap();
        assert_eq!(column(&update.display.table, "Num"), vec!["2"]);

        let update = engine.dispatch(Command::ClearAuthors).unwrap();
        assert_eq!(update.display.table.len(), 7);
        assert_eq!(update.notice, "Author filter removed, showing all.");
    }

    #[test]
    fn filters_compose_in_the_model() {
        let mut engine = loaded();
        engine
            .dispatch(Command::SetSingleFilter(Some("Europe".into())))
            .unwrap();
        let update = engine.dispatch(Command::ToggleAuthor("Alice".into())).unwrap();

        assert_eq!(column(&update.display.table, "Ref"), vec!["d1"]);
        assert_eq!(update.display.label, "Viewing: Europe | Author(s) - Alice");
    }

    #[test]
    fn choices_come_from_the_loaded_table() {
        let engine = loaded();
        assert_eq!(engine.region_choices(), vec!["Asia", "Europe"]);
        assert_eq!(engine.author_choices()[0], ("Alice".to_string(), 2));
        assert_eq!(engine.author_choices().len(), 4);
    }

    #[test]
    fn reload_resets_filters() {
        let mut engine = loaded();
        engine.dispatch(Command::ToggleAuthor("Bob".into())).unwrap();
        engine
            .dispatch(Command::SetSingleFilter(Some("Asia".into())))
            .unwrap();

        let update = engine.dispatch(Command::Reload).unwrap();
        assert!(!engine.filters().is_active());
        assert_eq!(update.display.table.len(), 7);
    }

    #[test]
    fn failed_reload_keeps_previous_table() {
        let mut engine = loaded();
        engine.set_source(Box::new(FailingSource));

        let err = engine.dispatch(Command::Reload).unwrap_err();
        assert!(matches!(err, EngineError::Load(LoadError::NoHeaders)));
        assert_eq!(engine.table().unwrap().len(), 7);
    }

    #[test]
    fn first_failed_load_leaves_engine_empty() {
        let mut engine = Engine::new(ViewerConfig::default(), Box::new(FailingSource));
        assert!(engine.dispatch(Command::Load).is_err());
        assert!(engine.table().is_none());
    }

    #[test]
    fn export_without_columns_is_refused() {
        let mut engine = Engine::new(ViewerConfig::default(), Box::new(FailingSource));
        let dir = tempfile::tempdir().unwrap();
        let err = engine
            .dispatch(Command::Export(dir.path().join("out.csv")))
            .unwrap_err();
        assert!(matches!(err, EngineError::NothingToExport));
    }

    #[test]
    fn export_failure_is_reported() {
        let mut engine = loaded();
        let dir = tempfile::tempdir().unwrap();
        let err = engine
            .dispatch(Command::Export(dir.path().join("missing").join("out.csv")))
            .unwrap_err();
        assert!(matches!(err, EngineError::Export(_)));
    }

    #[test]
    fn exported_view_reloads_identically() {
        let mut engine = loaded();
        engine
            .dispatch(Command::SetSingleFilter(Some("Europe".into())))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.csv");
        let exported = engine.dispatch(Command::Export(path.clone())).unwrap();
        assert_eq!(exported.notice, format!("File saved to: {}", path.display()));

        let mut reopened = Engine::new(ViewerConfig::default(), Box::new(FileSource::new(&path)));
        let update = reopened.dispatch(Command::Load).unwrap();
        assert_eq!(update.display.table, exported.display.table);
    }

    #[test]
    fn row_details_list_every_column() {
        let display = loaded().display();
        let details = display.row_details(2).unwrap();
        assert_eq!(
            details,
            "Selected row details:\nNum: 2\nRegion: Asia\nAutores: Dave\nRef: b1\nTitulo: T2"
        );
        assert_eq!(display.row_details(99), None);
    }
}
