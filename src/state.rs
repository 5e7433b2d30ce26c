use std::path::PathBuf;

use crate::color::RegionPalette;
use crate::config::ViewerConfig;
use crate::data::loader::{FileSource, HttpSource};
use crate::engine::{Command, DisplayState, Engine};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub engine: Engine,

    /// Output of the last successful command (cached).
    pub display: DisplayState,

    /// Region menu entries.
    pub region_choices: Vec<String>,

    /// Author menu entries with their counts.
    pub author_choices: Vec<(String, usize)>,

    pub palette: RegionPalette,

    /// Lines of the console panel, oldest first.
    pub console: Vec<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        let display = engine.display();
        Self {
            engine,
            display,
            region_choices: Vec::new(),
            author_choices: Vec::new(),
            palette: RegionPalette::default(),
            console: Vec::new(),
            status_message: None,
        }
    }

    /// Dispatch `command`, then refresh the cached display, console and
    /// status line. Returns whether the command succeeded.
    pub fn run(&mut self, command: Command) -> bool {
        self.apply(command, true)
    }

    /// Like [`AppState::run`]; `announce = false` keeps the notice out of
    /// the console (errors are always shown).
    fn apply(&mut self, command: Command, announce: bool) -> bool {
        let reloads = matches!(command, Command::Load | Command::Reload);
        match self.engine.dispatch(command) {
            Ok(update) => {
                self.display = update.display;
                if announce {
                    self.append_console(update.notice);
                }
                self.status_message = None;
                if reloads {
                    self.refresh_choices();
                }
                true
            }
            Err(e) => {
                let msg = format!("Error: {e}");
                self.append_console(msg.clone());
                self.status_message = Some(msg);
                false
            }
        }
    }

    fn refresh_choices(&mut self) {
        self.region_choices = self.engine.region_choices();
        self.author_choices = self.engine.author_choices();
        self.palette = RegionPalette::new(&self.region_choices);
    }

    pub fn reload(&mut self) -> bool {
        self.run(Command::Reload)
    }

    /// Show one region (or all). Clears any author selection first.
    pub fn select_region(&mut self, region: Option<String>) {
        if !self.engine.filters().multi.is_empty() {
            self.apply(Command::ClearAuthors, false);
        }
        self.run(Command::SetSingleFilter(region));
    }

    /// Toggle one author. Clears any region selection first.
    pub fn toggle_author(&mut self, name: &str) {
        if self.engine.filters().single.is_some() {
            self.apply(Command::SetSingleFilter(None), false);
        }
        self.run(Command::ToggleAuthor(name.to_string()));
    }

    pub fn clear_authors(&mut self) {
        self.run(Command::ClearAuthors);
    }

    pub fn is_author_selected(&self, name: &str) -> bool {
        self.engine.filters().multi.contains(name)
    }

    pub fn export_to(&mut self, path: PathBuf) -> bool {
        self.run(Command::Export(path))
    }

    /// Load a local CSV and keep using it for reloads.
    pub fn open_local(&mut self, path: PathBuf) -> bool {
        self.engine.set_source(Box::new(FileSource::new(path)));
        self.run(Command::Load)
    }

    /// Switch back to the remote sheet and fetch it.
    pub fn use_remote(&mut self) -> bool {
        let url = self.engine.config().sheet_url.clone();
        self.engine.set_source(Box::new(HttpSource::new(url)));
        self.run(Command::Load)
    }

    pub fn append_console(&mut self, line: impl Into<String>) {
        self.console.push(line.into());
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
        self.append_console("Console cleared.");
    }

    /// Print every column of a displayed row to the console.
    pub fn show_row_details(&mut self, row: usize) {
        if let Some(details) = self.display.row_details(row) {
            self.append_console(details);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Engine::remote(ViewerConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn state_with_sheet() -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Num,Region,Autores,Ref\n1,Asia,\"Alice, Bob\",r1\n2,Europe,Carol,r2\n3,Atlantis,Alice,r3\n"
        )
        .unwrap();
        let mut state = AppState::new(Engine::new(
            ViewerConfig::default(),
            Box::new(FileSource::new(file.path())),
        ));
        assert!(state.run(Command::Load));
        (state, file)
    }

    #[test]
    fn load_fills_menus_and_console() {
        let (state, _file) = state_with_sheet();
        assert_eq!(state.region_choices, vec!["Asia", "Atlantis", "Europe"]);
        assert_eq!(state.author_choices[0], ("Alice".to_string(), 2));
        assert_ne!(state.palette.color_for("Atlantis"), eframe::egui::Color32::WHITE);
        assert_eq!(state.console, vec!["Data loaded successfully."]);
        assert_eq!(state.display.table.len(), 3);
    }

    #[test]
    fn region_and_author_filters_are_exclusive() {
        let (mut state, _file) = state_with_sheet();

        state.toggle_author("Alice");
        assert_eq!(state.display.table.len(), 2);

        state.select_region(Some("Europe".into()));
        assert!(!state.is_author_selected("Alice"));
        assert_eq!(state.display.label, "Viewing: Europe");
        assert_eq!(state.display.table.len(), 1);

        state.toggle_author("Bob");
        assert!(state.engine.filters().single.is_none());
        assert_eq!(state.display.label, "Viewing: Author(s) - Bob");
    }

    #[test]
    fn switching_filters_logs_one_line_per_action() {
        let (mut state, _file) = state_with_sheet();

        state.toggle_author("Alice");
        state.select_region(Some("Asia".into()));
        state.toggle_author("Carol");

        assert_eq!(
            state.console,
            vec![
                "Data loaded successfully.",
                "Filter applied: Author(s) - Alice",
                "Filter applied: Asia",
                "Filter applied: Author(s) - Carol",
            ]
        );
    }

    #[test]
    fn failures_reach_status_and_console() {
        let (mut state, file) = state_with_sheet();
        let path = file.path().to_path_buf();
        drop(file);

        assert!(!state.open_local(path));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error: "));
        assert!(state.console.last().unwrap().starts_with("Error: "));
        assert_eq!(state.display.table.len(), 3);
    }

    #[test]
    fn console_clear_and_row_details() {
        let (mut state, _file) = state_with_sheet();
        state.clear_console();
        assert_eq!(state.console, vec!["Console cleared."]);

        state.show_row_details(1);
        assert!(state.console[1].contains("Region: Europe"));
        state.show_row_details(42);
        assert_eq!(state.console.len(), 2);
    }
}
