use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu bar: file actions and the two filter menus.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Use remote sheet").clicked() {
                state.use_remote();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export CSV…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("Filter by Region", |ui: &mut Ui| {
            region_menu(ui, state);
        });

        ui.menu_button("Filter by Author", |ui: &mut Ui| {
            author_menu(ui, state);
        });

        ui.separator();
        ui.label(format!("Source: {}", state.engine.source_description()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn region_menu(ui: &mut Ui, state: &mut AppState) {
    let current = state.engine.filters().single.clone();

    if ui.selectable_label(current.is_none(), "All").clicked() {
        state.select_region(None);
        ui.close_menu();
    }

    let regions = state.region_choices.clone();
    for region in regions {
        let text = RichText::new(&region)
            .color(Color32::BLACK)
            .background_color(state.palette.color_for(&region));
        let selected = current.as_deref() == Some(region.as_str());
        if ui.selectable_label(selected, text).clicked() {
            state.select_region(Some(region));
            ui.close_menu();
        }
    }
}

fn author_menu(ui: &mut Ui, state: &mut AppState) {
    if ui.button("All").clicked() {
        state.clear_authors();
        ui.close_menu();
    }
    ui.separator();

    let authors = state.author_choices.clone();
    ScrollArea::vertical()
        .max_height(400.0)
        .show(ui, |ui: &mut Ui| {
            for (name, count) in &authors {
                let mut checked = state.is_author_selected(name);
                if ui
                    .checkbox(&mut checked, format!("{name} ({count})"))
                    .changed()
                {
                    state.toggle_author(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// View header and action buttons
// ---------------------------------------------------------------------------

/// View caption, metric line and the reload / export buttons.
pub fn view_header(ui: &mut Ui, state: &mut AppState) {
    ui.label(&state.display.label);

    let metric = state
        .display
        .metric
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_default();
    ui.label(RichText::new(metric).italics().color(Color32::GRAY));

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("🔄 Reload data").clicked() {
            state.reload();
        }
        if ui.button("Export CSV").clicked() {
            export_file_dialog(state);
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Console (right side panel)
// ---------------------------------------------------------------------------

/// Render the console log with its clear button.
pub fn console_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("Console").strong().color(Color32::WHITE));
    });
    if ui.button("Clear").clicked() {
        state.clear_console();
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui: &mut Ui| {
            for line in &state.console {
                ui.label(RichText::new(line).monospace().color(Color32::WHITE));
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV")
        .add_filter("CSV Files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_local(path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    if state.display.table.columns.is_empty() {
        state.append_console("Nothing to export.");
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Save CSV")
        .add_filter("CSV Files", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(path);
    }
}
