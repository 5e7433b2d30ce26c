use eframe::egui;

use crate::engine::Command;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RefViewerApp {
    pub state: AppState,
}

impl RefViewerApp {
    /// Build the app and fetch the sheet once before the first frame.
    pub fn new() -> Self {
        let mut state = AppState::default();
        state.run(Command::Load);
        Self { state }
    }
}

impl eframe::App for RefViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: console ----
        egui::SidePanel::right("console_panel")
            .default_width(320.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                panels::console_panel(ui, &mut self.state);
            });

        // ---- Central panel: caption + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::view_header(ui, &mut self.state);
            if let Some(row) = table::sheet_table(ui, &self.state) {
                self.state.show_row_details(row);
            }
        });
    }
}
