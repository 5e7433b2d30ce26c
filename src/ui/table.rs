use eframe::egui::{self, Color32, Label, Layout, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Sheet table (central panel)
// ---------------------------------------------------------------------------

/// Render the displayed table. Returns the row clicked this frame, if any.
///
/// Cells covered by a merge run are painted like their anchor and left
/// blank, so the run reads as one tall cell.
pub fn sheet_table(ui: &mut Ui, state: &AppState) -> Option<usize> {
    let display = &state.display;
    let table = &display.table;

    if table.columns.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded  (File → Reload)");
        });
        return None;
    }

    let config = state.engine.config();
    let group_column = config.group_column.as_str();
    let count_column = config.count_column.as_str();
    let mut clicked = None;

    egui::ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(false)
                .resizable(true)
                .sense(Sense::click())
                .cell_layout(Layout::left_to_right(egui::Align::Center))
                .columns(Column::initial(160.0).at_least(40.0).clip(true), table.columns.len())
                .min_scrolled_height(0.0)
                .header(ROW_HEIGHT, |mut header| {
                    for name in &table.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.len(), |mut row| {
                        let i = row.index();
                        for column in &table.columns {
                            // covered cells take the anchor's look
                            let source_row = display.overlay.anchor_of(i, column).unwrap_or(i);
                            let text = table.cell(source_row, column).unwrap_or("");
                            let region = table.cell(source_row, group_column).unwrap_or("");
                            let background = state.palette.cell_background(
                                region,
                                text,
                                display.overlay.band(source_row),
                            );
                            let covered = source_row != i;

                            row.col(|ui: &mut Ui| {
                                ui.painter().rect_filled(ui.max_rect(), 0.0, background);
                                if covered || text.trim().is_empty() {
                                    return;
                                }

                                let mut rich = RichText::new(text).color(Color32::BLACK);
                                if column == count_column {
                                    rich = rich.strong();
                                }
                                let label = Label::new(rich).truncate().selectable(false);
                                let response = if column == count_column {
                                    ui.vertical_centered(|ui: &mut Ui| ui.add(label)).inner
                                } else {
                                    ui.add(label)
                                };

                                let mut hover = text.to_string();
                                if let Some(span) = display.overlay.span_at(i, column) {
                                    hover.push_str(&format!("\n\n(spans {span} rows)"));
                                }
                                response.on_hover_text(hover);
                            });
                        }
                        if row.response().clicked() {
                            clicked = Some(i);
                        }
                    });
                });
        });

    clicked
}
