use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month name for 1-based `month`.
pub fn month_name(month: u8) -> &'static str {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("?")
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("Dataset is empty.");
        return;
    }

    // Hold our own handle so widgets can mutate state while iterating.
    let dataset = Arc::clone(&state.dataset);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Station selector ----
            ui.strong("Station");
            egui::ComboBox::from_id_salt("station")
                .selected_text(&state.selection.station)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for station in &dataset.stations {
                        let current = state.selection.station == *station;
                        if ui.selectable_label(current, station).clicked() && !current {
                            state.set_station(station);
                        }
                    }
                });
            ui.separator();

            // ---- Years ----
            let header = format!(
                "Years  ({}/{})",
                state.selection.years.len(),
                dataset.years.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_years();
                        }
                    });
                    for &year in &dataset.years {
                        let mut checked = state.selection.years.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            // ---- Months ----
            let header = format!(
                "Months  ({}/{})",
                state.selection.months.len(),
                dataset.months.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("months")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_months();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_months();
                        }
                    });
                    for &month in &dataset.months {
                        let mut checked = state.selection.months.contains(&month);
                        let label = format!("{month:>2}  {}", month_name(month));
                        if ui.checkbox(&mut checked, label).changed() {
                            state.toggle_month(month);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export insight…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} readings loaded, {} in view",
            state.dataset.len(),
            state.analysis.visible_indices.len()
        ));

        ui.separator();
        ui.label(RichText::new(state.source.display().to_string()).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air-quality data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, path),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export insight")
        .add_filter("JSON", &["json"])
        .set_file_name("insight.json")
        .save_file();

    if let Some(path) = file {
        state.status_message = match state.export_insight(&path) {
            Ok(()) => None,
            Err(e) => {
                log::error!("Failed to export insight: {e:#}");
                Some(format!("Error: {e:#}"))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "Jan");
        assert_eq!(month_name(12), "Dec");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }
}
