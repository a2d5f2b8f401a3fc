use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{heatmap, insight, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AirQualityApp {
    pub state: AppState,
}

impl AirQualityApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AirQualityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts, heatmap, insight ----
        let state = &self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.heading(format!("Air quality · {}", state.selection.station));
                ui.add_space(6.0);

                ui.columns(2, |cols| {
                    plot::month_chart(&mut cols[0], &state.analysis.aggregate);
                    plot::hour_chart(&mut cols[1], &state.analysis.aggregate);
                });
                ui.separator();

                heatmap::correlation_heatmap(ui, &state.analysis.correlation);
                ui.separator();

                insight::insight_panel(ui, &state.analysis.insight);
                ui.separator();

                egui::CollapsingHeader::new("Filtered readings")
                    .default_open(false)
                    .show(ui, |ui| {
                        table::readings_table(
                            ui,
                            &state.dataset,
                            &state.analysis.visible_indices,
                        );
                    });
            });
        });
    }
}
