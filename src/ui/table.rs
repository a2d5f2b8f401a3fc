use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Dataset, Measure};

/// Rows shown in the preview table.
const PREVIEW_ROWS: usize = 500;

const MEASURES: [Measure; 6] = [
    Measure::Pm25,
    Measure::Pm10,
    Measure::No2,
    Measure::Temp,
    Measure::Dewp,
    Measure::Rain,
];

fn measure_text(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.1}"))
}

/// Scrollable preview of the first filtered readings.
pub fn readings_table(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    let shown = indices.len().min(PREVIEW_ROWS);
    ui.label(format!("Showing {shown} of {} readings in view", indices.len()));

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(260.0)
        .column(Column::auto().at_least(90.0))
        .columns(Column::auto().at_least(44.0), 3)
        .columns(Column::auto().at_least(56.0), MEASURES.len())
        .header(20.0, |mut header| {
            for title in ["station", "year", "month", "hour"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
            for m in MEASURES {
                header.col(|ui| {
                    ui.strong(m.label());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, shown, |mut row| {
                let r = &dataset.readings[indices[row.index()]];
                row.col(|ui| {
                    ui.label(&r.station);
                });
                for key in [r.year.to_string(), r.month.to_string(), r.hour.to_string()] {
                    row.col(|ui| {
                        ui.label(key);
                    });
                }
                for m in MEASURES {
                    row.col(|ui| {
                        ui.label(measure_text(m.value(r)));
                    });
                }
            });
        });
}
