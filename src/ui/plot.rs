use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::analysis::aggregate::{AggregateResult, GroupMeans};

const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

// ---------------------------------------------------------------------------
// Mean PM2.5 line charts
// ---------------------------------------------------------------------------

/// Mean PM2.5 per month.
pub fn month_chart(ui: &mut Ui, aggregate: &AggregateResult) {
    ui.strong("Mean PM2.5 by month");
    mean_chart(ui, "pm25_by_month", "Month", &aggregate.by_month, (1.0, 12.0));
}

/// Mean PM2.5 per hour of day.
pub fn hour_chart(ui: &mut Ui, aggregate: &AggregateResult) {
    ui.strong("Mean PM2.5 by hour");
    mean_chart(ui, "pm25_by_hour", "Hour", &aggregate.by_hour, (0.0, 23.0));
}

fn mean_chart(ui: &mut Ui, id: &str, x_label: &str, means: &GroupMeans, x_range: (f64, f64)) {
    let points = AggregateResult::points(means);

    Plot::new(id)
        .height(260.0)
        .x_axis_label(x_label)
        .y_axis_label("PM2.5")
        .include_x(x_range.0)
        .include_x(x_range.1)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if points.is_empty() {
                return;
            }
            let line = Line::new(PlotPoints::from(points.clone()))
                .name("PM2.5")
                .color(LINE_COLOR)
                .width(1.5);
            let markers = Points::new(PlotPoints::from(points))
                .color(LINE_COLOR)
                .radius(3.5);
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}
