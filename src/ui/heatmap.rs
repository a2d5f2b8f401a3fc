use eframe::egui::{self, Align2, FontId, Rect, Sense, Stroke, Ui, pos2, vec2};

use crate::analysis::correlation::CorrelationMatrix;
use crate::color::{annotation_color, correlation_color};

const CELL: f32 = 64.0;
const LABEL_WIDTH: f32 = 56.0;
const LABEL_HEIGHT: f32 = 22.0;

/// Annotation for one cell; undefined coefficients read "n/a".
pub fn cell_text(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

/// Annotated correlation heatmap with row labels on the left and column
/// labels along the top.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    ui.strong("Pollutant / weather correlation");

    let n = matrix.columns().len();
    let size = vec2(LABEL_WIDTH + CELL * n as f32, LABEL_HEIGHT + CELL * n as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(13.0);

    for (j, col) in matrix.columns().iter().enumerate() {
        let center = origin + vec2(LABEL_WIDTH + CELL * (j as f32 + 0.5), LABEL_HEIGHT * 0.5);
        painter.text(center, Align2::CENTER_CENTER, col.label(), font.clone(), text_color);
    }

    for (i, row) in matrix.columns().iter().enumerate() {
        let y = origin.y + LABEL_HEIGHT + CELL * i as f32;
        painter.text(
            pos2(origin.x + LABEL_WIDTH - 6.0, y + CELL * 0.5),
            Align2::RIGHT_CENTER,
            row.label(),
            font.clone(),
            text_color,
        );

        for j in 0..n {
            let value = matrix.at(i, j);
            let rect = Rect::from_min_size(
                pos2(origin.x + LABEL_WIDTH + CELL * j as f32, y),
                vec2(CELL, CELL),
            );
            painter.rect_filled(rect, 0.0, correlation_color(value));
            painter.rect_stroke(
                rect,
                0.0,
                Stroke::new(1.0, ui.visuals().extreme_bg_color),
                egui::StrokeKind::Inside,
            );
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                cell_text(value),
                font.clone(),
                annotation_color(value),
            );
        }
    }

    if let Some(pos) = response.hover_pos() {
        let local = pos - origin - vec2(LABEL_WIDTH, LABEL_HEIGHT);
        if local.x >= 0.0 && local.y >= 0.0 {
            let (i, j) = ((local.y / CELL) as usize, (local.x / CELL) as usize);
            if i < n && j < n {
                let cols = matrix.columns();
                response.on_hover_text(format!(
                    "{} × {}: {}",
                    cols[i],
                    cols[j],
                    cell_text(matrix.at(i, j))
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotations_use_two_decimals() {
        assert_eq!(cell_text(Some(0.456)), "0.46");
        assert_eq!(cell_text(Some(-1.0)), "-1.00");
        assert_eq!(cell_text(None), "n/a");
    }
}
