use eframe::egui::{RichText, Ui};

use crate::analysis::insight::{CorrelationInsight, Insight, Peak};

/// Placeholder for values with no data behind them.
const NO_DATA: &str = "-";

fn peak_parts(peak: Option<Peak>) -> (String, String) {
    match peak {
        Some(p) => (p.key.to_string(), format!("{:.2}", p.mean)),
        None => (NO_DATA.to_string(), NO_DATA.to_string()),
    }
}

fn correlation_parts(c: CorrelationInsight) -> (String, String) {
    let value = c.value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
    (value, c.label.to_string())
}

/// The insight as plain sentences, one per bullet.
pub fn insight_lines(insight: &Insight) -> [String; 4] {
    let (hour, hour_mean) = peak_parts(insight.peak_hour);
    let (month, month_mean) = peak_parts(insight.peak_month);
    let (temp, temp_label) = correlation_parts(insight.temp_pm10);
    let (rain, rain_label) = correlation_parts(insight.rain_no2);
    [
        format!("Peak PM2.5 by hour: hour {hour} with mean {hour_mean}"),
        format!("Peak PM2.5 by month: month {month} with mean {month_mean}"),
        format!("Temperature (TEMP) vs PM10: correlation = {temp} ({temp_label})"),
        format!("Rain (RAIN) vs NO2: correlation = {rain} ({rain_label})"),
    ]
}

/// Render the insight block.
pub fn insight_panel(ui: &mut Ui, insight: &Insight) {
    ui.heading("Insights for the current selection");
    for line in insight_lines(insight) {
        ui.label(RichText::new(format!("•  {line}")).size(15.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::insight::CorrelationLabel;

    #[test]
    fn formats_values_to_two_decimals() {
        let insight = Insight {
            peak_hour: Some(Peak { key: 20, mean: 91.456 }),
            peak_month: Some(Peak { key: 12, mean: 120.0 }),
            temp_pm10: CorrelationInsight {
                value: Some(-0.0917),
                label: CorrelationLabel::NotSignificant,
            },
            rain_no2: CorrelationInsight {
                value: Some(-0.1),
                label: CorrelationLabel::Negative,
            },
        };
        let lines = insight_lines(&insight);
        assert_eq!(lines[0], "Peak PM2.5 by hour: hour 20 with mean 91.46");
        assert_eq!(lines[1], "Peak PM2.5 by month: month 12 with mean 120.00");
        assert_eq!(
            lines[2],
            "Temperature (TEMP) vs PM10: correlation = -0.09 (not significant)"
        );
        assert_eq!(lines[3], "Rain (RAIN) vs NO2: correlation = -0.10 (negative)");
    }

    #[test]
    fn no_data_never_prints_zero() {
        let undefined = CorrelationInsight {
            value: None,
            label: CorrelationLabel::NotSignificant,
        };
        let insight = Insight {
            peak_hour: None,
            peak_month: None,
            temp_pm10: undefined,
            rain_no2: undefined,
        };
        let lines = insight_lines(&insight);
        assert_eq!(lines[0], "Peak PM2.5 by hour: hour - with mean -");
        assert_eq!(lines[2], "Temperature (TEMP) vs PM10: correlation = n/a (not significant)");
        assert!(lines.iter().all(|l| !l.contains("0.00")));
    }
}
