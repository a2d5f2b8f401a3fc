use std::fmt;

use serde::Serialize;

use super::aggregate::{AggregateResult, GroupMeans};
use super::correlation::CorrelationMatrix;
use crate::data::model::Measure;

/// Correlations with a magnitude below this are reported as not significant.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.1;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationLabel {
    NotSignificant,
    Positive,
    Negative,
}

impl fmt::Display for CorrelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CorrelationLabel::NotSignificant => "not significant",
            CorrelationLabel::Positive => "positive",
            CorrelationLabel::Negative => "negative",
        })
    }
}

/// Label a coefficient by sign, or as not significant when `|value| < 0.1`.
pub fn classify(value: f64) -> CorrelationLabel {
    if value.abs() < SIGNIFICANCE_THRESHOLD {
        CorrelationLabel::NotSignificant
    } else if value > 0.0 {
        CorrelationLabel::Positive
    } else {
        CorrelationLabel::Negative
    }
}

// ---------------------------------------------------------------------------
// Insight
// ---------------------------------------------------------------------------

/// Group key with the highest mean PM2.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub key: u8,
    pub mean: f64,
}

/// A named correlation cell and its label.
///
/// `value` is `None` when the coefficient is undefined for the current view;
/// the label then classifies the neutral value 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationInsight {
    pub value: Option<f64>,
    pub label: CorrelationLabel,
}

impl CorrelationInsight {
    fn lookup(matrix: &CorrelationMatrix, a: Measure, b: Measure) -> Self {
        let value = if matrix.contains(a) && matrix.contains(b) {
            matrix.get(a, b)
        } else {
            Some(0.0)
        };
        CorrelationInsight {
            value,
            label: classify(value.unwrap_or(0.0)),
        }
    }
}

/// Summary facts for the current selection. `None` peaks mean "no data".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insight {
    pub peak_hour: Option<Peak>,
    pub peak_month: Option<Peak>,
    pub temp_pm10: CorrelationInsight,
    pub rain_no2: CorrelationInsight,
}

pub fn derive_insight(aggregate: &AggregateResult, matrix: &CorrelationMatrix) -> Insight {
    Insight {
        peak_hour: peak(&aggregate.by_hour),
        peak_month: peak(&aggregate.by_month),
        temp_pm10: CorrelationInsight::lookup(matrix, Measure::Temp, Measure::Pm10),
        rain_no2: CorrelationInsight::lookup(matrix, Measure::Rain, Measure::No2),
    }
}

/// Argmax over defined means; ties go to the lowest key.
fn peak(means: &GroupMeans) -> Option<Peak> {
    let mut best: Option<Peak> = None;
    for (&key, &mean) in means {
        let Some(mean) = mean else { continue };
        if best.map_or(true, |b| mean > b.mean) {
            best = Some(Peak { key, mean });
        }
    }
    best
}
