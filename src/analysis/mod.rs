/// Analysis layer: everything derived from a filtered view.
///
/// ```text
///   FilteredView ──► aggregate ──► AggregateResult ─┐
///        │                                          ├──► derive_insight ──► Insight
///        └────────► correlate ──► CorrelationMatrix ┘
/// ```

pub mod aggregate;
pub mod correlation;
pub mod insight;

use crate::data::filter::{FilterSelection, filter};
use crate::data::model::{CORRELATION_COLUMNS, Dataset};

use aggregate::{AggregateResult, aggregate};
use correlation::{CorrelationMatrix, correlate};
use insight::{Insight, derive_insight};

/// One full recomputation for a selection.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Indices of the readings in view.
    pub visible_indices: Vec<usize>,
    pub aggregate: AggregateResult,
    pub correlation: CorrelationMatrix,
    pub insight: Insight,
}

impl Analysis {
    /// Filter, aggregate, correlate and derive insights in one pass.
    pub fn run(dataset: &Dataset, selection: &FilterSelection) -> Self {
        let view = filter(dataset, selection);
        let aggregate = aggregate(&view);
        let correlation = correlate(&view, &CORRELATION_COLUMNS);
        let insight = derive_insight(&aggregate, &correlation);

        log::debug!(
            "station {:?}, {} years, {} months → {} readings in view",
            selection.station,
            selection.years.len(),
            selection.months.len(),
            view.len()
        );

        Analysis {
            visible_indices: view.indices().to_vec(),
            aggregate,
            correlation,
            insight,
        }
    }
}
