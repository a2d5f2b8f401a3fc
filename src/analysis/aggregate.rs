use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::filter::FilteredView;
use crate::data::model::{Measure, Reading};

/// Group key → mean PM2.5. `None` marks a group whose PM2.5 values were all
/// missing; the key is still present.
pub type GroupMeans = BTreeMap<u8, Option<f64>>;

/// Mean PM2.5 by month and by hour of day over a filtered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub by_month: GroupMeans,
    pub by_hour: GroupMeans,
}

impl AggregateResult {
    /// Defined means as plot points, in key order.
    pub fn points(means: &GroupMeans) -> Vec<[f64; 2]> {
        means
            .iter()
            .filter_map(|(&k, &v)| v.map(|v| [f64::from(k), v]))
            .collect()
    }
}

/// Group the view by month and by hour and average PM2.5 within each group.
pub fn aggregate(view: &FilteredView<'_>) -> AggregateResult {
    AggregateResult {
        by_month: group_mean(view, |r| r.month),
        by_hour: group_mean(view, |r| r.hour),
    }
}

fn group_mean(view: &FilteredView<'_>, key: impl Fn(&Reading) -> u8) -> GroupMeans {
    let mut acc: BTreeMap<u8, (f64, usize)> = BTreeMap::new();
    for r in view.iter() {
        let slot = acc.entry(key(r)).or_insert((0.0, 0));
        if let Some(v) = Measure::Pm25.value(r) {
            slot.0 += v;
            slot.1 += 1;
        }
    }
    acc.into_iter()
        .map(|(k, (sum, n))| (k, (n > 0).then(|| sum / n as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{FilterSelection, filter};
    use crate::data::model::Dataset;
    use crate::data::model::tests::reading;

    fn scenario() -> Dataset {
        Dataset::from_readings(vec![
            reading("A", 2013, 1, 0, 10.0),
            reading("A", 2013, 1, 1, 20.0),
            reading("A", 2013, 2, 0, 30.0),
            reading("A", 2013, 2, 1, 40.0),
            reading("B", 2013, 3, 5, 99.0),
        ])
    }

    #[test]
    fn means_by_month_and_hour() {
        let ds = scenario();
        let view = filter(&ds, &FilterSelection::all(&ds, "A"));
        let agg = aggregate(&view);
        assert_eq!(agg.by_month, BTreeMap::from([(1, Some(15.0)), (2, Some(35.0))]));
        assert_eq!(agg.by_hour, BTreeMap::from([(0, Some(20.0)), (1, Some(30.0))]));
    }

    #[test]
    fn keys_are_exactly_values_in_view() {
        let ds = scenario();
        let view = filter(&ds, &FilterSelection::all(&ds, "B"));
        let agg = aggregate(&view);
        let months: BTreeSet<u8> = view.iter().map(|r| r.month).collect();
        let hours: BTreeSet<u8> = view.iter().map(|r| r.hour).collect();
        assert_eq!(agg.by_month.keys().copied().collect::<BTreeSet<_>>(), months);
        assert_eq!(agg.by_hour.keys().copied().collect::<BTreeSet<_>>(), hours);
    }

    #[test]
    fn empty_view_gives_empty_groups() {
        let ds = scenario();
        let view = filter(&ds, &FilterSelection::all(&ds, "Nowhere"));
        assert_eq!(aggregate(&view), AggregateResult::default());
    }

    #[test]
    fn missing_values_are_excluded_not_zeroed() {
        let mut rows = vec![reading("A", 2013, 1, 0, 10.0), reading("A", 2013, 1, 0, 0.0)];
        rows[1].pm25 = None;
        rows.push(reading("A", 2013, 2, 3, 0.0));
        rows[2].pm25 = None;
        let ds = Dataset::from_readings(rows);
        let agg = aggregate(&filter(&ds, &FilterSelection::all(&ds, "A")));
        assert_eq!(agg.by_month, BTreeMap::from([(1, Some(10.0)), (2, None)]));
        assert_eq!(AggregateResult::points(&agg.by_month), vec![[1.0, 10.0]]);
    }
}
