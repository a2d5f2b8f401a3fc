use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Dataset, Reading};

// ---------------------------------------------------------------------------
// Filter selection: station, years and months chosen in the side panel
// ---------------------------------------------------------------------------

/// The current widget selection.
///
/// An empty `years` or `months` set selects nothing, so the view is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub station: String,
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u8>,
}

impl FilterSelection {
    /// Select `station` with every year and month of the dataset.
    pub fn all(dataset: &Dataset, station: &str) -> Self {
        FilterSelection {
            station: station.to_string(),
            years: dataset.years.clone(),
            months: dataset.months.clone(),
        }
    }

    /// Startup selection: first station, all years, all months.
    pub fn default_for(dataset: &Dataset) -> Self {
        let station = dataset.stations.first().map(String::as_str).unwrap_or("");
        Self::all(dataset, station)
    }

    /// Whether `reading` passes all three predicates.
    pub fn matches(&self, reading: &Reading) -> bool {
        reading.station == self.station
            && self.years.contains(&reading.year)
            && self.months.contains(&reading.month)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Readings of a dataset that pass a [`FilterSelection`].
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Indices into `dataset.readings` of the rows in view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the readings in view, in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Reading> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.readings[i])
    }
}

/// Narrow `dataset` to the rows matching `selection`.
///
/// Values absent from the dataset are not an error; they simply match nothing.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .readings
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::tests::reading;

    fn sample() -> Dataset {
        Dataset::from_readings(vec![
            reading("A", 2013, 1, 0, 10.0),
            reading("A", 2013, 2, 1, 20.0),
            reading("A", 2014, 1, 0, 30.0),
            reading("B", 2013, 1, 0, 40.0),
            reading("B", 2014, 3, 23, 50.0),
        ])
    }

    #[test]
    fn default_selection_covers_first_station() {
        let ds = sample();
        let sel = FilterSelection::default_for(&ds);
        assert_eq!(sel.station, "A");
        let view = filter(&ds, &sel);
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn all_three_predicates_apply() {
        let ds = sample();
        let sel = FilterSelection {
            station: "A".into(),
            years: BTreeSet::from([2013]),
            months: BTreeSet::from([1]),
        };
        let view = filter(&ds, &sel);
        assert_eq!(view.indices(), &[0]);
        assert!(view.iter().all(|r| r.station == "A" && r.year == 2013 && r.month == 1));
    }

    #[test]
    fn unknown_values_yield_empty_view() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds, "Nowhere");
        assert!(filter(&ds, &sel).is_empty());

        sel.station = "A".into();
        sel.years = BTreeSet::from([1999]);
        assert!(filter(&ds, &sel).is_empty());
    }

    #[test]
    fn empty_month_set_selects_nothing() {
        let ds = sample();
        let mut sel = FilterSelection::default_for(&ds);
        sel.months.clear();
        assert_eq!(filter(&ds, &sel).len(), 0);
    }

    #[test]
    fn empty_dataset_has_empty_default_view() {
        let ds = Dataset::default();
        let sel = FilterSelection::default_for(&ds);
        assert_eq!(sel.station, "");
        assert!(filter(&ds, &sel).is_empty());
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["A", "B", "C"]),
                2013i32..2017,
                1u8..=12,
                0u8..24,
            ),
            0..60,
        )
        .prop_map(|rows| {
            Dataset::from_readings(
                rows.into_iter()
                    .map(|(s, y, m, h)| reading(s, y, m, h, 1.0))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn view_is_exactly_the_matching_rows(
            ds in arb_dataset(),
            station in prop::sample::select(vec!["A", "B", "C", "D"]),
            years in prop::collection::btree_set(2012i32..2018, 0..5),
            months in prop::collection::btree_set(1u8..=12, 0..12),
        ) {
            let sel = FilterSelection { station: station.to_string(), years, months };
            let view = filter(&ds, &sel);
            let expected: Vec<usize> = ds
                .readings
                .iter()
                .enumerate()
                .filter(|(_, r)| {
                    r.station == sel.station
                        && sel.years.contains(&r.year)
                        && sel.months.contains(&r.month)
                })
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(view.indices(), expected.as_slice());
        }

        #[test]
        fn stations_partition_the_dataset(ds in arb_dataset()) {
            let total: usize = ds
                .stations
                .iter()
                .map(|s| filter(&ds, &FilterSelection::all(&ds, s)).len())
                .sum();
            prop_assert_eq!(total, ds.len());
        }
    }
}
