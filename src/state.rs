use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::Analysis;
use crate::analysis::insight::Insight;
use crate::data::filter::FilterSelection;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup (or via File → Open), shared read-only.
    pub dataset: Arc<Dataset>,

    /// File the dataset came from.
    pub source: PathBuf,

    /// Widget selection, edited directly by the side panel.
    pub selection: FilterSelection,

    /// Results for `analyzed`.
    pub analysis: Analysis,

    /// Selection the cached analysis was computed for.
    analyzed: FilterSelection,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// Insight export written by File → Export insight.
#[derive(Serialize)]
struct InsightExport<'a> {
    source: &'a Path,
    selection: &'a FilterSelection,
    readings_in_view: usize,
    insight: &'a Insight,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, source: PathBuf) -> Self {
        let selection = FilterSelection::default_for(&dataset);
        let analysis = Analysis::run(&dataset, &selection);
        Self {
            dataset,
            source,
            analyzed: selection.clone(),
            selection,
            analysis,
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset and reset the selection to its defaults.
    pub fn set_dataset(&mut self, dataset: Dataset, source: PathBuf) {
        *self = Self::new(Arc::new(dataset), source);
    }

    /// Recompute the analysis if the selection changed since the last run.
    pub fn refresh(&mut self) {
        if self.selection != self.analyzed {
            self.analysis = Analysis::run(&self.dataset, &self.selection);
            self.analyzed = self.selection.clone();
        }
    }

    pub fn set_station(&mut self, station: &str) {
        self.selection.station = station.to_string();
        self.refresh();
    }

    /// Toggle a single year in the selection.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
        self.refresh();
    }

    /// Toggle a single month in the selection.
    pub fn toggle_month(&mut self, month: u8) {
        if !self.selection.months.remove(&month) {
            self.selection.months.insert(month);
        }
        self.refresh();
    }

    pub fn select_all_years(&mut self) {
        self.selection.years = self.dataset.years.clone();
        self.refresh();
    }

    pub fn select_no_years(&mut self) {
        self.selection.years.clear();
        self.refresh();
    }

    pub fn select_all_months(&mut self) {
        self.selection.months = self.dataset.months.clone();
        self.refresh();
    }

    pub fn select_no_months(&mut self) {
        self.selection.months.clear();
        self.refresh();
    }

    /// Write the current insight and selection as pretty JSON.
    pub fn export_insight(&self, path: &Path) -> Result<()> {
        let export = InsightExport {
            source: &self.source,
            selection: &self.selection,
            readings_in_view: self.analysis.visible_indices.len(),
            insight: &self.analysis.insight,
        };
        let json = serde_json::to_string_pretty(&export).context("serializing insight")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported insight to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::insight::Peak;
    use crate::data::model::tests::reading;

    fn state() -> AppState {
        let ds = Dataset::from_readings(vec![
            reading("A", 2013, 1, 0, 10.0),
            reading("A", 2014, 2, 5, 50.0),
            reading("B", 2013, 1, 0, 99.0),
        ]);
        AppState::new(Arc::new(ds), PathBuf::from("main_data.csv"))
    }

    #[test]
    fn starts_on_first_station_with_everything_selected() {
        let s = state();
        assert_eq!(s.selection.station, "A");
        assert_eq!(s.analysis.visible_indices, vec![0, 1]);
        assert_eq!(s.analysis.insight.peak_month, Some(Peak { key: 2, mean: 50.0 }));
    }

    #[test]
    fn toggles_recompute_analysis() {
        let mut s = state();
        s.toggle_year(2014);
        assert_eq!(s.analysis.visible_indices, vec![0]);
        s.toggle_year(2014);
        assert_eq!(s.analysis.visible_indices, vec![0, 1]);

        s.select_no_months();
        assert!(s.analysis.visible_indices.is_empty());
        assert_eq!(s.analysis.insight.peak_hour, None);

        s.select_all_months();
        s.set_station("B");
        assert_eq!(s.analysis.visible_indices, vec![2]);
    }

    #[test]
    fn direct_selection_edits_apply_on_refresh() {
        let mut s = state();
        s.selection.months.remove(&2);
        assert_eq!(s.analysis.visible_indices, vec![0, 1]);
        s.refresh();
        assert_eq!(s.analysis.visible_indices, vec![0]);
    }

    #[test]
    fn set_dataset_resets_selection() {
        let mut s = state();
        s.select_no_years();
        s.set_dataset(
            Dataset::from_readings(vec![reading("Z", 2020, 7, 3, 1.0)]),
            PathBuf::from("other.csv"),
        );
        assert_eq!(s.selection.station, "Z");
        assert_eq!(s.analysis.visible_indices, vec![0]);
        assert_eq!(s.source, PathBuf::from("other.csv"));
    }

    #[test]
    fn export_writes_json() {
        let s = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insight.json");
        s.export_insight(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["selection"]["station"], "A");
        assert_eq!(value["readings_in_view"], 2);
        assert_eq!(value["insight"]["peak_hour"]["key"], 5);
        assert_eq!(value["insight"]["temp_pm10"]["label"], "positive");
    }
}
