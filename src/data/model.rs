use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Measure – a numeric column of the dataset
// ---------------------------------------------------------------------------

/// The numeric columns carried by every [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Measure {
    Pm25,
    Pm10,
    No2,
    Temp,
    Dewp,
    Rain,
}

/// Columns shown in the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [Measure; 5] = [
    Measure::Pm10,
    Measure::No2,
    Measure::Temp,
    Measure::Dewp,
    Measure::Rain,
];

impl Measure {
    /// Column header as it appears in the source file.
    pub fn label(self) -> &'static str {
        match self {
            Measure::Pm25 => "PM2.5",
            Measure::Pm10 => "PM10",
            Measure::No2 => "NO2",
            Measure::Temp => "TEMP",
            Measure::Dewp => "DEWP",
            Measure::Rain => "RAIN",
        }
    }

    /// Finite value of this column for `reading`, `None` when missing.
    pub fn value(self, reading: &Reading) -> Option<f64> {
        let v = match self {
            Measure::Pm25 => reading.pm25,
            Measure::Pm10 => reading.pm10,
            Measure::No2 => reading.no2,
            Measure::Temp => reading.temp,
            Measure::Dewp => reading.dewp,
            Measure::Rain => reading.rain,
        }?;
        v.is_finite().then_some(v)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Reading – one row of the source table
// ---------------------------------------------------------------------------

/// A single station observation.
///
/// Numeric fields are optional: blanks and non-numeric values load as `None`
/// so they drop out of means and correlations instead of failing the load.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub station: String,
    pub year: i32,
    pub month: u8,
    pub hour: u8,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub temp: Option<f64>,
    pub dewp: Option<f64>,
    pub rain: Option<f64>,
}

/// Column headers every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "station", "year", "month", "hour", "PM2.5", "PM10", "NO2", "TEMP", "DEWP", "RAIN",
];

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All readings plus the distinct values the filter widgets offer.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub readings: Vec<Reading>,
    /// Distinct stations in order of first appearance.
    pub stations: Vec<String>,
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u8>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded readings.
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        let mut stations: Vec<String> = Vec::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut months = BTreeSet::new();

        for r in &readings {
            if seen.insert(r.station.as_str()) {
                stations.push(r.station.clone());
            }
            years.insert(r.year);
            months.insert(r.month);
        }

        Dataset {
            readings,
            stations,
            years,
            months,
        }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Reading with every numeric column set to `pm25`.
    pub(crate) fn reading(station: &str, year: i32, month: u8, hour: u8, pm25: f64) -> Reading {
        Reading {
            station: station.to_string(),
            year,
            month,
            hour,
            pm25: Some(pm25),
            pm10: Some(pm25),
            no2: Some(pm25),
            temp: Some(pm25),
            dewp: Some(pm25),
            rain: Some(pm25),
        }
    }

    #[test]
    fn stations_keep_first_appearance_order() {
        let ds = Dataset::from_readings(vec![
            reading("Wanliu", 2014, 3, 0, 1.0),
            reading("Aotizhongxin", 2013, 1, 0, 1.0),
            reading("Wanliu", 2013, 12, 5, 1.0),
        ]);
        assert_eq!(ds.stations, vec!["Wanliu", "Aotizhongxin"]);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2013, 2014]);
        assert_eq!(ds.months.iter().copied().collect::<Vec<_>>(), vec![1, 3, 12]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn non_finite_values_read_as_missing() {
        let mut r = reading("A", 2013, 1, 0, 1.0);
        r.temp = Some(f64::NAN);
        r.rain = None;
        assert_eq!(Measure::Temp.value(&r), None);
        assert_eq!(Measure::Rain.value(&r), None);
        assert_eq!(Measure::Pm25.value(&r), Some(1.0));
    }
}
