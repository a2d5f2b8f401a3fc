use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::loader::SchemaError;
use super::model::Reading;

// ---------------------------------------------------------------------------
// Untyped cells from text formats
// ---------------------------------------------------------------------------

/// A key column cell after lenient parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCell {
    Null,
    Int(i64),
    Invalid,
}

/// One cell of a CSV or JSON record, before type checks.
pub trait Cell {
    fn key(&self) -> KeyCell;
    /// Station label, `None` when blank or null.
    fn text(&self) -> Option<String>;
    /// Numeric measure; anything non-numeric is missing.
    fn measure(&self) -> Option<f64>;
}

impl Cell for String {
    fn key(&self) -> KeyCell {
        let s = self.trim();
        if s.is_empty() {
            return KeyCell::Null;
        }
        s.parse::<i64>().map_or(KeyCell::Invalid, KeyCell::Int)
    }

    fn text(&self) -> Option<String> {
        let s = self.trim();
        (!s.is_empty()).then(|| s.to_string())
    }

    fn measure(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }
}

impl Cell for JsonValue {
    fn key(&self) -> KeyCell {
        match self {
            JsonValue::Null => KeyCell::Null,
            JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => KeyCell::Int(i),
                // pandas writes integer columns with NaNs as floats
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    KeyCell::Int(f as i64)
                }
                _ => KeyCell::Invalid,
            },
            JsonValue::String(s) => s.key(),
            _ => KeyCell::Invalid,
        }
    }

    fn text(&self) -> Option<String> {
        match self {
            JsonValue::String(s) => s.text(),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn measure(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

/// A record as deserialized from CSV (`C = String`) or JSON
/// (`C = serde_json::Value`). Extra columns are ignored.
#[derive(Debug, Deserialize)]
pub struct RawRecord<C> {
    pub station: C,
    pub year: C,
    pub month: C,
    pub hour: C,
    #[serde(rename = "PM2.5")]
    pub pm25: C,
    #[serde(rename = "PM10")]
    pub pm10: C,
    #[serde(rename = "NO2")]
    pub no2: C,
    #[serde(rename = "TEMP")]
    pub temp: C,
    #[serde(rename = "DEWP")]
    pub dewp: C,
    #[serde(rename = "RAIN")]
    pub rain: C,
}

fn int_key(record: usize, column: &'static str, cell: KeyCell) -> Result<i64, SchemaError> {
    match cell {
        KeyCell::Int(v) => Ok(v),
        KeyCell::Null => Err(SchemaError::NullKey { record, column }),
        KeyCell::Invalid => Err(SchemaError::InvalidKey { record, column }),
    }
}

/// Narrow a year to `i32`.
pub fn year(record: usize, v: i64) -> Result<i32, SchemaError> {
    i32::try_from(v).map_err(|_| SchemaError::InvalidKey {
        record,
        column: "year",
    })
}

/// Narrow a month, rejecting anything outside 1-12.
pub fn month(record: usize, v: i64) -> Result<u8, SchemaError> {
    u8::try_from(v)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or(SchemaError::MonthOutOfRange { record, month: v })
}

/// Narrow an hour, rejecting anything outside 0-23.
pub fn hour(record: usize, v: i64) -> Result<u8, SchemaError> {
    u8::try_from(v)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or(SchemaError::HourOutOfRange { record, hour: v })
}

impl<C: Cell> RawRecord<C> {
    /// Type-check the record; `record` is the 1-based record number.
    pub fn into_reading(self, record: usize) -> Result<Reading, SchemaError> {
        let station = match self.station.text() {
            Some(s) => s,
            None => {
                return Err(SchemaError::NullKey {
                    record,
                    column: "station",
                });
            }
        };
        let y = int_key(record, "year", self.year.key())?;
        let m = int_key(record, "month", self.month.key())?;
        let h = int_key(record, "hour", self.hour.key())?;

        Ok(Reading {
            station,
            year: year(record, y)?,
            month: month(record, m)?,
            hour: hour(record, h)?,
            pm25: self.pm25.measure(),
            pm10: self.pm10.measure(),
            no2: self.no2.measure(),
            temp: self.temp.measure(),
            dewp: self.dewp.measure(),
            rain: self.rain.measure(),
        })
    }
}
