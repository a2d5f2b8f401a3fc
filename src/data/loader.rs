use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, Reading, REQUIRED_COLUMNS};
use super::raw::{self, RawRecord};

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// The input file does not match the readings schema.
///
/// `record` is the 1-based data record number (the header is not counted).
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    #[error("record {record}: null value in key column '{column}'")]
    NullKey { record: usize, column: &'static str },

    #[error("record {record}: key column '{column}' is not an integer")]
    InvalidKey { record: usize, column: &'static str },

    #[error("record {record}: month {month} is outside 1-12")]
    MonthOutOfRange { record: usize, month: i64 },

    #[error("record {record}: hour {hour} is outside 0-23")]
    HourOutOfRange { record: usize, hour: i64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a readings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the required columns
/// * `.parquet` – one column per field, any castable numeric/string type
/// * `.json`    – `[{ "station": "...", "year": 2013, ..., "RAIN": 0.0 }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} readings across {} stations from {}",
        dataset.len(),
        dataset.stations.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Columns beyond the required ones (row numbers, other pollutants, wind)
/// are ignored.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(SchemaError::MissingColumn(required.to_string()).into());
        }
    }

    let mut readings = Vec::new();
    for (i, result) in reader.deserialize::<RawRecord<String>>().enumerate() {
        let record = i + 1;
        let raw = result.with_context(|| format!("CSV record {record}"))?;
        readings.push(raw.into_reading(record)?);
    }

    Ok(Dataset::from_readings(readings))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the layout of `df.to_json(orient='records')`.
/// Measures that are not JSON numbers load as missing.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<RawRecord<JsonValue>> =
        serde_json::from_str(&text).context("parsing JSON records")?;

    let readings = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_reading(i + 1))
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(Dataset::from_readings(readings))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per reading field.
///
/// Key columns may be any integer type, measures any numeric type; values that
/// cannot be cast become missing.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut readings = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = readings.len();
        read_batch(&batch, offset, &mut readings)?;
    }

    Ok(Dataset::from_readings(readings))
}

fn read_batch(batch: &RecordBatch, offset: usize, out: &mut Vec<Reading>) -> Result<()> {
    let station_col = cast_column(batch, "station", &DataType::Utf8)?;
    let year_col = cast_column(batch, "year", &DataType::Int64)?;
    let month_col = cast_column(batch, "month", &DataType::Int64)?;
    let hour_col = cast_column(batch, "hour", &DataType::Int64)?;

    let stations = station_col.as_string::<i32>();
    let years = year_col.as_primitive::<Int64Type>();
    let months = month_col.as_primitive::<Int64Type>();
    let hours = hour_col.as_primitive::<Int64Type>();

    let measures = ["PM2.5", "PM10", "NO2", "TEMP", "DEWP", "RAIN"]
        .into_iter()
        .map(|name| cast_column(batch, name, &DataType::Float64))
        .collect::<Result<Vec<ArrayRef>>>()?;
    let measure = |col: usize, row: usize| -> Option<f64> {
        let arr = measures[col].as_primitive::<Float64Type>();
        (!arr.is_null(row)).then(|| arr.value(row))
    };

    for i in 0..batch.num_rows() {
        let record = offset + i + 1;
        let key = |arr: &dyn Array, column: &'static str| {
            if arr.is_null(i) {
                Err(SchemaError::NullKey { record, column })
            } else {
                Ok(())
            }
        };
        key(stations, "station")?;
        key(years, "year")?;
        key(months, "month")?;
        key(hours, "hour")?;

        let year = raw::year(record, years.value(i))?;
        let month = raw::month(record, months.value(i))?;
        let hour = raw::hour(record, hours.value(i))?;

        out.push(Reading {
            station: stations.value(i).to_string(),
            year,
            month,
            hour,
            pm25: measure(0, i),
            pm10: measure(1, i),
            no2: measure(2, i),
            temp: measure(3, i),
            dewp: measure(4, i),
            rain: measure(5, i),
        });
    }
    Ok(())
}

/// Look up `name` in the batch and cast it to `to`.
fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))?;
    let col = batch.column(idx);
    let casted = cast(col, to).map_err(|_| SchemaError::UnsupportedType {
        column: name.to_string(),
        data_type: col.data_type().to_string(),
    })?;
    Ok(casted)
}
