use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const STATIONS: [&str; 6] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Wanliu",
];
const YEARS: std::ops::RangeInclusive<i64> = 2013..=2017;
/// Sampled days per month.
const DAYS: [i64; 3] = [1, 11, 21];
/// Share of measure values left blank.
const MISSING_RATE: f64 = 0.01;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// `value` rounded to one decimal, or `None` at [`MISSING_RATE`].
    fn maybe(&mut self, value: f64) -> Option<f64> {
        (self.next_f64() >= MISSING_RATE).then(|| (value * 10.0).round() / 10.0)
    }
}

#[derive(Default)]
struct Columns {
    station: Vec<String>,
    year: Vec<i64>,
    month: Vec<i64>,
    day: Vec<i64>,
    hour: Vec<i64>,
    pm25: Vec<Option<f64>>,
    pm10: Vec<Option<f64>>,
    no2: Vec<Option<f64>>,
    temp: Vec<Option<f64>>,
    dewp: Vec<Option<f64>>,
    rain: Vec<Option<f64>>,
}

impl Columns {
    fn len(&self) -> usize {
        self.station.len()
    }
}

/// Winter-heavy, night-heavy particulates; summer-heavy temperature and rain.
fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();
    let tau = 2.0 * std::f64::consts::PI;

    for (s, station) in STATIONS.iter().enumerate() {
        let station_bias = 1.0 + 0.08 * s as f64;
        for year in YEARS {
            for month in 1..=12i64 {
                // 1.0 in January, -1.0 in July.
                let season = (tau * (month as f64 - 1.0) / 12.0).cos();
                for day in DAYS {
                    for hour in 0..24i64 {
                        let diurnal = (tau * (hour as f64 - 21.0) / 24.0).cos();
                        let temp = 13.0 - 15.0 * season + 4.0 * -diurnal + rng.gauss(0.0, 2.0);
                        let dewp = temp - 10.0 - 4.0 * season + rng.gauss(0.0, 2.0);
                        let raining = season < 0.0 && rng.next_f64() < 0.08;
                        let rain = if raining { rng.gauss(2.0, 1.5).abs() } else { 0.0 };
                        let pm25 = (station_bias * (80.0 + 35.0 * season + 15.0 * diurnal)
                            - 8.0 * rain
                            + rng.gauss(0.0, 20.0))
                        .max(3.0);
                        let pm10 = (pm25 * 1.3 + rng.gauss(15.0, 10.0)).max(pm25);
                        let no2 = (45.0 + 15.0 * season + 10.0 * diurnal - 3.0 * rain
                            + rng.gauss(0.0, 8.0))
                        .max(2.0);

                        cols.station.push(station.to_string());
                        cols.year.push(year);
                        cols.month.push(month);
                        cols.day.push(day);
                        cols.hour.push(hour);
                        cols.pm25.push(rng.maybe(pm25));
                        cols.pm10.push(rng.maybe(pm10));
                        cols.no2.push(rng.maybe(no2));
                        cols.temp.push(rng.maybe(temp));
                        cols.dewp.push(rng.maybe(dewp));
                        cols.rain.push(rng.maybe(rain));
                    }
                }
            }
        }
    }
    cols
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn write_csv(path: &Path, cols: &Columns) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "station", "year", "month", "day", "hour", "PM2.5", "PM10", "NO2", "TEMP", "DEWP", "RAIN",
    ])?;
    for i in 0..cols.len() {
        writer.write_record([
            cols.station[i].clone(),
            cols.year[i].to_string(),
            cols.month[i].to_string(),
            cols.day[i].to_string(),
            cols.hour[i].to_string(),
            fmt_opt(cols.pm25[i]),
            fmt_opt(cols.pm10[i]),
            fmt_opt(cols.no2[i]),
            fmt_opt(cols.temp[i]),
            fmt_opt(cols.dewp[i]),
            fmt_opt(cols.rain[i]),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, cols: Columns) -> Result<()> {
    let int = |name: &str| Field::new(name, DataType::Int64, false);
    let float = |name: &str| Field::new(name, DataType::Float64, true);
    let schema = Arc::new(Schema::new(vec![
        Field::new("station", DataType::Utf8, false),
        int("year"),
        int("month"),
        int("day"),
        int("hour"),
        float("PM2.5"),
        float("PM10"),
        float("NO2"),
        float("TEMP"),
        float("DEWP"),
        float("RAIN"),
    ]));

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(cols.station)),
        Arc::new(Int64Array::from(cols.year)),
        Arc::new(Int64Array::from(cols.month)),
        Arc::new(Int64Array::from(cols.day)),
        Arc::new(Int64Array::from(cols.hour)),
        Arc::new(Float64Array::from(cols.pm25)),
        Arc::new(Float64Array::from(cols.pm10)),
        Arc::new(Float64Array::from(cols.no2)),
        Arc::new(Float64Array::from(cols.temp)),
        Arc::new(Float64Array::from(cols.dewp)),
        Arc::new(Float64Array::from(cols.rain)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let csv_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dashboard/main_data.csv"));
    let parquet_path = csv_path.with_extension("parquet");
    if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let cols = generate(&mut rng);
    let rows = cols.len();

    write_csv(&csv_path, &cols)?;
    write_parquet(&parquet_path, cols)?;

    println!(
        "Wrote {rows} readings ({} stations) to {} and {}",
        STATIONS.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
