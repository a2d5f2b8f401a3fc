/// Data layer: typed readings, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (validated Readings)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Reading>, distinct stations/years/months
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  station / year / month selection → FilteredView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod raw;
