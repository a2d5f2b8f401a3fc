use std::path::PathBuf;

use clap::Parser;

/// Dataset loaded at startup when nothing else is given.
pub const DEFAULT_DATA_PATH: &str = "dashboard/main_data.csv";

/// Environment variable overriding the startup dataset.
pub const DATA_PATH_ENV: &str = "AIRQ_DATA";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "airq-dashboard",
    version,
    about = "Interactive air-quality dashboard over station readings"
)]
pub struct Config {
    /// Readings file (.csv, .parquet or .json)
    #[arg(env = DATA_PATH_ENV, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,
}
