use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for executing a CsvScript program.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Directory holding `<name>.csv` for every `persistent name` declaration.
    pub data_dir: PathBuf,

    /// Write persistent matrices back to their CSV files after a successful run.
    pub save_persistent: bool,

    /// Report the value of bare expression statements.
    pub echo_expressions: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            save_persistent: true,
            echo_expressions: true,
        }
    }
}

impl RunConfig {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn csv_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", name))
    }
}

/// Load a run configuration from a JSON file.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
