use crate::model::ForestConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_FILE: &str = "union_county_scam_data.csv";
pub const DEFAULT_EXPORT_FILE: &str = "synthetic_union_county_scam_data.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for the synthetic generation stream.
    pub seed: u64,
    /// Seed for forest bootstrap sampling.
    pub model_seed: u64,
    pub source_path: PathBuf,
    pub export_path: PathBuf,
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    /// Log to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    pub forest: ForestConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            model_seed: 42,
            source_path: PathBuf::from(DEFAULT_SOURCE_FILE),
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            bind_addr: "0.0.0.0:5000".into(),
            allowed_origins: vec![
                "http://localhost:5173".into(),
                "http://127.0.0.1:5173".into(),
            ],
            log_file: None,
            forest: ForestConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Defaults with the source and export files placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::default().with_data_dir(dir)
    }

    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.source_path = dir.join(DEFAULT_SOURCE_FILE);
        self.export_path = dir.join(DEFAULT_EXPORT_FILE);
        self
    }
}
