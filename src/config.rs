use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Everything one dashboard session needs to know about its data source.
/// Built once at startup and passed down; nothing here lives in module-level
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory standing in for the result-file bucket.
    pub data_root: String,
    /// Key prefix in front of the per-city folders.
    pub namespace: String,
    /// Cities with published result files.
    pub cities: Vec<String>,
    /// Seconds a fetched city dataset stays fresh.
    pub cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            namespace: "unity-catalog/silver".to_string(),
            cities: ["gdansk", "krakow", "poznan", "slask", "warsaw", "wroclaw"]
                .iter()
                .map(|city| city.to_string())
                .collect(),
            cache_ttl_secs: 3600,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// A missing file means defaults; a present but broken file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
