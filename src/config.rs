use crate::error::{Result, ShapeError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Property holding the raw region name in the input.
    #[serde(default = "default_source_field")]
    pub source_field: String,

    /// Property the normalized name is written to.
    #[serde(default = "default_target_field")]
    pub target_field: String,

    #[serde(default = "default_keep_crs")]
    pub keep_crs: bool,

    #[serde(default)]
    pub pretty: bool,

    /// Fail instead of warning when a character has no ASCII form.
    #[serde(default)]
    pub strict: bool,
}

fn default_source_field() -> String {
    "nomera".to_string()
}
fn default_target_field() -> String {
    "administrativeRegion".to_string()
}
fn default_keep_crs() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_field: default_source_field(),
            target_field: default_target_field(),
            keep_crs: true,
            pretty: false,
            strict: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| ShapeError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&text).map_err(|e| ShapeError::Config {
            message: format!("invalid config JSON in {}: {}", path.display(), e),
        })
    }
}
