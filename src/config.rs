use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One listing to harvest: which directory URL to fetch, which extension
/// substring selects anchors, and which page element receives the cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSource {
    pub url: String,
    /// Substring matched against anchor text content. Defaults to ".html".
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Element id of the target container in the template page.
    pub container: String,
}

fn default_extension() -> String {
    ".html".to_string()
}

/// Tool configuration, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host page containing the target containers.
    pub template: PathBuf,
    /// Where the populated page is written.
    pub output: PathBuf,
    #[serde(default)]
    pub listings: Vec<ListingSource>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
