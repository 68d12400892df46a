//! JSON configuration for the demo tool.

use crate::detector::EdgeDetectionConfig;
use crate::geometry::RotatedRect;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CaliperToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    pub roi: RotatedRect,
    #[serde(default)]
    pub edge: EdgeDetectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
    /// Optional PNG dump of the unrotated ROI samples.
    #[serde(default)]
    pub roi_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<CaliperToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
