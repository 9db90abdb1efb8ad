//! Analysis settings.
//!
//! Settings are read from an optional JSON file and then overridden by
//! command-line flags.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

pub const DEFAULT_TARGET_FPS: f64 = 30.0;
pub const DEFAULT_FRAME_TIME_COLUMN: usize = 2;
pub const DEFAULT_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisSettings {
    #[serde(
        rename = "TargetFps",
        default = "default_target_fps",
        deserialize_with = "validate_positive_f64"
    )]
    pub target_fps: f64,
    #[serde(rename = "FrameTimeColumn", default = "default_frame_time_column")]
    pub frame_time_column: usize,
    #[serde(rename = "Delimiter", default = "default_delimiter")]
    pub delimiter: char,
    #[serde(rename = "SkipInvalid", default)]
    pub skip_invalid: bool,
}

fn default_target_fps() -> f64 {
    DEFAULT_TARGET_FPS
}

fn default_frame_time_column() -> usize {
    DEFAULT_FRAME_TIME_COLUMN
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn validate_positive_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            frame_time_column: DEFAULT_FRAME_TIME_COLUMN,
            delimiter: DEFAULT_DELIMITER,
            skip_invalid: false,
        }
    }
}

impl AnalysisSettings {
    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AnalysisError::Config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let settings = Self::from_json(&content).map_err(|e| match e {
            AnalysisError::Config(msg) => {
                AnalysisError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(content).map_err(|e| AnalysisError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(AnalysisError::Config(format!(
                "target fps must be a positive number, got {}",
                self.target_fps
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(AnalysisError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// Frame interval the capture loop is aiming for, in milliseconds.
    pub fn target_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }
}
