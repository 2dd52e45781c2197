use serde::{Deserialize, Serialize};

use crate::core::ImageSize;
use crate::error::{MosaicError, MosaicResult};
use crate::render::Color;

pub const PLOTTER_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Settings shared by every plot a [`super::Plotter`] draws.
///
/// This type is serializable so host applications can persist plot setup
/// without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Worker threads for decoding; `1` is sequential, `<= 0` uses all cores.
    #[serde(default = "default_n_jobs")]
    pub n_jobs: i32,
    /// Directory joined onto relative image paths; empty defers to the data context.
    #[serde(default)]
    pub image_dir: String,
    #[serde(default)]
    pub background: Color,
    /// Upper bound for the final plot size; larger plots are shrunk to fit.
    #[serde(default)]
    pub figsize: Option<ImageSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlotterConfigJsonContractV1 {
    schema_version: u32,
    config: PlotterConfig,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            n_jobs: default_n_jobs(),
            image_dir: String::new(),
            background: Color::WHITE,
            figsize: None,
        }
    }
}

impl PlotterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_n_jobs(mut self, n_jobs: i32) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    #[must_use]
    pub fn with_image_dir(mut self, image_dir: impl Into<String>) -> Self {
        self.image_dir = image_dir.into();
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_figsize(mut self, figsize: ImageSize) -> Self {
        self.figsize = Some(figsize);
        self
    }

    pub fn validate(&self) -> MosaicResult<()> {
        self.background.validate()?;
        if let Some(figsize) = self.figsize.filter(|size| !size.is_valid()) {
            return Err(MosaicError::InvalidData(format!(
                "figsize must be > 0, got {figsize}"
            )));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> MosaicResult<String> {
        let payload = PlotterConfigJsonContractV1 {
            schema_version: PLOTTER_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            MosaicError::InvalidData(format!("failed to serialize plotter config: {e}"))
        })
    }

    /// Accepts either a bare config object or the versioned contract.
    pub fn from_json_str(input: &str) -> MosaicResult<Self> {
        if let Ok(payload) = serde_json::from_str::<PlotterConfigJsonContractV1>(input) {
            if payload.schema_version != PLOTTER_CONFIG_JSON_SCHEMA_V1 {
                return Err(MosaicError::InvalidData(format!(
                    "unsupported plotter config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config.validate()?;
            return Ok(payload.config);
        }

        let config: Self = serde_json::from_str(input).map_err(|e| {
            MosaicError::InvalidData(format!("failed to parse plotter config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_n_jobs() -> i32 {
    1
}
