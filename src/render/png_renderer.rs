use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MosaicError, MosaicResult};
use crate::render::{PlotFrame, Renderer};

/// Writes every rendered frame to one image file.
///
/// The format follows the file extension; each render overwrites the file.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    path: PathBuf,
    frames_written: usize,
}

impl PngRenderer {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frames_written: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, frame: &PlotFrame) -> MosaicResult<()> {
        frame.validate()?;
        frame
            .image
            .save(&self.path)
            .map_err(|source| MosaicError::ImageEncode {
                path: self.path.clone(),
                source,
            })?;
        self.frames_written += 1;
        debug!(path = %self.path.display(), size = %frame.size(), "wrote plot frame");
        Ok(())
    }
}
