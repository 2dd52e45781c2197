use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::ImageSize;
use crate::error::{MosaicError, MosaicResult};
use crate::render::AxisTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    Mosaic,
    Grid,
    BarPlot,
    Scatter,
    DistanceGrid,
    Histogram,
    Sprite,
}

/// Fully composed plot handed to a rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    pub kind: PlotKind,
    pub image: RgbImage,
    pub y_ticks: Vec<AxisTick>,
}

impl PlotFrame {
    #[must_use]
    pub fn new(kind: PlotKind, image: RgbImage) -> Self {
        Self {
            kind,
            image,
            y_ticks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_y_ticks(mut self, ticks: Vec<AxisTick>) -> Self {
        self.y_ticks = ticks;
        self
    }

    #[must_use]
    pub fn size(&self) -> ImageSize {
        ImageSize::of(&self.image)
    }

    pub fn validate(&self) -> MosaicResult<()> {
        let size = self.size();
        if !size.is_valid() {
            return Err(MosaicError::InvalidData(format!(
                "plot frame must not be empty, got {size}"
            )));
        }
        for tick in &self.y_ticks {
            tick.validate(size.height)?;
        }
        Ok(())
    }
}
