use serde::{Deserialize, Serialize};

use crate::error::{MosaicError, MosaicResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::rgb(
            f64::from(rgb[0]) / 255.0,
            f64::from(rgb[1]) / 255.0,
            f64::from(rgb[2]) / 255.0,
        )
    }

    pub fn validate(self) -> MosaicResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MosaicError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Opaque 8-bit pixel; alpha is composited over white.
    #[must_use]
    pub fn to_rgb8(self) -> image::Rgb<u8> {
        let over_white = |channel: f64| {
            let mixed = channel * self.alpha + (1.0 - self.alpha);
            (mixed * 255.0).round().clamp(0.0, 255.0) as u8
        };
        image::Rgb([
            over_white(self.red),
            over_white(self.green),
            over_white(self.blue),
        ])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Labelled position along the vertical axis, in canvas pixels from the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub position_px: f64,
    pub label: String,
}

impl AxisTick {
    #[must_use]
    pub fn new(position_px: f64, label: impl Into<String>) -> Self {
        Self {
            position_px,
            label: label.into(),
        }
    }

    pub fn validate(&self, extent_px: u32) -> MosaicResult<()> {
        if !self.position_px.is_finite()
            || self.position_px < 0.0
            || self.position_px > f64::from(extent_px)
        {
            return Err(MosaicError::InvalidData(format!(
                "tick `{}` at {} lies outside [0, {extent_px}]",
                self.label, self.position_px
            )));
        }
        Ok(())
    }
}
