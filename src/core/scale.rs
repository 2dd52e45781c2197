use crate::error::{MosaicError, MosaicResult};

/// Rescales values into `[0, 1]` in place.
///
/// A constant series maps to zeros; the range divisor falls back to 1.
pub fn minmax_scale(values: &mut [f64]) -> MosaicResult<()> {
    if values.iter().any(|value| !value.is_finite()) {
        return Err(MosaicError::InvalidData(
            "values to rescale must be finite".to_owned(),
        ));
    }

    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Ok(());
    };
    let max = values.iter().copied().fold(min, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    for value in values.iter_mut() {
        *value = (*value - min) / range;
    }
    Ok(())
}

/// Maps unit coordinates onto a pixel span `[start, start + extent]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    start: f64,
    extent: f64,
}

impl UnitScale {
    pub fn new(start: f64, extent: f64) -> MosaicResult<Self> {
        if !start.is_finite() || !extent.is_finite() || extent < 0.0 {
            return Err(MosaicError::InvalidData(
                "unit scale span must be finite and >= 0".to_owned(),
            ));
        }

        Ok(Self { start, extent })
    }

    #[must_use]
    pub fn to_pixel(self, unit: f64) -> f64 {
        self.start + unit * self.extent
    }

    #[must_use]
    pub fn to_unit(self, pixel: f64) -> f64 {
        if self.extent == 0.0 {
            return 0.0;
        }
        (pixel - self.start) / self.extent
    }
}
