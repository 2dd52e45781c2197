use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::warn;

use crate::core::{ImageSize, TileOffset};
use crate::error::{MosaicError, MosaicResult};
use crate::render::Color;

/// Owned RGB canvas that tiles are composited into.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Blank canvas filled with `background`.
    pub fn blank(size: ImageSize, background: Color) -> MosaicResult<Self> {
        if !size.is_valid() {
            return Err(MosaicError::InvalidData(format!(
                "canvas size must be > 0, got {size}"
            )));
        }
        background.validate()?;
        Ok(Self {
            image: RgbImage::from_pixel(size.width, size.height, background.to_rgb8()),
        })
    }

    #[must_use]
    pub fn size(&self) -> ImageSize {
        ImageSize::of(&self.image)
    }

    #[must_use]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Copies `tile` at `at`, requiring it to match the canvas tile size.
    ///
    /// `index` identifies the tile in the error reported on mismatch.
    pub fn paste(
        &mut self,
        index: usize,
        tile: &RgbImage,
        expected: ImageSize,
        at: TileOffset,
    ) -> MosaicResult<()> {
        let actual = ImageSize::of(tile);
        if actual != expected {
            return Err(MosaicError::MismatchedImageSize {
                index,
                expected,
                actual,
            });
        }
        self.check_bounds(actual, at)?;
        imageops::replace(&mut self.image, tile, i64::from(at.x), i64::from(at.y));
        Ok(())
    }

    /// Alpha-composites `tile` over the canvas at `at`.
    pub fn blend(&mut self, tile: &RgbImage, at: TileOffset, alpha: f64) -> MosaicResult<()> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(MosaicError::InvalidData(
                "blend alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.check_bounds(ImageSize::of(tile), at)?;

        for (x, y, pixel) in tile.enumerate_pixels() {
            let target = self.image.get_pixel_mut(at.x + x, at.y + y);
            let mut mixed = [0u8; 3];
            for (channel, out) in mixed.iter_mut().enumerate() {
                let value = f64::from(pixel[channel]) * alpha
                    + f64::from(target[channel]) * (1.0 - alpha);
                *out = value.round().clamp(0.0, 255.0) as u8;
            }
            *target = Rgb(mixed);
        }
        Ok(())
    }

    /// Shrinks the canvas to fit within `bound`, keeping its aspect ratio.
    ///
    /// Never enlarges; a canvas that already fits is left untouched.
    pub fn thumbnail(&mut self, bound: ImageSize) -> MosaicResult<()> {
        if !bound.is_valid() {
            return Err(MosaicError::InvalidData(format!(
                "thumbnail bound must be > 0, got {bound}"
            )));
        }

        let size = self.size();
        if size.width <= bound.width && size.height <= bound.height {
            warn!(%size, %bound, "thumbnail bound exceeds canvas, keeping original size");
            return Ok(());
        }

        let scale = (f64::from(bound.width) / f64::from(size.width))
            .min(f64::from(bound.height) / f64::from(size.height));
        let width = ((f64::from(size.width) * scale).round() as u32).clamp(1, bound.width);
        let height = ((f64::from(size.height) * scale).round() as u32).clamp(1, bound.height);
        self.image = imageops::resize(&self.image, width, height, FilterType::CatmullRom);
        Ok(())
    }

    fn check_bounds(&self, tile: ImageSize, at: TileOffset) -> MosaicResult<()> {
        if !tile.is_valid() {
            return Err(MosaicError::InvalidData(format!(
                "tile size must be > 0, got {tile}"
            )));
        }
        let size = self.size();
        let fits_x = u64::from(at.x) + u64::from(tile.width) <= u64::from(size.width);
        let fits_y = u64::from(at.y) + u64::from(tile.height) <= u64::from(size.height);
        if fits_x && fits_y {
            return Ok(());
        }
        Err(MosaicError::InvalidData(format!(
            "tile {tile} at ({}, {}) exceeds canvas {size}",
            at.x, at.y
        )))
    }
}

impl From<RgbImage> for Canvas {
    fn from(image: RgbImage) -> Self {
        Self { image }
    }
}
