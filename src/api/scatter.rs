use image::RgbImage;
use tracing::debug;

use crate::api::hue::{DEFAULT_HUE_ALPHA, tint_by_category};
use crate::api::plotter::{check_row_count, pick_rows};
use crate::api::Plotter;
use crate::core::{ImageSize, ScatterLayout, declutter, minmax_scale};
use crate::data::{Categorical, Category, DEFAULT_SEED, DataTable, Variable, sample_indices};
use crate::error::{MosaicError, MosaicResult};
use crate::io::ImageSource;
use crate::render::{Canvas, Color, PlotFrame, PlotKind, Renderer};

pub const DEFAULT_SCATTER_IMAGE_SIZE: u32 = 20;
pub const DEFAULT_SCATTER_ALPHA: f64 = 0.9;
pub const DEFAULT_SCATTER_CANVAS: ImageSize = ImageSize::new(640, 480);

/// Draws each image centred on its rescaled `(x, y)` position.
///
/// Coordinates are min-max scaled onto the unit square, y pointing up.
/// With a `threshold`, images whose squared distance to an already drawn
/// point is below it are skipped.
pub fn images_to_scatter(
    images: &[RgbImage],
    x: &[f64],
    y: &[f64],
    threshold: Option<f64>,
    alpha: f64,
    canvas_size: ImageSize,
    background: Color,
) -> MosaicResult<RgbImage> {
    let first = images.first().ok_or(MosaicError::NoImages)?;
    let points = unit_points(x, y, images.len())?;

    let tile = ImageSize::of(first);
    let layout = ScatterLayout::new(canvas_size, tile)?;
    let mut canvas = Canvas::blank(canvas_size, background)?;

    let shown = declutter(&points, threshold);
    for &index in &shown {
        let image = &images[index];
        let actual = ImageSize::of(image);
        if actual != tile {
            return Err(MosaicError::MismatchedImageSize {
                index,
                expected: tile,
                actual,
            });
        }
        canvas.blend(image, layout.placement(points[index]), alpha)?;
    }

    debug!(
        images = images.len(),
        shown = shown.len(),
        canvas = %canvas_size,
        "composed image scatter plot"
    );
    Ok(canvas.into_image())
}

/// Zips `x` and `y` into unit-square points after min-max scaling each axis.
pub(crate) fn unit_points(x: &[f64], y: &[f64], expected: usize) -> MosaicResult<Vec<[f64; 2]>> {
    if x.len() != expected || y.len() != expected {
        return Err(MosaicError::InvalidData(format!(
            "coordinates have {} x and {} y values for {expected} images",
            x.len(),
            y.len()
        )));
    }

    let mut x = x.to_vec();
    let mut y = y.to_vec();
    minmax_scale(&mut x)?;
    minmax_scale(&mut y)?;
    Ok(x.into_iter().zip(y).map(|(x, y)| [x, y]).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    pub x: Variable,
    pub y: Variable,
    pub images: ImageSource,
    /// Categorical variable used to tint images.
    pub hue: Option<Category>,
    pub hue_alpha: f64,
    pub threshold: Option<f64>,
    /// Opacity of each drawn image.
    pub alpha: f64,
    /// Draw only a seeded random subset of this many rows.
    pub n_samples: Option<usize>,
    pub seed: u64,
    pub image_size: Option<ImageSize>,
    pub canvas_size: ImageSize,
}

impl ScatterOptions {
    #[must_use]
    pub fn new(x: impl Into<Variable>, y: impl Into<Variable>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            images: ImageSource::default(),
            hue: None,
            hue_alpha: DEFAULT_HUE_ALPHA,
            threshold: None,
            alpha: DEFAULT_SCATTER_ALPHA,
            n_samples: None,
            seed: DEFAULT_SEED,
            image_size: Some(ImageSize::square(DEFAULT_SCATTER_IMAGE_SIZE)),
            canvas_size: DEFAULT_SCATTER_CANVAS,
        }
    }

    #[must_use]
    pub fn with_images(mut self, images: impl Into<ImageSource>) -> Self {
        self.images = images.into();
        self
    }

    #[must_use]
    pub fn with_hue(mut self, hue: impl Into<Category>) -> Self {
        self.hue = Some(hue.into());
        self
    }

    #[must_use]
    pub fn with_hue_alpha(mut self, hue_alpha: f64) -> Self {
        self.hue_alpha = hue_alpha;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = Some(image_size);
        self
    }

    #[must_use]
    pub fn with_canvas_size(mut self, canvas_size: ImageSize) -> Self {
        self.canvas_size = canvas_size;
        self
    }
}

impl<R: Renderer> Plotter<R> {
    /// Scatter plot that draws images instead of markers.
    pub fn scatter_plot(
        &mut self,
        data: Option<&DataTable>,
        options: ScatterOptions,
    ) -> MosaicResult<PlotFrame> {
        let x = options.x.resolve_numeric(data)?;
        let y = options.y.resolve_numeric(data)?;
        if x.len() != y.len() {
            return Err(MosaicError::InvalidData(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            )));
        }

        let rows = match options.n_samples {
            Some(n) if n < x.len() => sample_indices(x.len(), n, options.seed),
            _ => (0..x.len()).collect(),
        };
        let labels = match &options.hue {
            Some(hue) => {
                let labels = hue.resolve(data)?;
                check_row_count("hue", labels.len(), x.len())?;
                Some(labels)
            }
            None => None,
        };

        let mut images =
            self.load_rows(data, &options.images, options.image_size, x.len(), &rows)?;
        if let Some(labels) = labels {
            let labels = subset_labels(labels, &rows)?;
            images = tint_by_category(&images, &labels, options.hue_alpha, self.config().n_jobs)?;
        }

        let image = images_to_scatter(
            &images,
            &pick_rows(&x, &rows)?,
            &pick_rows(&y, &rows)?,
            options.threshold,
            options.alpha,
            options.canvas_size,
            self.config().background,
        )?;
        self.present(PlotFrame::new(PlotKind::Scatter, image))
    }
}

/// Keeps the full level set so palette colours do not depend on the sample.
pub(crate) fn subset_labels(labels: Categorical, rows: &[usize]) -> MosaicResult<Categorical> {
    Ok(Categorical {
        codes: pick_rows(&labels.codes, rows)?,
        levels: labels.levels,
    })
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::images_to_scatter;
    use crate::core::ImageSize;
    use crate::render::Color;

    #[test]
    fn extreme_points_land_in_opposite_corners() {
        let images = vec![RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])); 2];
        let plot = images_to_scatter(
            &images,
            &[0.0, 10.0],
            &[0.0, 10.0],
            None,
            1.0,
            ImageSize::new(10, 10),
            Color::WHITE,
        )
        .expect("scatter");

        assert_eq!(plot.get_pixel(0, 9).0, [0, 0, 0]);
        assert_eq!(plot.get_pixel(9, 0).0, [0, 0, 0]);
        assert_eq!(plot.get_pixel(9, 9).0, [255, 255, 255]);
    }

    #[test]
    fn threshold_hides_the_sentinel_corner() {
        let images = vec![RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])); 2];
        let plot = images_to_scatter(
            &images,
            &[0.0, 10.0],
            &[0.0, 10.0],
            Some(0.1),
            1.0,
            ImageSize::new(10, 10),
            Color::WHITE,
        )
        .expect("scatter");

        assert_eq!(plot.get_pixel(0, 9).0, [0, 0, 0]);
        assert_eq!(plot.get_pixel(9, 0).0, [255, 255, 255]);
    }
}
