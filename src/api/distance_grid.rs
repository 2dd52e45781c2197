use image::RgbImage;
use tracing::debug;

use crate::api::hue::{DEFAULT_HUE_ALPHA, tint_by_category};
use crate::api::mosaic::images_to_mosaic;
use crate::api::scatter::{DEFAULT_SCATTER_IMAGE_SIZE, unit_points};
use crate::api::Plotter;
use crate::core::{ImageSize, assign_nearest_available, table_size, unit_grid_points};
use crate::data::{Category, DataTable, Variable};
use crate::error::{MosaicError, MosaicResult};
use crate::io::ImageSource;
use crate::render::{Color, PlotFrame, PlotKind, Renderer};

/// Snaps images onto a square grid so nearby `(x, y)` points stay nearby.
///
/// Grid cells are filled in row-major order, each with the closest image
/// not yet placed. Cells left over once every image is placed keep the
/// background.
pub fn images_to_distance_grid(
    images: &[RgbImage],
    x: &[f64],
    y: &[f64],
    background: Color,
) -> MosaicResult<RgbImage> {
    if images.is_empty() {
        return Err(MosaicError::NoImages);
    }
    let points = unit_points(x, y, images.len())?;
    let side = table_size(images.len())? as usize;
    let order = assign_nearest_available(&unit_grid_points(side), &points)?;

    debug!(images = images.len(), side, "assigned images to grid cells");
    let arranged: Vec<RgbImage> = order.iter().map(|&index| images[index].clone()).collect();
    images_to_mosaic(&arranged, background)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGridOptions {
    pub x: Variable,
    pub y: Variable,
    pub images: ImageSource,
    pub hue: Option<Category>,
    pub hue_alpha: f64,
    pub image_size: Option<ImageSize>,
}

impl DistanceGridOptions {
    #[must_use]
    pub fn new(x: impl Into<Variable>, y: impl Into<Variable>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            images: ImageSource::default(),
            hue: None,
            hue_alpha: DEFAULT_HUE_ALPHA,
            image_size: Some(ImageSize::square(DEFAULT_SCATTER_IMAGE_SIZE)),
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
    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = Some(image_size);
        self
    }
}

impl<R: Renderer> Plotter<R> {
    /// Mosaic whose layout approximates the `(x, y)` embedding of the images.
    pub fn distance_grid(
        &mut self,
        data: Option<&DataTable>,
        options: DistanceGridOptions,
    ) -> MosaicResult<PlotFrame> {
        let x = options.x.resolve_numeric(data)?;
        let y = options.y.resolve_numeric(data)?;

        let mut images = self.load(data, &options.images, options.image_size)?;
        if let Some(hue) = &options.hue {
            let labels = hue.resolve(data)?;
            images = tint_by_category(&images, &labels, options.hue_alpha, self.config().n_jobs)?;
        }

        let image = images_to_distance_grid(&images, &x, &y, self.config().background)?;
        self.present(PlotFrame::new(PlotKind::DistanceGrid, image))
    }
}
