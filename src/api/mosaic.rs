use image::RgbImage;

use crate::api::grid::{DEFAULT_GRID_IMAGE_SIZE, images_to_grid};
use crate::api::{Plotter, SortKey};
use crate::core::ImageSize;
use crate::data::DataTable;
use crate::error::MosaicResult;
use crate::io::ImageSource;
use crate::render::{Color, PlotFrame, PlotKind, Renderer};

/// Grid without padding between tiles.
pub fn images_to_mosaic(images: &[RgbImage], background: Color) -> MosaicResult<RgbImage> {
    images_to_grid(images, 0, background)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MosaicOptions {
    pub images: ImageSource,
    pub sort_by: Option<SortKey>,
    pub image_size: Option<ImageSize>,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            images: ImageSource::default(),
            sort_by: None,
            image_size: Some(ImageSize::square(DEFAULT_GRID_IMAGE_SIZE)),
        }
    }
}

impl MosaicOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_images(mut self, images: impl Into<ImageSource>) -> Self {
        self.images = images.into();
        self
    }

    #[must_use]
    pub fn with_sort_by(mut self, sort_by: impl Into<SortKey>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    #[must_use]
    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = Some(image_size);
        self
    }

    #[must_use]
    pub fn without_resize(mut self) -> Self {
        self.image_size = None;
        self
    }
}

impl<R: Renderer> Plotter<R> {
    /// Tiles the images edge to edge, optionally ordered by `sort_by`.
    pub fn mosaic_plot(
        &mut self,
        data: Option<&DataTable>,
        options: MosaicOptions,
    ) -> MosaicResult<PlotFrame> {
        let image = self.sorted_grid(
            data,
            &options.images,
            options.sort_by.as_ref(),
            options.image_size,
            0,
        )?;
        self.present(PlotFrame::new(PlotKind::Mosaic, image))
    }
}
