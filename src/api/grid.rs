use image::RgbImage;
use tracing::debug;

use crate::api::{Plotter, SortKey};
use crate::core::{GridLayout, ImageSize};
use crate::data::DataTable;
use crate::error::{MosaicError, MosaicResult};
use crate::io::ImageSource;
use crate::render::{Canvas, Color, PlotFrame, PlotKind, Renderer};

pub const DEFAULT_GRID_IMAGE_SIZE: u32 = 40;

/// Tiles equally sized images into a square grid.
///
/// Images fill rows left to right, top to bottom; `padding` pixels of
/// `background` separate neighbouring tiles and fill unused cells.
pub fn images_to_grid(
    images: &[RgbImage],
    padding: u32,
    background: Color,
) -> MosaicResult<RgbImage> {
    let first = images.first().ok_or(MosaicError::NoImages)?;
    let tile = ImageSize::of(first);
    let layout = GridLayout::new(images.len(), tile, padding)?;

    let mut canvas = Canvas::blank(layout.canvas_size(), background)?;
    for (index, (image, at)) in images.iter().zip(layout.placements()).enumerate() {
        canvas.paste(index, image, tile, at)?;
    }

    debug!(
        images = images.len(),
        table_size = layout.table_size(),
        padding,
        canvas = %canvas.size(),
        "composed image grid"
    );
    Ok(canvas.into_image())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub images: ImageSource,
    pub sort_by: Option<SortKey>,
    /// Target tile size; `None` keeps the decoded size.
    pub image_size: Option<ImageSize>,
    pub padding: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            images: ImageSource::default(),
            sort_by: None,
            image_size: Some(ImageSize::square(DEFAULT_GRID_IMAGE_SIZE)),
            padding: 0,
        }
    }
}

impl GridOptions {
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

    #[must_use]
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }
}

impl<R: Renderer> Plotter<R> {
    /// Square grid of images with optional padding between tiles.
    pub fn image_grid(
        &mut self,
        data: Option<&DataTable>,
        options: GridOptions,
    ) -> MosaicResult<PlotFrame> {
        let image = self.sorted_grid(
            data,
            &options.images,
            options.sort_by.as_ref(),
            options.image_size,
            options.padding,
        )?;
        self.present(PlotFrame::new(PlotKind::Grid, image))
    }

    pub(crate) fn sorted_grid(
        &self,
        data: Option<&DataTable>,
        source: &ImageSource,
        sort_by: Option<&SortKey>,
        image_size: Option<ImageSize>,
        padding: u32,
    ) -> MosaicResult<RgbImage> {
        let mut images = self.load(data, source, image_size)?;
        if let Some(key) = sort_by {
            images = key.sort_images(data, images, self.config().n_jobs)?;
        }
        images_to_grid(&images, padding, self.config().background)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::images_to_grid;
    use crate::error::MosaicError;
    use crate::render::Color;

    #[test]
    fn unused_cells_keep_background() {
        let tiles = vec![RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])); 3];
        let grid = images_to_grid(&tiles, 1, Color::WHITE).expect("grid");
        assert_eq!(grid.dimensions(), (5, 5));
        // padding column and the empty fourth cell
        assert_eq!(grid.get_pixel(2, 0).0, [255, 255, 255]);
        assert_eq!(grid.get_pixel(4, 4).0, [255, 255, 255]);
        assert_eq!(grid.get_pixel(0, 3).0, [0, 0, 0]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = images_to_grid(&[], 0, Color::WHITE).expect_err("empty");
        assert!(matches!(err, MosaicError::NoImages));
    }
}
