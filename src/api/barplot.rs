use image::RgbImage;
use tracing::debug;

use crate::api::grid::DEFAULT_GRID_IMAGE_SIZE;
use crate::api::{Plotter, SortKey};
use crate::core::{BarLayout, ImageSize, apply_order};
use crate::data::{Categorical, Category, DataTable};
use crate::error::{MosaicError, MosaicResult};
use crate::io::ImageSource;
use crate::render::{AxisTick, Canvas, Color, PlotFrame, PlotKind, Renderer};

pub const DEFAULT_IMAGES_PER_ROW: usize = 50;

/// Stacks the images of each category level into a horizontal bar.
///
/// Levels are drawn bottom-up in level order; images keep their input order
/// within a bar. Returns the canvas and one y tick per level.
pub fn images_to_barplot(
    images: &[RgbImage],
    labels: &Categorical,
    images_per_row: usize,
    background: Color,
) -> MosaicResult<(RgbImage, Vec<AxisTick>)> {
    let first = images.first().ok_or(MosaicError::NoImages)?;
    if labels.len() != images.len() {
        return Err(MosaicError::InvalidData(format!(
            "bar plot has {} labels for {} images",
            labels.len(),
            images.len()
        )));
    }

    let tile = ImageSize::of(first);
    let groups = labels.groups();
    let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
    let layout = BarLayout::new(&sizes, tile, images_per_row)?;

    let mut canvas = Canvas::blank(layout.canvas_size(), background)?;
    for (members, offsets) in groups.iter().zip(layout.placements()) {
        for (&index, &at) in members.iter().zip(offsets) {
            canvas.paste(index, &images[index], tile, at)?;
        }
    }

    let ticks = labels
        .levels
        .iter()
        .zip(layout.ticks())
        .map(|(level, &position)| AxisTick::new(position, level.clone()))
        .collect();

    debug!(
        images = images.len(),
        levels = labels.levels.len(),
        images_per_row,
        canvas = %canvas.size(),
        "composed image bar plot"
    );
    Ok((canvas.into_image(), ticks))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPlotOptions {
    /// Categorical variable splitting the bars.
    pub y: Category,
    pub images: ImageSource,
    /// Order of images along each bar.
    pub sort_by: Option<SortKey>,
    pub images_per_row: usize,
    pub image_size: Option<ImageSize>,
}

impl BarPlotOptions {
    #[must_use]
    pub fn new(y: impl Into<Category>) -> Self {
        Self {
            y: y.into(),
            images: ImageSource::default(),
            sort_by: None,
            images_per_row: DEFAULT_IMAGES_PER_ROW,
            image_size: Some(ImageSize::square(DEFAULT_GRID_IMAGE_SIZE)),
        }
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
    pub fn with_images_per_row(mut self, images_per_row: usize) -> Self {
        self.images_per_row = images_per_row;
        self
    }

    #[must_use]
    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = Some(image_size);
        self
    }
}

impl<R: Renderer> Plotter<R> {
    /// Bar plot whose bars are built from the images of each `y` level.
    pub fn image_barplot(
        &mut self,
        data: Option<&DataTable>,
        options: BarPlotOptions,
    ) -> MosaicResult<PlotFrame> {
        let mut labels = options.y.resolve(data)?;
        let mut images = self.load(data, &options.images, options.image_size)?;

        if labels.len() != images.len() {
            return Err(MosaicError::InvalidData(format!(
                "bar plot has {} labels for {} images",
                labels.len(),
                images.len()
            )));
        }

        if let Some(key) = &options.sort_by {
            let order = key.order(data, &images, self.config().n_jobs, false)?;
            // labels follow their images
            labels.codes = apply_order(labels.codes, &order);
            images = apply_order(images, &order);
        }

        let (image, ticks) = images_to_barplot(
            &images,
            &labels,
            options.images_per_row,
            self.config().background,
        )?;
        self.present(PlotFrame::new(PlotKind::BarPlot, image).with_y_ticks(ticks))
    }
}
