use image::RgbImage;
use tracing::debug;

use crate::api::PlotterConfig;
use crate::context;
use crate::core::ImageSize;
use crate::data::DataTable;
use crate::error::{MosaicError, MosaicResult};
use crate::io::{ImageSource, load_images, resize_images, resolve_image_files, resolve_images};
use crate::render::{AxisTick, Canvas, PlotFrame, Renderer};

/// Entry point for every image plot.
///
/// Each plot method composes a [`PlotFrame`], hands it to the renderer and
/// returns it so callers can inspect or re-render it.
pub struct Plotter<R: Renderer> {
    renderer: R,
    config: PlotterConfig,
}

impl<R: Renderer> Plotter<R> {
    pub fn new(renderer: R, config: PlotterConfig) -> MosaicResult<Self> {
        config.validate()?;
        debug!(
            n_jobs = config.n_jobs,
            image_dir = %config.image_dir,
            "plotter initialized"
        );
        Ok(Self { renderer, config })
    }

    #[must_use]
    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlotterConfig) -> MosaicResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Image directory for this plot: the config value, else the context.
    pub(crate) fn image_dir(&self) -> String {
        if self.config.image_dir.is_empty() {
            context::get_image_dir()
        } else {
            self.config.image_dir.clone()
        }
    }

    pub(crate) fn load(
        &self,
        data: Option<&DataTable>,
        source: &ImageSource,
        size: Option<ImageSize>,
    ) -> MosaicResult<Vec<RgbImage>> {
        let images = resolve_images(data, source, &self.image_dir(), size, self.config.n_jobs)?;
        if images.is_empty() {
            return Err(MosaicError::NoImages);
        }
        Ok(images)
    }

    /// Loads only the images at `rows`, in that order.
    ///
    /// The source must hold exactly `row_count` images so that `rows` index
    /// the same records as the other per-row inputs.
    pub(crate) fn load_rows(
        &self,
        data: Option<&DataTable>,
        source: &ImageSource,
        size: Option<ImageSize>,
        row_count: usize,
        rows: &[usize],
    ) -> MosaicResult<Vec<RgbImage>> {
        let images = match source {
            ImageSource::Images(images) => {
                check_row_count("image source", images.len(), row_count)?;
                let picked = pick_rows(images, rows)?;
                resize_images(picked, size, self.config.n_jobs)?
            }
            _ => {
                let files = resolve_image_files(data, source)?;
                check_row_count("image source", files.len(), row_count)?;
                let files = pick_rows(&files, rows)?;
                load_images(&files, self.image_dir(), size, self.config.n_jobs)?
            }
        };
        if images.is_empty() {
            return Err(MosaicError::NoImages);
        }
        Ok(images)
    }

    /// Applies `figsize`, renders and returns the frame.
    pub(crate) fn present(&mut self, mut frame: PlotFrame) -> MosaicResult<PlotFrame> {
        if let Some(bound) = self.config.figsize {
            let before = frame.size();
            let mut canvas = Canvas::from(frame.image);
            canvas.thumbnail(bound)?;
            frame.image = canvas.into_image();

            let scale = f64::from(frame.size().height) / f64::from(before.height);
            frame.y_ticks = frame
                .y_ticks
                .into_iter()
                .map(|tick| AxisTick::new(tick.position_px * scale, tick.label))
                .collect();
        }

        self.emit(frame)
    }

    /// Renders the frame as composed, ignoring `figsize`.
    pub(crate) fn emit(&mut self, frame: PlotFrame) -> MosaicResult<PlotFrame> {
        self.renderer.render(&frame)?;
        debug!(kind = ?frame.kind, size = %frame.size(), ticks = frame.y_ticks.len(), "plot rendered");
        Ok(frame)
    }
}

/// Fails unless a per-row input named `what` has exactly `row_count` entries.
pub(crate) fn check_row_count(what: &str, len: usize, row_count: usize) -> MosaicResult<()> {
    if len == row_count {
        return Ok(());
    }
    Err(MosaicError::InvalidData(format!(
        "{what} has {len} entries for {row_count} rows"
    )))
}

pub(crate) fn pick_rows<T: Clone>(items: &[T], rows: &[usize]) -> MosaicResult<Vec<T>> {
    rows.iter()
        .map(|&row| {
            items.get(row).cloned().ok_or_else(|| {
                MosaicError::InvalidData(format!(
                    "row {row} out of range for {} items",
                    items.len()
                ))
            })
        })
        .collect()
}
