use std::path::Path;

use image::RgbImage;
use tracing::debug;

use crate::api::{Plotter, SortKey};
use crate::api::mosaic::images_to_mosaic;
use crate::core::{ImageSize, argsort};
use crate::data::{DEFAULT_SEED, DataTable};
use crate::error::{MosaicError, MosaicResult};
use crate::io::{load_from_directory, load_images, sample_images};
use crate::render::{Color, PlotFrame, PlotKind, Renderer};

/// Square sprite sheet on a white background, as embedding projectors expect.
pub fn images_to_sprite(images: &[RgbImage]) -> MosaicResult<RgbImage> {
    images_to_mosaic(images, Color::WHITE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteOptions {
    /// Use a seeded random subset of this many images.
    pub n_samples: Option<usize>,
    pub seed: u64,
    /// Sprites keep the decoded size unless a tile size is given.
    pub image_size: Option<ImageSize>,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            n_samples: None,
            seed: DEFAULT_SEED,
            image_size: None,
        }
    }
}

impl SpriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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
}

impl<R: Renderer> Plotter<R> {
    /// Sprite of the images found directly inside `image_dir`.
    pub fn directory_to_sprite(
        &mut self,
        image_dir: impl AsRef<Path>,
        options: SpriteOptions,
    ) -> MosaicResult<PlotFrame> {
        let images = load_from_directory(
            image_dir,
            options.n_samples,
            options.image_size,
            options.seed,
            self.config().n_jobs,
        )?;
        let sprite = images_to_sprite(&images)?;
        self.emit(PlotFrame::new(PlotKind::Sprite, sprite))
    }

    /// Sprite of explicit image files, joined to the configured image
    /// directory and optionally sampled.
    pub fn files_to_sprite(
        &mut self,
        image_files: &[String],
        options: SpriteOptions,
    ) -> MosaicResult<PlotFrame> {
        let files = match options.n_samples {
            Some(n) => sample_images(image_files, n, options.seed),
            None => image_files.to_vec(),
        };
        if files.is_empty() {
            return Err(MosaicError::NoImages);
        }

        debug!(files = files.len(), "building sprite from file list");
        let images = load_images(&files, self.image_dir(), options.image_size, self.config().n_jobs)?;
        let sprite = images_to_sprite(&images)?;
        self.emit(PlotFrame::new(PlotKind::Sprite, sprite))
    }

    /// Sprite of the images named by `image_column`, optionally sampled and
    /// then ordered ascending by `sort_by`.
    pub fn column_to_sprite(
        &mut self,
        data: &DataTable,
        image_column: &str,
        sort_by: Option<&str>,
        options: SpriteOptions,
    ) -> MosaicResult<PlotFrame> {
        let mut table = match options.n_samples {
            Some(n) => data.sample(n, options.seed)?,
            None => data.clone(),
        };

        if let Some(column) = sort_by {
            let keys = SortKey::Column(column.to_owned())
                .data_keys(Some(&table))?
                .ok_or_else(|| MosaicError::UnknownSortKey(column.to_owned()))?;
            table = table.take_rows(&argsort(&keys))?;
        }

        let files = table.text_column(image_column)?;
        debug!(rows = files.len(), column = image_column, "building sprite from column");
        let images = load_images(files, self.image_dir(), options.image_size, self.config().n_jobs)?;
        let sprite = images_to_sprite(&images)?;
        self.emit(PlotFrame::new(PlotKind::Sprite, sprite))
    }
}
