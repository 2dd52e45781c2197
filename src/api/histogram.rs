use image::RgbImage;
use tracing::debug;

use crate::api::plotter::{check_row_count, pick_rows};
use crate::api::scatter::DEFAULT_SCATTER_IMAGE_SIZE;
use crate::api::{Plotter, SortKey};
use crate::core::{BinSpec, Histogram, ImageSize, TileOffset, argsort_descending};
use crate::data::{DEFAULT_SEED, DataTable, Variable, sample_indices};
use crate::error::{MosaicError, MosaicResult};
use crate::io::ImageSource;
use crate::render::{Canvas, Color, PlotFrame, PlotKind, Renderer};

/// Histogram of `x` drawn with the images themselves.
///
/// Each bin is a column one tile wide; its images stack upward from the
/// bottom edge. With `sort_keys`, the largest key of a bin sits at the
/// bottom.
pub fn images_to_histogram(
    images: &[RgbImage],
    x: &[f64],
    bins: BinSpec,
    sort_keys: Option<&[f64]>,
    background: Color,
) -> MosaicResult<RgbImage> {
    let first = images.first().ok_or(MosaicError::NoImages)?;
    if x.len() != images.len() {
        return Err(MosaicError::InvalidData(format!(
            "histogram has {} values for {} images",
            x.len(),
            images.len()
        )));
    }
    if let Some(keys) = sort_keys.filter(|keys| keys.len() != images.len()) {
        return Err(MosaicError::InvalidData(format!(
            "histogram sort key has {} values for {} images",
            keys.len(),
            images.len()
        )));
    }

    let tile = ImageSize::of(first);
    let histogram = Histogram::from_values(x, bins)?;
    let width = bins_extent(tile.width, histogram.n_bins())?;
    let height = bins_extent(tile.height, histogram.max_count())?;
    let mut canvas = Canvas::blank(ImageSize::new(width, height), background)?;

    for bin in 0..histogram.n_bins() {
        let mut members = histogram.members(bin);
        if let Some(keys) = sort_keys {
            let bin_keys: Vec<f64> = members.iter().map(|&index| keys[index]).collect();
            members = argsort_descending(&bin_keys)
                .into_iter()
                .map(|position| members[position])
                .collect();
        }

        let left = tile.width * bin as u32;
        for (level, &index) in members.iter().enumerate() {
            let top = height - tile.height * (level as u32 + 1);
            canvas.paste(index, &images[index], tile, TileOffset::new(left, top))?;
        }
    }

    debug!(
        images = images.len(),
        bins = histogram.n_bins(),
        max_count = histogram.max_count(),
        canvas = %canvas.size(),
        "composed image histogram"
    );
    Ok(canvas.into_image())
}

fn bins_extent(tile: u32, count: usize) -> MosaicResult<u32> {
    u32::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(tile))
        .ok_or_else(|| MosaicError::InvalidData(format!("histogram extent overflows: {count} tiles")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramOptions {
    pub x: Variable,
    pub images: ImageSource,
    /// Order inside each bin, largest at the bottom.
    pub sort_by: Option<SortKey>,
    pub bins: BinSpec,
    pub n_samples: Option<usize>,
    pub seed: u64,
    pub image_size: Option<ImageSize>,
}

impl HistogramOptions {
    #[must_use]
    pub fn new(x: impl Into<Variable>) -> Self {
        Self {
            x: x.into(),
            images: ImageSource::default(),
            sort_by: None,
            bins: BinSpec::default(),
            n_samples: None,
            seed: DEFAULT_SEED,
            image_size: Some(ImageSize::square(DEFAULT_SCATTER_IMAGE_SIZE)),
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
    pub fn with_bins(mut self, bins: BinSpec) -> Self {
        self.bins = bins;
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
}

impl<R: Renderer> Plotter<R> {
    /// Histogram of `x` whose bars are stacks of the binned images.
    pub fn image_histogram(
        &mut self,
        data: Option<&DataTable>,
        options: HistogramOptions,
    ) -> MosaicResult<PlotFrame> {
        let x = options.x.resolve_numeric(data)?;
        let rows = match options.n_samples {
            Some(n) if n < x.len() => sample_indices(x.len(), n, options.seed),
            _ => (0..x.len()).collect(),
        };
        let all_keys = match &options.sort_by {
            Some(key) => key.data_keys(data)?,
            None => None,
        };
        if let Some(all) = &all_keys {
            check_row_count("sort key", all.len(), x.len())?;
        }

        let images =
            self.load_rows(data, &options.images, options.image_size, x.len(), &rows)?;
        let x = pick_rows(&x, &rows)?;

        let sort_keys = match (&options.sort_by, all_keys) {
            (None, _) => None,
            // data-backed keys cover every row, so narrow them to the sample
            (Some(_), Some(all)) => Some(pick_rows(&all, &rows)?),
            (Some(key), None) => Some(key.keys(data, &images, self.config().n_jobs)?),
        };

        let image = images_to_histogram(
            &images,
            &x,
            options.bins,
            sort_keys.as_deref(),
            self.config().background,
        )?;
        self.present(PlotFrame::new(PlotKind::Histogram, image))
    }
}
