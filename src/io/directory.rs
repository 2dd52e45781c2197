use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

use crate::context;
use crate::core::ImageSize;
use crate::data::DataTable;
use crate::error::MosaicResult;
use crate::features::{HsvFeature, HsvOptions, extract_hsv_stats};
use crate::io::loader::load_images;
use crate::io::paths::{image_files_in, sample_images};

/// Name of the path column produced by [`directory_to_table`].
pub const IMAGE_PATH_COLUMN: &str = "image_path";

/// Loads every image in `image_dir`, optionally a seeded sample of them.
pub fn load_from_directory(
    image_dir: impl AsRef<Path>,
    n_samples: Option<usize>,
    size: Option<ImageSize>,
    seed: u64,
    n_jobs: i32,
) -> MosaicResult<Vec<RgbImage>> {
    let mut files = image_files_in(image_dir.as_ref())?;
    if let Some(n) = n_samples {
        files = sample_images(&files, n, seed);
    }
    load_images(&files, "", size, n_jobs)
}

/// Table with one `image_path` row per image in `image_dir`.
///
/// Paths are relative to `image_dir`. An empty `image_dir` falls back to the
/// active data context. Each requested HSV feature name (`__hue__`,
/// `__saturation__` or `__value__`) becomes an extra numeric column.
pub fn directory_to_table(
    image_dir: &str,
    features: &[&str],
    n_jobs: i32,
) -> MosaicResult<DataTable> {
    let image_dir = if image_dir.is_empty() {
        context::get_image_dir()
    } else {
        image_dir.to_owned()
    };
    let features: Vec<HsvFeature> = features
        .iter()
        .map(|name| name.parse())
        .collect::<MosaicResult<_>>()?;

    let root = PathBuf::from(&image_dir);
    let files = image_files_in(&root)?;
    let relative: Vec<String> = files
        .iter()
        .map(|file| {
            file.strip_prefix(&root)
                .unwrap_or(file)
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    let mut table = DataTable::new();
    table.push_text(IMAGE_PATH_COLUMN, relative.iter().cloned())?;

    if !features.is_empty() {
        let images = load_images(&relative, &root, None, n_jobs)?;
        let stats = extract_hsv_stats(&images, HsvOptions::default(), n_jobs)?;
        for feature in features {
            table.push_numeric(
                feature.name(),
                stats.iter().map(|hsv| hsv[feature.index()]).collect(),
            )?;
        }
    }

    debug!(image_dir = %image_dir, rows = table.len(), "indexed image directory");
    Ok(table)
}
