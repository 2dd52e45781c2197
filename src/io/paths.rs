use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use walkdir::WalkDir;

use crate::error::{MosaicError, MosaicResult};

/// Extensions recognised when scanning a directory for images.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Joins `image_file` onto `image_dir`; an empty directory leaves it as is.
#[must_use]
pub fn image_path(image_file: impl AsRef<Path>, image_dir: impl AsRef<Path>) -> PathBuf {
    let image_dir = image_dir.as_ref();
    if image_dir.as_os_str().is_empty() {
        return image_file.as_ref().to_path_buf();
    }
    image_dir.join(image_file)
}

#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Image files directly inside `image_dir`, sorted by file name.
pub fn image_files_in(image_dir: impl AsRef<Path>) -> MosaicResult<Vec<PathBuf>> {
    let image_dir = image_dir.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(image_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| MosaicError::Io {
            path: err
                .path()
                .map_or_else(|| image_dir.to_path_buf(), Path::to_path_buf),
            source: err.into(),
        })?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Seeded random subset of `n` items without replacement.
///
/// Returns all items in their original order when `n >= items.len()`.
#[must_use]
pub fn sample_images<T: Clone>(items: &[T], n: usize, seed: u64) -> Vec<T> {
    if n >= items.len() {
        return items.to_vec();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    items.choose_multiple(&mut rng, n).cloned().collect()
}
