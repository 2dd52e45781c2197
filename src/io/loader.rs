use std::path::Path;

use image::RgbImage;
use image::imageops::{self, FilterType};
use tracing::{debug, trace};

use crate::core::ImageSize;
use crate::error::{MosaicError, MosaicResult};
use crate::io::paths::image_path;
use crate::workers::map_indexed;

/// Resamples `image` to `size` with a Lanczos filter; same-size input is copied.
#[must_use]
pub fn resize_image(image: &RgbImage, size: ImageSize) -> RgbImage {
    if ImageSize::of(image) == size {
        return image.clone();
    }
    imageops::resize(image, size.width, size.height, FilterType::Lanczos3)
}

/// Decodes one image as 8-bit RGB, resampled to `size` when given.
pub fn load_image(
    image_file: impl AsRef<Path>,
    image_dir: impl AsRef<Path>,
    size: Option<ImageSize>,
) -> MosaicResult<RgbImage> {
    let path = image_path(image_file, image_dir);
    if let Some(size) = size.filter(|size| !size.is_valid()) {
        return Err(MosaicError::InvalidData(format!(
            "target image size must be > 0, got {size}"
        )));
    }

    trace!(path = %path.display(), "decoding image");
    let image = image::open(&path)
        .map_err(|source| MosaicError::ImageDecode {
            path: path.clone(),
            source,
        })?
        .to_rgb8();

    Ok(match size {
        Some(size) => resize_image(&image, size),
        None => image,
    })
}

/// Decodes many images on the worker pool; output order matches `image_files`.
pub fn load_images<P>(
    image_files: &[P],
    image_dir: impl AsRef<Path>,
    size: Option<ImageSize>,
    n_jobs: i32,
) -> MosaicResult<Vec<RgbImage>>
where
    P: AsRef<Path> + Sync,
{
    let image_dir = image_dir.as_ref();
    debug!(
        count = image_files.len(),
        image_dir = %image_dir.display(),
        n_jobs,
        "loading images"
    );
    map_indexed(image_files, n_jobs, |_, file| load_image(file, image_dir, size))
}

/// Resamples in-memory images to `size` on the worker pool.
pub fn resize_images(
    images: Vec<RgbImage>,
    size: Option<ImageSize>,
    n_jobs: i32,
) -> MosaicResult<Vec<RgbImage>> {
    let Some(size) = size else {
        return Ok(images);
    };
    if !size.is_valid() {
        return Err(MosaicError::InvalidData(format!(
            "target image size must be > 0, got {size}"
        )));
    }
    if images.iter().all(|image| ImageSize::of(image) == size) {
        return Ok(images);
    }
    map_indexed(&images, n_jobs, |_, image| Ok(resize_image(image, size)))
}
