use image::RgbImage;

use crate::context;
use crate::core::ImageSize;
use crate::data::DataTable;
use crate::error::{MosaicError, MosaicResult};
use crate::io::loader::{load_images, resize_images};

/// Where a plot gets its images from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSource {
    /// Whatever the active data context names: its file list, else its column.
    #[default]
    Context,
    /// Text column of the data table holding file paths.
    Column(String),
    /// Explicit file paths.
    Files(Vec<String>),
    /// Already decoded images.
    Images(Vec<RgbImage>),
}

impl From<&str> for ImageSource {
    fn from(column: &str) -> Self {
        Self::Column(column.to_owned())
    }
}

impl From<Vec<RgbImage>> for ImageSource {
    fn from(images: Vec<RgbImage>) -> Self {
        Self::Images(images)
    }
}

/// Loads or adapts the images named by `source`.
///
/// An empty `image_dir` falls back to the context directory. In-memory
/// images are only resampled.
pub fn resolve_images(
    data: Option<&DataTable>,
    source: &ImageSource,
    image_dir: &str,
    size: Option<ImageSize>,
    n_jobs: i32,
) -> MosaicResult<Vec<RgbImage>> {
    if let ImageSource::Images(images) = source {
        return resize_images(images.clone(), size, n_jobs);
    }

    let image_dir = if image_dir.is_empty() {
        context::get_image_dir()
    } else {
        image_dir.to_owned()
    };
    let files = resolve_image_files(data, source)?;
    load_images(&files, &image_dir, size, n_jobs)
}

/// File names referenced by `source`, before joining the image directory.
pub fn resolve_image_files(
    data: Option<&DataTable>,
    source: &ImageSource,
) -> MosaicResult<Vec<String>> {
    match source {
        ImageSource::Files(files) => Ok(files.clone()),
        ImageSource::Column(column) => column_files(data, column),
        ImageSource::Context => {
            if let Some(files) = context::get_image_files() {
                return Ok(files);
            }
            let column = context::get_image_col().ok_or_else(|| {
                MosaicError::InvalidData(
                    "no image source given and no image column in the data context".to_owned(),
                )
            })?;
            column_files(data, &column)
        }
        ImageSource::Images(_) => Err(MosaicError::InvalidData(
            "in-memory images have no file names".to_owned(),
        )),
    }
}

fn column_files(data: Option<&DataTable>, column: &str) -> MosaicResult<Vec<String>> {
    let table = data.ok_or_else(|| MosaicError::UnknownColumn(column.to_owned()))?;
    Ok(table.text_column(column)?.to_vec())
}
