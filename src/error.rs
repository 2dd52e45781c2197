use std::path::PathBuf;

use thiserror::Error;

use crate::core::ImageSize;

pub type MosaicResult<T> = Result<T, MosaicError>;

#[derive(Debug, Error)]
pub enum MosaicError {
    #[error("cannot build a canvas from zero images")]
    NoImages,

    #[error(
        "image {index} is {actual} but the canvas tiles are {expected}; \
         set `image_size` to force even sizes"
    )]
    MismatchedImageSize {
        index: usize,
        expected: ImageSize,
        actual: ImageSize,
    },

    #[error("unknown sort key `{0}`")]
    UnknownSortKey(String),

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error("unknown feature `{0}`")]
    UnknownFeature(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {}: {source}", path.display())]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("worker pool error: {0}")]
    ThreadPool(String),
}
