use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{apply_order, argsort, argsort_descending};
use crate::data::{Category, Column, DataTable};
use crate::error::{MosaicError, MosaicResult};
use crate::features::{HsvFeature, extract_hsv_feature};

/// What images are ordered by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SortKey {
    /// Per-image colour statistic computed from the pixels.
    Hsv(HsvFeature),
    /// Data column; text columns sort lexicographically.
    Column(String),
    /// One key per image.
    Values(Vec<f64>),
}

impl SortKey {
    /// Canonical HSV feature names map to [`SortKey::Hsv`], anything else
    /// names a column.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        name.parse::<HsvFeature>()
            .map_or_else(|_| Self::Column(name.to_owned()), Self::Hsv)
    }

    /// Keys that come from data rather than pixels; `None` for HSV keys.
    pub fn data_keys(&self, data: Option<&DataTable>) -> MosaicResult<Option<Vec<f64>>> {
        match self {
            Self::Hsv(_) => Ok(None),
            Self::Values(values) => Ok(Some(values.clone())),
            Self::Column(name) => {
                let table = data.ok_or_else(|| MosaicError::UnknownSortKey(name.clone()))?;
                match table.column(name) {
                    Some(Column::Numeric(values)) => Ok(Some(values.clone())),
                    Some(Column::Text(_)) => Ok(Some(
                        Category::Column(name.clone())
                            .resolve(Some(table))?
                            .codes
                            .into_iter()
                            .map(|code| code as f64)
                            .collect(),
                    )),
                    None => Err(MosaicError::UnknownSortKey(name.clone())),
                }
            }
        }
    }

    /// One numeric key per image.
    pub fn keys(
        &self,
        data: Option<&DataTable>,
        images: &[RgbImage],
        n_jobs: i32,
    ) -> MosaicResult<Vec<f64>> {
        let keys = match (self, self.data_keys(data)?) {
            (_, Some(keys)) => keys,
            (Self::Hsv(feature), None) => extract_hsv_feature(images, *feature, n_jobs)?,
            (_, None) => Vec::new(),
        };

        if keys.len() != images.len() {
            return Err(MosaicError::InvalidData(format!(
                "sort key has {} values for {} images",
                keys.len(),
                images.len()
            )));
        }
        Ok(keys)
    }

    /// Index permutation that orders `images` by this key.
    pub fn order(
        &self,
        data: Option<&DataTable>,
        images: &[RgbImage],
        n_jobs: i32,
        descending: bool,
    ) -> MosaicResult<Vec<usize>> {
        if images.is_empty() {
            warn!("sorting an empty image set");
        }
        let keys = self.keys(data, images, n_jobs)?;
        Ok(if descending {
            argsort_descending(&keys)
        } else {
            argsort(&keys)
        })
    }

    /// Sorts `images` ascending by this key.
    pub fn sort_images(
        &self,
        data: Option<&DataTable>,
        images: Vec<RgbImage>,
        n_jobs: i32,
    ) -> MosaicResult<Vec<RgbImage>> {
        let order = self.order(data, &images, n_jobs, false)?;
        Ok(apply_order(images, &order))
    }
}

impl From<HsvFeature> for SortKey {
    fn from(feature: HsvFeature) -> Self {
        Self::Hsv(feature)
    }
}

impl From<&str> for SortKey {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<Vec<f64>> for SortKey {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values)
    }
}
