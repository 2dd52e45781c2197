use image::RgbImage;
use tracing::debug;

use crate::data::Categorical;
use crate::error::{MosaicError, MosaicResult};
use crate::features::{color_image, hue_palette};
use crate::workers::map_indexed;

/// Tint strength used when images are coloured by a hue variable.
pub const DEFAULT_HUE_ALPHA: f64 = 0.6;

/// Tints each image with the palette colour of its category level.
pub(crate) fn tint_by_category(
    images: &[RgbImage],
    labels: &Categorical,
    alpha: f64,
    n_jobs: i32,
) -> MosaicResult<Vec<RgbImage>> {
    if labels.len() != images.len() {
        return Err(MosaicError::InvalidData(format!(
            "hue has {} values for {} images",
            labels.len(),
            images.len()
        )));
    }

    let palette = hue_palette(labels.levels.len());
    debug!(levels = palette.len(), images = images.len(), "tinting images by hue");
    map_indexed(images, n_jobs, |index, image| {
        color_image(image, palette[labels.codes[index]], alpha)
    })
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::tint_by_category;
    use crate::data::Category;

    #[test]
    fn same_level_gets_same_tint() {
        let images = vec![RgbImage::from_pixel(1, 1, Rgb([200, 200, 200])); 3];
        let labels = Category::from(vec!["b".to_owned(), "a".to_owned(), "b".to_owned()])
            .resolve(None)
            .expect("labels");
        let tinted = tint_by_category(&images, &labels, 0.6, 1).expect("tint");
        assert_eq!(tinted[0], tinted[2]);
        assert_ne!(tinted[0], tinted[1]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let images = vec![RgbImage::new(1, 1)];
        let labels = Category::from(Vec::<String>::new()).resolve(None).expect("labels");
        assert!(tint_by_category(&images, &labels, 0.6, 1).is_err());
    }
}
