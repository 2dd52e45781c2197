use image::{Rgb, RgbImage};

use crate::error::{MosaicError, MosaicResult};
use crate::features::hsv::{hsv_to_rgb, rgb_to_hsv};

const PALETTE_HUE_OFFSET: f64 = 0.01;
const PALETTE_LIGHTNESS: f64 = 0.6;
const PALETTE_SATURATION: f64 = 0.65;

/// Tints `image` towards `tint`.
///
/// Every pixel takes the tint's hue and `alpha` times its saturation while
/// keeping its own value, so shading survives the recolouring.
pub fn color_image(image: &RgbImage, tint: [u8; 3], alpha: f64) -> MosaicResult<RgbImage> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(MosaicError::InvalidData(
            "tint alpha must be finite and in [0, 1]".to_owned(),
        ));
    }

    let [tint_hue, tint_saturation, _] = rgb_to_hsv(tint);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [_, _, value] = rgb_to_hsv(pixel.0);
        *pixel = Rgb(hsv_to_rgb([tint_hue, tint_saturation * alpha, value]));
    }
    Ok(out)
}

/// `n` colours with evenly spaced hues at fixed lightness and saturation.
#[must_use]
pub fn hue_palette(n: usize) -> Vec<[u8; 3]> {
    (0..n)
        .map(|i| {
            let hue = (i as f64 / n as f64 + PALETTE_HUE_OFFSET).rem_euclid(1.0);
            hls_to_rgb(hue, PALETTE_LIGHTNESS, PALETTE_SATURATION)
        })
        .collect()
}

fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> [u8; 3] {
    if saturation == 0.0 {
        let gray = to_channel(lightness);
        return [gray, gray, gray];
    }

    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;

    [
        to_channel(hls_component(m1, m2, hue + 1.0 / 3.0)),
        to_channel(hls_component(m1, m2, hue)),
        to_channel(hls_component(m1, m2, hue - 1.0 / 3.0)),
    ]
}

fn hls_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::{color_image, hue_palette};
    use crate::features::hsv::rgb_to_hsv;

    #[test]
    fn tint_keeps_value_channel() {
        let image = RgbImage::from_pixel(1, 1, Rgb([100, 100, 100]));
        let tinted = color_image(&image, [255, 0, 0], 1.0).expect("tint");
        let pixel = tinted.get_pixel(0, 0).0;
        assert_eq!(pixel[0], 100);
        let hsv = rgb_to_hsv(pixel);
        assert!(hsv[0].abs() <= 1e-9);
        assert!((hsv[1] - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn zero_alpha_desaturates() {
        let image = RgbImage::from_pixel(1, 1, Rgb([10, 200, 30]));
        let tinted = color_image(&image, [0, 0, 255], 0.0).expect("tint");
        let pixel = tinted.get_pixel(0, 0).0;
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn palette_colors_are_distinct() {
        let palette = hue_palette(5);
        assert_eq!(palette.len(), 5);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(hue_palette(0).is_empty());
    }

    #[test]
    fn invalid_alpha_is_rejected() {
        let image = RgbImage::new(1, 1);
        assert!(color_image(&image, [0, 0, 0], 1.5).is_err());
    }
}
