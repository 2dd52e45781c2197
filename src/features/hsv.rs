use std::fmt;
use std::str::FromStr;

use image::RgbImage;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MosaicError, MosaicResult};
use crate::workers::map_indexed;

/// Per-image colour statistic usable as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HsvFeature {
    #[serde(rename = "__hue__")]
    Hue,
    #[serde(rename = "__saturation__")]
    Saturation,
    #[serde(rename = "__value__")]
    Value,
}

impl HsvFeature {
    pub const ALL: [Self; 3] = [Self::Hue, Self::Saturation, Self::Value];

    /// Canonical name, distinct from any ordinary data column name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hue => "__hue__",
            Self::Saturation => "__saturation__",
            Self::Value => "__value__",
        }
    }

    /// Position of this feature in an `[h, s, v]` triple.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hue => 0,
            Self::Saturation => 1,
            Self::Value => 2,
        }
    }

    #[must_use]
    pub fn is_feature_name(name: &str) -> bool {
        Self::ALL.iter().any(|feature| feature.name() == name)
    }
}

impl fmt::Display for HsvFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HsvFeature {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| MosaicError::UnknownFeature(s.to_owned()))
    }
}

/// Aggregate applied to each HSV channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HsvStatistic {
    #[default]
    Mean,
    Median,
}

/// Background colour masked out of the statistics, in HSV space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Background {
    White,
    Black,
    Custom([f64; 3]),
}

impl Background {
    #[must_use]
    pub fn hsv(self) -> [f64; 3] {
        match self {
            Self::White => [0.0, 0.0, 1.0],
            Self::Black => [0.0, 0.0, 0.0],
            Self::Custom(hsv) => hsv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HsvOptions {
    #[serde(default)]
    pub statistic: HsvStatistic,
    #[serde(default)]
    pub background: Option<Background>,
}

impl HsvOptions {
    #[must_use]
    pub fn with_statistic(mut self, statistic: HsvStatistic) -> Self {
        self.statistic = statistic;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }
}

/// Converts one 8-bit RGB pixel to HSV with every component in `[0, 1]`.
///
/// Hue is 0 for achromatic pixels and saturation is 0 for black.
#[must_use]
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [f64; 3] {
    let r = f64::from(rgb[0]) / 255.0;
    let g = f64::from(rgb[1]) / 255.0;
    let b = f64::from(rgb[2]) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max };
    let hue = if delta == 0.0 {
        0.0
    } else {
        let sector = if max == r {
            (g - b) / delta
        } else if max == g {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };
        (sector / 6.0).rem_euclid(1.0)
    };

    [hue, saturation, max]
}

/// Inverse of [`rgb_to_hsv`]; components are clamped into `[0, 1]`.
#[must_use]
pub fn hsv_to_rgb(hsv: [f64; 3]) -> [u8; 3] {
    let h = hsv[0].rem_euclid(1.0) * 6.0;
    let s = hsv[1].clamp(0.0, 1.0);
    let v = hsv[2].clamp(0.0, 1.0);

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `[h, s, v]` statistics of a single image.
#[must_use]
pub fn hsv_stats(image: &RgbImage, options: HsvOptions) -> [f64; 3] {
    let mut channels: [Vec<f64>; 3] = Default::default();
    for pixel in image.pixels() {
        let hsv = rgb_to_hsv(pixel.0);
        for (channel, value) in channels.iter_mut().zip(hsv) {
            channel.push(value);
        }
    }

    let background = options.background.map(Background::hsv);
    let mut out = [0.0; 3];
    for (index, channel) in channels.iter_mut().enumerate() {
        if let Some(background) = background {
            let masked = background[index];
            channel.retain(|value| *value != masked);
            if channel.is_empty() {
                out[index] = masked;
                continue;
            }
        }
        out[index] = aggregate(channel, options.statistic);
    }
    out
}

fn aggregate(values: &mut [f64], statistic: HsvStatistic) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    match statistic {
        HsvStatistic::Mean => values.iter().sum::<f64>() / values.len() as f64,
        HsvStatistic::Median => {
            values.sort_unstable_by_key(|value| OrderedFloat(*value));
            let mid = values.len() / 2;
            if values.len() % 2 == 0 {
                (values[mid - 1] + values[mid]) / 2.0
            } else {
                values[mid]
            }
        }
    }
}

/// HSV statistics for every image, computed on the worker pool.
pub fn extract_hsv_stats(
    images: &[RgbImage],
    options: HsvOptions,
    n_jobs: i32,
) -> MosaicResult<Vec<[f64; 3]>> {
    debug!(
        images = images.len(),
        statistic = ?options.statistic,
        "extracting hsv statistics"
    );
    map_indexed(images, n_jobs, |_, image| Ok(hsv_stats(image, options)))
}

/// One HSV feature column for every image.
pub fn extract_hsv_feature(
    images: &[RgbImage],
    feature: HsvFeature,
    n_jobs: i32,
) -> MosaicResult<Vec<f64>> {
    Ok(extract_hsv_stats(images, HsvOptions::default(), n_jobs)?
        .into_iter()
        .map(|stats| stats[feature.index()])
        .collect())
}
