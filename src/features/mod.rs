pub mod color;
pub mod hsv;

pub use color::{color_image, hue_palette};
pub use hsv::{
    Background, HsvFeature, HsvOptions, HsvStatistic, extract_hsv_feature, extract_hsv_stats,
    hsv_stats, hsv_to_rgb, rgb_to_hsv,
};
