#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Temporary image directory for integration tests.
pub struct ImageFixture {
    pub dir: TempDir,
}

impl ImageFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn dir_string(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Writes a solid-colour PNG and returns its file name.
    pub fn write_png(&self, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> String {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        solid(width, height, rgb)
            .save(&path)
            .expect("Failed to write png");
        name.to_owned()
    }

    /// Writes one grey PNG per shade, named `img_<index>.png`.
    pub fn write_grey_series(&self, shades: &[u8], side: u32) -> Vec<String> {
        shades
            .iter()
            .enumerate()
            .map(|(index, &shade)| {
                self.write_png(&format!("img_{index}.png"), side, side, [shade; 3])
            })
            .collect()
    }

    pub fn write_file(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).expect("Failed to write file");
    }
}

pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

pub fn grey_images(shades: &[u8], side: u32) -> Vec<RgbImage> {
    shades.iter().map(|&shade| solid(side, side, [shade; 3])).collect()
}
