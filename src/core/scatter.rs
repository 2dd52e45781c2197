use crate::core::{ImageSize, TileOffset, UnitScale};
use crate::error::{MosaicError, MosaicResult};

/// Indices of points kept after decluttering, in input order.
///
/// Points live on the unit square. The shown set starts with the sentinel
/// corner `(1, 1)`; a point whose squared distance to any shown point is below
/// `threshold` is skipped, otherwise it joins the shown set.
#[must_use]
pub fn declutter(points: &[[f64; 2]], threshold: Option<f64>) -> Vec<usize> {
    let Some(threshold) = threshold.filter(|t| *t > 0.0) else {
        return (0..points.len()).collect();
    };

    let mut shown: Vec<[f64; 2]> = vec![[1.0, 1.0]];
    let mut kept = Vec::new();
    for (index, point) in points.iter().enumerate() {
        let nearest = shown
            .iter()
            .map(|other| {
                let dx = point[0] - other[0];
                let dy = point[1] - other[1];
                dx * dx + dy * dy
            })
            .fold(f64::INFINITY, f64::min);
        if nearest < threshold {
            continue;
        }
        shown.push(*point);
        kept.push(index);
    }
    kept
}

/// Maps unit-square points to tile offsets on a scatter canvas.
///
/// The y axis points up and tiles are inset by half their size so every
/// image stays fully inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterLayout {
    canvas: ImageSize,
    tile: ImageSize,
    x_scale: UnitScale,
    y_scale: UnitScale,
}

impl ScatterLayout {
    pub fn new(canvas: ImageSize, tile: ImageSize) -> MosaicResult<Self> {
        if !canvas.is_valid() || !tile.is_valid() {
            return Err(MosaicError::InvalidData(
                "scatter canvas and tile sizes must be > 0".to_owned(),
            ));
        }
        if tile.width > canvas.width || tile.height > canvas.height {
            return Err(MosaicError::InvalidData(format!(
                "scatter tile {tile} does not fit canvas {canvas}"
            )));
        }

        Ok(Self {
            canvas,
            tile,
            x_scale: UnitScale::new(0.0, f64::from(canvas.width - tile.width))?,
            y_scale: UnitScale::new(0.0, f64::from(canvas.height - tile.height))?,
        })
    }

    #[must_use]
    pub fn canvas_size(self) -> ImageSize {
        self.canvas
    }

    #[must_use]
    pub fn tile(self) -> ImageSize {
        self.tile
    }

    #[must_use]
    pub fn placement(self, point: [f64; 2]) -> TileOffset {
        let x = self.x_scale.to_pixel(point[0].clamp(0.0, 1.0)).round();
        let y = self.y_scale.to_pixel(1.0 - point[1].clamp(0.0, 1.0)).round();
        TileOffset::new(x as u32, y as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::{ScatterLayout, declutter};
    use crate::core::{ImageSize, TileOffset};

    #[test]
    fn declutter_without_threshold_keeps_everything() {
        assert_eq!(declutter(&[[1.0, 1.0], [0.0, 0.0]], None), vec![0, 1]);
    }

    #[test]
    fn declutter_drops_points_near_shown_ones_and_sentinel() {
        let points = [[0.0, 0.0], [0.05, 0.0], [0.98, 0.98], [0.5, 0.5]];
        assert_eq!(declutter(&points, Some(0.01)), vec![0, 3]);
    }

    #[test]
    fn origin_maps_to_bottom_left() {
        let layout = ScatterLayout::new(ImageSize::new(100, 50), ImageSize::square(10))
            .expect("layout");
        assert_eq!(layout.placement([0.0, 0.0]), TileOffset::new(0, 40));
        assert_eq!(layout.placement([1.0, 1.0]), TileOffset::new(90, 0));
        assert_eq!(layout.placement([0.5, 0.5]), TileOffset::new(45, 20));
    }
}
