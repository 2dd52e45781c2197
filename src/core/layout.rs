use crate::core::{ImageSize, TileOffset};
use crate::error::{MosaicError, MosaicResult};

/// Side length of the smallest square table holding `n_samples` tiles.
pub fn table_size(n_samples: usize) -> MosaicResult<u32> {
    if n_samples == 0 {
        return Err(MosaicError::NoImages);
    }

    let mut side = (n_samples as f64).sqrt().ceil() as usize;
    // guard against float rounding for large perfect squares
    while side * side < n_samples {
        side += 1;
    }
    while side > 1 && (side - 1) * (side - 1) >= n_samples {
        side -= 1;
    }

    u32::try_from(side)
        .map_err(|_| MosaicError::InvalidData(format!("too many tiles: {n_samples}")))
}

/// Square tiling of equally sized images, filled left-to-right, top-to-bottom.
///
/// Cells past `n_samples` stay empty and keep the canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    n_samples: usize,
    table: u32,
    tile: ImageSize,
    padding: u32,
    canvas: ImageSize,
}

impl GridLayout {
    pub fn new(n_samples: usize, tile: ImageSize, padding: u32) -> MosaicResult<Self> {
        if !tile.is_valid() {
            return Err(MosaicError::InvalidData(format!(
                "tile size must be > 0, got {tile}"
            )));
        }

        let table = table_size(n_samples)?;
        let gaps = u64::from(table - 1) * u64::from(padding);
        let canvas = ImageSize::new(
            to_px(u64::from(table) * u64::from(tile.width) + gaps)?,
            to_px(u64::from(table) * u64::from(tile.height) + gaps)?,
        );

        Ok(Self {
            n_samples,
            table,
            tile,
            padding,
            canvas,
        })
    }

    #[must_use]
    pub fn table_size(self) -> u32 {
        self.table
    }

    #[must_use]
    pub fn tile(self) -> ImageSize {
        self.tile
    }

    #[must_use]
    pub fn n_samples(self) -> usize {
        self.n_samples
    }

    #[must_use]
    pub fn canvas_size(self) -> ImageSize {
        self.canvas
    }

    /// Offset of the `index`-th tile. Indices past the table are rejected.
    pub fn placement(self, index: usize) -> MosaicResult<TileOffset> {
        let capacity = (self.table as usize) * (self.table as usize);
        if index >= capacity {
            return Err(MosaicError::InvalidData(format!(
                "tile index {index} outside {0}x{0} table",
                self.table
            )));
        }

        Ok(self.offset(index))
    }

    pub fn placements(self) -> impl Iterator<Item = TileOffset> {
        (0..self.n_samples).map(move |index| self.offset(index))
    }

    // every in-table offset is below the canvas extent checked in `new`
    fn offset(self, index: usize) -> TileOffset {
        let table = self.table as usize;
        let row = (index / table) as u64;
        let column = (index % table) as u64;
        let step_x = u64::from(self.tile.width) + u64::from(self.padding);
        let step_y = u64::from(self.tile.height) + u64::from(self.padding);
        TileOffset::new((column * step_x) as u32, (row * step_y) as u32)
    }
}

fn to_px(value: u64) -> MosaicResult<u32> {
    u32::try_from(value)
        .map_err(|_| MosaicError::InvalidData(format!("grid extent {value} overflows")))
}

#[cfg(test)]
mod tests {
    use super::{GridLayout, table_size};
    use crate::core::{ImageSize, TileOffset};

    #[test]
    fn table_size_rounds_up_to_square() {
        assert_eq!(table_size(1).expect("one"), 1);
        assert_eq!(table_size(4).expect("four"), 2);
        assert_eq!(table_size(5).expect("five"), 3);
        assert_eq!(table_size(9).expect("nine"), 3);
        assert_eq!(table_size(10).expect("ten"), 4);
    }

    #[test]
    fn table_size_rejects_zero() {
        assert!(table_size(0).is_err());
    }

    #[test]
    fn padded_canvas_counts_inner_gaps_only() {
        let layout = GridLayout::new(5, ImageSize::new(10, 8), 2).expect("layout");
        assert_eq!(layout.canvas_size(), ImageSize::new(3 * 10 + 2 * 2, 3 * 8 + 2 * 2));
        assert_eq!(layout.placement(4).expect("center"), TileOffset::new(12, 10));
    }

    #[test]
    fn placements_follow_row_major_order() {
        let layout = GridLayout::new(3, ImageSize::square(4), 0).expect("layout");
        let offsets: Vec<_> = layout.placements().collect();
        assert_eq!(
            offsets,
            vec![TileOffset::new(0, 0), TileOffset::new(4, 0), TileOffset::new(0, 4)]
        );
    }

    #[test]
    fn oversized_padding_is_rejected() {
        assert!(GridLayout::new(4, ImageSize::square(2), u32::MAX).is_err());
        // a single tile has no gaps, so padding never enters the extent
        let single = GridLayout::new(1, ImageSize::square(2), u32::MAX).expect("single tile");
        assert_eq!(single.canvas_size(), ImageSize::square(2));
        assert_eq!(single.placement(0).expect("origin"), TileOffset::new(0, 0));
    }
}
