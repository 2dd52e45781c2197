use std::ops::Range;

use crate::core::{ImageSize, TileOffset};
use crate::error::{MosaicError, MosaicResult};

/// Splits `len` items into consecutive rows of at most `per_row` items.
pub fn split_rows(len: usize, per_row: usize) -> MosaicResult<Vec<Range<usize>>> {
    if per_row == 0 {
        return Err(MosaicError::InvalidData(
            "images per bar row must be > 0".to_owned(),
        ));
    }

    Ok((0..len)
        .step_by(per_row)
        .map(|start| start..(start + per_row).min(len))
        .collect())
}

/// Pixel geometry for an image bar plot.
///
/// Groups are stacked bottom-up in the given order. Inside a group each row of
/// at most `per_row` tiles sits above the previous one, one tile of margin is
/// kept on the left, and consecutive groups are separated by one tile height.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    canvas: ImageSize,
    placements: Vec<Vec<TileOffset>>,
    ticks: Vec<f64>,
}

impl BarLayout {
    pub fn new(group_sizes: &[usize], tile: ImageSize, per_row: usize) -> MosaicResult<Self> {
        if !tile.is_valid() {
            return Err(MosaicError::InvalidData(format!(
                "tile size must be > 0, got {tile}"
            )));
        }
        if group_sizes.iter().sum::<usize>() == 0 {
            return Err(MosaicError::NoImages);
        }

        let w = u64::from(tile.width);
        let h = u64::from(tile.height);

        // (left, bottom) in a y-up frame; flipped once the height is known
        let mut raw: Vec<Vec<(u64, u64)>> = Vec::with_capacity(group_sizes.len());
        let mut centers = Vec::with_capacity(group_sizes.len());
        let mut cursor = 0u64;
        let mut max_right = 0u64;

        for (group_index, &size) in group_sizes.iter().enumerate() {
            let group_start = cursor;
            let mut group = Vec::with_capacity(size);
            for row in split_rows(size, per_row)? {
                for column in 0..row.len() as u64 {
                    let left = w * (column + 1);
                    max_right = max_right.max(left + w);
                    group.push((left, cursor));
                }
                cursor += h;
            }
            centers.push((group_start + cursor) as f64 / 2.0);
            raw.push(group);

            if group_index + 1 < group_sizes.len() {
                cursor += h;
            }
        }

        let height = cursor;
        let width = (max_right as f64 * 1.1).ceil() as u64;
        let canvas = ImageSize::new(to_px(width)?, to_px(height)?);

        let placements = raw
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|(left, bottom)| {
                        Ok(TileOffset::new(to_px(left)?, to_px(height - bottom - h)?))
                    })
                    .collect::<MosaicResult<Vec<_>>>()
            })
            .collect::<MosaicResult<Vec<_>>>()?;
        let ticks = centers
            .into_iter()
            .map(|center| height as f64 - center)
            .collect();

        Ok(Self {
            canvas,
            placements,
            ticks,
        })
    }

    #[must_use]
    pub fn canvas_size(&self) -> ImageSize {
        self.canvas
    }

    /// Tile offsets per group, in the order images were supplied.
    #[must_use]
    pub fn placements(&self) -> &[Vec<TileOffset>] {
        &self.placements
    }

    /// Vertical centre of each group in canvas pixels from the top.
    #[must_use]
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

fn to_px(value: u64) -> MosaicResult<u32> {
    u32::try_from(value)
        .map_err(|_| MosaicError::InvalidData(format!("bar plot extent {value} overflows")))
}
