pub mod assignment;
pub mod bars;
pub mod binning;
pub mod layout;
pub mod ordering;
pub mod scale;
pub mod scatter;
pub mod types;

pub use assignment::{assign_nearest_available, unit_grid_points};
pub use bars::{BarLayout, split_rows};
pub use binning::{BinSpec, Histogram, MAX_BINS};
pub use layout::{GridLayout, table_size};
pub use ordering::{apply_order, argsort, argsort_descending};
pub use scale::{UnitScale, minmax_scale};
pub use scatter::{ScatterLayout, declutter};
pub use types::{ImageSize, TileOffset};
