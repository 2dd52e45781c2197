mod barplot;
mod distance_grid;
mod grid;
mod histogram;
mod hue;
mod mosaic;
mod plotter;
mod plotter_config;
mod scatter;
mod sort_key;
mod sprites;

pub use barplot::{BarPlotOptions, DEFAULT_IMAGES_PER_ROW, images_to_barplot};
pub use distance_grid::{DistanceGridOptions, images_to_distance_grid};
pub use grid::{DEFAULT_GRID_IMAGE_SIZE, GridOptions, images_to_grid};
pub use histogram::{HistogramOptions, images_to_histogram};
pub use hue::DEFAULT_HUE_ALPHA;
pub use mosaic::{MosaicOptions, images_to_mosaic};
pub use plotter::Plotter;
pub use plotter_config::{PLOTTER_CONFIG_JSON_SCHEMA_V1, PlotterConfig};
pub use scatter::{
    DEFAULT_SCATTER_ALPHA, DEFAULT_SCATTER_CANVAS, DEFAULT_SCATTER_IMAGE_SIZE, ScatterOptions,
    images_to_scatter,
};
pub use sort_key::SortKey;
pub use sprites::{SpriteOptions, images_to_sprite};
