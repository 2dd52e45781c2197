//! mosaic-rs: image mosaics and image-based plots for tabular datasets.
//!
//! Images are loaded from a directory or a data column, optionally ordered by
//! an HSV statistic or a data variable, and tiled into composite canvases
//! that are handed to a pluggable `Renderer`.

pub mod api;
pub mod context;
pub mod core;
pub mod data;
pub mod error;
pub mod features;
pub mod io;
pub mod render;
pub mod telemetry;
pub mod workers;

pub use api::{Plotter, PlotterConfig, SortKey};
pub use error::{MosaicError, MosaicResult};
