mod canvas;
mod frame;
mod null_renderer;
mod png_renderer;
mod primitives;

pub use canvas::Canvas;
pub use frame::{PlotFrame, PlotKind};
pub use null_renderer::NullRenderer;
pub use png_renderer::PngRenderer;
pub use primitives::{AxisTick, Color};

use crate::error::MosaicResult;

/// Contract implemented by any plotting surface.
///
/// Surfaces receive a fully composed `PlotFrame`, so display code stays
/// isolated from loading, ordering and layout.
pub trait Renderer {
    fn render(&mut self, frame: &PlotFrame) -> MosaicResult<()>;
}
