use crate::core::ImageSize;
use crate::error::MosaicResult;
use crate::render::{PlotFrame, Renderer};

/// No-op renderer used by tests and headless pipelines.
///
/// It still validates frame content so tests catch broken geometry without a
/// real surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_size: Option<ImageSize>,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &PlotFrame) -> MosaicResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_size = Some(frame.size());
        self.last_tick_count = frame.y_ticks.len();
        Ok(())
    }
}
