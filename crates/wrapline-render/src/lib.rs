// crates/wrapline-render/src/lib.rs

use glam::Vec2;
use wrapline_core::{MeasureError, TextAlign};
use wrapline_layout::WrapError;

pub mod block;
#[cfg(feature = "cosmic-text")]
pub mod cosmic;
pub mod surface;
pub mod text;

pub use block::*;
#[cfg(feature = "cosmic-text")]
pub use cosmic::CosmicMeasurer;
pub use surface::*;
pub use text::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render operation failed: {0}")]
    RenderFailed(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Measurement failed during render: {0}")]
    Measurement(#[from] MeasureError),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Wrap(#[from] WrapError),
    #[error(transparent)]
    Measure(#[from] MeasureError),
}

/// High-level text drawing commands
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    DrawString {
        position: Vec2,
        text: String,
        max_width: f32,
        alignment: TextAlign,
    },
    DrawStringLines {
        position: Vec2,
        size: Vec2,
        lines: Vec<String>,
        line_advance: f32,
        alignment: TextAlign,
    },
}

/// Render capability the text block paints through.
pub trait PaintSurface {
    /// Draw a single string with its origin at `position`, aligned within
    /// `max_width`.
    fn draw_string(
        &mut self,
        text: &str,
        position: Vec2,
        max_width: f32,
        alignment: TextAlign,
    ) -> RenderResult<()>;

    /// Draw pre-wrapped lines, advancing `line_advance` down per line.
    fn draw_string_lines(
        &mut self,
        lines: &[String],
        position: Vec2,
        size: Vec2,
        line_advance: f32,
        alignment: TextAlign,
    ) -> RenderResult<()> {
        for (i, line) in lines.iter().enumerate() {
            let origin = position + Vec2::new(0.0, i as f32 * line_advance);
            self.draw_string(line, origin, size.x, alignment)?;
        }
        Ok(())
    }
}
