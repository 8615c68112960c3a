// crates/wrapline-render/src/block.rs

use glam::Vec2;
use tracing::debug;
use wrapline_core::{ConfigError, PropertySource, TextMetricsProducer, TextSize, TextStyle};
use wrapline_layout::LineWrapper;

use crate::{LayoutError, PaintSurface, RenderResult};

/// Output of one layout pass. Replaced as a whole on re-layout.
#[derive(Debug, Clone, Default, PartialEq)]
struct LayoutState {
    lines: Vec<String>,
    line_advance: f32,
    size: TextSize,
    generation: u64,
}

/// A block of text with its style and the result of its last layout pass.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    text: String,
    style: TextStyle,
    state: LayoutState,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            state: LayoutState::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The previous layout no longer applies and is cleared.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.state = LayoutState {
            generation: self.state.generation,
            ..LayoutState::default()
        };
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut TextStyle {
        &mut self.style
    }

    /// Apply style properties from `source`, see [`TextStyle::resolve_from`].
    pub fn resolve_style<S: PropertySource + ?Sized>(&mut self, source: &S) -> Vec<ConfigError> {
        self.style.resolve_from(source)
    }

    /// Wrapped lines from the last layout. Empty unless word wrap is on.
    pub fn lines(&self) -> &[String] {
        &self.state.lines
    }

    pub fn size(&self) -> TextSize {
        self.state.size
    }

    pub fn line_advance(&self) -> f32 {
        self.state.line_advance
    }

    /// Number of successful layout passes so far.
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    /// Compute lines and size for the available `width`.
    ///
    /// On error the previous layout is left in place.
    pub fn layout<M: TextMetricsProducer + ?Sized>(
        &mut self,
        measurer: &M,
        width: f32,
    ) -> Result<TextSize, LayoutError> {
        let generation = self.state.generation + 1;
        let next = if self.style.word_wrap {
            let wrapped = LineWrapper::new(measurer)
                .with_style(&self.style)
                .wrap(&self.text, width)?;
            LayoutState {
                size: wrapped.size(),
                line_advance: wrapped.line_advance,
                lines: wrapped.lines,
                generation,
            }
        } else {
            let size = measurer.measure(&self.text)?;
            LayoutState {
                lines: Vec::new(),
                line_advance: size.height,
                size,
                generation,
            }
        };

        debug!(
            "Text layout #{}: {} lines, size {:.1}x{:.1} (width {:.1}, wrap={})",
            generation,
            next.lines.len(),
            next.size.width,
            next.size.height,
            width,
            self.style.word_wrap
        );

        self.state = next;
        Ok(self.state.size)
    }

    /// Paint the block at `position` within `size`.
    pub fn render<S: PaintSurface + ?Sized>(
        &self,
        surface: &mut S,
        position: Vec2,
        size: TextSize,
    ) -> RenderResult<()> {
        if self.style.word_wrap {
            surface.draw_string_lines(
                &self.state.lines,
                position,
                size.to_vec2(),
                self.state.line_advance,
                self.style.align,
            )
        } else {
            surface.draw_string(&self.text, position, size.width, self.style.align)
        }
    }

    /// Corners of the area covered by the last layout, placed at `position`.
    pub fn bounding_box(&self, position: Vec2) -> (Vec2, Vec2) {
        (position, position + self.state.size.to_vec2())
    }

    /// Text always has to be repainted together with whatever is behind it.
    pub fn can_rerender(&self) -> bool {
        false
    }
}
