//! Text measurement backed by cosmic-text shaping

use std::sync::{Mutex, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use wrapline_core::{MeasureError, TextMetricsProducer, TextSize};

/// Measures strings by shaping them with a cosmic-text [`FontSystem`].
///
/// Shaping needs mutable access to the font system, so it sits behind a
/// mutex. Wrap this in a `CachedMeasurer` for repeated layouts.
pub struct CosmicMeasurer {
    font_system: Mutex<FontSystem>,
    metrics: Metrics,
    family: Option<String>,
}

impl CosmicMeasurer {
    /// Uses the system fonts at `font_size` with a 1.2 line height.
    pub fn new(font_size: f32) -> Self {
        Self::with_font_system(FontSystem::new(), font_size, font_size * 1.2)
    }

    pub fn with_font_system(font_system: FontSystem, font_size: f32, line_height: f32) -> Self {
        Self {
            font_system: Mutex::new(font_system),
            metrics: Metrics::new(font_size, line_height),
            family: None,
        }
    }

    /// Measure with a named family instead of the default sans-serif.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }
}

impl TextMetricsProducer for CosmicMeasurer {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        let mut guard = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let font_system = &mut *guard;

        let attrs = match &self.family {
            Some(name) => Attrs::new().family(Family::Name(name.as_str())),
            None => Attrs::new().family(Family::SansSerif),
        };

        let mut buffer = Buffer::new(font_system, self.metrics);
        buffer.set_size(font_system, None, None);
        buffer.set_text(font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);

        let mut width = 0.0_f32;
        let mut lines = 0usize;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            lines += 1;
        }

        if !text.trim().is_empty() && width == 0.0 {
            return Err(MeasureError::FontUnavailable(
                self.family.clone().unwrap_or_else(|| "sans-serif".to_string()),
            ));
        }

        Ok(TextSize::new(
            width,
            lines.max(1) as f32 * self.metrics.line_height,
        ))
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        Ok(self.metrics.line_height)
    }
}
