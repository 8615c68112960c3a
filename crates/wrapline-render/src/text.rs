// crates/wrapline-render/src/text.rs
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use unicode_width::UnicodeWidthStr;
use wrapline_core::{MeasureError, TextAlign, TextMetricsProducer, TextSize};

/// Fixed-advance text measurement.
///
/// Every display cell (as reported by `unicode-width`) is `char_width` wide,
/// so wide CJK characters count twice. Useful for terminals and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    char_width: f32,
    line_height: f32,
}

impl MonospaceMeasurer {
    /// Approximate ratio of char width to font size
    const AVERAGE_CHAR_WIDTH: f32 = 0.6;
    const LINE_HEIGHT_MULTIPLIER: f32 = 1.2;

    pub fn new(font_size: f32) -> Self {
        Self {
            char_width: font_size * Self::AVERAGE_CHAR_WIDTH,
            line_height: font_size * Self::LINE_HEIGHT_MULTIPLIER,
        }
    }

    /// One unit per cell and per line, e.g. for character grids.
    pub fn cells() -> Self {
        Self {
            char_width: 1.0,
            line_height: 1.0,
        }
    }

    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl TextMetricsProducer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        let mut widest = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            widest = widest.max(line.width());
            lines += 1;
        }

        Ok(TextSize::new(
            widest as f32 * self.char_width,
            lines as f32 * self.line_height,
        ))
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        Ok(self.line_height)
    }
}

/// Memoizes another measurer by string.
///
/// The wrapper measures many overlapping prefixes; shaping backends benefit
/// from not redoing that work across layout passes. Failures are not cached.
/// The cache is behind a mutex, so a shared `CachedMeasurer` can serve
/// concurrent layouts when the inner measurer is `Sync`.
pub struct CachedMeasurer<M> {
    inner: M,
    cache: Mutex<HashMap<String, TextSize>>,
    natural_line_height: Mutex<Option<f32>>,
}

impl<M: TextMetricsProducer> CachedMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            natural_line_height: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop all cached sizes, e.g. after the active font changed.
    pub fn clear_cache(&self) {
        self.entries().clear();
        *self
            .natural_line_height
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, TextSize>> {
        // a panic mid-insert cannot leave a half-written entry behind
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M: TextMetricsProducer> TextMetricsProducer for CachedMeasurer<M> {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        if let Some(size) = self.entries().get(text) {
            return Ok(*size);
        }
        // measured without holding the lock
        let size = self.inner.measure(text)?;
        self.entries().insert(text.to_string(), size);
        Ok(size)
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        let mut cached = self
            .natural_line_height
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(height) = *cached {
            return Ok(height);
        }
        let height = self.inner.natural_line_height()?;
        *cached = Some(height);
        Ok(height)
    }
}

/// Horizontal offset of a line of `text_width` inside `container_width`.
///
/// Lines wider than the container are anchored at the start.
pub fn align_text_position(text_width: f32, container_width: f32, alignment: TextAlign) -> f32 {
    let free = (container_width - text_width).max(0.0);
    match alignment {
        TextAlign::Left => 0.0,
        TextAlign::Center => free * 0.5,
        TextAlign::Right => free,
        TextAlign::Justify => 0.0, // Justify spreads words, the line itself starts at 0
    }
}

/// Extra space to insert at each inter-word gap so `text_width` fills
/// `container_width`. Zero when there are no gaps or no room.
pub fn justify_gap(text_width: f32, container_width: f32, gaps: usize) -> f32 {
    if gaps == 0 {
        return 0.0;
    }
    (container_width - text_width).max(0.0) / gaps as f32
}
