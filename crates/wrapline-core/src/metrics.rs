// crates/wrapline-core/src/metrics.rs
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::MeasureError;

/// Measured bounding box of a string or a block of lines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

impl TextSize {
    pub const ZERO: TextSize = TextSize {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<TextSize> for Vec2 {
    fn from(size: TextSize) -> Self {
        size.to_vec2()
    }
}

impl From<Vec2> for TextSize {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Measures rendered text under the currently active font and style.
///
/// `measure` must behave as a pure function of its input for the duration of
/// a layout pass. The wrapper calls it once per candidate substring, so
/// expensive implementations should cache (see `CachedMeasurer` in the render
/// crate).
pub trait TextMetricsProducer {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError>;

    /// Font-intrinsic line advance, independent of any line spacing.
    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        self.measure("M").map(|size| size.height)
    }
}

impl<T: TextMetricsProducer + ?Sized> TextMetricsProducer for &T {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        (**self).measure(text)
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        (**self).natural_line_height()
    }
}

impl<T: TextMetricsProducer + ?Sized> TextMetricsProducer for Box<T> {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        (**self).measure(text)
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        (**self).natural_line_height()
    }
}

impl<T: TextMetricsProducer + ?Sized> TextMetricsProducer for Rc<T> {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        (**self).measure(text)
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        (**self).natural_line_height()
    }
}

impl<T: TextMetricsProducer + ?Sized> TextMetricsProducer for Arc<T> {
    fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
        (**self).measure(text)
    }

    fn natural_line_height(&self) -> Result<f32, MeasureError> {
        (**self).natural_line_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl TextMetricsProducer for Fixed {
        fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
            Ok(TextSize::new(text.len() as f32, 12.0))
        }
    }

    #[test]
    fn test_default_natural_line_height() {
        assert_eq!(Fixed.natural_line_height(), Ok(12.0));
    }

    #[test]
    fn test_smart_pointer_impls_forward() {
        let boxed: Box<dyn TextMetricsProducer> = Box::new(Fixed);
        let shared = Arc::new(Fixed);

        assert_eq!(boxed.measure("abc").map(|s| s.width), Ok(3.0));
        assert_eq!(shared.measure("ab").map(|s| s.width), Ok(2.0));
    }

    #[test]
    fn test_size_vec2_conversion() {
        let size = TextSize::new(3.0, 4.0);
        assert_eq!(Vec2::from(size), Vec2::new(3.0, 4.0));
        assert_eq!(TextSize::from(Vec2::new(3.0, 4.0)), size);
    }
}
