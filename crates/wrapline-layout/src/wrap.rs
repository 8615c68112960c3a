// crates/wrapline-layout/src/wrap.rs

use tracing::{debug, trace};
use wrapline_core::{MeasureError, TextMetricsProducer, TextSize, TextStyle};

use crate::tokenize::{pairs, tokenize};

/// Result of a successful wrap
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    /// Display lines in order, each trimmed of surrounding whitespace
    pub lines: Vec<String>,
    /// Measured width of the widest (trimmed) line
    pub max_line_width: f32,
    /// Vertical advance used per line
    pub line_advance: f32,
    pub total_height: f32,
}

impl WrappedText {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn size(&self) -> TextSize {
        TextSize::new(self.max_line_width, self.total_height)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WrapError {
    /// Measuring failed part-way through `logical_line`. `partial` holds the
    /// lines of every logical line that completed before it.
    #[error("Measurement failed on logical line {logical_line}: {source}")]
    Measurement {
        logical_line: usize,
        partial: Vec<String>,
        #[source]
        source: MeasureError,
    },

    #[error("Could not determine natural line height: {0}")]
    LineHeight(#[source] MeasureError),
}

impl WrapError {
    /// Lines that were completed before the failure.
    pub fn partial_lines(&self) -> &[String] {
        match self {
            WrapError::Measurement { partial, .. } => partial,
            WrapError::LineHeight(_) => &[],
        }
    }
}

/// Greedy, word-level line wrapper driven by a measurement capability.
///
/// Each logical line (split on `'\n'`) is wrapped independently. A word is
/// never split: a word wider than the available width gets a line of its own.
pub struct LineWrapper<'a, M: ?Sized> {
    measurer: &'a M,
    style: Option<&'a TextStyle>,
    natural_line_height: Option<f32>,
}

impl<'a, M: TextMetricsProducer + ?Sized> LineWrapper<'a, M> {
    pub fn new(measurer: &'a M) -> Self {
        Self {
            measurer,
            style: None,
            natural_line_height: None,
        }
    }

    /// Use `style` for line height and spacing. Defaults apply otherwise.
    pub fn with_style(mut self, style: &'a TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Supply the natural line height instead of asking the measurer.
    pub fn with_natural_line_height(mut self, height: f32) -> Self {
        self.natural_line_height = Some(height);
        self
    }

    pub fn wrap(&self, text: &str, max_width: f32) -> Result<WrappedText, WrapError> {
        let line_advance = self.line_advance()?;
        let (lines, max_line_width) = self.wrap_lines(text, max_width)?;
        let total_height = lines.len() as f32 * line_advance;

        debug!(
            "Wrapped {} bytes into {} lines at max_width={:.1} (size {:.1}x{:.1})",
            text.len(),
            lines.len(),
            max_width,
            max_line_width,
            total_height
        );

        Ok(WrappedText {
            lines,
            max_line_width,
            line_advance,
            total_height,
        })
    }

    fn line_advance(&self) -> Result<f32, WrapError> {
        let style = self.style.copied().unwrap_or_default();

        if style.line_height > 0.0 {
            return Ok(style.line_advance(0.0));
        }
        let natural = match self.natural_line_height {
            Some(height) => height,
            None => self
                .measurer
                .natural_line_height()
                .map_err(WrapError::LineHeight)?,
        };
        Ok(style.line_advance(natural))
    }

    /// Wrap `text` and return the lines with the widest line's width.
    pub fn wrap_lines(&self, text: &str, max_width: f32) -> Result<(Vec<String>, f32), WrapError> {
        // NaN compares false against everything, which would let every word fit
        let max_width = if max_width.is_nan() { 0.0 } else { max_width };

        let mut lines = Vec::new();
        let mut widest = 0.0_f32;

        for (index, logical) in text.split('\n').enumerate() {
            let logical = logical.strip_suffix('\r').unwrap_or(logical);
            let completed = lines.len();

            match self.wrap_logical_line(logical, max_width, &mut lines) {
                Ok(width) => widest = widest.max(width),
                Err(source) => {
                    lines.truncate(completed);
                    debug!(
                        "Aborting wrap at logical line {} after {} lines: {}",
                        index, completed, source
                    );
                    return Err(WrapError::Measurement {
                        logical_line: index,
                        partial: lines,
                        source,
                    });
                }
            }
        }

        Ok((lines, widest))
    }

    /// Appends the trimmed lines for one logical line and returns the widest
    /// of them.
    fn wrap_logical_line(
        &self,
        line: &str,
        max_width: f32,
        out: &mut Vec<String>,
    ) -> Result<f32, MeasureError> {
        if line.trim().is_empty() {
            out.push(String::new());
            return Ok(0.0);
        }

        let first = out.len();
        let tokens = tokenize(line);
        let mut current = String::new();

        for (word, separator) in pairs(&tokens) {
            let candidate_width = {
                let mut candidate = String::with_capacity(current.len() + word.len());
                candidate.push_str(&current);
                candidate.push_str(word);
                self.measurer.measure(&candidate)?.width
            };

            if candidate_width > max_width {
                if !current.trim().is_empty() {
                    trace!("Wrap point before {:?} ({:.1} > {:.1})", word, candidate_width, max_width);
                    out.push(std::mem::take(&mut current));
                } else if !word.is_empty() {
                    // Nothing visible to break before: overlong word
                    trace!("Overlong word {:?} ({:.1} > {:.1})", word, candidate_width, max_width);
                    out.push(word.to_string());
                    current.clear();
                    continue;
                }
            }
            current.push_str(word);
            current.push_str(separator);
        }

        if !current.trim().is_empty() {
            out.push(current);
        }

        let mut widest = 0.0_f32;
        for emitted in &mut out[first..] {
            let trimmed = emitted.trim();
            if trimmed.len() != emitted.len() {
                *emitted = trimmed.to_string();
            }
            widest = widest.max(self.measurer.measure(emitted.as_str())?.width);
        }
        Ok(widest)
    }
}

/// Wrap `text` to `max_width` and return only the lines.
pub fn wrap_text<M: TextMetricsProducer + ?Sized>(
    measurer: &M,
    text: &str,
    max_width: f32,
) -> Result<Vec<String>, WrapError> {
    LineWrapper::new(measurer)
        .wrap_lines(text, max_width)
        .map(|(lines, _)| lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// 10 units per char, 12 units tall.
    struct TenPerChar;

    impl TextMetricsProducer for TenPerChar {
        fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
            Ok(TextSize::new(text.chars().count() as f32 * 10.0, 12.0))
        }
    }

    /// Fails once it sees `poison` in a measured string.
    struct Poisoned {
        poison: &'static str,
        calls: Cell<usize>,
    }

    impl TextMetricsProducer for Poisoned {
        fn measure(&self, text: &str) -> Result<TextSize, MeasureError> {
            self.calls.set(self.calls.get() + 1);
            if text.contains(self.poison) {
                return Err(MeasureError::FontUnavailable("test-font".to_string()));
            }
            TenPerChar.measure(text)
        }
    }

    fn wrap(text: &str, max_width: f32) -> Vec<String> {
        wrap_text(&TenPerChar, text, max_width).expect("measurement is infallible")
    }

    #[test]
    fn test_quick_brown_fox() {
        assert_eq!(wrap("the quick brown fox", 90.0), vec!["the quick", "brown fox"]);
        // at 35 no pair of words fits, so every word gets its own line
        assert_eq!(
            wrap("the quick brown fox", 35.0),
            vec!["the", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn test_exact_width_is_accepted() {
        // "ab cd" is exactly 50 wide
        assert_eq!(wrap("ab cd", 50.0), vec!["ab cd"]);
        assert_eq!(wrap("ab cd", 49.9), vec!["ab", "cd"]);
    }

    #[test]
    fn test_explicit_newlines_always_break() {
        assert_eq!(wrap("ab\ncd", 1000.0), vec!["ab", "cd"]);
        assert_eq!(wrap("ab\r\ncd", 1000.0), vec!["ab", "cd"]);
    }

    #[test]
    fn test_blank_logical_lines_are_kept() {
        assert_eq!(wrap("ab\n\ncd", 1000.0), vec!["ab", "", "cd"]);
        assert_eq!(wrap("ab\n   \ncd", 1000.0), vec!["ab", "", "cd"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(wrap("", 100.0), vec![""]);
        assert_eq!(wrap("", 0.0), vec![""]);
    }

    #[test]
    fn test_overlong_word_is_not_split() {
        assert_eq!(
            wrap("a incomprehensibilities b", 50.0),
            vec!["a", "incomprehensibilities", "b"]
        );
        assert_eq!(wrap("incomprehensibilities", 50.0), vec!["incomprehensibilities"]);
    }

    #[test]
    fn test_degenerate_widths_put_every_word_on_its_own_line() {
        for width in [0.0, -10.0, f32::NAN, f32::NEG_INFINITY] {
            assert_eq!(wrap("one two  three", width), vec!["one", "two", "three"], "{width}");
        }
    }

    #[test]
    fn test_infinite_width_keeps_line_intact() {
        assert_eq!(wrap("one two  three", f32::INFINITY), vec!["one two  three"]);
    }

    #[test]
    fn test_leading_whitespace_counts_toward_width() {
        // "    ab" is 60 wide and does not fit in 50
        assert_eq!(wrap("    ab cd", 50.0), vec!["ab", "cd"]);
        assert_eq!(wrap("  ab cd", 100.0), vec!["ab cd"]);
    }

    #[test]
    fn test_trailing_separator_is_trimmed_but_measured() {
        // "ab   " + "cd" = 70 > 60, so the break comes after the spaces
        assert_eq!(wrap("ab   cd", 60.0), vec!["ab", "cd"]);
    }

    #[test]
    fn test_wrapped_text_size() {
        let style = TextStyle::default().with_line_spacing(1.5);
        let wrapped = LineWrapper::new(&TenPerChar)
            .with_style(&style)
            .wrap("the quick brown fox", 90.0)
            .unwrap();

        assert_eq!(wrapped.line_count(), 2);
        assert_eq!(wrapped.line_advance, 18.0);
        assert_eq!(wrapped.size(), TextSize::new(90.0, 36.0));
    }

    #[test]
    fn test_explicit_line_height_skips_natural_height() {
        let style = TextStyle::default().with_line_height(20.0);
        let wrapped = LineWrapper::new(&TenPerChar)
            .with_style(&style)
            .with_natural_line_height(999.0)
            .wrap("a\nb\nc", 100.0)
            .unwrap();

        assert_eq!(wrapped.total_height, 60.0);
    }

    #[test]
    fn test_measurement_failure_keeps_completed_logical_lines() {
        let measurer = Poisoned {
            poison: "bad",
            calls: Cell::new(0),
        };
        let err = LineWrapper::new(&measurer)
            .with_natural_line_height(12.0)
            .wrap("one two\nthree four\nfive bad six\nseven", 50.0)
            .unwrap_err();

        match &err {
            WrapError::Measurement {
                logical_line,
                partial,
                source,
            } => {
                assert_eq!(*logical_line, 2);
                assert_eq!(partial, &vec!["one", "two", "three", "four"]);
                assert_eq!(source, &MeasureError::FontUnavailable("test-font".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.partial_lines().len(), 4);
        assert!(measurer.calls.get() > 0);
    }

    #[test]
    fn test_natural_line_height_failure() {
        let measurer = Poisoned {
            poison: "M",
            calls: Cell::new(0),
        };
        let err = LineWrapper::new(&measurer).wrap("ok", 50.0).unwrap_err();
        assert!(matches!(err, WrapError::LineHeight(_)));
        assert!(err.partial_lines().is_empty());
    }
}
