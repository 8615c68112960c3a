// crates/wrapline-core/src/style.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ConfigError, PropertySource};

/// Horizontal alignment of each line within the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub const ALL: [TextAlign; 4] = [
        TextAlign::Left,
        TextAlign::Right,
        TextAlign::Center,
        TextAlign::Justify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextAlign::Left => "Left",
            TextAlign::Right => "Right",
            TextAlign::Center => "Center",
            TextAlign::Justify => "Justify",
        }
    }

    /// CSS-like shorthand keywords. Returns `None` for anything else.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" | "start" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" | "end" => Some(TextAlign::Right),
            _ => None,
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextAlign {
    type Err = ConfigError;

    /// Exact variant-name match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextAlign::ALL
            .into_iter()
            .find(|align| align.name() == s)
            .ok_or_else(|| ConfigError::UnknownAlignment(s.to_string()))
    }
}

/// Property keys understood by [`TextStyle::resolve_from`]
pub mod keys {
    pub const WORD_WRAP: &str = "word-wrap";
    pub const LINE_SPACING: &str = "line-spacing";
    pub const TEXT_ALIGN: &str = "text-align";
    pub const LINE_HEIGHT: &str = "line-height";
    pub const TEXT_INDENT: &str = "text-indent";
    pub const LETTER_SPACING: &str = "letter-spacing";
    pub const WORD_SPACING: &str = "word-spacing";
}

/// All the style information associated with how to lay out and render text.
///
/// Numeric fields are never negative. `line_height == 0.0` means "use the
/// natural height reported by the font".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TextStyle {
    #[serde(rename = "text-align")]
    pub align: TextAlign,
    pub line_height: f32,
    pub line_spacing: f32,
    #[serde(rename = "text-indent")]
    pub indent: f32,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub word_wrap: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            align: TextAlign::Left,
            line_height: 0.0,
            line_spacing: 1.0,
            indent: 0.0,
            letter_spacing: 1.0,
            word_spacing: 0.0,
            word_wrap: false,
        }
    }
}

impl TextStyle {
    pub fn defaults() -> Self {
        Self::default()
    }

    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing.max(0.0);
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height.max(0.0);
        self
    }

    /// Vertical advance between consecutive lines given the font's natural
    /// line height.
    pub fn line_advance(&self, natural_line_height: f32) -> f32 {
        let base = if self.line_height > 0.0 {
            self.line_height
        } else {
            natural_line_height
        };
        base * self.line_spacing
    }

    /// Override fields from `source`.
    ///
    /// Only keys present in the source are applied; everything else keeps its
    /// current (possibly inherited) value. Unusable values are logged and
    /// returned as diagnostics, leaving the field unchanged.
    pub fn resolve_from<S: PropertySource + ?Sized>(&mut self, source: &S) -> Vec<ConfigError> {
        let mut diagnostics = Vec::new();

        if let Some(wrap) = source.get_bool(keys::WORD_WRAP) {
            self.word_wrap = wrap;
        }

        let numeric: [(&'static str, &mut f32); 5] = [
            (keys::LINE_SPACING, &mut self.line_spacing),
            (keys::LINE_HEIGHT, &mut self.line_height),
            (keys::TEXT_INDENT, &mut self.indent),
            (keys::LETTER_SPACING, &mut self.letter_spacing),
            (keys::WORD_SPACING, &mut self.word_spacing),
        ];
        for (key, field) in numeric {
            let Some(value) = source.get_number(key) else {
                continue;
            };
            if value.is_finite() && value >= 0.0 {
                *field = value;
            } else {
                let err = ConfigError::InvalidNumber { key, value };
                warn!("{}", err);
                diagnostics.push(err);
            }
        }

        if let Some(keyword) = source.get_enum_string(keys::TEXT_ALIGN) {
            let parsed = match TextAlign::from_keyword(keyword) {
                Some(align) => Ok(align),
                None => keyword.parse::<TextAlign>(),
            };
            match parsed {
                Ok(align) => self.align = align,
                Err(err) => {
                    warn!("{}", err);
                    diagnostics.push(err);
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyMap, PropertyValue};

    fn keyword(s: &str) -> PropertyValue {
        PropertyValue::Enum(s.to_string())
    }

    #[test]
    fn test_defaults() {
        let style = TextStyle::defaults();
        assert!(!style.word_wrap);
        assert_eq!(style.align, TextAlign::Left);
        assert_eq!(style.line_spacing, 1.0);
        assert_eq!(style.letter_spacing, 1.0);
        assert_eq!(style.line_height, 0.0);
        assert_eq!(style.indent, 0.0);
        assert_eq!(style.word_spacing, 0.0);
    }

    #[test]
    fn test_absent_keys_inherit() {
        let mut style = TextStyle::default().with_line_spacing(1.5);
        let diagnostics = style.resolve_from(&PropertyMap::new());

        assert!(diagnostics.is_empty());
        assert_eq!(style.line_spacing, 1.5);
        assert_eq!(style, TextStyle::default().with_line_spacing(1.5));
    }

    #[test]
    fn test_shorthand_alignment_keywords() {
        let cases = [
            ("left", TextAlign::Left),
            ("start", TextAlign::Left),
            ("center", TextAlign::Center),
            ("right", TextAlign::Right),
            ("end", TextAlign::Right),
            ("Justify", TextAlign::Justify),
            ("Center", TextAlign::Center),
        ];
        for (input, expected) in cases {
            let start = if expected == TextAlign::Justify {
                TextAlign::Left
            } else {
                TextAlign::Justify
            };
            let mut style = TextStyle::default().with_align(start);
            let props = PropertyMap::new().with(keys::TEXT_ALIGN, keyword(input));
            assert!(style.resolve_from(&props).is_empty(), "input {input}");
            assert_eq!(style.align, expected, "input {input}");
        }
    }

    #[test]
    fn test_unknown_alignment_is_non_fatal() {
        let mut style = TextStyle::default().with_align(TextAlign::Center);
        let props = PropertyMap::new()
            .with(keys::TEXT_ALIGN, keyword("bogus"))
            .with(keys::WORD_WRAP, PropertyValue::Bool(true));

        let diagnostics = style.resolve_from(&props);

        assert_eq!(
            diagnostics,
            vec![ConfigError::UnknownAlignment("bogus".to_string())]
        );
        assert_eq!(style.align, TextAlign::Center);
        assert!(style.word_wrap);
    }

    #[test]
    fn test_numeric_properties() {
        let mut style = TextStyle::default();
        let props = PropertyMap::new()
            .with(keys::LINE_SPACING, PropertyValue::Float(1.25))
            .with(keys::LINE_HEIGHT, PropertyValue::Int(18))
            .with(keys::TEXT_INDENT, PropertyValue::Float(4.0))
            .with(keys::WORD_SPACING, PropertyValue::Float(-2.0));

        let diagnostics = style.resolve_from(&props);

        assert_eq!(style.line_spacing, 1.25);
        assert_eq!(style.line_height, 18.0);
        assert_eq!(style.indent, 4.0);
        assert_eq!(style.word_spacing, 0.0);
        assert_eq!(
            diagnostics,
            vec![ConfigError::InvalidNumber {
                key: keys::WORD_SPACING,
                value: -2.0
            }]
        );
    }

    #[test]
    fn test_line_advance() {
        let natural = TextStyle::default().with_line_spacing(1.5);
        assert_eq!(natural.line_advance(10.0), 15.0);

        let fixed = natural.with_line_height(20.0);
        assert_eq!(fixed.line_advance(10.0), 30.0);
    }

    #[test]
    fn test_align_display_round_trips_through_from_str() {
        for align in TextAlign::ALL {
            assert_eq!(align.to_string().parse::<TextAlign>(), Ok(align));
        }
        assert!("left".parse::<TextAlign>().is_err());
    }
}
