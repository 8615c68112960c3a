// crates/wrapline-core/src/lib.rs
pub mod metrics;
pub mod properties;
pub mod style;

pub use metrics::*;
pub use properties::*;
pub use style::{keys, TextAlign, TextStyle};

/// Non-fatal style configuration problem. Logged and reported, never raised.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown text alignment: {0:?}")]
    UnknownAlignment(String),

    #[error("Invalid value for {key}: {value} (must be a finite, non-negative number)")]
    InvalidNumber { key: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    #[error("Text measurement failed: {0}")]
    Backend(String),
}
