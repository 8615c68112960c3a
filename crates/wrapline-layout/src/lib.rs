// crates/wrapline-layout/src/lib.rs

pub mod tokenize;
pub mod wrap;

pub use tokenize::{pairs, tokenize, Token};
pub use wrap::{wrap_text, LineWrapper, WrapError, WrappedText};
