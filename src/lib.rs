//! # xl2tex
//!
//! Converts spreadsheet formulas (Excel syntax, German function names
//! included) into LaTeX math markup.
//!
//! ```
//! assert_eq!(xl2tex::convert("A/B"), " \\frac {A} {B} ");
//! ```
//!
//! The conversion is a pure function of its input: no state survives a call,
//! so conversions may run concurrently from any number of threads.

pub mod core;
pub mod data;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::excel2latex::{
    convert, convert_with_options, convert_with_report, translate_german, try_convert,
    X2LOptions, DEFAULT_UNSUPPORTED_MESSAGE,
};
pub use utils::error::{ConversionError, ConversionResult};
pub use utils::loss::{ConversionReport, LossKind, LossRecord, LossReport};
