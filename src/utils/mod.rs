//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Loss reporting for fragments that did not convert

pub mod error;
pub mod loss;

// Re-export commonly used items
pub use error::{ConversionError, ConversionResult};
pub use loss::{ConversionReport, LossKind, LossRecord, LossReport};
