//! WASM bindings for xl2tex
//!
//! This module provides JavaScript-accessible functions for spreadsheet
//! formula → LaTeX conversion.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

/// Conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize, Default)]
pub struct X2LConvertOptions {
    /// Output used in place of formulas calling unsupported functions
    #[serde(default)]
    pub unsupported_message: Option<String>,
    /// Translate German function names
    #[serde(default = "default_true")]
    pub german_aliases: bool,
    /// Size nested parentheses by depth
    #[serde(default = "default_true")]
    pub size_brackets: bool,
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
#[cfg(feature = "wasm")]
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = ConvertResult {
            output: String::new(),
            success: false,
            error: Some(format!("Serialization error: {}", e)),
            warnings: vec![],
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert a spreadsheet formula to LaTeX
///
/// # Arguments
/// * `input` - Formula text, with or without the leading `=`
///
/// # Returns
/// LaTeX math code
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "excelToLatex")]
pub fn excel_to_latex_wasm(input: &str) -> String {
    crate::convert(input)
}

/// Convert a spreadsheet formula to LaTeX with options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "excelToLatexWithOptions")]
pub fn excel_to_latex_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: X2LConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let defaults = crate::X2LOptions::default();
    let x2l_opts = crate::X2LOptions {
        unsupported_message: opts
            .unsupported_message
            .unwrap_or(defaults.unsupported_message),
        german_aliases: opts.german_aliases,
        size_brackets: opts.size_brackets,
    };

    let converted = crate::convert_with_report(input, &x2l_opts);
    let unsupported = converted
        .report
        .losses
        .iter()
        .find(|loss| loss.kind == crate::LossKind::UnsupportedFunction);

    let result = ConvertResult {
        success: unsupported.is_none(),
        error: unsupported.map(|loss| loss.message.clone()),
        warnings: converted
            .report
            .losses
            .iter()
            .filter(|loss| loss.kind != crate::LossKind::UnsupportedFunction)
            .map(|loss| loss.message.clone())
            .collect(),
        output: converted.content,
    };

    to_js_value(&result)
}
