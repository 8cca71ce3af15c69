//! Spreadsheet formula → LaTeX conversion
//!
//! The formula is rewritten in place by an ordered list of passes. Each pass
//! recognizes one function or operator, rewrites its first occurrence and
//! is repeated until nothing of its kind is left. Rewritten fragments are
//! wrapped in `«…»` markers so later passes treat them as opaque operands;
//! the markers become plain spaces in the returned string.

pub mod brackets;
pub mod context;
pub mod function;
pub mod operator;
pub mod scanner;
pub mod sizing;

pub use brackets::{ends_with_open_bracket, remove_brackets, starts_with_open_bracket};
pub use context::{Pass, Pipeline, X2LOptions, DEFAULT_UNSUPPORTED_MESSAGE, STANDARD_PIPELINE};
pub use function::{convert_function, find_call, CallLookup, CallSite};
pub use operator::{convert_operator, OperatorForm, OperatorRule};
pub use scanner::{BoundaryScanner, TAG_CLOSE, TAG_OPEN};
pub use sizing::{size_brackets, size_prefix};

use crate::data::maps::{GERMAN_ALIASES, LITERAL_SUBSTITUTIONS, UNSUPPORTED_FUNCTIONS};
use crate::utils::error::{ConversionError, ConversionResult};
use crate::utils::loss::{ConversionReport, LossKind, LossRecord, LossReport};

/// Characters of context kept on each side in loss snippets.
const SNIPPET_RADIUS: usize = 10;

/// Convert a formula with default options.
pub fn convert(formula: &str) -> String {
    convert_with_options(formula, &X2LOptions::default())
}

/// Convert a formula; unsupported formulas yield the configured sentinel.
pub fn convert_with_options(formula: &str, options: &X2LOptions) -> String {
    convert_with_report(formula, options).content
}

/// Convert a formula, failing instead of emitting the sentinel.
pub fn try_convert(formula: &str, options: &X2LOptions) -> ConversionResult<String> {
    let mut report = LossReport::new();
    rewrite(formula, options, &mut report).map_err(ConversionError::unsupported)
}

/// Convert a formula and collect everything that did not convert cleanly.
pub fn convert_with_report(formula: &str, options: &X2LOptions) -> ConversionReport {
    let mut report = LossReport::new();
    let content = match rewrite(formula, options, &mut report) {
        Ok(content) => content,
        Err(name) => {
            log::warn!("formula calls unsupported function {}", name);
            report.push(LossRecord::new(
                LossKind::UnsupportedFunction,
                Some(name.to_string()),
                format!("{} has no LaTeX equivalent", name),
                Some(formula.to_string()),
            ));
            options.unsupported_message.clone()
        }
    };
    ConversionReport::new(content, report)
}

/// Replace German function names with their English equivalents.
pub fn translate_german(text: &str) -> String {
    let mut out = text.to_string();
    for (german, english) in GERMAN_ALIASES {
        out = out.replace(&format!("{}(", german), &format!("{}(", english));
    }
    out
}

/// Run the whole pipeline. `Err` carries the unsupported function found.
fn rewrite(
    formula: &str,
    options: &X2LOptions,
    report: &mut LossReport,
) -> Result<String, &'static str> {
    let mut text = if options.german_aliases {
        translate_german(formula)
    } else {
        formula.to_string()
    };

    for pass in STANDARD_PIPELINE.passes() {
        text = drive(text, pass, report);
    }

    for (from, to) in LITERAL_SUBSTITUTIONS {
        text = text.replace(*from, to);
    }

    if let Some(name) = unsupported_call(&text) {
        return Err(name);
    }

    note_raw_powers(&text, report);

    if options.size_brackets {
        text = size_brackets(&text);
    }

    Ok(strip_markers(&text))
}

/// Apply one pass until it stops matching.
///
/// Every rewrite must consume one of the pass's triggers; a rewrite that
/// does not is kept but ends the loop.
fn drive(mut text: String, pass: &Pass, report: &mut LossReport) -> String {
    let mut remaining = pass.triggers(&text);

    while let Some(next) = pass.apply(&text) {
        let left = pass.triggers(&next);
        text = next;
        if left >= remaining {
            log::warn!("pass {} stopped without progress", pass.name());
            report.push(LossRecord::new(
                LossKind::RewriteStalled,
                Some(pass.name().to_string()),
                "rewrite did not consume its pattern",
                None,
            ));
            break;
        }
        remaining = left;
    }

    if let Pass::Function { name, .. } = pass {
        if let CallLookup::Unterminated { start } = find_call(&text, name) {
            log::debug!("unterminated call to {}", name);
            report.push(LossRecord::new(
                LossKind::UnterminatedCall,
                Some(pass.name().to_string()),
                format!("{}( is never closed", name),
                Some(snippet_around(&text, start)),
            ));
        }
    }

    text
}

fn unsupported_call(text: &str) -> Option<&'static str> {
    UNSUPPORTED_FUNCTIONS
        .iter()
        .copied()
        .find(|name| text.contains(&format!("{}(", name)))
}

/// Record every `^` that no pass turned into LaTeX (`A^2`).
fn note_raw_powers(text: &str, report: &mut LossReport) {
    for (at, _) in text.match_indices('^') {
        if text[at + 1..].starts_with(|c: char| c == '{' || c == ' ') {
            continue;
        }
        report.push(LossRecord::new(
            LossKind::UnconvertedOperator,
            Some("^".to_string()),
            "power left in spreadsheet syntax",
            Some(snippet_around(text, at)),
        ));
    }
}

fn snippet_around(text: &str, at: usize) -> String {
    let start = text[..at]
        .char_indices()
        .rev()
        .nth(SNIPPET_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    let end = text[at..]
        .char_indices()
        .nth(SNIPPET_RADIUS)
        .map_or(text.len(), |(i, _)| at + i);
    strip_markers(&text[start..end]).trim().to_string()
}

fn strip_markers(text: &str) -> String {
    text.replace(|c: char| c == TAG_OPEN || c == TAG_CLOSE, " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_translate_german() {
        assert_eq!(
            translate_german("WENN(UND(a;b);SUMME(A1:A3);WURZEL(2))"),
            "IF(AND(a;b);SUM(A1:A3);SQRT(2))"
        );
        assert_eq!(translate_german("ODER(x;y)"), "OR(x;y)");
        assert_eq!(translate_german("INDIREKT(A1)"), "INDIRECT(A1)");
        assert_eq!(translate_german("ADRESSE(1;2)"), "ADDRESS(1;2)");
    }

    #[test]
    fn test_drive_runs_to_fixed_point() {
        let pass = STANDARD_PIPELINE
            .passes()
            .iter()
            .find(|p| p.name() == "/")
            .unwrap();
        let mut report = LossReport::new();
        let out = drive("a/b+c/d".to_string(), pass, &mut report);
        assert_eq!(out, "«\\frac {a} {b}»+«\\frac {c} {d}»");
        assert!(report.is_empty());
    }

    #[test]
    fn test_drive_reports_unterminated_call() {
        let pass = STANDARD_PIPELINE
            .passes()
            .iter()
            .find(|p| p.name() == "SIN")
            .unwrap();
        let mut report = LossReport::new();
        let out = drive("SIN(x".to_string(), pass, &mut report);
        assert_eq!(out, "SIN(x");
        assert!(report.has(LossKind::UnterminatedCall));
    }

    #[test]
    fn test_power_passes_report_distinct_names() {
        let report = convert_with_report("3^(x", &X2LOptions::default());
        assert_eq!(report.content, "3^(x");
        let unterminated: Vec<_> = report
            .report
            .losses
            .iter()
            .filter(|l| l.kind == LossKind::UnterminatedCall)
            .filter_map(|l| l.name.as_deref())
            .collect();
        assert_eq!(unterminated, vec!["^("]);
    }

    #[test]
    fn test_raw_power_is_reported() {
        let report = convert_with_report("A^2", &X2LOptions::default());
        assert_eq!(report.content, "A^2");
        assert!(report.report.has(LossKind::UnconvertedOperator));
        assert_eq!(report.report.losses[0].snippet.as_deref(), Some("A^2"));
    }

    #[test]
    fn test_converted_powers_are_not_reported() {
        let report = convert_with_report("3^(2)+EXP(x)+SUM(A1:A2)", &X2LOptions::default());
        assert!(!report.report.has(LossKind::UnconvertedOperator));
    }

    #[test]
    fn test_strip_markers_keeps_spacing() {
        assert_eq!(strip_markers("«a»«b»"), " a  b ");
    }
}
