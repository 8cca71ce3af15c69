//! Static rule tables for spreadsheet → LaTeX conversion

use phf::phf_map;

/// Localized (German) function names and their English equivalents.
///
/// Applied as plain text substitution of `NAME(` before any rewriting.
pub static GERMAN_ALIASES: &[(&str, &str)] = &[
    ("ADRESSE", "ADDRESS"),
    ("INDIREKT", "INDIRECT"),
    ("WURZEL", "SQRT"),
    ("SUMME", "SUM"),
    ("WENN", "IF"),
    ("UND", "AND"),
    ("ODER", "OR"),
];

/// Functions that have no LaTeX rendering. A formula still calling one of
/// these after rewriting is reported as unsupported as a whole.
pub static UNSUPPORTED_FUNCTIONS: &[&str] = &["INDIRECT", "ADDRESS"];

/// How a recognized call is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallForm {
    /// `latex {args}`
    Command,
    /// `|args|`
    Abs,
    /// `(p0 latex p1 latex ...)`
    Junction,
    /// Two-branch `cases` block for a three-argument `IF`
    Cases,
    /// `\sum_{low}^{high}` for a single `low:high` range
    Sum,
    /// `e^{args}`
    Exp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionRule {
    /// LaTeX command (or operator) emitted for the call
    pub latex: &'static str,
    /// Keep the call parentheses around the arguments
    pub wrap_args: bool,
    pub form: CallForm,
}

const fn rule(latex: &'static str, wrap_args: bool, form: CallForm) -> FunctionRule {
    FunctionRule {
        latex,
        wrap_args,
        form,
    }
}

/// Recognized functions, keyed by their English spreadsheet name.
///
/// `^` is the call-like power form `x^(...)`.
pub static FUNCTION_RULES: phf::Map<&'static str, FunctionRule> = phf_map! {
    "ABS" => rule("|", false, CallForm::Abs),
    "AND" => rule("\\wedge", false, CallForm::Junction),
    "OR" => rule("\\vee", false, CallForm::Junction),
    "IF" => rule("", false, CallForm::Cases),
    "SQRT" => rule("\\sqrt", false, CallForm::Command),
    "EXP" => rule("", false, CallForm::Exp),
    "SIN" => rule("\\sin", true, CallForm::Command),
    "COS" => rule("\\cos", true, CallForm::Command),
    "TAN" => rule("\\tan", true, CallForm::Command),
    "SINH" => rule("\\sinh", true, CallForm::Command),
    "COSH" => rule("\\cosh", true, CallForm::Command),
    "TANH" => rule("\\tanh", true, CallForm::Command),
    "ARCSIN" => rule("\\arcsin", true, CallForm::Command),
    "ARCCOS" => rule("\\arccos", true, CallForm::Command),
    "ARCTAN" => rule("\\arctan", true, CallForm::Command),
    "LN" => rule("\\ln", true, CallForm::Command),
    "LG" => rule("\\lg", true, CallForm::Command),
    "LOG" => rule("\\log", true, CallForm::Command),
    "MIN" => rule("\\min", true, CallForm::Command),
    "MAX" => rule("\\max", true, CallForm::Command),
    "^" => rule("^", false, CallForm::Command),
    "SUM" => rule("\\sum", false, CallForm::Sum),
};

/// Literal substitutions applied once all rules have run, in order.
pub static LITERAL_SUBSTITUTIONS: &[(&str, &str)] = &[
    (":", " \\dots "),
    ("*PI()", " \\pi "),
    ("PI()", " \\pi "),
    ("*", " \\cdot "),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_target_known_names() {
        for (_, english) in GERMAN_ALIASES {
            assert!(
                FUNCTION_RULES.contains_key(*english) || UNSUPPORTED_FUNCTIONS.contains(english),
                "alias target {} is not a known function",
                english
            );
        }
    }

    #[test]
    fn test_trig_functions_keep_parentheses() {
        for name in ["SIN", "COS", "TAN", "LN", "LOG", "MIN", "MAX"] {
            assert!(FUNCTION_RULES.get(name).unwrap().wrap_args, "{} should keep (...)", name);
        }
        assert!(!FUNCTION_RULES.get("SQRT").unwrap().wrap_args);
    }
}
