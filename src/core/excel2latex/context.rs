//! Conversion options and the fixed rewrite pass table

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::function::{convert_function, count_calls};
use super::operator::{convert_operator, OperatorForm, OperatorRule};
use crate::data::maps::{FunctionRule, FUNCTION_RULES};
use crate::utils::error::{ConversionError, ConversionResult};

/// Sentinel emitted in place of a formula that uses an unsupported function.
pub const DEFAULT_UNSUPPORTED_MESSAGE: &str = "\\text{unsupported formula}";

// =============================================================================
// Spreadsheet → LaTeX Conversion Options
// =============================================================================

/// Options for spreadsheet formula to LaTeX conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct X2LOptions {
    /// Output used for the whole formula when it calls a function that has
    /// no LaTeX form (`INDIRECT`, `ADDRESS`)
    /// Default: `\text{unsupported formula}`
    pub unsupported_message: String,

    /// Translate German function names (`SUMME`, `WENN`, ...) first
    /// Default: true
    pub german_aliases: bool,

    /// Prefix nested parentheses with `\big`, `\Big`, ... by depth
    /// Default: true
    pub size_brackets: bool,
}

impl Default for X2LOptions {
    fn default() -> Self {
        Self {
            unsupported_message: DEFAULT_UNSUPPORTED_MESSAGE.to_string(),
            german_aliases: true,
            size_brackets: true,
        }
    }
}

impl X2LOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave literal parentheses at their natural size
    pub fn plain() -> Self {
        Self {
            size_brackets: false,
            ..Self::default()
        }
    }

    /// Read options from JSON; missing fields keep their defaults
    pub fn from_json(source: &str) -> ConversionResult<Self> {
        let options: Self = serde_json::from_str(source)?;
        if options.unsupported_message.is_empty() {
            return Err(ConversionError::config("unsupported_message must not be empty"));
        }
        Ok(options)
    }

    /// Replace the unsupported-formula sentinel
    pub fn with_unsupported_message(mut self, message: impl Into<String>) -> Self {
        self.unsupported_message = message.into();
        self
    }
}

// =============================================================================
// Pass table
// =============================================================================

/// One rewrite rule, driven to a fixed point by the pipeline.
#[derive(Debug, Clone, Copy)]
pub enum Pass {
    Function {
        name: &'static str,
        rule: FunctionRule,
    },
    Operator(OperatorRule),
}

impl Pass {
    /// Name used in logs and loss reports.
    ///
    /// The two `^` passes are told apart: `^root` for `x^(1/n)` and `^(`
    /// for the call-like power.
    pub fn name(&self) -> &'static str {
        match self {
            Pass::Function { name: "^", .. } => "^(",
            Pass::Function { name, .. } => *name,
            Pass::Operator(OperatorRule {
                form: OperatorForm::Root,
                ..
            }) => "^root",
            Pass::Operator(rule) => rule.symbol,
        }
    }

    /// Rewrite the first match, if any.
    pub fn apply(&self, text: &str) -> Option<String> {
        match self {
            Pass::Function { name, rule } => convert_function(text, name, rule),
            Pass::Operator(rule) => convert_operator(text, rule),
        }
    }

    /// Occurrences of the pattern this pass consumes.
    pub fn triggers(&self, text: &str) -> usize {
        match self {
            Pass::Function { name, .. } => count_calls(text, name),
            Pass::Operator(rule) => text.matches(rule.symbol).count(),
        }
    }
}

/// Rule order, from first applied to last.
enum Step {
    Function(&'static str),
    Operator(OperatorRule),
}

const ROOT: OperatorRule = OperatorRule::new("^", "\\sqrt", OperatorForm::Root);
const FRACTION: OperatorRule = OperatorRule::new("/", "\\frac", OperatorForm::Binary);

const STEPS: &[Step] = &[
    Step::Function("ABS"),
    Step::Function("AND"),
    Step::Function("OR"),
    Step::Function("IF"),
    Step::Function("SQRT"),
    Step::Function("EXP"),
    Step::Function("SIN"),
    Step::Function("COS"),
    Step::Function("TAN"),
    Step::Function("SINH"),
    Step::Function("COSH"),
    Step::Function("TANH"),
    Step::Function("ARCSIN"),
    Step::Function("ARCCOS"),
    Step::Function("ARCTAN"),
    Step::Function("LN"),
    Step::Function("LG"),
    Step::Function("LOG"),
    Step::Function("MIN"),
    Step::Function("MAX"),
    Step::Operator(ROOT),
    Step::Function("^"),
    Step::Function("SUM"),
    Step::Operator(FRACTION),
];

/// Ordered rewrite passes.
#[derive(Debug, Clone)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Pipeline {
    /// The standard spreadsheet rule order.
    pub fn standard() -> Self {
        let passes = STEPS
            .iter()
            .filter_map(|step| match step {
                Step::Function(name) => FUNCTION_RULES
                    .get(*name)
                    .map(|rule| Pass::Function {
                        name: *name,
                        rule: *rule,
                    }),
                Step::Operator(rule) => Some(Pass::Operator(*rule)),
            })
            .collect();
        Self { passes }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }
}

lazy_static! {
    /// Pass table shared by every conversion
    pub static ref STANDARD_PIPELINE: Pipeline = Pipeline::standard();
}
