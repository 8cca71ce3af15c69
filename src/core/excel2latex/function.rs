//! Function call rewriting (`NAME(args)` → LaTeX command syntax)

use super::operator::splice;
use super::scanner::{TAG_CLOSE, TAG_OPEN};
use crate::data::maps::{CallForm, FunctionRule};

/// A located `NAME(args)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// Byte offset of the function name
    pub start: usize,
    /// Byte offset just past the closing parenthesis
    pub end: usize,
    /// Unsplit argument text
    pub args: &'a str,
    /// Arguments split on top-level `;`
    pub params: Vec<&'a str>,
}

/// Outcome of looking for a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallLookup<'a> {
    Found(CallSite<'a>),
    /// `NAME(` occurs but its parenthesis is never closed
    Unterminated { start: usize },
    Missing,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets of every `NAME(` that starts a call.
///
/// Alphabetic names must not be preceded by an identifier character, so
/// `SIN(` is not found inside `ARCSIN(`.
pub fn call_starts<'t>(text: &'t str, name: &'t str) -> impl Iterator<Item = usize> + 't {
    let needs_boundary = name.starts_with(|c: char| c.is_ascii_alphabetic());
    text.match_indices(name)
        .filter(move |(i, _)| text[i + name.len()..].starts_with('('))
        .filter(move |(i, _)| {
            !needs_boundary || !text[..*i].chars().next_back().is_some_and(is_ident_char)
        })
        .map(|(i, _)| i)
}

/// Number of calls to `name` in `text`.
pub fn count_calls(text: &str, name: &str) -> usize {
    call_starts(text, name).count()
}

/// Locate the first call to `name` and split its arguments.
pub fn find_call<'a>(text: &'a str, name: &str) -> CallLookup<'a> {
    let Some(start) = call_starts(text, name).next() else {
        return CallLookup::Missing;
    };
    let args_start = start + name.len() + 1;

    let mut depth = 1i32;
    let mut params = Vec::new();
    let mut param_start = args_start;

    for (i, c) in text[args_start..].char_indices() {
        let at = args_start + i;
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth <= 0 {
                    params.push(&text[param_start..at]);
                    return CallLookup::Found(CallSite {
                        start,
                        end: at + 1,
                        args: &text[args_start..at],
                        params,
                    });
                }
            }
            ';' if depth == 1 => {
                params.push(&text[param_start..at]);
                param_start = at + 1;
            }
            _ => {}
        }
    }

    CallLookup::Unterminated { start }
}

/// Render a located call according to its rule.
pub fn render_call(site: &CallSite<'_>, rule: &FunctionRule) -> String {
    let args = site.args;
    match rule.form {
        CallForm::Abs => format!("{}|{}|{}", TAG_OPEN, args, TAG_CLOSE),
        CallForm::Junction => {
            let separator = format!(" {} ", rule.latex);
            let joined = site.params.join(separator.as_str());
            format!("{}({}){}", TAG_OPEN, joined, TAG_CLOSE)
        }
        CallForm::Cases if site.params.len() == 3 => format!(
            "{}\\begin{{cases}}{} & \\text {{ if }} {},\\\\{} & \\text {{ other cases }}\\end{{cases}}{}",
            TAG_OPEN, site.params[1], site.params[0], site.params[2], TAG_CLOSE
        ),
        CallForm::Sum => match sum_range(site) {
            Some((low, high)) => format!(
                "{}\\sum_ {{{}}}^{{{}}} {{}}{}",
                TAG_OPEN, low, high, TAG_CLOSE
            ),
            None => command(rule, args),
        },
        CallForm::Exp => format!("{}e^{{{}}}{}", TAG_OPEN, args, TAG_CLOSE),
        CallForm::Command | CallForm::Cases => command(rule, args),
    }
}

fn command(rule: &FunctionRule, args: &str) -> String {
    if rule.wrap_args {
        format!("{}{} {{({})}}{}", TAG_OPEN, rule.latex, args, TAG_CLOSE)
    } else {
        format!("{}{} {{{}}}{}", TAG_OPEN, rule.latex, args, TAG_CLOSE)
    }
}

/// `low:high` when the call has a single two-part range argument.
fn sum_range<'a>(site: &CallSite<'a>) -> Option<(&'a str, &'a str)> {
    if site.params.len() != 1 {
        return None;
    }
    let (low, high) = site.args.split_once(':')?;
    if low.is_empty() || high.is_empty() || high.contains(':') {
        return None;
    }
    Some((low, high))
}

/// Rewrite the first call to `name`.
///
/// Returns `None` when there is no complete call left to rewrite.
pub fn convert_function(text: &str, name: &str, rule: &FunctionRule) -> Option<String> {
    match find_call(text, name) {
        CallLookup::Found(site) => {
            let replacement = render_call(&site, rule);
            log::debug!("function {} rewrote {:?}", name, &text[site.start..site.end]);
            Some(splice(text, site.start, site.end, &replacement))
        }
        CallLookup::Unterminated { .. } | CallLookup::Missing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::maps::FUNCTION_RULES;

    fn apply(text: &str, name: &str) -> Option<String> {
        convert_function(text, name, FUNCTION_RULES.get(name).unwrap())
    }

    #[test]
    fn test_find_call_splits_top_level_params() {
        let CallLookup::Found(site) = find_call("1+IF(a;MIN(b;c);d)*2", "IF") else {
            panic!("call not found");
        };
        assert_eq!(site.start, 2);
        assert_eq!(site.end, 18);
        assert_eq!(site.args, "a;MIN(b;c);d");
        assert_eq!(site.params, vec!["a", "MIN(b;c)", "d"]);
    }

    #[test]
    fn test_find_call_respects_identifier_boundary() {
        assert_eq!(find_call("ARCSIN(x)", "SIN"), CallLookup::Missing);
        assert_eq!(count_calls("ARCSIN(x)+SIN(y)", "SIN"), 1);
        assert_eq!(count_calls("2^(3)+x^(y)", "^"), 2);
    }

    #[test]
    fn test_find_call_unterminated() {
        assert_eq!(
            find_call("1+SIN(x", "SIN"),
            CallLookup::Unterminated { start: 2 }
        );
    }

    #[test]
    fn test_abs() {
        assert_eq!(apply("ABS(x)", "ABS").unwrap(), "«|x|»");
    }

    #[test]
    fn test_junction() {
        assert_eq!(
            apply("AND(A;B;C)", "AND").unwrap(),
            "«(A \\wedge B \\wedge C)»"
        );
        assert_eq!(apply("OR(A;B)", "OR").unwrap(), "«(A \\vee B)»");
    }

    #[test]
    fn test_if_cases() {
        assert_eq!(
            apply("IF(x<10;0;10)", "IF").unwrap(),
            "«\\begin{cases}0 & \\text { if } x<10,\\\\10 & \\text { other cases }\\end{cases}»"
        );
    }

    #[test]
    fn test_if_with_two_params_falls_back() {
        assert_eq!(apply("IF(a;b)", "IF").unwrap(), "« {a;b}»");
    }

    #[test]
    fn test_sum_range() {
        assert_eq!(
            apply("SUM(A1:B12)", "SUM").unwrap(),
            "«\\sum_ {A1}^{B12} {}»"
        );
    }

    #[test]
    fn test_sum_without_range_falls_back() {
        assert_eq!(apply("SUM(A1;B1)", "SUM").unwrap(), "«\\sum {A1;B1}»");
        assert_eq!(apply("SUM(A1:B1:C1)", "SUM").unwrap(), "«\\sum {A1:B1:C1}»");
    }

    #[test]
    fn test_exp_and_wrapped_commands() {
        assert_eq!(apply("EXP(X)", "EXP").unwrap(), "«e^{X}»");
        assert_eq!(apply("SIN(x)", "SIN").unwrap(), "«\\sin {(x)}»");
        assert_eq!(apply("SQRT(2)", "SQRT").unwrap(), "«\\sqrt {2}»");
    }

    #[test]
    fn test_power_call_form() {
        assert_eq!(apply("3^(9-1)", "^").unwrap(), "3«^ {9-1}»");
    }

    #[test]
    fn test_nested_call_rewrites_outermost_first() {
        let once = apply("ABS(ABS(x))", "ABS").unwrap();
        assert_eq!(once, "«|ABS(x)|»");
        assert_eq!(apply(&once, "ABS").unwrap(), "«|«|x|»|»");
    }

    #[test]
    fn test_missing_call() {
        assert_eq!(apply("x+1", "SIN"), None);
        assert_eq!(apply("SIN(x", "SIN"), None);
    }
}
