//! Infix operator rewriting (`a/b` → `\frac`, `a^(1/n)` → `\sqrt[n]`)

use super::brackets::{ends_with_open_bracket, remove_brackets, starts_with_open_bracket};
use super::scanner::{BoundaryScanner, TAG_CLOSE, TAG_OPEN};

/// LaTeX shape produced for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorForm {
    /// `latex {pre} {post}`
    Binary,
    /// `\sqrt [n]{pre}`, only when the exponent reads `1/n`
    Root,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorRule {
    pub symbol: &'static str,
    pub latex: &'static str,
    pub form: OperatorForm,
}

impl OperatorRule {
    pub const fn new(symbol: &'static str, latex: &'static str, form: OperatorForm) -> Self {
        Self {
            symbol,
            latex,
            form,
        }
    }
}

/// Rewrite the first occurrence of the rule's operator that has a LaTeX form.
///
/// A root rule skips occurrences not of the `x^(1/n)` shape, such as the
/// `^` inside an already converted `e^{x}`. Returns `None` when no
/// occurrence can be rewritten.
pub fn convert_operator(text: &str, rule: &OperatorRule) -> Option<String> {
    text.match_indices(rule.symbol)
        .find_map(|(pos, _)| rewrite_at(text, pos, rule))
}

fn rewrite_at(text: &str, pos: usize, rule: &OperatorRule) -> Option<String> {
    let op = rule.symbol;
    let op_end = pos + op.len();

    let mut start = scan_left(text, pos, op);
    let mut end = scan_right(text, op_end, op);
    let mut pre = &text[start..pos];
    let mut post = &text[op_end..end];

    // Whole expression already parenthesized: drop one layer, keep the span
    if starts_with_open_bracket(pre) && ends_with_open_bracket(post) {
        pre = &pre[1..];
        post = &post[..post.len() - 1];
    }
    // The bracket belongs to the surrounding text, leave it there
    if starts_with_open_bracket(pre) {
        pre = &pre[1..];
        start += 1;
    }
    if ends_with_open_bracket(post) {
        post = &post[..post.len() - 1];
        end -= 1;
    }

    let pre = remove_brackets(pre);
    let post = remove_brackets(post);

    let replacement = match rule.form {
        OperatorForm::Binary => format!(
            "{}{} {{{}}} {{{}}}{}",
            TAG_OPEN, rule.latex, pre, post, TAG_CLOSE
        ),
        OperatorForm::Root => {
            let index = post.strip_prefix("1/")?;
            format!("{} \\sqrt [{}]{{{}}}{}", TAG_OPEN, index, pre, TAG_CLOSE)
        }
    };

    log::debug!("operator {} rewrote {:?}", op, &text[start..end]);
    Some(splice(text, start, end, &replacement))
}

/// Byte index where the operand left of `pos` begins.
fn scan_left(text: &str, pos: usize, op: &str) -> usize {
    let mut scanner = BoundaryScanner::new(op);
    let mut depth = 0i32;
    let mut start = pos;

    for (i, c) in text[..pos].char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => depth -= 1,
            _ => {}
        }
        if depth == 0 && scanner.ends_operand(c) {
            break;
        }
        if depth < 0 {
            break;
        }
        start = i;
    }
    start
}

/// Byte index just past the operand right of `from`.
fn scan_right(text: &str, from: usize, op: &str) -> usize {
    let mut scanner = BoundaryScanner::new(op);
    let mut depth = 0i32;
    let mut end = from;

    for (i, c) in text[from..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 && scanner.ends_operand(c) {
            break;
        }
        if depth < 0 {
            break;
        }
        end = from + i + c.len_utf8();
    }
    end
}

pub(crate) fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    out
}
