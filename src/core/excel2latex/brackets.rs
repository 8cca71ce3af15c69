//! Parenthesis balance helpers used when trimming operands.

/// True if `s` starts with `(` whose matching `)` lies beyond the end of `s`.
pub fn starts_with_open_bracket(s: &str) -> bool {
    if !s.starts_with('(') {
        return false;
    }

    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth <= 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

/// True if `s` ends with `)` whose matching `(` lies before the start of `s`.
pub fn ends_with_open_bracket(s: &str) -> bool {
    if !s.ends_with(')') {
        return false;
    }

    let mut depth = 0i32;
    for c in s.chars().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth <= 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

/// Strip one redundant pair of parentheses enclosing the whole of `s`.
///
/// `" (a+b) "` becomes `"a+b"`. Anything else, including `(a)+(b)` and
/// unbalanced input, is returned unchanged.
pub fn remove_brackets(s: &str) -> &str {
    let trimmed = s.trim();
    if !trimmed.starts_with('(') || !trimmed.ends_with(')') {
        return s;
    }

    let mut depth = 0i32;
    let last = trimmed.len() - 1;
    for (i, c) in trimmed.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return s;
                }
                // the opening bracket closes early: (a)+(b)
                if depth == 0 && i != last {
                    return s;
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return s;
    }
    &trimmed[1..last]
}
