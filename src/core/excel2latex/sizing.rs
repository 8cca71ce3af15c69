//! Depth-proportional sizing of the remaining literal parentheses.

/// LaTeX size command for a bracket at the given nesting level.
///
/// Level 1 (innermost) stays unsized; 6 and above saturate at `\Bigg`.
pub fn size_prefix(depth: i32) -> &'static str {
    match depth {
        1 => "",
        2 => "\\big",
        3 => "\\Big",
        4 => "\\bigg",
        _ => "\\Bigg",
    }
}

/// Size every closed top-level parenthesis group in `text`.
///
/// Text outside groups, a `)` without an opening partner, and a trailing
/// group that never closes pass through unchanged.
pub fn size_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut part = String::new();
    let mut depth = 0i32;
    let mut max_depth = 0i32;

    for c in text.chars() {
        part.push(c);
        match c {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' if depth == 0 => {
                // Stray `)`: everything so far stays literal
                out.push_str(&part);
                part.clear();
                max_depth = 0;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    out.push_str(&size_group(&part, max_depth));
                    part.clear();
                    max_depth = 0;
                }
            }
            _ => {}
        }
    }

    out.push_str(&part);
    out
}

fn size_group(group: &str, max_depth: i32) -> String {
    let mut out = String::with_capacity(group.len() + 8);
    let mut depth = max_depth;

    for c in group.chars() {
        match c {
            '(' => {
                out.push_str(size_prefix(depth));
                out.push(c);
                depth -= 1;
            }
            ')' => {
                depth += 1;
                out.push_str(size_prefix(depth));
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
