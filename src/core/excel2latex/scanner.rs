//! Operand boundary detection
//!
//! Already converted fragments are wrapped in a pair of marker characters.
//! While a scan is inside such a pair it never reports a boundary, so a
//! rewritten `\frac {a} {b}` behaves like a single opaque operand.

/// Opens a fragment that later passes must treat as opaque.
pub const TAG_OPEN: char = '«';
/// Closes a fragment opened by [`TAG_OPEN`].
pub const TAG_CLOSE: char = '»';

/// Classifies characters as operand content or operand terminators.
///
/// A scanner is created per directional scan, so the marker balance of a
/// leftward scan never leaks into the rightward one.
#[derive(Debug, Clone)]
pub struct BoundaryScanner<'a> {
    op: &'a str,
    tags: i32,
}

impl<'a> BoundaryScanner<'a> {
    pub fn new(op: &'a str) -> Self {
        Self { op, tags: 0 }
    }

    /// Feed the next character; returns true if it ends the operand.
    pub fn ends_operand(&mut self, c: char) -> bool {
        if c == TAG_OPEN {
            self.tags += 1;
        }
        if c == TAG_CLOSE {
            self.tags -= 1;
        }

        if self.tags != 0 {
            return false;
        }

        match c {
            '+' | '-' | '/' | '*' | '=' | '{' | '}' | '\\' => true,
            // a/b^c keeps b^c together as the divisor
            '^' => self.op != "/",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_terminate() {
        let mut scanner = BoundaryScanner::new("/");
        for c in ['+', '-', '/', '*', '=', '{', '}', '\\'] {
            assert!(scanner.ends_operand(c), "{:?} should end the operand", c);
        }
        assert!(!scanner.ends_operand('x'));
        assert!(!scanner.ends_operand('('));
    }

    #[test]
    fn test_caret_depends_on_operator() {
        assert!(!BoundaryScanner::new("/").ends_operand('^'));
        assert!(BoundaryScanner::new("^").ends_operand('^'));
    }

    #[test]
    fn test_markers_make_content_opaque() {
        let mut scanner = BoundaryScanner::new("/");
        assert!(!scanner.ends_operand(TAG_OPEN));
        assert!(!scanner.ends_operand('+'));
        assert!(!scanner.ends_operand('\\'));
        assert!(!scanner.ends_operand(TAG_CLOSE));
        assert!(scanner.ends_operand('+'));
    }

    #[test]
    fn test_leftward_scan_sees_close_marker_first() {
        let mut scanner = BoundaryScanner::new("/");
        assert!(!scanner.ends_operand(TAG_CLOSE));
        assert!(!scanner.ends_operand('}'));
        assert!(!scanner.ends_operand(TAG_OPEN));
        assert!(scanner.ends_operand('-'));
    }
}
