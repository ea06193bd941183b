//! Single-pass shape inference over raw CSV text.

/// Rows and columns inferred from raw text before any allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Infer the shape of `text`.
///
/// `cols` is one more than the number of separators on the first line, and
/// `rows` counts line boundaries plus one for an unterminated final line.
/// Later lines are not measured here; the codec checks them while parsing.
/// A line boundary is `\n`, `\r\n` or a lone `\r`.
/// A comma directly before a line boundary or end of input is a trailing
/// separator and does not open a new column.
pub fn scan_shape(text: &str) -> Shape {
    let mut shape = Shape::default();
    let mut commas = 0usize;
    let mut pending = false;
    let mut first_line_done = false;

    let mut bytes = text.bytes().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b',' => {
                let trailing = matches!(bytes.peek(), None | Some(b'\n') | Some(b'\r'));
                if !trailing {
                    commas += 1;
                }
                pending = true;
            }
            b'\r' if bytes.peek() == Some(&b'\n') => {}
            b'\n' | b'\r' => {
                shape.rows += 1;
                if !first_line_done {
                    shape.cols = commas + 1;
                    first_line_done = true;
                }
                commas = 0;
                pending = false;
            }
            _ => pending = true,
        }
    }

    if pending {
        shape.rows += 1;
        if !first_line_done {
            shape.cols = commas + 1;
        }
    }

    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: usize, cols: usize) -> Shape {
        Shape { rows, cols }
    }

    #[test]
    fn test_terminated_lines() {
        assert_eq!(scan_shape("1,2\n3,4\n"), shape(2, 2));
    }

    #[test]
    fn test_unterminated_last_line_counts() {
        assert_eq!(scan_shape("1,2,3\n4,5,6"), shape(2, 3));
        assert_eq!(scan_shape("42"), shape(1, 1));
    }

    #[test]
    fn test_cols_from_first_line_only() {
        assert_eq!(scan_shape("1\n2,3,4\n"), shape(2, 1));
    }

    #[test]
    fn test_trailing_separator_ignored() {
        assert_eq!(scan_shape("1,2,\n3,4,\n"), shape(2, 2));
        assert_eq!(scan_shape("1,2,"), shape(1, 2));
    }

    #[test]
    fn test_crlf_boundaries() {
        assert_eq!(scan_shape("1,2\r\n3,4\r\n"), shape(2, 2));
        assert_eq!(scan_shape("1,2,\r\n"), shape(1, 2));
    }

    #[test]
    fn test_lone_cr_is_a_boundary() {
        assert_eq!(scan_shape("1,2\r3,4\r"), shape(2, 2));
        assert_eq!(scan_shape("1,2,\r3,4"), shape(2, 2));
    }

    #[test]
    fn test_empty_text() {
        assert!(scan_shape("").is_empty());
    }

    #[test]
    fn test_blank_line_still_counts_as_boundary() {
        assert_eq!(scan_shape("1,2\n\n3,4\n"), shape(3, 2));
    }
}
