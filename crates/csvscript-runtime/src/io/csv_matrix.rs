//! Comma-separated integer matrices: one row per line, no header, no quoting.
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{MatrixError, ParseIssue, Result};
use crate::io::scan::scan_shape;
use crate::math::{Matrix, MatrixBuilder};

/// Load a matrix from the CSV file at `path`.
pub fn load<T, P>(path: P) -> Result<Matrix<T>>
where
    T: FromStr,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| MatrixError::io(path, e))?;
    let matrix = load_from_str(&decode(bytes)?)?;
    log::debug!(
        "Loaded {}x{} matrix from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(matrix)
}

pub fn load_from_reader<T, R>(mut reader: R) -> Result<Matrix<T>>
where
    T: FromStr,
    R: Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| MatrixError::io("<reader>", e))?;
    load_from_str(&decode(bytes)?)
}

/// Bytes that are not UTF-8 cannot form an integer field, so they are
/// reported as a parse failure on the line that holds them.
fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        let bytes = e.as_bytes();
        let bad = e.utf8_error().valid_up_to();
        let line = bytes[..bad].iter().filter(|&&b| b == b'\n').count() + 1;
        let is_separator = |b: &u8| matches!(*b, b',' | b'\n' | b'\r');
        let start = bytes[..bad].iter().rposition(is_separator).map_or(0, |p| p + 1);
        let end = bytes[bad..]
            .iter()
            .position(is_separator)
            .map_or(bytes.len(), |p| bad + p);
        MatrixError::Parse {
            line,
            issue: ParseIssue::InvalidInteger(String::from_utf8_lossy(&bytes[start..end]).into_owned()),
        }
    })
}

/// Parse CSV text into a matrix.
///
/// The shape comes from [`scan_shape`]; every line must then carry exactly
/// that many fields (one optional trailing comma allowed) and the number of
/// non-blank lines must match the scanned row count.
pub fn load_from_str<T>(text: &str) -> Result<Matrix<T>>
where
    T: FromStr,
{
    let shape = scan_shape(text);
    if shape.is_empty() {
        return Err(MatrixError::Parse {
            line: 1,
            issue: ParseIssue::Empty,
        });
    }
    log::debug!("Scanned shape {}x{}", shape.rows, shape.cols);

    let mut builder = MatrixBuilder::with_shape(shape.rows, shape.cols)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| MatrixError::io("<csv>", e.into()))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_idx + 1);

        if builder.is_complete() {
            return Err(MatrixError::Parse {
                line,
                issue: ParseIssue::RowCount {
                    expected: shape.rows,
                    found: row_idx + 1,
                },
            });
        }

        let mut fields: Vec<&str> = record.iter().collect();
        if fields.len() == shape.cols + 1 && fields.last() == Some(&"") {
            fields.pop();
        }
        if fields.len() != shape.cols {
            return Err(MatrixError::Parse {
                line,
                issue: ParseIssue::FieldCount {
                    expected: shape.cols,
                    found: fields.len(),
                },
            });
        }

        let values = fields
            .iter()
            .map(|field| parse_field(field, line))
            .collect::<Result<Vec<T>>>()?;
        builder.push_row(values)?;
    }

    builder.finish()
}

fn parse_field<T: FromStr>(field: &str, line: usize) -> Result<T> {
    field.parse::<T>().map_err(|_| MatrixError::Parse {
        line,
        issue: ParseIssue::InvalidInteger(field.to_string()),
    })
}

/// Write `matrix` to `path`, replacing any existing file.
pub fn save<T, P>(path: P, matrix: &Matrix<T>) -> Result<()>
where
    T: Display,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MatrixError::io(path, e))?;
    write_to(BufWriter::new(file), matrix).map_err(|e| MatrixError::io(path, e))?;
    log::debug!(
        "Saved {}x{} matrix to {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(())
}

/// Serialize `matrix` as CSV lines terminated by `\n`.
pub fn write_to<T, W>(writer: W, matrix: &Matrix<T>) -> std::io::Result<()>
where
    T: Display,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    for row in matrix.rows_iter() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string<T: Display>(matrix: &Matrix<T>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    write_to(&mut buf, matrix)?;
    String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_separator_accepted() {
        let m: Matrix = load_from_str("1,2,\n3,4,\n").unwrap();
        assert_eq!(m.to_nested(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_crlf_input() {
        let m: Matrix = load_from_str("1,2\r\n3,4\r\n").unwrap();
        assert_eq!(m.shape(), (2, 2));
    }

    #[test]
    fn test_ragged_line_reports_field_count() {
        let err = load_from_str::<i64>("1,2\n3,4,5\n").unwrap_err();
        match err {
            MatrixError::Parse { line, issue } => {
                assert_eq!(line, 2);
                assert_eq!(
                    issue,
                    ParseIssue::FieldCount {
                        expected: 2,
                        found: 3
                    }
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_reports_row_count() {
        let err = load_from_str::<i64>("1,2\n\n3,4\n").unwrap_err();
        assert!(matches!(
            err,
            MatrixError::Parse {
                issue: ParseIssue::RowCount { expected: 3, found: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_non_utf8_field_is_a_parse_error() {
        let err = load_from_reader::<i64, _>(&b"1,\xff\n"[..]).unwrap_err();
        match err {
            MatrixError::Parse {
                line,
                issue: ParseIssue::InvalidInteger(field),
            } => {
                assert_eq!(line, 1);
                assert_eq!(field, "\u{FFFD}");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = load_from_reader::<i64, _>(&b"1,2\n3,4\xfe5\n"[..]).unwrap_err();
        assert!(matches!(err, MatrixError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_lone_cr_separates_rows() {
        let m: Matrix = load_from_str("1,2\r3,4\r").unwrap();
        assert_eq!(m.to_nested(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_whitespace_is_not_an_integer() {
        assert!(load_from_str::<i64>("1, 2\n").unwrap_err().is_parse());
    }

    #[test]
    fn test_negative_values() {
        let m: Matrix = load_from_str("-1,0\n7,-42").unwrap();
        assert_eq!(to_csv_string(&m).unwrap(), "-1,0\n7,-42\n");
    }
}
