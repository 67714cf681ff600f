//! Textual reader for upper-triangular distance files.
//!
//! The accepted format is one line per sample except the last: line `k`
//! (counting data lines from zero) holds the distances from sample `k` to
//! samples `k + 1 .. n`, separated by commas or whitespace. Blank lines
//! and lines starting with `#` are skipped. The sample count is inferred
//! from the number of data lines, so a file with `n - 1` data lines
//! describes `n` samples.
//!
//! Error positions are reported as 1-based line numbers over the raw
//! file, comments and blanks included, so they match what an editor
//! shows.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::persistence::errors::{PersistError, PersistResult};
use crate::projection::core::condensed::CondensedDistances;
use crate::projection::errors::ProjectionError;

/// Reads an upper-triangular distance text file into a condensed matrix.
///
/// # Errors
/// - [`PersistError::Io`]: the file could not be opened or read.
/// - [`PersistError::Malformed`]: a data line holds the wrong number of
///   values, a token does not parse as a number, or the file has no data
///   lines at all (reported at line 0).
/// - [`PersistError::InvalidValue`]: a parsed distance is negative or
///   non-finite.
pub fn read_distance_text(path: &Path) -> PersistResult<CondensedDistances> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    // First pass: keep data lines with their raw positions so counts can
    // be checked against the inferred sample count afterwards.
    let mut rows: Vec<(usize, String)> = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push((index + 1, trimmed.to_string()));
    }
    if rows.is_empty() {
        return Err(PersistError::Malformed {
            line: 0,
            reason: "no distance rows found".to_string(),
        });
    }

    let n = rows.len() + 1;
    let mut values = Vec::with_capacity(n * (n - 1) / 2);
    for (row, (line, text)) in rows.iter().enumerate() {
        let expected = n - 1 - row;
        let tokens: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() != expected {
            return Err(PersistError::Malformed {
                line: *line,
                reason: format!("expected {expected} values, found {}", tokens.len()),
            });
        }
        for token in tokens {
            let value: f64 = token.parse().map_err(|_| PersistError::Malformed {
                line: *line,
                reason: format!("unparseable value {token:?}"),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(PersistError::InvalidValue { line: *line, value });
            }
            values.push(value);
        }
    }

    CondensedDistances::from_parts(n, values).map_err(|err| match err {
        ProjectionError::LengthMismatch { expected, actual } => {
            PersistError::LengthMismatch { expected, actual }
        }
        other => PersistError::Malformed { line: 0, reason: other.to_string() },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing with mixed separators, comments, and blank lines.
    // - Line-accurate rejection of short rows, bad tokens, and invalid
    //   values.
    //
    // These tests intentionally DO NOT cover:
    // - The binary store (owned by the binary-module tests).
    // -------------------------------------------------------------------------

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    // Purpose
    // -------
    // A well-formed triangular file with comments, blank lines, and mixed
    // comma/whitespace separators parses into the expected matrix.
    //
    // Given
    // -----
    // - Four samples described by three data lines.
    //
    // Expect
    // ------
    // - n = 4 and every pairwise lookup matching the file.
    #[test]
    fn parses_triangular_file_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ok.txt",
            "# pairwise distances, upper triangle\n\
             1.0, 2.0, 3.5\n\
             \n\
             1.5\t2.5\n\
             0.5\n",
        );

        let distances = read_distance_text(&path).unwrap();

        assert_eq!(distances.n(), 4);
        assert_eq!(distances.get(0, 1), 1.0);
        assert_eq!(distances.get(0, 3), 3.5);
        assert_eq!(distances.get(1, 2), 1.5);
        assert_eq!(distances.get(2, 3), 0.5);
    }

    // Purpose
    // -------
    // A data line with the wrong number of values is reported at its real
    // file position, comments included in the count.
    //
    // Given
    // -----
    // - A comment line followed by rows where the second data row (file
    //   line 3) holds one value instead of two.
    //
    // Expect
    // ------
    // - Malformed at line 3 naming both counts.
    #[test]
    fn short_row_is_reported_at_its_file_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "short.txt", "# header\n1.0 2.0 3.0\n1.5\n0.5\n");

        let err = read_distance_text(&path).unwrap_err();

        assert_eq!(
            err,
            PersistError::Malformed { line: 3, reason: "expected 2 values, found 1".to_string() }
        );
    }

    // Purpose
    // -------
    // Non-numeric tokens and invalid numeric values get distinct errors.
    //
    // Given
    // -----
    // - One file with a textual token; one with a negative distance.
    //
    // Expect
    // ------
    // - Malformed naming the token; InvalidValue carrying the number.
    #[test]
    fn bad_tokens_and_values_are_distinguished() {
        let dir = tempfile::tempdir().unwrap();

        let unparseable = write_file(&dir, "word.txt", "1.0 abc\n2.0\n");
        let err = read_distance_text(&unparseable).unwrap_err();
        assert_eq!(
            err,
            PersistError::Malformed { line: 1, reason: "unparseable value \"abc\"".to_string() }
        );

        let negative = write_file(&dir, "negative.txt", "1.0 2.0\n-3.0\n");
        let err = read_distance_text(&negative).unwrap_err();
        assert_eq!(err, PersistError::InvalidValue { line: 2, value: -3.0 });
    }

    // Purpose
    // -------
    // A file with nothing but comments has no samples to offer.
    //
    // Given
    // -----
    // - Comments and blank lines only.
    //
    // Expect
    // ------
    // - Malformed at line 0 with the whole-file reason.
    #[test]
    fn comment_only_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.txt", "# nothing here\n\n# still nothing\n");

        let err = read_distance_text(&path).unwrap_err();

        assert_eq!(
            err,
            PersistError::Malformed { line: 0, reason: "no distance rows found".to_string() }
        );
    }
}
