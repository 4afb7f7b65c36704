/// File and stdin reading with size enforcement and UTF-8 validation.
///
/// All input I/O of the `iban` binary goes through here; `iban-core` itself
/// only ever reads its country dataset.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - All I/O errors become [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use crate::cli::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// [`CliError`] (exit code 2) if the file is missing, unreadable, larger than
/// `max_size`, or not UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Splits list input into IBANs: one per line, surrounding whitespace
/// trimmed, blank lines and `#` comments skipped.
pub fn ibans_from_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads stdin, capped at `max_size` bytes.
///
/// One byte past the cap is requested so that "exactly at the limit" can be
/// told apart from "over the limit".
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let mut buf: Vec<u8> = Vec::new();
    std::io::stdin()
        .lock()
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| CliError::IoError {
            source: "stdin".to_owned(),
            detail: e.to_string(),
        })?;

    if buf.len() as u64 > max_size {
        return Err(CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: max_size,
            actual: None,
        });
    }

    bytes_to_string(buf, "-")
}

// ---------------------------------------------------------------------------
// UTF-8 conversion
// ---------------------------------------------------------------------------

fn bytes_to_string(bytes: Vec<u8>, source_label: &str) -> Result<String, CliError> {
    String::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: source_label.to_owned(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(contents).expect("write temp file");
        f
    }

    #[test]
    fn read_valid_utf8_file() {
        let f = temp_file_with(b"NL20INGB0001234567\n");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let result = read_input(&source, 1024).expect("should read file");
        assert_eq!(result, "NL20INGB0001234567\n");
    }

    #[test]
    fn file_at_limit_is_accepted() {
        let f = temp_file_with(b"12345");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        assert!(read_input(&source, 5).is_ok());
    }

    #[test]
    fn file_over_limit_is_rejected() {
        let f = temp_file_with(b"123456");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        match read_input(&source, 5) {
            Err(CliError::FileTooLarge {
                limit, actual, ..
            }) => {
                assert_eq!(limit, 5);
                assert_eq!(actual, Some(6));
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let source = PathOrStdin::Path(PathBuf::from("/nonexistent/ibans.txt"));
        match read_input(&source, 1024) {
            Err(CliError::FileNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/ibans.txt"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let f = temp_file_with(b"NL\xff\xfe");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        match read_input(&source, 1024) {
            Err(CliError::InvalidUtf8 { byte_offset, .. }) => assert_eq!(byte_offset, 2),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }

    #[test]
    fn lines_are_trimmed_and_filtered() {
        let content = "# export\nNL20INGB0001234567\r\n\n  GB82WEST12345698765432  \n";
        assert_eq!(
            ibans_from_lines(content),
            vec!["NL20INGB0001234567", "GB82WEST12345698765432"]
        );
    }

    #[test]
    fn empty_content_has_no_ibans() {
        assert!(ibans_from_lines("").is_empty());
        assert!(ibans_from_lines("\n\n# nothing\n").is_empty());
    }
}
