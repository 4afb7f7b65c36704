/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `iban` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: the tool could not run at all (unreadable input file,
///   missing or corrupt country dataset).
/// - Exit code **1**: the tool ran but the answer is negative (an invalid
///   IBAN, nothing to build, an unknown country).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `iban` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (`None` for stdin).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// Any other I/O error, including failures writing to stdout.
    IoError {
        /// A human-readable label for the stream or file.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The country rules could not be loaded.
    DatasetLoad {
        /// Where the rules were loaded from.
        source: String,
        /// The error and its causes, joined by `": "`.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// At least one IBAN did not validate.
    ///
    /// The outcomes have already been printed; this variant exists so `main`
    /// can exit with code 1.
    InvalidIbans {
        /// Number of IBANs that failed.
        invalid: usize,
        /// Number of IBANs checked.
        total: usize,
    },

    /// The country code has no rule in the dataset.
    UnknownCountry {
        /// The code that was looked up.
        code: String,
    },

    /// No IBAN or check digits could be produced from the input.
    CannotConstruct {
        /// Why.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::IoError { .. }
            | Self::DatasetLoad { .. } => 2,

            Self::InvalidIbans { .. }
            | Self::UnknownCountry { .. }
            | Self::CannotConstruct { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::DatasetLoad { source, detail } => {
                format!("error: cannot load country rules from {source}: {detail}")
            }
            Self::InvalidIbans { invalid, total } => {
                format!("error: {invalid} of {total} IBAN(s) invalid")
            }
            Self::UnknownCountry { code } => {
                format!("error: no IBAN rule for country code {code:?}")
            }
            Self::CannotConstruct { detail } => {
                format!("error: cannot construct: {detail}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

/// Flattens an error and its `source()` chain into one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut cause = err.source();
    while let Some(e) = cause {
        parts.push(e.to_string());
        cause = e.source();
    }
    parts.join(": ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("ibans.txt"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/ibans.txt"),
            },
            CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: 10,
                actual: None,
            },
            CliError::InvalidUtf8 {
                source: "ibans.txt".to_owned(),
                byte_offset: 3,
            },
            CliError::IoError {
                source: "stdout".to_owned(),
                detail: "broken pipe".to_owned(),
            },
            CliError::DatasetLoad {
                source: "rules.json".to_owned(),
                detail: "missing".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 2, "{e}");
        }
    }

    #[test]
    fn logical_failures_are_exit_1() {
        let errors = [
            CliError::InvalidIbans {
                invalid: 1,
                total: 2,
            },
            CliError::UnknownCountry {
                code: "US".to_owned(),
            },
            CliError::CannotConstruct {
                detail: "empty account".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 1, "{e}");
        }
    }

    #[test]
    fn file_too_large_with_actual_mentions_sizes() {
        let e = CliError::FileTooLarge {
            source: "big.txt".to_owned(),
            limit: 1_000_000,
            actual: Some(2_000_000),
        };
        let msg = e.message();
        assert!(msg.contains("2000000"), "message: {msg}");
        assert!(msg.contains("1000000"), "message: {msg}");
    }

    #[test]
    fn unknown_country_message_contains_code() {
        let e = CliError::UnknownCountry {
            code: "KR".to_owned(),
        };
        assert!(e.message().contains("\"KR\""), "message: {}", e.message());
    }

    #[test]
    fn invalid_ibans_message_has_counts() {
        let e = CliError::InvalidIbans {
            invalid: 2,
            total: 5,
        };
        assert_eq!(e.message(), "error: 2 of 5 IBAN(s) invalid");
    }

    #[test]
    fn dataset_load_message_names_source() {
        let e = CliError::DatasetLoad {
            source: "bundled dataset".to_owned(),
            detail: "bad JSON".to_owned(),
        };
        assert_eq!(
            e.message(),
            "error: cannot load country rules from bundled dataset: bad JSON"
        );
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("x.txt"),
        };
        assert_eq!(format!("{e}"), e.message());
    }

    #[test]
    fn error_chain_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = iban_core::LoadError::Read {
            path: PathBuf::from("rules.json"),
            source: io,
        };
        let chain = error_chain(&err);
        assert!(chain.contains("rules.json"), "{chain}");
        assert!(chain.ends_with("no such file"), "{chain}");
    }
}
