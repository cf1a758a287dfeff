/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `moorepath` binary.
/// Every variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The edge or pair input could not be
///   read or decoded, so the engine never ran.
/// - Exit code **1**: engine failure. The engine ran and reported a fatal
///   error (negative cycle, invalid cost, broken invariant).
///
/// Notices such as "No paths found" are not errors and exit with 0.
use std::fmt;
use std::path::PathBuf;

/// All error conditions that the `moorepath` CLI can produce.
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
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Label of the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// Both the edge list and the pair list were asked to come from stdin.
    StdinConflict,

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// Label of the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input text is not a valid edge or pair document.
    InvalidInput {
        /// Label of the source.
        source: String,
        /// Decoder message, including line and column.
        detail: String,
    },

    // --- Exit code 1: engine failures ---
    /// The engine reported a fatal error; rows were discarded.
    EngineFailure {
        /// The engine's error message.
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
            | Self::StdinReadError { .. }
            | Self::StdinConflict
            | Self::IoError { .. }
            | Self::InvalidInput { .. } => 2,

            Self::EngineFailure { .. } => 1,
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
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::StdinConflict => {
                "error: only one of EDGES and --pairs may be read from stdin".to_owned()
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::InvalidInput { source, detail } => {
                format!("error: {source}: {detail}")
            }
            Self::EngineFailure { detail } => format!("error: {detail}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::path::PathBuf;

    use super::*;

    // ── exit_code ────────────────────────────────────────────────────────────

    #[test]
    fn read_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("edges.json"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/edges.json"),
            },
            CliError::FileTooLarge {
                source: "big.json".to_owned(),
                limit: 1024,
                actual: Some(2048),
            },
            CliError::InvalidUtf8 {
                source: "bad.json".to_owned(),
                byte_offset: 42,
            },
            CliError::StdinReadError {
                detail: "broken pipe".to_owned(),
            },
            CliError::StdinConflict,
            CliError::IoError {
                source: "edges.json".to_owned(),
                detail: "device full".to_owned(),
            },
        ];
        for e in &errors {
            assert_eq!(e.exit_code(), 2, "{e:?}");
        }
    }

    #[test]
    fn invalid_input_is_exit_2() {
        let e = CliError::InvalidInput {
            source: "edges.json".to_owned(),
            detail: "invalid edges at line 1, column 2: expected value".to_owned(),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn engine_failure_is_exit_1() {
        let e = CliError::EngineFailure {
            detail: "Negative cycle detected from source 1".to_owned(),
        };
        assert_eq!(e.exit_code(), 1);
    }

    // ── message content ──────────────────────────────────────────────────────

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("roads.json"),
        };
        let msg = e.message();
        assert!(msg.contains("roads.json"), "message: {msg}");
        assert!(msg.contains("not found"), "message: {msg}");
    }

    #[test]
    fn file_too_large_mentions_sizes() {
        let e = CliError::FileTooLarge {
            source: "big.json".to_owned(),
            limit: 1_000_000,
            actual: Some(2_000_000),
        };
        let msg = e.message();
        assert!(msg.contains("2000000"), "message: {msg}");
        assert!(msg.contains("1000000"), "message: {msg}");

        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 512,
            actual: None,
        };
        assert!(e.message().contains("512"));
    }

    #[test]
    fn engine_failure_message_is_passed_through() {
        let e = CliError::EngineFailure {
            detail: "Negative cycle detected from source 7".to_owned(),
        };
        assert_eq!(e.message(), "error: Negative cycle detected from source 7");
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::StdinConflict;
        assert_eq!(format!("{e}"), e.message());
    }
}
