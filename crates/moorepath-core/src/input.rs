/// Decoding of edge lists and explicit pair lists from JSON text.
///
/// Both documents are top-level JSON arrays of objects:
///
/// ```json
/// [{"id": 1, "source": 1, "target": 2, "cost": 1.5, "reverse_cost": 2.0}]
/// [{"source": 1, "target": 3}]
/// ```
///
/// `reverse_cost` is optional. Unknown fields are ignored so that exports
/// from other tools with extra columns load unchanged. This module never
/// touches the filesystem; callers hand it text they have already read.
use thiserror::Error;

use crate::records::{EdgeRecord, Pair};

/// Errors produced while decoding input documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The text is not a valid document of the expected shape.
    #[error("invalid {what} at line {line}, column {column}: {message}")]
    Json {
        /// Which document was being decoded (`"edges"` or `"pairs"`).
        what: &'static str,
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Decoder message.
        message: String,
    },
}

impl InputError {
    fn json(what: &'static str, e: &serde_json::Error) -> Self {
        InputError::Json {
            what,
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

/// Decodes a JSON array of edge objects.
///
/// # Errors
///
/// Returns [`InputError::Json`] when the text is not an array of edges.
pub fn parse_edges(text: &str) -> Result<Vec<EdgeRecord>, InputError> {
    let edges: Vec<EdgeRecord> =
        serde_json::from_str(text).map_err(|e| InputError::json("edges", &e))?;
    tracing::debug!(count = edges.len(), "decoded edges");
    Ok(edges)
}

/// Decodes a JSON array of `{"source", "target"}` objects.
///
/// # Errors
///
/// Returns [`InputError::Json`] when the text is not an array of pairs.
pub fn parse_pairs(text: &str) -> Result<Vec<Pair>, InputError> {
    let pairs: Vec<Pair> = serde_json::from_str(text).map_err(|e| InputError::json("pairs", &e))?;
    tracing::debug!(count = pairs.len(), "decoded pairs");
    Ok(pairs)
}
