//! JSON parsing and candidate-file discovery

pub mod directory;
pub mod filter;

use crate::error::{MergeError, MergeResult, ParseError, ParseResult};
use serde_json::Value;
use std::path::Path;

/// Parse JSON from a string. Numbers keep their exact source text.
pub fn parse_from_string(content: &str) -> ParseResult<Value> {
    serde_json::from_str(content).map_err(|e| {
        let location = error_location(&e);
        ParseError::new(strip_position(&e, location), location)
    })
}

/// Read a whole file as UTF-8. Unlike a parse failure this is fatal: a file that
/// cannot be opened or decoded aborts the run.
pub fn read_source(path: &Path) -> MergeResult<String> {
    std::fs::read_to_string(path).map_err(|e| MergeError::from_io(e, path))
}

/// serde_json reports line 0 when the error is not tied to a position
fn error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    if error.line() == 0 {
        None
    } else {
        Some((error.line(), error.column()))
    }
}

/// serde_json appends "at line X column Y" to its messages; ParseError renders the
/// location itself.
fn strip_position(error: &serde_json::Error, location: Option<(usize, usize)>) -> String {
    let message = error.to_string();
    match location {
        Some((line, col)) => message
            .strip_suffix(&format!(" at line {} column {}", line, col))
            .map(str::to_string)
            .unwrap_or(message),
        None => message,
    }
}
