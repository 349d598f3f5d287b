//! Error handling for the preprocessor
//!
//! Every failure is fatal to a run. The library returns the first error it
//! hits and the caller decides how to report it and which exit status to use.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 1-based position of a directive's opening marker in the input text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Compute line/column for a byte offset into `source`
    pub fn from_byte_offset(source: &str, offset: usize) -> Self {
        Self::new(1, 1).advance(&source[..offset.min(source.len())])
    }

    /// Position reached after reading `text` starting from `self`
    pub fn advance(self, text: &str) -> Self {
        let mut line = self.line;
        let mut column = self.column;

        for c in text.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Main error type for a preprocessing run
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("include: File {requested} could not be found (full path: {}) ({location})", .resolved.display())]
    UnresolvedInclude {
        requested: String,
        resolved: PathBuf,
        location: Location,
    },

    #[error("No definition found for variable {name} ({location})")]
    UndefinedVariable { name: String, location: Location },

    #[error("Syntax error for {text} ({location})")]
    UnrecognizedDirective { text: String, location: Location },

    #[error("include: Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Stable, machine-readable error category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnresolvedInclude,
    UndefinedVariable,
    UnrecognizedDirective,
    Io,
}

impl PreprocessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreprocessError::UnresolvedInclude { .. } => ErrorKind::UnresolvedInclude,
            PreprocessError::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
            PreprocessError::UnrecognizedDirective { .. } => ErrorKind::UnrecognizedDirective,
            PreprocessError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Where in the input the failing directive started, if known
    pub fn location(&self) -> Option<Location> {
        match self {
            PreprocessError::UnresolvedInclude { location, .. }
            | PreprocessError::UndefinedVariable { location, .. }
            | PreprocessError::UnrecognizedDirective { location, .. } => Some(*location),
            PreprocessError::Io { .. } => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::from(self)
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Serializable form of an error, used for `--error-format json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl From<&PreprocessError> for Diagnostic {
    fn from(error: &PreprocessError) -> Self {
        let location = error.location();
        Self {
            kind: error.kind(),
            message: error.to_string(),
            line: location.map(|l| l.line),
            column: location.map(|l| l.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_byte_offset() {
        let source = "first\nsecond {% X %}";
        assert_eq!(Location::from_byte_offset(source, 0), Location::new(1, 1));
        assert_eq!(Location::from_byte_offset(source, 13), Location::new(2, 8));
    }

    #[test]
    fn test_advance_matches_offset_lookup() {
        let source = "ab\ncd {% X %}\n\n  {% Y %}";
        let first = source.find("{% X").unwrap();
        let second = source.find("{% Y").unwrap();

        let at_first = Location::new(1, 1).advance(&source[..first]);
        let at_second = at_first.advance(&source[first..second]);

        assert_eq!(at_first, Location::from_byte_offset(source, first));
        assert_eq!(at_second, Location::from_byte_offset(source, second));
        assert_eq!(at_second, Location::new(4, 3));
    }

    #[test]
    fn test_messages_name_offending_input() {
        let err = PreprocessError::UnresolvedInclude {
            requested: "missing.md".to_string(),
            resolved: PathBuf::from("/docs/missing.md"),
            location: Location::new(3, 1),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.md"));
        assert!(msg.contains("/docs/missing.md"));
        assert!(msg.contains("line 3, column 1"));

        let err = PreprocessError::UndefinedVariable {
            name: "X".to_string(),
            location: Location::new(1, 1),
        };
        assert!(err.to_string().starts_with("No definition found for variable X"));
    }

    #[test]
    fn test_diagnostic_json() {
        let err = PreprocessError::UnrecognizedDirective {
            text: "a b c".to_string(),
            location: Location::new(2, 5),
        };
        let json = serde_json::to_value(err.to_diagnostic()).unwrap();
        assert_eq!(json["kind"], "unrecognized_directive");
        assert_eq!(json["line"], 2);
        assert_eq!(json["column"], 5);
        assert!(json["message"].as_str().unwrap().contains("a b c"));
    }
}
