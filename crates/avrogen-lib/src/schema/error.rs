//! Per-attempt parse failures.

use std::ops::Range;

use avrogen_core::{FullName, NameError};

/// Why one parse attempt of a definition failed.
///
/// Every variant carries an optional byte span into the definition text so
/// diagnostics can point at the offending spot.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON: {message}")]
    Json {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("`{name}` is not defined")]
    UnknownType {
        name: String,
        span: Option<Range<usize>>,
    },

    #[error("`{name}` is already defined")]
    DuplicateName {
        name: FullName,
        span: Option<Range<usize>>,
    },

    #[error("{source}")]
    InvalidName {
        source: NameError,
        span: Option<Range<usize>>,
    },

    #[error("{message}")]
    InvalidSchema {
        message: String,
        span: Option<Range<usize>>,
    },
}

impl ParseError {
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ParseError::Json { span, .. }
            | ParseError::UnknownType { span, .. }
            | ParseError::DuplicateName { span, .. }
            | ParseError::InvalidName { span, .. }
            | ParseError::InvalidSchema { span, .. } => span.clone(),
        }
    }

    /// Failure caused by a name that may still be defined by a later pass.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, ParseError::UnknownType { .. })
    }

    /// Converts serde_json's 1-based line/column into a byte span.
    pub(crate) fn json(source: &str, err: &serde_json::Error) -> Self {
        let span = (err.line() > 0).then(|| {
            let line_start: usize = source
                .split_inclusive('\n')
                .take(err.line() - 1)
                .map(str::len)
                .sum();
            let offset = (line_start + err.column().saturating_sub(1)).min(source.len());
            offset..offset
        });
        ParseError::Json {
            message: err.to_string(),
            span,
        }
    }
}
