//! Error types for validation and JSON codec operations.

use std::fmt;

/// Machine-readable reason a single field failed validation.
///
/// The connectivity records never produce these themselves; they come from
/// caller-supplied element rules and [`crate::validate_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Value does not conform to its declared named format.
    InvalidFormat,
    /// Field declares a format the registry does not know.
    UnknownFormat,
    /// A required value is missing.
    Required,
    /// Any other declared constraint.
    Constraint,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::UnknownFormat => "unknown_format",
            Self::Required => "required",
            Self::Constraint => "constraint",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single labeled field failure.
///
/// `path` is dotted (`field.index.field...`) and grows from the leaf upwards
/// as the error is propagated through enclosing list fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", display_path(.path))]
pub struct FieldError {
    pub path: String,
    pub code: ErrorCode,
    pub message: String,
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

impl FieldError {
    pub fn new(path: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }

    /// Prepend `name` to this error's path.
    pub fn prefixed(mut self, name: &str) -> Self {
        self.path = join_path(name, &self.path);
        self
    }
}

/// Aggregate of validation failures collected across a structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositeError {
    pub errors: Vec<ValidationError>,
}

impl CompositeError {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Prepend `name` to every path contained in this composite.
    pub fn prefixed(self, name: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|e| e.prefixed(name))
                .collect(),
        }
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failure list:")?;
        for leaf in self.errors.iter().flat_map(ValidationError::leaves) {
            write!(f, "\n{leaf}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositeError {}

/// Validation failure returned as data by `validate` / `context_validate`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Composite(#[from] CompositeError),
}

impl ValidationError {
    /// Re-label this error (recursively, for composites) under `name`.
    pub fn prefixed(self, name: &str) -> Self {
        match self {
            Self::Field(e) => Self::Field(e.prefixed(name)),
            Self::Composite(c) => Self::Composite(c.prefixed(name)),
        }
    }

    /// All individual field errors, depth-first in collection order.
    pub fn leaves(&self) -> Vec<&FieldError> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FieldError>) {
        match self {
            Self::Field(e) => out.push(e),
            Self::Composite(c) => {
                for e in &c.errors {
                    e.collect_leaves(out);
                }
            }
        }
    }

    /// Dotted paths of every field error.
    pub fn paths(&self) -> Vec<&str> {
        self.leaves().into_iter().map(|e| e.path.as_str()).collect()
    }
}

pub(crate) fn join_path(name: &str, rest: &str) -> String {
    match (name.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => name.to_string(),
        (false, false) => format!("{name}.{rest}"),
    }
}

/// Class of JSON decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Input is not syntactically valid JSON.
    Syntax,
    /// Input ended before a complete value was read.
    Eof,
    /// Valid JSON whose shape does not match the record.
    Data,
    /// Reader failure.
    Io,
}

impl From<serde_json::error::Category> for DecodeErrorKind {
    fn from(category: serde_json::error::Category) -> Self {
        use serde_json::error::Category;
        match category {
            Category::Syntax => Self::Syntax,
            Category::Eof => Self::Eof,
            Category::Data => Self::Data,
            Category::Io => Self::Io,
        }
    }
}

/// Errors from encoding or decoding a record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to decode {model}: {kind:?} error at line {line}, column {column}: {source}")]
    Decode {
        model: &'static str,
        kind: DecodeErrorKind,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {model}: {source}")]
    Encode {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl CodecError {
    pub(crate) fn decode(model: &'static str, source: serde_json::Error) -> Self {
        Self::Decode {
            model,
            kind: source.classify().into(),
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    pub(crate) fn encode(model: &'static str, source: serde_json::Error) -> Self {
        Self::Encode { model, source }
    }

    /// Decode failure class, if this is a decode error.
    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(*kind),
            Self::Encode { .. } => None,
        }
    }

    /// True for malformed or truncated input, as opposed to a shape mismatch.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.decode_kind(),
            Some(DecodeErrorKind::Syntax | DecodeErrorKind::Eof)
        )
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
