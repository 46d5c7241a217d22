use thiserror::Error;

/// Errors raised while loading a raw document into the field layer.
///
/// Every load error carries the JSON pointer of the offending value so callers can
/// report it without re-walking the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A field declared as non-nullable is absent, null or unset.
    #[error("missing required field: {path}")]
    MissingField { path: String },
    /// A string could not be parsed into the declared representation (e.g. a date).
    #[error("malformed value at {path}: {message}")]
    Format { path: String, message: String },
    /// A raw value cannot be coerced into the declared kind.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A record declaration violates its own invariants (duplicate names).
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Convenience alias for results returned by the field layer.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// JSON pointer of the value that failed, when the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MissingField { path }
            | Error::Format { path, .. }
            | Error::TypeMismatch { path, .. } => Some(path.as_str()),
            Error::InvalidSchema(_) => None,
        }
    }
}
