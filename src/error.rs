//! Typed failure kinds for the ETL pipelines.
//!
//! Fallible functions in this crate return [`anyhow::Result`] and attach context as
//! errors bubble up. The kinds a caller may want to branch on are raised as
//! [`EtlError`] values, which survive the trip through `anyhow` and can be recovered
//! with [`EtlError::kind_of`] or `err.downcast_ref::<EtlError>()`.
//!
//! A `VALUE` cell that cannot be read as a number is not an error at all: the
//! transforms turn it into a null and keep going.

use thiserror::Error;

/// Failures that abort a dataset's pipeline.
#[derive(Debug, Error)]
pub enum EtlError {
    /// A required input path, object or glob resolved to nothing.
    #[error("source unavailable: {location}")]
    SourceUnavailable { location: String },

    /// The header is missing, unparseable, or lacks required columns.
    #[error("malformed input in {location}: {reason}")]
    MalformedInput { location: String, reason: String },

    /// An output artifact could not be written.
    #[error("failed to write {location}: {reason}")]
    WriteFailure { location: String, reason: String },
}

/// Discriminant of [`EtlError`], handy in tests and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    MalformedInput,
    WriteFailure,
}

impl EtlError {
    pub fn source_unavailable(location: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
        }
    }

    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn write_failure(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::WriteFailure {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
        }
    }

    /// Find the first [`EtlError`] in an `anyhow` chain and return its kind.
    #[must_use]
    pub fn kind_of(err: &anyhow::Error) -> Option<ErrorKind> {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<Self>())
            .map(Self::kind)
    }
}
