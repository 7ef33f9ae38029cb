//! Error types for the planner engine.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    /// Configuration failed schema validation
    #[error("Invalid configuration field '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
    /// Persisted configuration carries a schema tag we cannot migrate from
    #[error("Unsupported configuration version '{version}'")]
    UnsupportedVersion { version: String },
    /// Page enumeration preconditions violated
    #[error("Invalid calendar range: {reason}")]
    InvalidRange { reason: String },
    /// The loaded file does not carry the requested attachment
    #[error("Attachment '{name}' not found")]
    AttachmentNotFound { name: String },
    /// The loaded file or its attachment could not be decoded
    #[error("Malformed attachment: {reason}")]
    AttachmentMalformed { reason: String },
    /// Calendar arithmetic left the supported date range
    #[error("Date arithmetic error: {source}")]
    Date {
        #[from]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// PDF container errors raised while writing a document
    #[error("PDF error: {message}")]
    Pdf {
        message: String,
        #[source]
        source: lopdf::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
}

/// Builder for creating configuration validation errors.
pub struct InvalidConfigurationBuilder {
    field: String,
}

impl InvalidConfigurationBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> DaybookError {
        DaybookError::InvalidConfiguration {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl DaybookError {
    /// Creates a builder for configuration validation errors.
    pub fn invalid_configuration(field: impl Into<String>) -> InvalidConfigurationBuilder {
        InvalidConfigurationBuilder::new(field)
    }

    /// Creates an invalid range error.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Creates a malformed attachment error.
    pub fn attachment_malformed(reason: impl fmt::Display) -> Self {
        Self::AttachmentMalformed {
            reason: reason.to_string(),
        }
    }

    /// Name of the offending configuration field, if this is a validation
    /// error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Specialized extension trait for PDF-related Results.
pub trait PdfResultExt<T> {
    /// Map lopdf errors with a message.
    fn pdf_context(self, message: &str) -> Result<T>;
}

impl<T> PdfResultExt<T> for std::result::Result<T, lopdf::Error> {
    fn pdf_context(self, message: &str) -> Result<T> {
        self.map_err(|source| DaybookError::Pdf {
            message: message.to_string(),
            source,
        })
    }
}

/// Specialized extension trait for file-system Results.
pub trait FileSystemResultExt<T> {
    /// Attach the path that was being accessed.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> FileSystemResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| DaybookError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Result type alias for daybook operations
pub type Result<T> = std::result::Result<T, DaybookError>;
