//! Error types for config validation, asset ingestion and import.

use std::path::PathBuf;

use thiserror::Error;

/// Error codes for playground config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// C001: Document is not valid JSON
    MalformedJson,
    /// C002: Document root is not an object
    ExpectedObject,
    /// C003: Required field is missing
    MissingField,
    /// C004: Field has the wrong JSON type
    InvalidType,
    /// C005: Timestamp is not an ISO-8601 datetime
    InvalidDatetime,
    /// C006: Number is not finite
    NonFiniteNumber,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "C001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MalformedJson => "C001",
            ErrorCode::ExpectedObject => "C002",
            ErrorCode::MissingField => "C003",
            ErrorCode::InvalidType => "C004",
            ErrorCode::InvalidDatetime => "C005",
            ErrorCode::NonFiniteNumber => "C006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation issue with code, message, and dotted field path.
///
/// The path is empty for issues that concern the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Dotted path to the problematic field (e.g., "modelInfo.0.visible").
    pub path: String,
}

impl ValidationError {
    /// Creates an issue attached to the document root.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: String::new(),
        }
    }

    /// Creates an issue attached to a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Returns true if this issue concerns the document root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{}: {} (at {})", self.code, self.message, self.path)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for library operations.
#[derive(Debug, Error)]
pub enum FitroomError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Canonicalization error.
    #[error("canonicalization error: {0}")]
    Canonicalization(String),
}

/// Errors raised while ingesting a loaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// A morph target points past the end of its mesh's influence array.
    #[error(
        "morph target '{target}' on mesh '{mesh}' has index {index}, \
         but the mesh only has {influence_count} influence slot(s)"
    )]
    IndexOutOfRange {
        mesh: String,
        target: String,
        index: usize,
        influence_count: usize,
    },

    /// The asset or one of its morph targets has an empty name.
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },
}

/// Errors raised by the import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import file could not be read.
    #[error("failed to read import file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document failed validation; nothing was applied.
    #[error("config rejected with {} issue(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

impl ImportError {
    /// Returns the validation issues if this is a rejected document.
    pub fn issues(&self) -> &[ValidationError] {
        match self {
            ImportError::Invalid(issues) => issues,
            ImportError::Io { .. } => &[],
        }
    }
}
