//! Error types and handling infrastructure for HEIC conversion

use anyhow::Error;
use std::path::PathBuf;

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("No files selected")]
    NoInputSelected,

    #[error("Failed to decode '{name}': {message}")]
    Decode { name: String, message: String },

    #[error("Failed to encode '{name}': {message}")]
    Encode { name: String, message: String },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Nothing to archive")]
    EmptyArchiveRequest,

    #[error("None of the {failed} selected file(s) could be converted")]
    NothingConverted { failed: usize },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConversionErrorKind {
    pub fn decode(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn encode(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn archive(message: String) -> Self {
        Self::Archive { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn no_input_selected() -> Self {
        Self::conversion(ConversionErrorKind::NoInputSelected)
    }

    pub fn empty_archive_request() -> Self {
        Self::conversion(ConversionErrorKind::EmptyArchiveRequest)
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// The kind of a typed conversion error, if this is one
    pub fn kind(&self) -> Option<&ConversionErrorKind> {
        match self {
            Self::Conversion { kind, .. } => Some(kind),
            Self::Other(_) => None,
        }
    }

    pub fn is_no_input_selected(&self) -> bool {
        matches!(self.kind(), Some(ConversionErrorKind::NoInputSelected))
    }

    pub fn is_empty_archive_request(&self) -> bool {
        matches!(self.kind(), Some(ConversionErrorKind::EmptyArchiveRequest))
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Conversion { kind, source } => match kind {
                ConversionErrorKind::NoInputSelected => {
                    "Please select at least one file.".to_string()
                }
                ConversionErrorKind::EmptyArchiveRequest => {
                    "Please convert at least one file.".to_string()
                }
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!(
                        "Input file too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => format!("IO error on {}: {}", path.display(), message),
                _ => match source {
                    Some(source) => format!("{}: {:#}", kind, source),
                    None => kind.to_string(),
                },
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        Self::conversion(ConversionErrorKind::io(err.to_string(), None))
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
