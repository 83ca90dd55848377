//! Errors surfaced by the parsing pipeline.

use oxigraph::io::RdfParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// No parser is registered for the normalized media type.
    #[error("No parser registered for media type '{media_type}'")]
    UnsupportedMediaType { media_type: String },
    /// The parser rejected the body as invalid syntax for its format.
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },
    #[error("Invalid base IRI '{iri}': {message}")]
    InvalidBaseIri { iri: String, message: String },
    #[error("Failed to read response body: {0}")]
    BodyRead(#[from] std::io::Error),
}

impl ProcessError {
    pub fn unsupported(media_type: impl Into<String>) -> Self {
        ProcessError::UnsupportedMediaType {
            media_type: media_type.into(),
        }
    }

    pub fn is_unsupported_media_type(&self) -> bool {
        matches!(self, ProcessError::UnsupportedMediaType { .. })
    }
}

impl From<RdfParseError> for ProcessError {
    fn from(e: RdfParseError) -> Self {
        ProcessError::MalformedInput {
            message: e.to_string(),
        }
    }
}
