//! The two stages between response text and the inference engine: streaming parse, then a
//! single buffering pass that hands ownership of every quad to a [`Dataset`].

use crate::errors::ProcessError;
use crate::media_type::{normalize, resolve};
use crate::parser::QuadStream;
use crate::registry::ParserRegistry;
use log::debug;
use oxigraph::model::Dataset;
use std::io::Cursor;

/// Parses `text` as `media_type`, resolving relative IRIs against `base_iri`.
///
/// Fails with [`ProcessError::UnsupportedMediaType`] when no registered parser accepts the
/// normalized media type. Syntax errors are reported lazily by the returned stream.
pub fn parse(
    registry: &ParserRegistry,
    text: String,
    base_iri: &str,
    media_type: &str,
) -> Result<QuadStream, ProcessError> {
    let normalized = normalize(media_type);
    let parser = resolve(registry, normalized).ok_or_else(|| ProcessError::unsupported(normalized))?;
    debug!("Parsing {} bytes of {} with base {}", text.len(), normalized, base_iri);
    let input = Box::new(Cursor::new(text.into_bytes()));
    parser
        .import(normalized, input, base_iri)?
        .ok_or_else(|| ProcessError::unsupported(normalized))
}

/// Consumes `stream` into an owned dataset. The first error aborts the whole stream.
pub fn materialize(stream: QuadStream) -> Result<Dataset, ProcessError> {
    let mut dataset = Dataset::new();
    for quad in stream {
        dataset.insert(&quad?);
    }
    Ok(dataset)
}
