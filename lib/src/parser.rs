//! Parser capabilities and the single-pass quad stream they produce.
//!
//! A [`QuadParser`] turns serialized text into a [`QuadStream`]. The stream is lazy: quads are
//! pulled from the underlying parser one at a time, and a syntax error shows up as an `Err` item
//! at the point the parser reaches it.

use crate::errors::ProcessError;
use futures::Stream;
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Quad;
use std::fmt;
use std::io::Read;

/// Lazy, finite, single-pass sequence of quads.
///
/// Once an item has been pulled it cannot be replayed; materialize the stream into a
/// [`oxigraph::model::Dataset`] when random access is needed. Streams are `Send`, so they can be
/// returned from tasks on a multi-threaded executor.
pub struct QuadStream {
    inner: Box<dyn Iterator<Item = Result<Quad, ProcessError>> + Send>,
}

impl QuadStream {
    pub fn new<I>(quads: I) -> Self
    where
        I: Iterator<Item = Result<Quad, ProcessError>> + Send + 'static,
    {
        Self {
            inner: Box::new(quads),
        }
    }

    /// Builds a stream over quads that are already in memory.
    pub fn from_quads<I>(quads: I) -> Self
    where
        I: IntoIterator<Item = Quad>,
        I::IntoIter: Send + 'static,
    {
        Self::new(quads.into_iter().map(Ok))
    }

    /// Adapts the stream to an asynchronous [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<Quad, ProcessError>> {
        futures::stream::iter(self)
    }
}

impl Iterator for QuadStream {
    type Item = Result<Quad, ProcessError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl fmt::Debug for QuadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadStream").finish_non_exhaustive()
    }
}

/// A parser capability that can be registered for one or more media types.
pub trait QuadParser: Send + Sync {
    /// Imports `input` as `media_type`, resolving relative IRIs against `base_iri`.
    ///
    /// Returns `Ok(None)` when this parser does not handle the media type after all.
    fn import(
        &self,
        media_type: &str,
        input: Box<dyn Read + Send>,
        base_iri: &str,
    ) -> Result<Option<QuadStream>, ProcessError>;
}

/// [`QuadParser`] backed by one of oxigraph's streaming RDF parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OxigraphQuadParser {
    format: RdfFormat,
}

impl OxigraphQuadParser {
    pub fn new(format: RdfFormat) -> Self {
        Self { format }
    }

    pub fn for_media_type(media_type: &str) -> Option<Self> {
        RdfFormat::from_media_type(media_type).map(Self::new)
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }
}

impl QuadParser for OxigraphQuadParser {
    fn import(
        &self,
        _media_type: &str,
        input: Box<dyn Read + Send>,
        base_iri: &str,
    ) -> Result<Option<QuadStream>, ProcessError> {
        let mut parser = RdfParser::from_format(self.format);
        if !base_iri.is_empty() {
            parser = parser
                .with_base_iri(base_iri)
                .map_err(|e| ProcessError::InvalidBaseIri {
                    iri: base_iri.to_string(),
                    message: e.to_string(),
                })?;
        }
        let quads = parser
            .for_reader(input)
            .map(|quad| quad.map_err(ProcessError::from));
        Ok(Some(QuadStream::new(quads)))
    }
}
