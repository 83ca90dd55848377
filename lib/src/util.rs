//! Dataset queries, serialization and file type detection shared by the library and the CLI.

use crate::parser::QuadStream;
use anyhow::Result;
use log::info;
use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::{Dataset, GraphNameRef, NamedNodeRef, NamedOrBlankNodeRef, QuadRef, TermRef};
use std::io::Write;
use std::path::Path;

/// Returns the quads of `dataset` matching a pattern; `None` matches any term in that position.
pub fn quads_for_pattern<'a>(
    dataset: &'a Dataset,
    subject: Option<NamedOrBlankNodeRef<'a>>,
    predicate: Option<NamedNodeRef<'a>>,
    object: Option<TermRef<'a>>,
    graph_name: Option<GraphNameRef<'a>>,
) -> impl Iterator<Item = QuadRef<'a>> + 'a {
    // start from the most selective index available, then filter on the rest
    let candidates: Box<dyn Iterator<Item = QuadRef<'a>> + 'a> = if let Some(s) = subject {
        Box::new(dataset.quads_for_subject(s))
    } else if let Some(o) = object {
        Box::new(dataset.quads_for_object(o))
    } else if let Some(p) = predicate {
        Box::new(dataset.quads_for_predicate(p))
    } else if let Some(g) = graph_name {
        Box::new(dataset.quads_for_graph_name(g))
    } else {
        Box::new(dataset.iter())
    };
    candidates.filter(move |q| {
        subject.is_none_or(|s| q.subject == s)
            && predicate.is_none_or(|p| q.predicate == p)
            && object.is_none_or(|o| q.object == o)
            && graph_name.is_none_or(|g| q.graph_name == g)
    })
}

/// Serializes every quad of `stream` to `writer` in `format`, returning the number written.
///
/// Formats without named graph support (Turtle, N-Triples, RDF/XML) only accept quads in the
/// default graph.
pub fn write_quads<W: Write>(stream: QuadStream, format: RdfFormat, writer: W) -> Result<usize> {
    let mut serializer = RdfSerializer::from_format(format).for_writer(writer);
    let mut count = 0;
    for quad in stream {
        let quad = quad?;
        serializer.serialize_quad(&quad)?;
        count += 1;
    }
    serializer.finish()?;
    info!("Wrote {} quads as {}", count, format.name());
    Ok(count)
}

/// Guesses the media type of a file from its extension.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext {
            // extensions oxigraph does not map on its own
            "owl" | "xml" => Some(RdfFormat::RdfXml),
            "json" => RdfFormat::from_media_type("application/ld+json"),
            other => RdfFormat::from_extension(other),
        })
        .map(|format| format.media_type())
}
