//! Media type normalization and parser resolution.

use crate::parser::QuadParser;
use crate::registry::ParserRegistry;
use std::sync::Arc;

/// Strips parameters (e.g. `; charset=utf-8`) from a declared media type.
///
/// Takes everything before the first `;` and trims surrounding whitespace. Case is preserved.
pub fn normalize(media_type: &str) -> &str {
    media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
}

/// Returns `true` if `registry` holds a parser for the normalized form of `media_type`.
pub fn can_handle(registry: &ParserRegistry, media_type: &str) -> bool {
    let normalized = normalize(media_type);
    !normalized.is_empty() && registry.contains(normalized)
}

pub fn resolve(registry: &ParserRegistry, media_type: &str) -> Option<Arc<dyn QuadParser>> {
    let normalized = normalize(media_type);
    if normalized.is_empty() {
        return None;
    }
    registry.find(normalized)
}
