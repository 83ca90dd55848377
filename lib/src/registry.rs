//! Registry mapping normalized media types to parser capabilities.
//!
//! The registry is read on every `process` call and written rarely, usually once at startup.
//! Entries are replaced whole under a write lock, so a concurrent reader sees either the old
//! or the new parser for a key, never anything in between.

use crate::consts::DEFAULT_MEDIA_TYPES;
use crate::media_type::normalize;
use crate::parser::{OxigraphQuadParser, QuadParser};
use lazy_static::lazy_static;
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<ParserRegistry> = Arc::new(ParserRegistry::with_defaults());
}

#[derive(Default)]
pub struct ParserRegistry {
    parsers: RwLock<HashMap<String, Arc<dyn QuadParser>>>,
}

impl ParserRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding an oxigraph parser for each of [`DEFAULT_MEDIA_TYPES`].
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for media_type in DEFAULT_MEDIA_TYPES {
            match OxigraphQuadParser::for_media_type(media_type) {
                Some(parser) => registry.register(media_type, Arc::new(parser)),
                None => warn!("No built-in parser available for {}", media_type),
            }
        }
        registry
    }

    /// Process-wide registry, populated with the default parsers on first access.
    ///
    /// Anything registered here is visible to every processor built with
    /// [`crate::processor::MediaTypeProcessor::shared`].
    pub fn global() -> Arc<ParserRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Associates `parser` with the normalized `media_type`, replacing any previous entry.
    pub fn register(&self, media_type: &str, parser: Arc<dyn QuadParser>) {
        let key = normalize(media_type).to_string();
        debug!("Registering parser for {}", key);
        if self.parsers.write().insert(key.clone(), parser).is_some() {
            debug!("Replaced existing parser for {}", key);
        }
    }

    /// Looks up the parser for an already normalized media type.
    pub fn find(&self, media_type: &str) -> Option<Arc<dyn QuadParser>> {
        self.parsers.read().get(media_type).cloned()
    }

    pub fn contains(&self, media_type: &str) -> bool {
        self.parsers.read().contains_key(media_type)
    }

    pub fn list_keys(&self) -> BTreeSet<String> {
        self.parsers.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.read().is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("media_types", &self.list_keys())
            .finish()
    }
}
