//! The public entry point of the pipeline.
//!
//! [`MediaTypeProcessor::process`] reads a response, stream-parses it, buffers the quads into a
//! dataset owned by that call, runs the inference engine over it, and hands back a fresh stream
//! over the augmented dataset.

use crate::config::ProcessorConfig;
use crate::errors::ProcessError;
use crate::inference::InferenceEngine;
use crate::media_type::{can_handle, normalize};
use crate::parse::{materialize, parse};
use crate::parser::{QuadParser, QuadStream};
use crate::registry::ParserRegistry;
use crate::response::ResponseWrapper;
use log::{debug, info, warn};
use oxigraph::model::Quad;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct MediaTypeProcessor {
    registry: Arc<ParserRegistry>,
    inference: InferenceEngine,
}

impl Default for MediaTypeProcessor {
    fn default() -> Self {
        Self::new(Arc::new(ParserRegistry::with_defaults()), InferenceEngine::default())
    }
}

impl MediaTypeProcessor {
    pub fn new(registry: Arc<ParserRegistry>, inference: InferenceEngine) -> Self {
        Self {
            registry,
            inference,
        }
    }

    /// A processor backed by the process-wide [`ParserRegistry::global`] registry.
    pub fn shared() -> Self {
        Self::new(ParserRegistry::global(), InferenceEngine::default())
    }

    /// Builds a processor with its own default registry, extended with the configured aliases.
    pub fn from_config(config: &ProcessorConfig) -> Self {
        let registry = ParserRegistry::with_defaults();
        for (alias, target) in &config.media_type_aliases {
            match registry.find(target) {
                Some(parser) => registry.register(alias, parser),
                None => warn!("Cannot alias {} to unregistered media type {}", alias, target),
            }
        }
        let mut inference = InferenceEngine::default().without(config.disabled_inferences.as_slice());
        if let Some(rounds) = config.max_inference_rounds {
            inference = inference.with_max_rounds(rounds);
        }
        Self::new(Arc::new(registry), inference)
    }

    pub fn registry(&self) -> &Arc<ParserRegistry> {
        &self.registry
    }

    pub fn inference(&self) -> &InferenceEngine {
        &self.inference
    }

    /// Media types this processor currently accepts.
    pub fn media_types(&self) -> BTreeSet<String> {
        self.registry.list_keys()
    }

    pub fn can_process(&self, media_type: &str) -> bool {
        can_handle(&self.registry, media_type)
    }

    /// Registers each `(media type, parser)` pair, replacing any parser already registered for
    /// the same media type.
    pub fn add_parsers<I, K>(&self, parsers: I)
    where
        I: IntoIterator<Item = (K, Arc<dyn QuadParser>)>,
        K: AsRef<str>,
    {
        for (media_type, parser) in parsers {
            self.registry.register(media_type.as_ref(), parser);
        }
    }

    /// Parses `response` using `uri` as base IRI and returns the parsed quads together with
    /// every quad the inference engine derives from them.
    pub async fn process<R>(&self, uri: &str, response: &R) -> Result<QuadStream, ProcessError>
    where
        R: ResponseWrapper + ?Sized,
    {
        let media_type = response.media_type();
        if !self.can_process(media_type) {
            return Err(ProcessError::unsupported(normalize(media_type)));
        }
        let text = response.text().await?;
        info!("Processing {} ({})", uri, media_type);

        let stream = parse(&self.registry, text, uri, media_type)?;
        let mut dataset = materialize(stream)?;
        debug!("Parsed {} quads from {}", dataset.len(), uri);

        self.inference.apply_all(&mut dataset);
        let quads: Vec<Quad> = dataset.iter().map(|q| q.into_owned()).collect();
        Ok(QuadStream::from_quads(quads))
    }
}
