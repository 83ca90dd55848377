//! Media-type driven parsing for Hydra hypermedia clients.
//!
//! A [`MediaTypeProcessor`] takes a fetched response (body text plus declared media type),
//! picks a parser from its [`ParserRegistry`], parses the body into RDF quads, materializes the
//! triples Hydra documents only imply (member assertions, vocabulary ranges) and returns the
//! augmented data as a [`QuadStream`].
//!
//! ```no_run
//! use hydra_rdf::{MediaTypeProcessor, TextResponse};
//!
//! let processor = MediaTypeProcessor::default();
//! let response = TextResponse::new("<s> <p> <o> .", "text/turtle; charset=utf-8");
//! let quads = futures::executor::block_on(processor.process("http://example.org/", &response))?;
//! for quad in quads {
//!     println!("{}", quad?);
//! }
//! # Ok::<(), hydra_rdf::ProcessError>(())
//! ```

pub mod config;
pub mod consts;
pub mod errors;
pub mod inference;
pub mod media_type;
pub mod parse;
pub mod parser;
pub mod processor;
pub mod registry;
pub mod response;
pub mod util;

pub use crate::config::ProcessorConfig;
pub use crate::errors::ProcessError;
pub use crate::inference::{InferenceEngine, InferenceRule};
pub use crate::parser::{OxigraphQuadParser, QuadParser, QuadStream};
pub use crate::processor::MediaTypeProcessor;
pub use crate::registry::ParserRegistry;
pub use crate::response::{ResponseWrapper, TextResponse};

/// Initializes logging for the hydra-rdf library.
///
/// If `HYDRA_RDF_LOG` is set, `RUST_LOG` is set to its value so that it takes precedence.
/// The logger itself (e.g. `env_logger::init()`) must be initialized after this call.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("HYDRA_RDF_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}
