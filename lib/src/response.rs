//! The response abstraction the processor consumes.
//!
//! Fetching is left to the embedding application; it only has to expose the body text and the
//! declared `Content-Type`.

use async_trait::async_trait;
use std::io;

#[async_trait]
pub trait ResponseWrapper: Send + Sync {
    /// Reads the full body as text.
    async fn text(&self) -> io::Result<String>;

    /// The declared media type, possibly carrying parameters such as `charset`.
    fn media_type(&self) -> &str;
}

/// A response whose body is already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    body: String,
    media_type: String,
}

impl TextResponse {
    pub fn new(body: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            media_type: media_type.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[async_trait]
impl ResponseWrapper for TextResponse {
    async fn text(&self) -> io::Result<String> {
        Ok(self.body.clone())
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }
}
