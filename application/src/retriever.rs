use domain::backends::SearchBackend;
use domain::models::{RetrievedContext, SearchOptions};
use domain::prompt::DEFAULT_FALLBACK_REPLY;
use shared::utils::preview;
use tracing::{debug, warn};

/// Retrieval stage. Search failures are logged and reported as
/// `NoContext`, never returned to the caller.
pub struct Retriever<S> {
    backend: S,
    options: SearchOptions,
    fallback: String,
}

impl<S: SearchBackend> Retriever<S> {
    pub fn new(backend: S, options: SearchOptions) -> Self {
        Self {
            backend,
            options,
            fallback: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }

    /// Replaces the text [`Retriever::search`] returns when nothing was found.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub async fn retrieve(&self, text: &str) -> RetrievedContext {
        let query = self.options.query(text);
        match self.backend.search(&query).await {
            Ok(documents) => {
                debug!(
                    hits = documents.len(),
                    query = %preview(text, 40),
                    "search completed"
                );
                RetrievedContext::from_documents(&documents)
            }
            Err(err) => {
                warn!(error = %err, query = %preview(text, 40), "search failed; continuing without context");
                RetrievedContext::NoContext
            }
        }
    }

    /// String form of [`Retriever::retrieve`]: the joined documents, or
    /// the fallback reply when nothing usable came back.
    pub async fn search(&self, text: &str) -> String {
        self.retrieve(text).await.text_or(&self.fallback).to_string()
    }
}
