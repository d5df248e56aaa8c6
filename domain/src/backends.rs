use crate::chat::ChatRequest;
use crate::error::BackendError;
use crate::models::{SearchDocument, SearchQuery};

pub trait SearchBackend {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl std::future::Future<Output = Result<Vec<SearchDocument>, BackendError>> + Send;
}

pub trait CompletionBackend {
    /// Returns the first choice's message content.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String, BackendError>> + Send;
}
