use serde::{Deserialize, Serialize};

/// Azure AI Search query syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    #[default]
    Simple,
    Full,
}

/// Whether any or all search terms must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Any,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub top: usize,
    pub query_type: QueryType,
    pub search_mode: SearchMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top: 5,
            query_type: QueryType::Simple,
            search_mode: SearchMode::Any,
        }
    }
}

impl SearchOptions {
    pub fn query(&self, text: &str) -> SearchQuery {
        SearchQuery {
            search: text.to_string(),
            query_type: self.query_type,
            search_mode: self.search_mode,
            top: self.top,
        }
    }
}

/// Body of a docs/search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search: String,
    pub query_type: QueryType,
    pub search_mode: SearchMode,
    pub top: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub content: String,
}

/// Outcome of the retrieval stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedContext {
    HasContext(String),
    NoContext,
}

impl RetrievedContext {
    /// Joins document contents with `\n`, keeping service order.
    /// An empty result set yields `NoContext`.
    pub fn from_documents(documents: &[SearchDocument]) -> Self {
        if documents.is_empty() {
            return Self::NoContext;
        }
        let joined = documents
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self::HasContext(joined)
    }

    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::HasContext(text) => text,
            Self::NoContext => fallback,
        }
    }
}
