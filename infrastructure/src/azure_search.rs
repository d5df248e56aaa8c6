use crate::config::AzureSearchConfig;
use crate::http::{join_url, read_json, transport_error};
use domain::backends::SearchBackend;
use domain::error::BackendError;
use domain::models::{SearchDocument, SearchQuery};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the Azure AI Search `docs/search` endpoint.
#[derive(Clone)]
pub struct AzureSearchClient {
    client: Client,
    url: String,
    api_key: String,
    api_version: String,
}

impl AzureSearchClient {
    pub fn new(config: &AzureSearchConfig, client: Client) -> Self {
        let path = format!("indexes/{}/docs/search", config.index_name);
        Self {
            client,
            url: join_url(&config.endpoint, &path),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SearchBackend for AzureSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchDocument>, BackendError> {
        debug!(
            url = %self.url,
            top = query.top,
            query = %shared::utils::preview(&query.search, 40),
            "querying search index"
        );
        let response = self
            .client
            .post(&self.url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(query)
            .send()
            .await
            .map_err(transport_error)?;

        let payload: SearchResponse = read_json(response).await?;
        Ok(payload
            .value
            .into_iter()
            .map(|hit| SearchDocument {
                content: hit.content.unwrap_or_default(),
            })
            .collect())
    }
}
