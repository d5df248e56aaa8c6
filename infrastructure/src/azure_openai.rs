use crate::config::AzureOpenAiConfig;
use crate::http::{join_url, read_json, transport_error};
use domain::backends::CompletionBackend;
use domain::chat::ChatRequest;
use domain::error::BackendError;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    // null when the content filter withholds the reply
    #[serde(default)]
    content: Option<String>,
}

/// Client for an Azure OpenAI chat completions deployment.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    url: String,
    api_key: String,
    api_version: String,
}

impl AzureOpenAiClient {
    pub fn new(config: &AzureOpenAiConfig, client: Client) -> Self {
        let path = format!("openai/deployments/{}/chat/completions", config.deployment);
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

impl CompletionBackend for AzureOpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, BackendError> {
        debug!(
            url = %self.url,
            messages = request.messages.len(),
            max_tokens = request.params.max_tokens,
            "requesting chat completion"
        );
        let response = self
            .client
            .post(&self.url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let payload: ChatCompletionResponse = read_json(response).await?;
        let choice = payload
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Malformed("response contained no choices".into()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
