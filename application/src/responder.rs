use crate::retriever::Retriever;
use domain::backends::{CompletionBackend, SearchBackend};
use domain::chat::{ChatRequest, GenerationParams};
use domain::models::RetrievedContext;
use domain::prompt::PromptProfile;
use infrastructure::{
    azure_openai::AzureOpenAiClient, azure_search::AzureSearchClient, config::Config, http,
};
use shared::telemetry::Telemetry;
use shared::types::Result;
use tracing::{error, info};

/// The production pipeline: Azure AI Search feeding Azure OpenAI.
pub type AnswerService = Responder<AzureSearchClient, AzureOpenAiClient>;

/// Answers a user utterance with retrieval-augmented generation.
///
/// Always resolves to displayable text. With no retrieved context the
/// configured fallback reply is returned and the completion service is not
/// called; a failed completion is reported as its status line.
pub struct Responder<S, C> {
    retriever: Retriever<S>,
    completion: C,
    profile: PromptProfile,
    params: GenerationParams,
}

impl<S, C> Responder<S, C>
where
    S: SearchBackend,
    C: CompletionBackend,
{
    pub fn new(
        retriever: Retriever<S>,
        completion: C,
        profile: PromptProfile,
        params: GenerationParams,
    ) -> Self {
        Self {
            retriever,
            completion,
            profile,
            params,
        }
    }

    pub async fn answer(&self, user_text: &str) -> String {
        let telemetry = Telemetry::new();

        let context = match self.retriever.retrieve(user_text).await {
            RetrievedContext::HasContext(context) => context,
            RetrievedContext::NoContext => {
                info!(elapsed_ms = telemetry.elapsed_ms(), "no retrieved context; returning fallback reply");
                return self.profile.fallback_reply.clone();
            }
        };

        let request = self.build_request(user_text, &context);
        match self.completion.complete(&request).await {
            Ok(content) => {
                info!(
                    elapsed_ms = telemetry.elapsed_ms(),
                    chars = content.chars().count(),
                    "answer generated"
                );
                content
            }
            Err(err) => {
                error!(error = %err, elapsed_ms = telemetry.elapsed_ms(), "chat completion failed");
                err.status_line()
            }
        }
    }

    pub fn build_request(&self, user_text: &str, context: &str) -> ChatRequest {
        ChatRequest {
            messages: self.profile.transcript(user_text, context),
            params: self.params.clone(),
        }
    }

    pub fn profile(&self) -> &PromptProfile {
        &self.profile
    }
}

impl AnswerService {
    /// Wires both Azure clients over one shared HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::build_client(config.request_timeout)?;
        let search = AzureSearchClient::new(&config.search, client.clone());
        let completion = AzureOpenAiClient::new(&config.openai, client);
        Ok(Self::new(
            Retriever::new(search, config.search_options.clone())
                .with_fallback(config.profile.fallback_reply.clone()),
            completion,
            config.profile.clone(),
            config.generation.clone(),
        ))
    }
}
