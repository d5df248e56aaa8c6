use anyhow::{anyhow, Context};
use domain::chat::GenerationParams;
use domain::models::{QueryType, SearchMode, SearchOptions};
use domain::prompt::PromptProfile;
use dotenvy::dotenv;
use shared::types::Result;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SEARCH_API_VERSION: &str = "2024-05-01-preview";
pub const DEFAULT_OPENAI_API_VERSION: &str = "2024-08-01-preview";

#[derive(Clone)]
pub struct AzureSearchConfig {
    pub endpoint: String,
    pub index_name: String,
    pub api_key: String,
    pub api_version: String,
}

#[derive(Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub deployment: String,
    pub api_key: String,
    pub api_version: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub search: AzureSearchConfig,
    pub openai: AzureOpenAiConfig,
    pub search_options: SearchOptions,
    pub generation: GenerationParams,
    pub profile: PromptProfile,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Reads `.env` when present, then the process environment.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        // prompt text is kept verbatim; blank still means unset
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| anyhow!("missing required environment variable {}", key))
        };

        let search = AzureSearchConfig {
            endpoint: required("AZURE_SEARCH_ENDPOINT")?,
            index_name: required("AZURE_SEARCH_INDEX_NAME")?,
            api_key: required("AZURE_SEARCH_KEY")?,
            api_version: get("AZURE_SEARCH_API_VERSION")
                .unwrap_or_else(|| DEFAULT_SEARCH_API_VERSION.to_string()),
        };
        let openai = AzureOpenAiConfig {
            endpoint: required("AZURE_OPENAI_ENDPOINT")?,
            deployment: required("AZURE_OPENAI_MODEL_DEPLOYMENT_NAME")?,
            api_key: required("AZURE_OPENAI_KEY")?,
            api_version: get("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_string()),
        };

        let defaults = SearchOptions::default();
        let search_options = SearchOptions {
            top: parse_or(get("AZURE_SEARCH_TOP"), "AZURE_SEARCH_TOP", defaults.top)?,
            query_type: match get("AZURE_SEARCH_QUERY_TYPE") {
                Some(value) => parse_query_type(&value)?,
                None => defaults.query_type,
            },
            search_mode: match get("AZURE_SEARCH_MODE") {
                Some(value) => parse_search_mode(&value)?,
                None => defaults.search_mode,
            },
        };

        let params = GenerationParams::default();
        let generation = GenerationParams {
            temperature: parse_or(get("HR_TEMPERATURE"), "HR_TEMPERATURE", params.temperature)?,
            top_p: parse_or(get("HR_TOP_P"), "HR_TOP_P", params.top_p)?,
            frequency_penalty: parse_or(
                get("HR_FREQUENCY_PENALTY"),
                "HR_FREQUENCY_PENALTY",
                params.frequency_penalty,
            )?,
            presence_penalty: parse_or(
                get("HR_PRESENCE_PENALTY"),
                "HR_PRESENCE_PENALTY",
                params.presence_penalty,
            )?,
            max_tokens: parse_or(get("HR_MAX_TOKENS"), "HR_MAX_TOKENS", params.max_tokens)?,
            stop: params.stop,
        };

        let base = PromptProfile::default();
        let profile = PromptProfile {
            persona: text("HR_PERSONA_PROMPT").unwrap_or(base.persona),
            context_prefix: text("HR_CONTEXT_PREFIX").unwrap_or(base.context_prefix),
            fallback_reply: text("HR_FALLBACK_REPLY").unwrap_or(base.fallback_reply),
        };

        let request_timeout = match get("HR_REQUEST_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(
                value
                    .parse::<u64>()
                    .with_context(|| format!("invalid HR_REQUEST_TIMEOUT_SECS: {:?}", value))?,
            )),
            None => None,
        };

        Ok(Self {
            search,
            openai,
            search_options,
            generation,
            profile,
            request_timeout,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn parse_query_type(value: &str) -> Result<QueryType> {
    match value.to_ascii_lowercase().as_str() {
        "simple" => Ok(QueryType::Simple),
        "full" => Ok(QueryType::Full),
        _ => Err(anyhow!("invalid AZURE_SEARCH_QUERY_TYPE: {:?}", value)),
    }
}

fn parse_search_mode(value: &str) -> Result<SearchMode> {
    match value.to_ascii_lowercase().as_str() {
        "any" => Ok(SearchMode::Any),
        "all" => Ok(SearchMode::All),
        _ => Err(anyhow!("invalid AZURE_SEARCH_MODE: {:?}", value)),
    }
}

// api keys stay out of Debug output.
impl fmt::Debug for AzureSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureSearchConfig")
            .field("endpoint", &self.endpoint)
            .field("index_name", &self.index_name)
            .field("api_key", &"***")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl fmt::Debug for AzureOpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureOpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_key", &"***")
            .field("api_version", &self.api_version)
            .finish()
    }
}
