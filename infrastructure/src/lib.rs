pub mod azure_openai;
pub mod azure_search;
pub mod config;
pub mod http;
