//! Chat-completion provider implementations

mod http_client;
mod openai;

use std::sync::Arc;

use tracing::{info, warn};

pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiProvider, DEFAULT_OPENAI_BASE_URL};

use crate::config::AiConfig;
use crate::domain::{DomainError, LlmProvider};

/// Build the configured provider, or `None` when no API key is available
pub fn create_llm_provider(config: &AiConfig) -> Result<Option<Arc<dyn LlmProvider>>, DomainError> {
    let Some(api_key) = config.resolved_api_key() else {
        warn!("No OpenAI API key configured, AI generation endpoints are disabled");
        return Ok(None);
    };

    let client = HttpClient::with_timeout(config.timeout())?;
    let provider = OpenAiProvider::with_base_url(client, api_key, &config.base_url);

    info!(base_url = %config.base_url, model = %config.model, "OpenAI provider configured");
    Ok(Some(Arc::new(provider)))
}
