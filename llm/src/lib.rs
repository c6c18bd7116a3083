//! Language-model collaborators: a single `complete(prompt) -> text` call.

pub mod error;
pub mod gemini;
pub mod openai;
pub mod stub;

use async_trait::async_trait;
use deck_common::{DeckConfig, Provider};
use std::sync::Arc;

pub use error::{LlmError, Result};
pub use gemini::GeminiClient;
pub use openai::OpenAiModelClient;
pub use stub::{Reply, StubModel};

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one prompt and return the model's full text reply.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build the model client selected by `config`.
pub fn model_from_config(config: &DeckConfig) -> Result<Arc<dyn LanguageModel>> {
    let model = config.effective_model().to_string();
    let api_key = || {
        config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::MissingApiKey {
                provider: config.provider.to_string(),
            })
    };

    let client: Arc<dyn LanguageModel> = match config.provider {
        Provider::Gemini => {
            let mut client = GeminiClient::new_with_model(api_key()?, model);
            if let Some(url) = &config.base_url {
                client = client.with_base_url(url.as_str());
            }
            Arc::new(client)
        }
        Provider::OpenAi => {
            let mut client = OpenAiModelClient::new_with_model(api_key()?, model);
            if let Some(url) = &config.base_url {
                client = client.with_base_url(url.as_str());
            }
            Arc::new(client)
        }
        Provider::Stub => Arc::new(StubModel::offline()),
    };
    tracing::debug!("Using {} model {}", config.provider, config.effective_model());
    Ok(client)
}
