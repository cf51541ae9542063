use crate::errors::Error;
use crate::llm::providers::LlmProvider;
use crate::llm::ChatMessage;
use tracing::debug;

/// Generic LLM client that delegates work to a concrete provider.
///
/// The provider is chosen once, by name, when the client is built; after
/// that every call goes through the same `LlmProvider` trait object.
#[derive(Debug)]
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
}

impl LlmClient {
    /// Creates a new LLM client with the specified provider and model.
    ///
    /// # Arguments
    /// * `provider_name` - Name of the LLM provider ("openai", "anthropic", "ollama" or "deepseek")
    /// * `model` - Model name to use with the provider
    ///
    /// # Errors
    /// Fails with `Error::Config` for unknown provider names or missing API keys
    pub fn new(provider_name: &str, model: &str) -> Result<Self, Error> {
        let provider: Box<dyn LlmProvider> = match provider_name {
            "openai" => Box::new(crate::llm::providers::openai::OpenAiProvider::new(model)?),
            "anthropic" => Box::new(crate::llm::providers::anthropic::AnthropicProvider::new(
                model,
            )?),
            "ollama" => Box::new(crate::llm::providers::ollama::OllamaProvider::new(model)?),
            "deepseek" => Box::new(crate::llm::providers::deepseek::DeepSeekProvider::new(model)?),
            _ => return Err(Error::Config(format!("Unknown provider '{}'", provider_name))),
        };

        Ok(LlmClient { provider })
    }

    /// Creates a client around an already-built provider.
    pub fn with_provider(provider: Box<dyn LlmProvider>) -> Self {
        LlmClient { provider }
    }

    /// Sends one system prompt and one user prompt to the provider and
    /// returns the generated text.
    ///
    /// There is no retry here; a failed call surfaces as `Error::Upstream`
    /// and the caller decides how to degrade.
    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Error> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];
        let response = self.provider.call_llm_api(messages).await?;
        debug!("LLM response length: {} chars", response.chars().count());
        Ok(response)
    }
}
