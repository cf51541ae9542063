use super::LlmProvider;
use crate::errors::Error;
use crate::llm::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Provider implementation for Anthropic's API
#[derive(Debug)]
pub struct AnthropicProvider {
    /// Anthropic API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "claude-sonnet-4-5")
    model: String,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider instance
    ///
    /// # Errors
    /// Fails with `Error::Config` if `ANTHROPIC_API_KEY` is not set
    pub fn new(model: &str) -> Result<Self, Error> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::Config("ANTHROPIC_API_KEY environment variable not set".into()))?;
        Ok(AnthropicProvider {
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, Error> {
        let client = Client::new();

        // Anthropic takes the system instruction as a top-level field,
        // not as a message in the conversation.
        let (system_messages, user_messages): (Vec<_>, Vec<_>) =
            messages.into_iter().partition(|msg| msg.role == "system");
        let system_content = system_messages
            .into_iter()
            .map(|m| m.content)
            .collect::<Vec<_>>()
            .join("\n");

        let request_body = json!({
            "model": self.model,
            "system": system_content,
            "max_tokens": 4096,
            "messages": user_messages
        });

        let res = client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", self.api_key.to_string())
            .header("anthropic-version", "2023-06-01")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("Anthropic API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if let Some(content) = json_resp["content"][0]["text"].as_str() {
            debug!("Anthropic response: {}", content);
            Ok(content.trim().to_string())
        } else {
            Err(Error::Upstream(
                "No content in Anthropic LLM response".to_string(),
            ))
        }
    }
}
