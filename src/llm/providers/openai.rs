use super::LlmProvider;
use crate::errors::Error;
use crate::llm::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Provider implementation for OpenAI's API
#[derive(Debug)]
pub struct OpenAiProvider {
    /// OpenAI API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "gpt-4o", "gpt-4o-mini")
    model: String,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider instance
    ///
    /// # Errors
    /// Fails with `Error::Config` if `OPENAI_API_KEY` is not set
    pub fn new(model: &str) -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY environment variable not set".into()))?;
        Ok(OpenAiProvider {
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, Error> {
        let client = Client::new();
        let request_body = json!({
          "model": self.model,
          "messages": messages,
          "temperature": 0.7
        });

        let res = client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("OpenAI API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if let Some(content) = json_resp["choices"][0]["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::Upstream(
                "No content in OpenAI LLM response".to_string(),
            ))
        }
    }
}
