use super::LlmProvider;
use crate::errors::Error;
use crate::llm::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Provider implementation for DeepSeek's API
#[derive(Debug)]
pub struct DeepSeekProvider {
    /// API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "deepseek-chat")
    model: String,
}

impl DeepSeekProvider {
    /// Creates a new DeepSeek provider instance
    ///
    /// # Errors
    /// Fails with `Error::Config` if `DEEPSEEK_API_KEY` is not set
    pub fn new(model: &str) -> Result<Self, Error> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .map_err(|_| Error::Config("DEEPSEEK_API_KEY environment variable not set".into()))?;
        Ok(DeepSeekProvider {
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for DeepSeekProvider {
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, Error> {
        let client = Client::new();
        let request_body = json!({
          "model": self.model,
          "messages": messages,
          "temperature": 0.7,
          "stream": false
        });

        let res = client
            .post("https://api.deepseek.com/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("DeepSeek API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if let Some(content) = json_resp["choices"][0]["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::Upstream(
                "No content in DeepSeek LLM response".to_string(),
            ))
        }
    }
}
