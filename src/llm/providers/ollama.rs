use super::LlmProvider;
use crate::errors::Error;
use crate::llm::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Provider implementation for Ollama's local API
#[derive(Debug)]
pub struct OllamaProvider {
    /// Model identifier to use (e.g. "llama3", "codellama")
    model: String,
}

impl OllamaProvider {
    /// Creates a new Ollama provider instance
    pub fn new(model: &str) -> Result<Self, Error> {
        Ok(OllamaProvider {
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, Error> {
        let client = Client::new();

        let request_body = json!({
            "model": self.model,
            "stream": false,
            "messages": messages
        });

        let res = client
            .post("http://localhost:11434/api/chat")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("Ollama API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if let Some(content) = json_resp["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::Upstream(
                "No content in Ollama LLM response".to_string(),
            ))
        }
    }
}
