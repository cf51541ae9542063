use crate::errors::Error;
use crate::llm::ChatMessage;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod anthropic;
pub mod deepseek;
pub mod ollama;
pub mod openai;

/// Capability shared by every generative backend: accept a conversation,
/// return generated text. Implementations perform one network call and
/// never retry; callers own any fallback behavior.
#[async_trait]
pub trait LlmProvider: Debug + Send + Sync {
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, Error>;
}
