mod parser;
use serde::{Deserialize, Serialize};

pub use parser::load_config;

/// Main configuration structure for the service
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,
}

/// HTTP server settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
        }
    }
}

/// Database settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: default_database_path(),
        }
    }
}

/// LLM provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Provider name ("openai", "anthropic", "ollama" or "deepseek")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier passed to the provider
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            provider: default_provider(),
            model: default_model(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "docforge.db".to_string()
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
