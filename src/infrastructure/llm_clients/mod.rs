pub mod gemini;

use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use async_trait::async_trait;

pub use gemini::GeminiClient;

#[async_trait]
pub trait LlmClient {
    async fn generate(&self, config: &LlmConfig, prompt: &str) -> Result<String>;
    async fn list_models(&self, config: &LlmConfig) -> Result<Vec<String>>;
}
