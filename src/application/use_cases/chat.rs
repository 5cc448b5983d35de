use std::sync::Arc;

use crate::application::use_cases::prompts::fill_chat_prompt;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::LlmClient;
use crate::infrastructure::response::clean_llm_response;

pub struct ChatUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
}

impl ChatUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// Answer a QA question, grounded on the loaded HU when there is one.
    pub async fn execute(
        &self,
        config: &LlmConfig,
        context: Option<&str>,
        message: &str,
    ) -> Result<String> {
        if message.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Chat message is empty".to_string(),
            ));
        }

        let prompt = fill_chat_prompt(context, message);
        let reply = self.llm_client.generate(config, &prompt).await?;
        Ok(clean_llm_response(&reply))
    }
}
