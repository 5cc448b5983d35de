use std::sync::Arc;

use tracing::debug;

use crate::application::use_cases::prompts::{fill_story_prompt, DEFAULT_PROMPT};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;
use crate::domain::story::StoryDocument;
use crate::domain::test_case::{RawTestCase, TestCase};
use crate::infrastructure::llm_clients::LlmClient;
use crate::infrastructure::response::extract_json_array;

pub struct GenerateCasesUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
}

impl GenerateCasesUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// Generate test cases for one user story: fill the template, call the
    /// model, pull the first JSON array out of the reply, normalize steps,
    /// stamp the story name on every case.
    pub async fn execute(
        &self,
        config: &LlmConfig,
        story: &StoryDocument,
        custom_prompt: Option<&str>,
    ) -> Result<Vec<TestCase>> {
        let template = custom_prompt.unwrap_or(DEFAULT_PROMPT);
        let prompt = fill_story_prompt(template, &story.content);

        let reply = self.llm_client.generate(config, &prompt).await?;
        debug!(story = %story.name, reply_len = reply.len(), "Model reply received");

        let json_text = extract_json_array(&reply)?;
        let raw_cases: Vec<RawTestCase> = serde_json::from_str(json_text)
            .map_err(|e| AppError::ParseError(format!("Reply is not a list of cases: {}", e)))?;

        Ok(raw_cases
            .into_iter()
            .map(|raw| raw.normalize(&story.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Result;
    use async_trait::async_trait;

    struct ScriptedClient {
        reply: String,
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn generate(&self, _config: &LlmConfig, prompt: &str) -> Result<String> {
            // The story text must have made it into the prompt.
            assert!(prompt.contains("Como usuario quiero iniciar sesión"));
            Ok(self.reply.clone())
        }

        async fn list_models(&self, _config: &LlmConfig) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    fn story() -> StoryDocument {
        StoryDocument::new("login.txt", "Como usuario quiero iniciar sesión")
    }

    fn use_case(reply: &str) -> GenerateCasesUseCase {
        GenerateCasesUseCase::new(Arc::new(ScriptedClient {
            reply: reply.to_string(),
        }))
    }

    #[tokio::test]
    async fn parses_and_normalizes_model_reply() {
        let reply = r#"Claro, aquí están:
[
  {
    "criterio": "Login correcto",
    "id_caso": "CP-001",
    "tipo_prueba": "Functional",
    "descripcion": "Inicio de sesión feliz",
    "precondiciones": "Usuario registrado",
    "pasos": ["Abrir la app", "", "Ingresar credenciales"],
    "resultado_esperado": "Sesión iniciada",
    "prioridad": "Alta",
    "Automatizar": "si"
  }
]"#;

        let cases = use_case(reply)
            .execute(&LlmConfig::default(), &story(), None)
            .await
            .unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].story_file, "login.txt");
        assert_eq!(cases[0].case_id, "CP-001");
        assert_eq!(cases[0].steps, "1. Abrir la app\n2. Ingresar credenciales");
    }

    #[tokio::test]
    async fn fenced_reply_is_accepted() {
        let reply = "```json\n[{\"id_caso\": \"CP-001\", \"pasos\": \"Abrir; Cerrar\"}]\n```";
        let cases = use_case(reply)
            .execute(&LlmConfig::default(), &story(), None)
            .await
            .unwrap();
        assert_eq!(cases[0].steps, "1. Abrir\n2. Cerrar");
    }

    #[tokio::test]
    async fn reply_without_array_is_parse_error() {
        let err = use_case("No puedo generar casos.")
            .execute(&LlmConfig::default(), &story(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[tokio::test]
    async fn reply_that_is_not_a_case_list_is_parse_error() {
        let err = use_case("[1, 2, 3]")
            .execute(&LlmConfig::default(), &story(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[tokio::test]
    async fn custom_prompt_without_placeholder_still_carries_story() {
        let reply = "[]";
        let cases = use_case(reply)
            .execute(
                &LlmConfig::default(),
                &story(),
                Some("Genera los casos de prueba."),
            )
            .await
            .unwrap();
        assert!(cases.is_empty());
    }
}
