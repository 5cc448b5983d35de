use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::steps::normalize_steps;

/// Test case as the model emits it. The wire keys are the Spanish contract
/// fixed by the generation prompt; `pasos` may arrive as a list, a string,
/// or anything else, and every field tolerates being absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTestCase {
    #[serde(rename = "criterio", default)]
    pub criterion: String,
    #[serde(rename = "id_caso", default)]
    pub case_id: String,
    #[serde(rename = "tipo_prueba", default)]
    pub test_type: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precondiciones", default)]
    pub preconditions: String,
    #[serde(rename = "pasos", default)]
    pub steps: Value,
    #[serde(rename = "resultado_esperado", default)]
    pub expected_result: String,
    #[serde(rename = "prioridad", default)]
    pub priority: String,
    #[serde(rename = "Automatizar", default)]
    pub automate: String,
}

/// Normalized test case: steps are canonical numbered text and the source
/// story file has been stamped on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "archivo_hu", default)]
    pub story_file: String,
    #[serde(rename = "criterio", default)]
    pub criterion: String,
    #[serde(rename = "id_caso", default)]
    pub case_id: String,
    #[serde(rename = "tipo_prueba", default)]
    pub test_type: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precondiciones", default)]
    pub preconditions: String,
    #[serde(rename = "pasos", default)]
    pub steps: String,
    #[serde(rename = "resultado_esperado", default)]
    pub expected_result: String,
    #[serde(rename = "prioridad", default)]
    pub priority: String,
    #[serde(rename = "Automatizar", default)]
    pub automate: String,
}

impl RawTestCase {
    pub fn normalize(self, story_file: &str) -> TestCase {
        TestCase {
            story_file: story_file.to_string(),
            criterion: self.criterion,
            case_id: self.case_id,
            test_type: self.test_type,
            description: self.description,
            preconditions: self.preconditions,
            steps: normalize_steps(&self.steps),
            expected_result: self.expected_result,
            priority: self.priority,
            automate: self.automate,
        }
    }
}
