pub mod page;

use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use validator::Validate;

use crate::application::{ChatUseCase, GenerateCasesUseCase};
use crate::domain::llm_config::LlmConfig;
use crate::domain::story::StoryDocument;
use crate::domain::test_case::TestCase;
use crate::infrastructure::csv::CsvExporter;
use crate::infrastructure::llm_clients::{GeminiClient, LlmClient};

pub const EXPORT_FILE_NAME: &str = "casos_prueba_generados.csv";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub generate_use_case: GenerateCasesUseCase,
    pub chat_use_case: ChatUseCase,
    pub llm_client: Arc<dyn LlmClient + Send + Sync>,
    /// HU loaded as chat context; mirrors the page's session state.
    pub story_context: Mutex<Option<String>>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn new() -> Self {
        let llm_client: Arc<dyn LlmClient + Send + Sync> = Arc::new(GeminiClient::new());
        Self {
            generate_use_case: GenerateCasesUseCase::new(llm_client.clone()),
            chat_use_case: ChatUseCase::new(llm_client.clone()),
            llm_client,
            story_context: Mutex::new(None),
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub config: LlmConfig,
    pub stories: Vec<StoryDocument>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub cases: Vec<TestCase>,
    pub errors: Vec<String>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub config: LlmConfig,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub has_context: bool,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub cases: Vec<TestCase>,
}

#[derive(Serialize)]
pub struct ContextStatus {
    pub has_context: bool,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::INDEX_HTML)
}

#[post("/generate")]
async fn generate(data: web::Data<HttpState>, req: web::Json<GenerateRequest>) -> impl Responder {
    if req.stories.is_empty() {
        return HttpResponse::BadRequest().body("No stories to process");
    }

    add_log(
        &data.logs,
        "INFO",
        "Generate",
        &format!(
            "Generating cases for {} stories (model={})",
            req.stories.len(),
            req.config.model
        ),
    );

    // First non-blank story becomes the chat context, like the page's
    // session state; a blank one would flag context the chat never uses.
    if let Some(first) = req
        .stories
        .first()
        .filter(|story| !story.content.trim().is_empty())
    {
        *data.story_context.lock().unwrap() = Some(first.content.clone());
    }

    let mut cases = Vec::new();
    let mut errors = Vec::new();

    for story in &req.stories {
        if let Err(e) = story.validate() {
            errors.push(format!("{}: {}", story.name, e));
            continue;
        }

        match data
            .generate_use_case
            .execute(&req.config, story, req.custom_prompt.as_deref())
            .await
        {
            Ok(story_cases) => {
                add_log(
                    &data.logs,
                    "INFO",
                    "Generate",
                    &format!("{}: {} cases generated", story.name, story_cases.len()),
                );
                cases.extend(story_cases);
            }
            Err(e) => {
                add_log(
                    &data.logs,
                    "ERROR",
                    "Generate",
                    &format!("{}: {}", story.name, e),
                );
                errors.push(format!("{}: {}", story.name, e));
            }
        }
    }

    HttpResponse::Ok().json(GenerateResponse { cases, errors })
}

#[post("/chat")]
async fn chat(data: web::Data<HttpState>, req: web::Json<ChatRequest>) -> impl Responder {
    let context = data.story_context.lock().unwrap().clone();
    let has_context = context.is_some();

    add_log(
        &data.logs,
        "INFO",
        "Chat",
        &format!(
            "Chat message received (context={})",
            if has_context { "HU" } else { "general" }
        ),
    );

    match data
        .chat_use_case
        .execute(&req.config, context.as_deref(), &req.message)
        .await
    {
        Ok(reply) => HttpResponse::Ok().json(ChatResponse { reply, has_context }),
        Err(e) => {
            add_log(&data.logs, "ERROR", "Chat", &format!("Chat failed: {}", e));
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[post("/export")]
async fn export(data: web::Data<HttpState>, req: web::Json<ExportRequest>) -> impl Responder {
    match CsvExporter::new().to_bytes(&req.cases) {
        Ok(bytes) => {
            add_log(
                &data.logs,
                "INFO",
                "Export",
                &format!("Exported {} cases to CSV", req.cases.len()),
            );
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                ))
                .body(bytes)
        }
        Err(e) => {
            add_log(&data.logs, "ERROR", "Export", &format!("Export failed: {}", e));
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[post("/models")]
async fn list_models(data: web::Data<HttpState>, config: web::Json<LlmConfig>) -> impl Responder {
    add_log(&data.logs, "INFO", "Models", "Fetching model list");

    match data.llm_client.list_models(&config).await {
        Ok(models) => HttpResponse::Ok().json(models),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Models",
                &format!("Failed to list models: {}", e),
            );
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/context")]
async fn context_status(data: web::Data<HttpState>) -> impl Responder {
    let has_context = data.story_context.lock().unwrap().is_some();
    HttpResponse::Ok().json(ContextStatus { has_context })
}

#[post("/context/clear")]
async fn clear_context(data: web::Data<HttpState>) -> impl Responder {
    *data.story_context.lock().unwrap() = None;
    add_log(&data.logs, "INFO", "Chat", "Story context cleared");
    HttpResponse::Ok().json(ContextStatus { has_context: false })
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry);
    if logs.len() > 100 {
        logs.remove(0);
    }
}

pub fn start_server(state: Arc<HttpState>, port: u16) -> std::io::Result<Server> {
    let state = web::Data::from(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // local single-user tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(index)
            .service(
                web::scope("/api")
                    .service(generate)
                    .service(chat)
                    .service(export)
                    .service(list_models)
                    .service(get_logs)
                    .service(context_status)
                    .service(clear_context),
            )
    })
    .bind(("127.0.0.1", port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{AppError, Result};
    use actix_web::test;
    use async_trait::async_trait;

    fn app_state() -> web::Data<HttpState> {
        web::Data::from(Arc::new(HttpState::new()))
    }

    /// Fails for stories mentioning "historia mala", answers everything else
    /// with a single valid case.
    struct FlakyClient;

    #[async_trait]
    impl LlmClient for FlakyClient {
        async fn generate(&self, _config: &LlmConfig, prompt: &str) -> Result<String> {
            if prompt.contains("historia mala") {
                Err(AppError::LLMError("model unavailable".to_string()))
            } else {
                Ok(r#"[{"id_caso": "CP-001", "pasos": ["Abrir la app"]}]"#.to_string())
            }
        }

        async fn list_models(&self, _config: &LlmConfig) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    fn scripted_state(client: Arc<dyn LlmClient + Send + Sync>) -> web::Data<HttpState> {
        web::Data::from(Arc::new(HttpState {
            generate_use_case: GenerateCasesUseCase::new(client.clone()),
            chat_use_case: ChatUseCase::new(client.clone()),
            llm_client: client,
            story_context: Mutex::new(None),
            logs: Arc::new(Mutex::new(Vec::new())),
        }))
    }

    #[actix_web::test]
    async fn export_returns_csv_with_bom() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .service(web::scope("/api").service(export)),
        )
        .await;

        let case = TestCase {
            story_file: "hu.txt".into(),
            criterion: String::new(),
            case_id: "CP-001".into(),
            test_type: "Functional".into(),
            description: String::new(),
            preconditions: String::new(),
            steps: "1. Abrir".into(),
            expected_result: String::new(),
            priority: "Alta".into(),
            automate: "si".into(),
        };

        let req = test::TestRequest::post()
            .uri("/api/export")
            .set_json(serde_json::json!({ "cases": [case] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        assert_eq!(&body[..3], b"\xef\xbb\xbf");
        let text = String::from_utf8(body[3..].to_vec()).unwrap();
        assert!(text.starts_with("archivo_hu;criterio;id_caso"));
        assert!(text.contains("CP-001"));
    }

    #[actix_web::test]
    async fn context_can_be_cleared() {
        let state = app_state();
        *state.story_context.lock().unwrap() = Some("HU".to_string());

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").service(context_status).service(clear_context)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/context/clear")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(state.story_context.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn failing_story_is_reported_and_the_rest_still_process() {
        let state = scripted_state(Arc::new(FlakyClient));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").service(generate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({
                "config": LlmConfig::default(),
                "stories": [
                    { "name": "mala.txt", "content": "historia mala" },
                    { "name": "buena.txt", "content": "historia buena" }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        let cases = body["cases"].as_array().unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0]["archivo_hu"], "buena.txt");
        assert_eq!(cases[0]["id_caso"], "CP-001");

        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].as_str().unwrap().starts_with("mala.txt:"));
    }

    #[actix_web::test]
    async fn blank_first_story_does_not_become_chat_context() {
        let state = scripted_state(Arc::new(FlakyClient));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").service(generate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({
                "config": LlmConfig::default(),
                "stories": [{ "name": "vacia.txt", "content": "   " }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(state.story_context.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn generate_rejects_empty_story_list() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .service(web::scope("/api").service(generate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({
                "config": LlmConfig::default(),
                "stories": []
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn index_serves_the_page() {
        let app = test::init_service(App::new().app_data(app_state()).service(index)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Generador de Casos de Prueba"));
    }
}
