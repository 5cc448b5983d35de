use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use casegen::application::GenerateCasesUseCase;
use casegen::domain::error::{AppError, Result};
use casegen::infrastructure::config::Settings;
use casegen::infrastructure::csv::CsvExporter;
use casegen::infrastructure::llm_clients::GeminiClient;
use casegen::infrastructure::storage::read_story_files;
use casegen::interfaces::http::{start_server, HttpState};

#[derive(Parser)]
#[command(name = "casegen", version, about = "AI-assisted test case generator for user stories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate test cases for every .txt user story in a folder and
    /// export them as semicolon-delimited CSV.
    Generate {
        /// Folder holding the user story .txt files
        #[arg(long)]
        stories_dir: Option<PathBuf>,
        /// Output CSV file
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Gemini model name
        #[arg(long)]
        model: Option<String>,
        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
        /// File with a custom generation prompt (keep {hu_texto} in it)
        #[arg(long)]
        prompt_file: Option<PathBuf>,
    },
    /// Start the interactive page on localhost.
    Serve {
        /// Port to bind on 127.0.0.1
        #[arg(long, short)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate {
            stories_dir,
            output,
            model,
            temperature,
            prompt_file,
        } => run_generate(stories_dir, output, model, temperature, prompt_file).await,
        Command::Serve { port } => run_serve(port).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_generate(
    stories_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    model: Option<String>,
    temperature: Option<f32>,
    prompt_file: Option<PathBuf>,
) -> Result<()> {
    let mut settings = Settings::load()?;
    if let Some(model) = model {
        settings.model = model;
    }
    if let Some(temperature) = temperature {
        settings.temperature = temperature;
    }
    let stories_dir = stories_dir.unwrap_or_else(|| settings.stories_dir.clone());
    let output = output.unwrap_or_else(|| settings.output.clone());

    if !settings.has_api_key() {
        return Err(AppError::ConfigError(
            "No API key found. Set GEMINI_API_KEY (a .env file works too)".to_string(),
        ));
    }

    let custom_prompt = match prompt_file {
        Some(path) => Some(std::fs::read_to_string(&path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?),
        None => None,
    };

    info!("Reading user stories from {}", stories_dir.display());
    let stories = read_story_files(&stories_dir)?;
    info!("{} stories found, model {}", stories.len(), settings.model);

    let use_case = GenerateCasesUseCase::new(Arc::new(GeminiClient::new()));
    let config = settings.llm_config();

    let mut all_cases = Vec::new();
    for story in &stories {
        info!("Processing {}", story.name);
        match use_case
            .execute(&config, story, custom_prompt.as_deref())
            .await
        {
            Ok(cases) => {
                info!("{}: {} cases generated", story.name, cases.len());
                all_cases.extend(cases);
            }
            Err(e) => error!("{}: {}", story.name, e),
        }
    }

    if all_cases.is_empty() {
        return Err(AppError::Internal(
            "No test cases were generated".to_string(),
        ));
    }

    CsvExporter::new().write_file(&all_cases, &output)?;
    info!("{} cases written to {}", all_cases.len(), output.display());
    Ok(())
}

async fn run_serve(port: Option<u16>) -> Result<()> {
    let settings = Settings::load()?;
    let port = port.unwrap_or(settings.port);

    let state = Arc::new(HttpState::new());
    let server = start_server(state, port)
        .map_err(|e| AppError::Internal(format!("Failed to bind 127.0.0.1:{}: {}", port, e)))?;

    info!("Interactive page on http://127.0.0.1:{}", port);
    server
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))
}
