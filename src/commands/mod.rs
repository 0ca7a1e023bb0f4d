use crate::api::OpenAiApi;
use crate::assistant::EditAssistant;
use crate::cli::display::CliDisplayManager;
use crate::errors::AppError;
use crate::models::{EditRequest, Message, PreviousProposal};
use crate::server::{self, Backend};
use crate::utils::config::{load_config, validate_config, write_config, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Options of the propose subcommand.
#[derive(Debug, Clone)]
pub struct ProposeOptions {
    pub file: PathBuf,
    pub prompt: String,
    pub history: Option<PathBuf>,
    pub feedback: bool,
    pub previous: Option<PathBuf>,
    pub json: bool,
}

/// Builds the serving backend. A missing credential leaves the server
/// running but unconfigured, so every request fails fast.
pub fn build_backend(config: &Config) -> Backend {
    match OpenAiApi::from_env(&config.base_url, &config.model, config.temperature) {
        Ok(client) => Backend::Ready(Arc::new(EditAssistant::new(Arc::new(client)))),
        Err(e) => {
            log::error!("Model client not initialised: {}", e);
            Backend::Unconfigured
        }
    }
}

/// Handles the serve subcommand
pub async fn handle_serve_subcommand(
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), AppError> {
    let host = host.unwrap_or_else(|| config.host.clone());
    let port = port.unwrap_or(config.port);
    let backend = build_backend(config);

    let display_manager = CliDisplayManager::new();
    display_manager.print_header();
    display_manager.print_server_start(
        &format!("http://{}:{}{}", host, port, server::EDIT_PATH),
        &config.model,
        matches!(backend, Backend::Ready(_)),
    );

    server::serve(backend, &host, port, config.max_body_bytes).await
}

/// Handles the propose subcommand
pub async fn handle_propose_subcommand(
    config: &Config,
    options: ProposeOptions,
) -> Result<(), AppError> {
    let start_time = Instant::now();
    let request = load_request(&options).await?;

    let client = OpenAiApi::from_env(&config.base_url, &config.model, config.temperature)?;
    let assistant = EditAssistant::new(Arc::new(client));

    let mut display_manager = CliDisplayManager::new();
    if !options.json {
        display_manager.print_header();
        display_manager.start_spinner(&format!("Waiting for {}", config.model));
    }

    let proposal = assistant.propose(&request).await;
    display_manager.stop_spinner();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&proposal)?);
    } else {
        display_manager.print_proposal(
            &request.current_file_content,
            &proposal,
            start_time.elapsed(),
        );
    }
    Ok(())
}

/// Reads the document, history and previous proposal named on the command line.
pub async fn load_request(options: &ProposeOptions) -> Result<EditRequest, AppError> {
    let current_file_content = tokio::fs::read_to_string(&options.file).await?;

    let history: Vec<Message> = match &options.history {
        Some(path) => read_json(path).await?,
        None => Vec::new(),
    };

    if options.feedback {
        let previous_proposal: Option<PreviousProposal> = match &options.previous {
            Some(path) => Some(read_json(path).await?),
            None => None,
        };
        Ok(EditRequest::feedback(
            current_file_content,
            options.prompt.clone(),
            history,
            previous_proposal,
        ))
    } else {
        Ok(EditRequest::instruction(
            current_file_content,
            options.prompt.clone(),
            history,
        ))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&text).map_err(|e| {
        AppError::InvalidInput(format!("{} is not valid JSON: {}", path.display(), e))
    })
}

/// Handles the config subcommand
#[allow(clippy::too_many_arguments)]
pub fn handle_config_subcommand(
    config_path: Option<&Path>,
    set_host: Option<String>,
    set_port: Option<u16>,
    set_log_level: Option<String>,
    set_model: Option<String>,
    set_base_url: Option<String>,
    set_temperature: Option<f32>,
    set_max_body_bytes: Option<usize>,
) -> Result<Config, AppError> {
    let mut config = load_config(config_path)?;

    if let Some(host) = set_host {
        println!("Host set to {}", host);
        config.host = host;
    }

    if let Some(port) = set_port {
        config.port = port;
        println!("Port set to {}", port);
    }

    if let Some(log_level) = set_log_level {
        println!("Log level set to {}", log_level);
        config.log_level = log_level;
    }

    if let Some(model) = set_model {
        println!("Model set to {}", model);
        config.model = model;
    }

    if let Some(base_url) = set_base_url {
        println!("Base URL set to {}", base_url);
        config.base_url = base_url;
    }

    if let Some(temperature) = set_temperature {
        config.temperature = temperature;
        println!("Temperature set to {}", temperature);
    }

    if let Some(max_body_bytes) = set_max_body_bytes {
        config.max_body_bytes = max_body_bytes;
        println!("Maximum body size set to {} bytes", max_body_bytes);
    }

    validate_config(&config)?;
    write_config(&config, config_path)?;
    Ok(config)
}
