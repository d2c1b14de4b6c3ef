//! Main Entrypoint for the StudySnaps Tutor Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing the completion gateway and the session history store.
//! 3. Constructing the Axum router and applying middleware.
//! 4. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use std::{fs, net::SocketAddr, sync::Arc};
use studysnaps_api::{config::Config, router::create_router, state::AppState};
use studysnaps_core::{HistoryStore, OpenAICompatibleGateway, TutorEngine};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load the Tutoring Instruction ---
    let prompt_path = config.prompts_path.join("system_prompt.md");
    let system_prompt = fs::read_to_string(&prompt_path)
        .with_context(|| format!("Failed to read system prompt from {}", prompt_path.display()))?;

    // --- 4. Initialize Shared Services ---
    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.api_key)
        .with_api_base(&config.api_base);
    let gateway = Arc::new(OpenAICompatibleGateway::new(
        openai_config,
        config.model_id.clone(),
    ));
    let store = HistoryStore::new(system_prompt.clone(), config.window_turns);
    let engine = Arc::new(TutorEngine::new(store, gateway, system_prompt));

    let app_state = Arc::new(AppState {
        engine,
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        model = %config.model_id,
        window_turns = config.window_turns,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
