//! Main Entrypoint for the Mentor Kai API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the student profile and any prompt overrides.
//! 3. Initializing the model and speech clients and the tutor service.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use kai_api::{
    config::Config,
    loader::{load_profile, load_templates},
    router::create_router,
    state::AppState,
};
use kai_core::{
    Tutor,
    llm_client::OpenAICompatibleClient,
    profile::ProfileStore,
    prompt::PromptComposer,
    speech::OpenAISpeechClient,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
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

    // --- 3. Load Profile and Prompts ---
    let profile = load_profile(config.profile_path.as_deref())?;
    let templates = load_templates(config.prompts_path.as_deref())?;
    info!(
        student = %profile.name,
        from = %profile.home_city,
        now_in = %profile.current_city,
        "Student profile loaded"
    );

    // --- 4. Initialize Shared Services ---
    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.openai_api_key)
        .with_api_base(&config.openai_api_base);
    let generator = Arc::new(OpenAICompatibleClient::new(
        openai_config.clone(),
        config.chat_model.clone(),
    ));
    let speech = Arc::new(
        OpenAISpeechClient::new(openai_config, &config.tts_model, &config.tts_voice)
            .context("Failed to configure speech client")?,
    );

    let tutor = Tutor::new(
        ProfileStore::new(profile),
        PromptComposer::new(templates),
        generator,
        speech,
    );
    let app_state = Arc::new(AppState {
        tutor: Arc::new(tutor),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        model = %config.chat_model,
        tts_model = %config.tts_model,
        voice = %config.tts_voice,
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
