//! Action server binary

use recipe_assistant::actions::{ActionRegistry, ActionServices};
use recipe_assistant::api::{create_router, AppState};
use recipe_assistant::config::AppConfig;
use recipe_assistant::generation::{GenerationSettings, StructuredGenerationClient};
use recipe_assistant::llm::{CompletionService, LoggingService, OpenAIService};
use recipe_assistant::tts::{OpenAiSpeech, SpeechSynthesizer};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_assistant=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration, validated once
    let config = AppConfig::from_env();
    let openai = config.openai();

    let generator = openai.clone().map(|openai| {
        let service: Arc<dyn CompletionService> = Arc::new(OpenAIService::new(&openai));
        let service = Arc::new(LoggingService::new(service));
        Arc::new(StructuredGenerationClient::new(
            service,
            GenerationSettings::from(&openai),
        ))
    });

    let speech = openai.as_ref().map(|openai| {
        Arc::new(OpenAiSpeech::new(openai, config.tts.clone())) as Arc<dyn SpeechSynthesizer>
    });

    match &openai {
        Ok(openai) => tracing::info!(
            model = %openai.model,
            base_url = %openai.base_url,
            tts_model = %config.tts.model,
            "OpenAI backend configured"
        ),
        Err(e) => tracing::warn!(error = %e, "Backend actions will report a configuration error"),
    }

    let registry = ActionRegistry::standard(ActionServices {
        generator,
        speech: speech.map_err(Clone::clone),
        tts: config.tts.clone(),
    });
    tracing::info!(actions = ?registry.names(), "Actions registered");

    let app = create_router(AppState::new(registry));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Action server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
