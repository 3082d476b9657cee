use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use colloquy_api::{
    config::Config,
    middleware::logging,
    routes::{health, messages, threads},
    service::ConversationService,
    state::AppState,
};
use colloquy_core::{OrchestratorConfig, RunOrchestrator};
use colloquy_gateway::{AssistantClient, AssistantGateway};
use colloquy_store::{MemoryThreadStore, ThreadStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Colloquy API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize the assistant gateway
    tracing::info!("Initializing assistant gateway");
    let mut client = AssistantClient::new(
        config.openai_api_key.clone(),
        config.openai_assistant_id.clone(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to create assistant client: {}", e))?;
    if let Some(base_url) = config.assistant.base_url.clone() {
        client = client.with_base_url(base_url);
    }
    let gateway: Arc<dyn AssistantGateway> = Arc::new(client);

    // Initialize the thread store
    let store = build_store(&config).await?;

    // Initialize the run orchestrator
    tracing::info!("Initializing run orchestrator");
    let orchestrator = Arc::new(RunOrchestrator::new(
        gateway.clone(),
        store.clone(),
        OrchestratorConfig::from(&config.assistant),
    ));

    let conversations = Arc::new(ConversationService::new(
        gateway,
        store.clone(),
        orchestrator,
        config.assistant.instructions.clone(),
    ));

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), conversations, store));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ThreadStore>> {
    match config.store.backend.as_str() {
        "memory" => {
            tracing::info!("Using in-memory thread store");
            Ok(Arc::new(MemoryThreadStore::new()))
        }
        #[cfg(feature = "mongodb")]
        "mongodb" => {
            tracing::info!("Connecting to MongoDB");
            let store = colloquy_store::MongoThreadStore::connect(
                &config.mongodb_uri,
                &config.store.database,
            )
            .await?;
            tracing::info!("MongoDB connected");
            Ok(Arc::new(store))
        }
        other => anyhow::bail!("unsupported store backend: {}", other),
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Threads
        .route("/threads", post(threads::create_thread))
        .route("/threads/:thread_id", get(threads::get_thread))
        // Messages
        .route("/threads/:thread_id/messages", get(messages::list_messages))
        .route("/threads/:thread_id/messages", post(messages::send_message));

    // Build full router with middleware
    Router::new()
        .merge(api_routes)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(300)))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
