mod api;
mod config;
mod db;
mod models;
mod repository;
mod schema;
mod telemetry;

use recipebank_core::ai::{OpenAiClient, RecipeExtractor};
use recipebank_core::http::ReqwestClient;
use recipebank_core::{InMemoryRecipeRepository, RecipeRepository, RecipeService};
use std::env;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AppConfig, StorageConfig};
use crate::repository::PgRecipeRepository;

/// Application state shared across all handlers
pub type AppState = Arc<RecipeService>;

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Database(#[from] db::DbError),

    #[error("Failed to initialize AI client: {0}")]
    Ai(#[from] recipebank_core::ai::AiError),

    #[error("Failed to initialize HTTP client: {0}")]
    Http(#[from] recipebank_core::FetchError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

fn build_service(config: &AppConfig) -> Result<RecipeService, StartupError> {
    let repository: Arc<dyn RecipeRepository> = match &config.storage {
        StorageConfig::Postgres {
            database_url,
            pool_size,
            timeout,
        } => {
            let pool = db::create_pool(database_url, *pool_size, *timeout)?;
            tracing::info!(pool_size, "Using PostgreSQL storage");
            Arc::new(PgRecipeRepository::new(pool, *timeout))
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage, recipes will not survive a restart");
            Arc::new(InMemoryRecipeRepository::new())
        }
    };

    let mut service = RecipeService::new(repository);

    if let Some(ai) = &config.ai {
        let client = OpenAiClient::new(ai)?;
        let http = ReqwestClient::new()?;
        service = service.with_extractor(RecipeExtractor::new(
            Arc::new(client),
            Arc::new(http),
            ai.timeout,
        ));
        tracing::info!(model = %ai.model, "AI recipe extraction enabled");
    } else {
        tracing::info!("AI recipe extraction disabled");
    }

    Ok(service)
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let state: AppState = Arc::new(build_service(&config)?);
    let app = api::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        match api::openapi().to_pretty_json() {
            Ok(spec) => println!("{}", spec),
            Err(e) => {
                eprintln!("Failed to render OpenAPI document: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    telemetry::init_telemetry();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
