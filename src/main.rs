use std::sync::Arc;

use jobmatch_api::{
    config::Config,
    db::{self, InMemoryStore, JobStore, PgStore, UserStore},
    routes::{cors_layer, create_router, AppState},
    services::{
        providers::{CachedEmbeddingProvider, CohereProvider, EmbeddingProvider},
        Recommender,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobmatch_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting job match API");

    // Storage
    let (jobs, users): (Arc<dyn JobStore>, Arc<dyn UserStore>) = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Connected to PostgreSQL");
            let store = Arc::new(PgStore::new(pool));
            let jobs: Arc<dyn JobStore> = store.clone();
            let users: Arc<dyn UserStore> = store;
            (jobs, users)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            let store = Arc::new(InMemoryStore::new());
            let jobs: Arc<dyn JobStore> = store.clone();
            let users: Arc<dyn UserStore> = store;
            (jobs, users)
        }
    };

    if config.seed_jobs {
        db::seed_jobs_if_empty(jobs.as_ref()).await?;
    }

    // Embeddings
    let cohere: Arc<dyn EmbeddingProvider> = Arc::new(CohereProvider::new(
        config.cohere_api_key.clone(),
        config.cohere_api_url.clone(),
    )?);

    let (provider, cache_handle) = match &config.redis_url {
        Some(redis_url) => {
            let client = db::create_redis_client(redis_url)?;
            let (cache, handle) = db::Cache::new(client);
            tracing::info!(ttl = config.embedding_cache_ttl, "Embedding cache enabled");
            let cached: Arc<dyn EmbeddingProvider> = Arc::new(CachedEmbeddingProvider::new(
                cohere,
                cache,
                config.embedding_cache_ttl,
            ));
            (cached, Some(handle))
        }
        None => (cohere, None),
    };

    let recommender = Recommender::new(provider, config.embedding_model.clone())
        .with_timeout(config.embed_timeout())
        .with_max_matches(config.max_matches);

    tracing::info!(
        model = %recommender.model(),
        max_matches = config.max_matches,
        timeout_secs = config.embed_timeout_secs,
        "Recommender configured"
    );

    let state = AppState::new(jobs, users, recommender);
    let app = create_router(state).layer(cors_layer(config.frontend_url.as_deref())?);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
