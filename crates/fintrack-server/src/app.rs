//! Application builder.
//!
//! Assembles the pool, cache, repositories, services and router, then serves
//! until Ctrl+C or SIGTERM.

use async_trait::async_trait;
use fintrack_config::AppConfig;
use fintrack_core::{FintrackError, FintrackResult};
use fintrack_repository::{create_pool, DatabasePool, PgCategoryRepository, PgTransactionRepository};
use fintrack_rest::{create_router, AppState, ReadinessCheck};
use fintrack_service::{
    CacheSettings, CategoryServiceImpl, HashCache, MemoryHashCache, RedisHashCache,
    TransactionServiceImpl,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use crate::startup::print_startup_info;

/// Reports the database as ready when `SELECT 1` succeeds.
pub struct DatabaseReadiness(pub Arc<DatabasePool>);

#[async_trait]
impl ReadinessCheck for DatabaseReadiness {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        self.0.health_check().await.map_err(|e| e.to_string())
    }
}

/// Selects the cache backend.
///
/// Redis when enabled; the in-process LRU otherwise, or when the Redis pool
/// cannot be built. The cache never gates startup.
pub fn build_cache(config: &AppConfig) -> Arc<dyn HashCache> {
    if config.redis.enabled {
        match RedisHashCache::connect(&config.redis) {
            Ok(cache) => return Arc::new(cache),
            Err(e) => warn!(
                error = %e,
                "Redis cache unavailable, falling back to in-process cache"
            ),
        }
    }

    Arc::new(MemoryHashCache::new(config.cache.memory_max_entries))
}

/// Wires repositories and services over a pool and cache.
pub fn build_state(
    pool: Arc<DatabasePool>,
    cache: Arc<dyn HashCache>,
    config: &AppConfig,
) -> AppState {
    let settings = CacheSettings::from(&config.cache);

    let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
    let transaction_repository = Arc::new(PgTransactionRepository::new(pool.clone()));

    let category_service = Arc::new(CategoryServiceImpl::new(
        category_repository,
        cache.clone(),
        settings,
    ));
    let transaction_service = Arc::new(TransactionServiceImpl::new(
        transaction_repository,
        cache,
        settings,
    ));

    AppState::new(
        category_service,
        transaction_service,
        config.server.request_timeout(),
    )
    .with_readiness_check(Arc::new(DatabaseReadiness(pool)))
}

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds and runs the application.
    pub async fn run(self) -> FintrackResult<()> {
        let config = self.config.unwrap_or_default();

        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        } else {
            info!("Skipping database migrations");
        }

        let cache = build_cache(&config);
        info!(backend = cache.backend(), ttl_secs = config.cache.ttl_secs, "Entity cache ready");

        let state = build_state(pool.clone(), cache, &config);
        let router = create_router(state, &config.server);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| FintrackError::Startup(format!("Failed to bind {addr}: {e}")))?;

        info!("Starting REST server on http://{}", addr);
        print_startup_info(&config.server);

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| FintrackError::Startup(format!("REST server error: {e}")));

        pool.close().await;
        served?;

        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
