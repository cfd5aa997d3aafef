//! Application state - shared across all handlers.

use std::sync::Arc;

use planner_core::ports::PostRepository;
use planner_infra::database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use planner_infra::database::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub http: reqwest::Client,
    pub unsplash_access_key: Option<String>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let posts = Self::init_repo(config.database.as_ref()).await;

        tracing::info!("Application state initialized");

        Self {
            posts,
            http: reqwest::Client::new(),
            unsplash_access_key: config.unsplash_access_key.clone(),
        }
    }

    /// State backed entirely by the in-memory repository.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            http: reqwest::Client::new(),
            unsplash_access_key: None,
        }
    }

    #[cfg(feature = "postgres")]
    async fn init_repo(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        if let Some(config) = db_config {
            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    return Arc::new(PostgresPostRepository::new(connections.main));
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Arc::new(InMemoryPostRepository::new())
    }

    #[cfg(not(feature = "postgres"))]
    async fn init_repo(_db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
