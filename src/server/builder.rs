//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::property_mapping::PropertyMappingService;
use crate::core::repository::CourseLibraryRepository;
use crate::entities::default_property_mappings;
use crate::links::{RouteTable, route_names};
use crate::storage::InMemoryRepository;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the course library HTTP server
///
/// # Example
///
/// ```rust,ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_yaml_file("config.yaml")?)
///     .with_repository(InMemoryRepository::new())
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<AppConfig>,
    repository: Option<Arc<dyn CourseLibraryRepository>>,
    property_mappings: Option<PropertyMappingService>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (defaults to [`AppConfig::default`])
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the repository (defaults to an empty [`InMemoryRepository`])
    pub fn with_repository(mut self, repository: impl CourseLibraryRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Replace the sort mappings (defaults to [`default_property_mappings`])
    pub fn with_property_mappings(mut self, mappings: PropertyMappingService) -> Self {
        self.property_mappings = Some(mappings);
        self
    }

    /// Validate configuration and wiring, and assemble the shared state
    ///
    /// Fails when the configuration is invalid, a sort mapping does not fit its
    /// shapes, or a linked route is missing.
    pub fn build_state(self) -> Result<AppState> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let property_mappings = match self.property_mappings {
            Some(mappings) => mappings,
            None => default_property_mappings()?,
        };

        let routes = RouteTable::course_library(config.base_url.clone());
        routes.verify(route_names::ALL)?;

        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryRepository::new()));

        tracing::debug!(
            mappings = property_mappings.len(),
            base_url = %routes.base_url(),
            "application state ready"
        );

        Ok(AppState {
            config: Arc::new(config),
            repository,
            property_mappings: Arc::new(property_mappings),
            routes: Arc::new(routes),
        })
    }

    /// Build the router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let state = self.build_state()?;
        let addr = state.config.server.address();
        let app = build_router(state);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
