use anyhow::Result;
use course_library::config::AppConfig;
use course_library::server::ServerBuilder;
use course_library::storage::{InMemoryRepository, seed_repository};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the YAML configuration file
const CONFIG_ENV: &str = "COURSE_LIBRARY_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_library=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            AppConfig::from_yaml_file(&path)?
        }
        Err(_) => AppConfig::default(),
    };
    tracing::info!(
        environment = ?config.environment,
        link_placement = ?config.pagination.link_placement,
        "Starting course library API"
    );

    let repository = InMemoryRepository::new();
    if config.seed {
        seed_repository(&repository).await?;
    }

    ServerBuilder::new()
        .with_config(config)
        .with_repository(repository)
        .serve()
        .await
}
