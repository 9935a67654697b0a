use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::{AppConfig, EnvLookup, ServerConfig, StorageConfig};
use dotenvy::dotenv;
use service::recipes::RecipeStore;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `$CONFIG_PATH`); without one, fall back to env vars
/// and defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let file = configs::load_optional()?;
    config_or_env(file, &configs::process_env)
}

fn config_or_env(file: Option<AppConfig>, env: EnvLookup<'_>) -> Result<AppConfig, StartupError> {
    let mut cfg = match file {
        Some(cfg) => cfg,
        None => AppConfig { server: ServerConfig::from_env(env), ..AppConfig::default() },
    };
    cfg.normalize_and_validate_with(env)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

/// Open the recipe store described by `storage`, seeding it when asked.
pub async fn build_store(storage: &StorageConfig) -> Result<Arc<RecipeStore>, StartupError> {
    let store = match storage.data_file.as_deref() {
        Some(path) => {
            common::env::ensure_data_dir(Path::new(path)).await?;
            info!(%path, "using file-backed recipe store");
            RecipeStore::open(path).await?
        }
        None => {
            info!("using in-memory recipe store");
            RecipeStore::in_memory()
        }
    };
    if storage.seed {
        store.seed_defaults().await?;
    }
    Ok(store)
}

/// Assemble the router around an already-built store.
pub fn build_app(store: Arc<RecipeStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    init_logging(LogFormat::parse(&cfg.logging.format).unwrap_or(LogFormat::Compact));

    let store = build_store(&cfg.storage).await?;
    let app = build_app(store);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting recipe server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn without_config_file_env_supplies_everything() -> anyhow::Result<()> {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "9200"),
            ("RECIPES_DATA_FILE", "data/recipes.json"),
            ("LOG_FORMAT", "json"),
        ]);
        let cfg = config_or_env(None, &|k| env.get(k).map(|v| v.to_string()))?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9200);
        assert_eq!(cfg.storage.data_file.as_deref(), Some("data/recipes.json"));
        assert_eq!(cfg.logging.format, "json");
        Ok(())
    }

    #[test]
    fn config_file_wins_over_server_env() -> anyhow::Result<()> {
        let env: HashMap<&str, &str> = HashMap::from([("SERVER_PORT", "9200")]);
        let file = configs::parse("[server]\nport = 7000\n")?;
        let cfg = config_or_env(Some(file), &|k| env.get(k).map(|v| v.to_string()))?;
        assert_eq!(cfg.server.port, 7000);
        Ok(())
    }

    #[test]
    fn bad_log_format_env_is_invalid_config() {
        let env: HashMap<&str, &str> = HashMap::from([("LOG_FORMAT", "pretty")]);
        let res = config_or_env(None, &|k| env.get(k).map(|v| v.to_string()));
        assert!(matches!(res, Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let bad = ServerConfig { host: "not a host".into(), port: 8080 };
        assert!(matches!(bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
        let good = ServerConfig { host: "127.0.0.1".into(), port: 8080 };
        assert!(bind_addr(&good).is_ok());
    }

    #[tokio::test]
    async fn file_store_gets_its_directory() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("recipes_startup_{}", uuid::Uuid::new_v4()));
        let file = root.join("data").join("recipes.json");
        let storage = StorageConfig { data_file: Some(file.to_string_lossy().into_owned()), seed: true };
        let store = build_store(&storage).await?;
        assert!(!store.list().await.is_empty());
        assert!(std::fs::metadata(&file)?.is_file());
        let _ = std::fs::remove_dir_all(&root);
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_store_is_seeded_by_default() -> anyhow::Result<()> {
        let store = build_store(&StorageConfig::default()).await?;
        assert!(!store.list().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn seeding_can_be_disabled() -> anyhow::Result<()> {
        let store = build_store(&StorageConfig { data_file: None, seed: false }).await?;
        assert!(store.list().await.is_empty());
        Ok(())
    }
}
