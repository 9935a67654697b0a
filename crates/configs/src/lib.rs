use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

/// Where recipes live. Without `data_file` the store is purely in-memory.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_file: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: None, seed: default_seed() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_seed() -> bool { true }
fn default_log_format() -> String { "compact".into() }

/// Source of environment values; `process_env` in production, a map in tests.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read `$CONFIG_PATH` (default `config.toml`). A missing file is `Ok(None)`
/// so callers can fall back to env vars; a file that fails to parse is an error.
pub fn load_optional() -> Result<Option<AppConfig>> {
    let path = process_env("CONFIG_PATH").unwrap_or_else(|| "config.toml".to_string());
    match std::fs::read_to_string(&path) {
        Ok(content) => parse(&content).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_and_validate_with(&process_env)
    }

    pub fn normalize_and_validate_with(&mut self, env: EnvLookup<'_>) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env(env);
        self.logging.normalize_from_env(env);
        self.logging.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    /// Host/port for runs without a config file: `SERVER_HOST` / `SERVER_PORT`,
    /// defaulting to `127.0.0.1:8081`.
    pub fn from_env(env: EnvLookup<'_>) -> Self {
        let host = env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = env("SERVER_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8081);
        Self { host, port }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Fill `data_file` from `RECIPES_DATA_FILE` when the TOML leaves it out;
    /// a blank path means in-memory.
    pub fn normalize_from_env(&mut self, env: EnvLookup<'_>) {
        if self.data_file.is_none() {
            self.data_file = env("RECIPES_DATA_FILE");
        }
        if self.data_file.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.data_file = None;
        }
    }
}

impl LoggingConfig {
    pub fn normalize_from_env(&mut self, env: EnvLookup<'_>) {
        if let Some(format) = env("LOG_FORMAT") {
            self.format = format;
        }
        self.format = self.format.trim().to_ascii_lowercase();
    }

    pub fn validate(&self) -> Result<()> {
        match self.format.as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be `compact` or `json`, got `{other}`")),
        }
    }
}
