use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub mail: MailConfig,

    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// SQLite database URL, e.g. `sqlite:data/dagbok.db` or `sqlite::memory:`.
    pub database_path: String,

    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/dagbok.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub smtp_host: String,

    pub smtp_port: u16,

    pub username: Option<String>,

    pub password: Option<String>,

    pub use_tls: bool,

    /// Sender shown on outgoing mail, e.g. `My App <info@my-app.com>`.
    pub from_address: String,

    /// Base URL of the web client; activation and reset links point here.
    pub client_base_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            username: None,
            password: None,
            use_tls: false,
            from_address: "My App <info@my-app.com>".to_string(),
            client_base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HS256 secret for session tokens. Must be at least 32 bytes.
    pub jwt_secret: String,

    /// Argon2 memory cost in KiB.
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations).
    pub argon2_time_cost: u32,

    /// Argon2 lanes.
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-development-only-secret-0123456789".to_string(),
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

impl Config {
    /// Loads configuration from `DAGBOK_CONFIG`, `./config.toml` or the
    /// platform config directory, falling back to defaults when no file
    /// exists.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            info!("No config file found, using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("DAGBOK_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from("config.toml");
        if local.exists() {
            return Some(local);
        }

        let fallback = dirs::config_dir()?.join("dagbok").join("config.toml");
        fallback.exists().then_some(fallback)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.security.jwt_secret.len() >= 32,
            "security.jwt_secret must be at least 32 bytes"
        );
        anyhow::ensure!(
            self.security.argon2_memory_cost_kib >= 1024,
            "security.argon2_memory_cost_kib must be at least 1024"
        );
        anyhow::ensure!(
            self.security.argon2_time_cost >= 1 && self.security.argon2_parallelism >= 1,
            "argon2 time cost and parallelism must be at least 1"
        );
        anyhow::ensure!(
            !self.general.database_path.is_empty(),
            "general.database_path cannot be empty"
        );
        Ok(())
    }
}
