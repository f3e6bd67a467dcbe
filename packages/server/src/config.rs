use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Log file appended to alongside stdout. Empty disables file output.
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("SECRET_KEY").ok(),
        )
    }

    /// Build the layered configuration. `database_url` and `secret_key` are the
    /// plain `DATABASE_URL` / `SECRET_KEY` variables and win over every other source.
    pub fn load_from(
        database_url: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("log.level", "info")?
            .set_default("log.file", "log/app.log")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., QUIZBANK__SERVER__PORT)
            .add_source(Environment::with_prefix("QUIZBANK").separator("__"))
            .set_override_option("database.url", database_url)?
            .set_override_option("auth.secret_key", secret_key)?
            .build()?;

        s.try_deserialize()
    }
}
