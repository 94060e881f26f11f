use serde::Deserialize;

/// Configuration options for the bycatch viewer server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    pub database_url: String,
    /// Interface to bind.
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Directory holding the prebuilt dashboard, served at `/`.
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_pool_size() -> u32 {
    crate::db::DEFAULT_POOL_SIZE
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Loads `config/default`, then `config/{APP_ENV}` (`local` when unset),
    /// then `APP_*` environment variables, later sources overriding earlier ones.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(std::path::Path::new("config"), &app_env)
    }

    /// Same layering as [`ServerConfig::load`] with files read from `dir`.
    pub fn load_from(
        dir: &std::path::Path,
        app_env: &str,
    ) -> Result<Self, ::config::ConfigError> {
        use ::config::{Config, Environment, File};

        let layer = |name: &str| File::with_name(&dir.join(name).to_string_lossy()).required(false);

        Config::builder()
            .add_source(layer("default"))
            .add_source(layer(app_env))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
