use api::db::DatabaseConfig;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Counter {
    /// Highest value a counter may reach.
    pub limit: i64,
}

impl Default for Counter {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    pub server: Server,
    pub database: DatabaseConfig,
    pub counter: Counter,
}

impl Settings {
    /// Defaults, then `config.toml`, then `COUNTER__SECTION__KEY` variables,
    /// then `DATABASE_URL`.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("config.toml")
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("counter.limit", 10)?
            .add_source(
                File::with_name(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("COUNTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_file() {
        let path = std::env::temp_dir().join(format!("counter_settings_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[counter]\nlimit = 3\n",
        )
        .unwrap();

        let settings = Settings::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.counter.limit, 3);
        assert_eq!(settings.database.max_connections, 5);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::from_file("/nonexistent/counter-settings.toml").unwrap();
        assert_eq!(settings.server.address(), "127.0.0.1:8080");
        assert_eq!(settings.counter.limit, 10);
    }
}
