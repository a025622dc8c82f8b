use std::env;

/// Database location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "app.db";

/// Pool size used when `DATABASE_POOL_SIZE` is not set or cannot be parsed.
pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;

/// Settings required to open the catalog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path (or `file:` URL) of the SQLite database.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl DatabaseConfig {
    /// Build a configuration for `database_url` with the default pool size.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }

    /// Override the maximum number of pooled connections.
    pub fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Read the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let max_pool_size = parse_pool_size(env::var("DATABASE_POOL_SIZE").ok().as_deref());

        Self {
            database_url,
            max_pool_size,
        }
    }
}

fn parse_pool_size(raw: Option<&str>) -> u32 {
    match raw {
        None => DEFAULT_MAX_POOL_SIZE,
        Some(value) => match value.trim().parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => {
                log::warn!(
                    "Invalid DATABASE_POOL_SIZE value {value:?}, using {DEFAULT_MAX_POOL_SIZE}"
                );
                DEFAULT_MAX_POOL_SIZE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_app_db() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.max_pool_size, DEFAULT_MAX_POOL_SIZE);
    }

    #[test]
    fn pool_size_builder_overrides_default() {
        let config = DatabaseConfig::new("catalog.db").with_max_pool_size(2);
        assert_eq!(config.database_url, "catalog.db");
        assert_eq!(config.max_pool_size, 2);
    }

    #[test]
    fn parse_pool_size_falls_back_on_garbage() {
        assert_eq!(parse_pool_size(None), DEFAULT_MAX_POOL_SIZE);
        assert_eq!(parse_pool_size(Some(" 4 ")), 4);
        assert_eq!(parse_pool_size(Some("zero")), DEFAULT_MAX_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("0")), DEFAULT_MAX_POOL_SIZE);
    }
}
