use std::path::PathBuf;

/// Which [`TemplateStore`](dockyard_db::TemplateStore) backs the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// PostgreSQL at the given URL.
    Postgres { database_url: String },
    /// In-process store, optionally seeded from a templates file.
    Memory { templates_file: Option<PathBuf> },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Template storage backend.
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `TEMPLATE_STORE`       | `postgres`                 |
    /// | `DATABASE_URL`         | required for `postgres`    |
    /// | `TEMPLATES_FILE`       | unset (memory store only)  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend = std::env::var("TEMPLATE_STORE").unwrap_or_else(|_| "postgres".into());
        let store = match backend.as_str() {
            "postgres" => StoreConfig::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when TEMPLATE_STORE=postgres"),
            },
            "memory" => StoreConfig::Memory {
                templates_file: std::env::var("TEMPLATES_FILE").ok().map(PathBuf::from),
            },
            other => panic!("TEMPLATE_STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_trims_and_drops_blanks() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn parse_origins_empty_string_yields_nothing() {
        assert!(parse_origins("").is_empty());
    }
}
