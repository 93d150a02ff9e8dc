use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Exhibition edition settings (name, year, fee).
    pub exhibition: ExhibitionConfig,
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
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let exhibition = ExhibitionConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            exhibition,
        }
    }
}

/// Settings for the current exhibition edition.
///
/// The year defaults to the next calendar year since registrations open in
/// the autumn before the exhibition.
#[derive(Debug, Clone)]
pub struct ExhibitionConfig {
    /// Public name used in emails and payment descriptions.
    pub name: String,
    /// Edition year new registrations are created for.
    pub year: i32,
    /// Registration fee in euro cents.
    pub fee_cents: i64,
}

impl ExhibitionConfig {
    /// Load exhibition settings from environment variables.
    ///
    /// | Env Var                  | Default               |
    /// |--------------------------|-----------------------|
    /// | `EXHIBITION_NAME`        | `Sculpture Triennial` |
    /// | `EXHIBITION_YEAR`        | next calendar year    |
    /// | `REGISTRATION_FEE_CENTS` | `3500`                |
    pub fn from_env() -> Self {
        let name =
            std::env::var("EXHIBITION_NAME").unwrap_or_else(|_| "Sculpture Triennial".into());

        let year: i32 = match std::env::var("EXHIBITION_YEAR") {
            Ok(v) => v.parse().expect("EXHIBITION_YEAR must be a valid i32"),
            Err(_) => {
                use chrono::Datelike;
                chrono::Utc::now().year() + 1
            }
        };

        let fee_cents: i64 = std::env::var("REGISTRATION_FEE_CENTS")
            .unwrap_or_else(|_| "3500".into())
            .parse()
            .expect("REGISTRATION_FEE_CENTS must be a valid i64");

        Self {
            name,
            year,
            fee_cents,
        }
    }
}
