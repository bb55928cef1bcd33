//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Prefix every API route is mounted under (`/api`)
    pub api_base: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub jwt_expiry_hours: i64,
    /// Upper bound of the connection pool
    pub db_max_connections: u32,
    /// `json` switches the log output to JSON lines
    pub log_format: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: parsed_var("HTTP_PORT").unwrap_or(4000),
            api_base: normalize_base(
                &std::env::var("API_BASE").unwrap_or_else(|_| "/api".into()),
            ),
            environment: environment.clone(),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: parsed_var("JWT_EXPIRY_HOURS")
                .filter(|h| *h > 0)
                .unwrap_or(168),
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS")
                .filter(|n| *n > 0)
                .unwrap_or(10),
            log_format: std::env::var("LOG_FORMAT").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// `api/` -> `/api`, `/` and `` -> `/`
pub fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("/api"), "/api");
        assert_eq!(normalize_base("api/"), "/api");
        assert_eq!(normalize_base("/v1/shop/"), "/v1/shop");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base(""), "/");
    }

    #[test]
    fn test_secret_fallback_only_in_development() {
        let name = "COOP_TEST_SECRET_THAT_IS_NEVER_SET";
        assert_eq!(
            Config::require_secret(name, "development").unwrap(),
            format!("dev-{name}-not-for-production")
        );
        assert!(Config::require_secret(name, "production").is_err());
    }
}
