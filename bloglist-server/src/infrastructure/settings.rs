use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// `None` selects the in-memory store.
    pub(crate) database_url: Option<String>,
    pub(crate) database_max_connections: u32,
    pub(crate) jwt_secret: String,
    pub(crate) jwt_ttl_seconds: i64,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let database_max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 5_u32)?;

        let jwt_secret = get_required(&lookup, "JWT_SECRET").context("JWT_SECRET is required")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }
        let jwt_ttl_seconds = i64::from(parse_positive(&lookup, "JWT_TTL_SECONDS", 3600_u32)?);

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:3003".to_string());
        let cors_origins = parse_cors_origins(
            lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173,http://127.0.0.1:5173".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024_usize)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256_usize)?;
        let http_request_timeout_secs =
            parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10_u64)?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialEq + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Settings;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn settings_from(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_database() {
        let settings = settings_from(&[("JWT_SECRET", SECRET)]).expect("must load");

        assert!(settings.database_url.is_none());
        assert_eq!(settings.http_addr, "0.0.0.0:3003");
        assert_eq!(settings.jwt_ttl_seconds, 3600);
        assert_eq!(settings.http_concurrency_limit, 256);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        assert!(settings_from(&[("JWT_SECRET", "short")]).is_err());
    }

    #[test]
    fn missing_jwt_secret_is_rejected() {
        assert!(settings_from(&[]).is_err());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = settings_from(&[("JWT_SECRET", SECRET), ("HTTP_CONCURRENCY_LIMIT", "0")]);
        assert!(err.is_err());
    }

    #[test]
    fn non_positive_jwt_ttl_is_rejected() {
        for ttl in ["0", "-60"] {
            let err = settings_from(&[("JWT_SECRET", SECRET), ("JWT_TTL_SECONDS", ttl)]);
            assert!(err.is_err(), "JWT_TTL_SECONDS={ttl} must be rejected");
        }

        let settings = settings_from(&[("JWT_SECRET", SECRET), ("JWT_TTL_SECONDS", "900")])
            .expect("must load");
        assert_eq!(settings.jwt_ttl_seconds, 900);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let settings = settings_from(&[("JWT_SECRET", SECRET), ("DATABASE_URL", "  ")])
            .expect("must load");
        assert!(settings.database_url.is_none());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let settings = settings_from(&[
            ("JWT_SECRET", SECRET),
            ("CORS_ORIGINS", " http://a.test , ,http://b.test"),
        ])
        .expect("must load");
        assert_eq!(settings.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}
