use anyhow::Context;
use std::str::FromStr;

const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug)]
pub struct Config {
    database_url: String,
    database_max_connections: u32,
    server_port: u16,
}

impl Config {
    /// Reads `DATABASE_URL`, `SERVER_PORT` and the optional
    /// `DATABASE_MAX_CONNECTIONS` from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = load_var(&lookup, "DATABASE_URL")?;
        let server_port = load_var(&lookup, "SERVER_PORT")?;
        let database_max_connections = load_optional_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);
        Ok(Self {
            database_url,
            database_max_connections,
            server_port,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    #[must_use]
    pub const fn server_port(&self) -> u16 {
        self.server_port
    }
}

fn load_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    load_optional_var(lookup, key)?
        .with_context(|| format!("Failed to load environment variable {key}"))
}

fn load_optional_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|val| {
            val.parse::<T>()
                .with_context(|| format!("Failed to parse environment variable {key}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_required_vars_and_defaults_pool_size() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.database_max_connections(), DEFAULT_DATABASE_MAX_CONNECTIONS);
    }

    #[test]
    fn missing_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap_err();

        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn unparsable_pool_size_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }
}
