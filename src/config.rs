use std::net::SocketAddr;
use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const FETCH_TIMEOUT_ENV: &str = "PAGE_ANALYZER_FETCH_TIMEOUT_SECS";
const MAX_BODY_BYTES_ENV: &str = "PAGE_ANALYZER_MAX_BODY_BYTES";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub fetch_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Config {
    /// Resolves settings from parsed arguments and the process environment.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = cli
            .database_url
            .or_else(|| env(DATABASE_URL_ENV))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "database url is required: pass --database-url or set {DATABASE_URL_ENV}"
                )
            })?;

        let fetch_timeout_secs = env(FETCH_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| (1..=120).contains(v))
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        let max_body_bytes = env(MAX_BODY_BYTES_ENV)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| (1024..=16 * 1024 * 1024).contains(v))
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Ok(Self {
            addr: cli.addr,
            database_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            max_body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser as _;

    use super::*;

    fn resolve(args: &[&str], env: &[(&str, &str)]) -> anyhow::Result<Config> {
        let argv = std::iter::once("page-analyzer").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(cli, |key| env.get(key).cloned())
    }

    #[test]
    fn flag_wins_over_env() {
        let config = resolve(
            &["--database-url", "sqlite://flag.db"],
            &[("DATABASE_URL", "sqlite://env.db")],
        )
        .unwrap();
        assert_eq!(config.database_url, "sqlite://flag.db");
    }

    #[test]
    fn env_is_used_when_flag_missing() {
        let config = resolve(&[], &[("DATABASE_URL", " sqlite://env.db ")]).unwrap();
        assert_eq!(config.database_url, "sqlite://env.db");
        assert_eq!(config.addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn missing_database_url_names_the_variable() {
        let err = resolve(&[], &[("DATABASE_URL", "   ")]).unwrap_err();
        assert!(format!("{err:#}").contains("DATABASE_URL"));
    }

    #[test]
    fn tuning_values_outside_range_fall_back() {
        let config = resolve(
            &["--database-url", "sqlite://x.db"],
            &[
                ("PAGE_ANALYZER_FETCH_TIMEOUT_SECS", "0"),
                ("PAGE_ANALYZER_MAX_BODY_BYTES", "lots"),
            ],
        )
        .unwrap();
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);

        let config = resolve(
            &["--database-url", "sqlite://x.db"],
            &[
                ("PAGE_ANALYZER_FETCH_TIMEOUT_SECS", "3"),
                ("PAGE_ANALYZER_MAX_BODY_BYTES", "4096"),
            ],
        )
        .unwrap();
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.max_body_bytes, 4096);
    }
}
