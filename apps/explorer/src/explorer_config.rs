use std::env;
use std::path::PathBuf;

use govex_core::{ApiKey, AppError, AppResult};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_HOST: &str = "https://govqcexploratory.domino.tech";
const DEFAULT_FIXTURE_DIR: &str = "data";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BUNDLE_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub api_host: String,
    pub api_key: ApiKey,
    pub offline: bool,
    pub fixture_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub bundle_limit: usize,
}

impl ExplorerConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_host = lookup("API_HOST")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let api_key = ApiKey::new(lookup("DOMINO_USER_API_KEY").unwrap_or_default());
        let offline = lookup("OFFLINE")
            .unwrap_or_else(|| "false".to_owned())
            .trim()
            .eq_ignore_ascii_case("true");
        let fixture_dir = PathBuf::from(
            lookup("EXPLORER_FIXTURE_DIR").unwrap_or_else(|| DEFAULT_FIXTURE_DIR.to_owned()),
        );
        let http_timeout_secs = parse_u64(
            &lookup,
            "EXPLORER_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        let bundle_limit = parse_usize(&lookup, "EXPLORER_BUNDLE_LIMIT", DEFAULT_BUNDLE_LIMIT)?;

        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "EXPLORER_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        if bundle_limit == 0 {
            return Err(AppError::Validation(
                "EXPLORER_BUNDLE_LIMIT must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_host,
            api_key,
            offline,
            fixture_dir,
            http_timeout_secs,
            bundle_limit,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> AppResult<u64> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
) -> AppResult<usize> {
    match lookup(name) {
        Some(value) => value.trim().parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use govex_core::AppError;

    use super::ExplorerConfig;

    fn load(vars: &[(&str, &str)]) -> Result<ExplorerConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ExplorerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_host, "https://govqcexploratory.domino.tech");
        assert!(config.api_key.is_empty());
        assert!(!config.offline);
        assert_eq!(config.fixture_dir, PathBuf::from("data"));
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.bundle_limit, 1000);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("API_HOST", "https://governance.example.test/"),
            ("DOMINO_USER_API_KEY", " key-123 "),
            ("OFFLINE", "TRUE"),
            ("EXPLORER_FIXTURE_DIR", "/tmp/fixtures"),
            ("EXPLORER_HTTP_TIMEOUT_SECS", "5"),
            ("EXPLORER_BUNDLE_LIMIT", "50"),
        ]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_host, "https://governance.example.test");
        assert_eq!(config.api_key.expose(), "key-123");
        assert!(config.offline);
        assert_eq!(config.fixture_dir, PathBuf::from("/tmp/fixtures"));
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.bundle_limit, 50);
    }

    #[test]
    fn offline_only_for_literal_true() {
        let config = load(&[("OFFLINE", "1")]);
        assert!(config.is_ok_and(|config| !config.offline));
    }

    #[test]
    fn rejects_invalid_numbers() {
        assert!(matches!(
            load(&[("EXPLORER_HTTP_TIMEOUT_SECS", "soon")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("EXPLORER_HTTP_TIMEOUT_SECS", "0")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("EXPLORER_BUNDLE_LIMIT", "0")]),
            Err(AppError::Validation(_))
        ));
    }
}
