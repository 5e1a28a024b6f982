use crate::endpoints::Endpoint;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "token-usage-tui";

pub const ENV_BASE_URLS: &str = "TOKEN_USAGE_BASE_URLS";
pub const ENV_SHOW_BALANCE: &str = "TOKEN_USAGE_SHOW_BALANCE";
pub const ENV_SHOW_DETAIL: &str = "TOKEN_USAGE_SHOW_DETAIL";
pub const ENV_SHOW_EXCHANGE_RATE: &str = "TOKEN_USAGE_SHOW_EXCHANGE_RATE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint name to open on startup, the first one otherwise
    #[serde(default)]
    pub default_endpoint: Option<String>,

    #[serde(default)]
    pub features: FeatureFlags,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub endpoints: Vec<EndpointEntry>,
}

/// Which sections of the screen (and which requests) are enabled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Billing subscription + usage lookups and the token information panel
    pub show_balance: bool,
    /// Call log lookup and the call details table
    pub show_detail: bool,
    /// Exchange rate tag on the call details panel
    pub show_exchange_rate: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_balance: true,
            show_detail: true,
            show_exchange_rate: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory `data.csv` is written to
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointEntry {
    pub name: String,
    pub url: String,
}

/// Immutable settings handed to the app at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoints: Vec<Endpoint>,
    pub default_endpoint: Option<String>,
    pub features: FeatureFlags,
    pub export_dir: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    /// Load the config file, apply environment overrides and validate
    pub fn load() -> Result<Self, ConfigError> {
        Config::load()?
            .with_overrides(|key| std::env::var(key).ok())?
            .into_settings()
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home_dir.join(".config").join(APP_DIR).join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment overrides; `lookup` returns the variable's value if set
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(json) = lookup(ENV_BASE_URLS) {
            self.endpoints = parse_base_urls(&json)?;
        }

        let flag = |key: &str, current: bool| lookup(key).map(|v| v == "true").unwrap_or(current);
        self.features.show_balance = flag(ENV_SHOW_BALANCE, self.features.show_balance);
        self.features.show_detail = flag(ENV_SHOW_DETAIL, self.features.show_detail);
        self.features.show_exchange_rate =
            flag(ENV_SHOW_EXCHANGE_RATE, self.features.show_exchange_rate);

        Ok(self)
    }

    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let endpoints = self
            .endpoints
            .into_iter()
            .map(|entry| {
                validate_url(&entry.url).map_err(|reason| ConfigError::InvalidUrl {
                    name: entry.name.clone(),
                    reason,
                })?;
                Ok(Endpoint {
                    name: entry.name,
                    base_url: entry.url.trim_end_matches('/').to_string(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Settings {
            endpoints,
            default_endpoint: self.default_endpoint,
            features: self.features,
            export_dir: self.export.directory,
            timeout: Duration::from_secs(self.http.timeout_secs),
        })
    }
}

/// Parse a JSON object of display name to base URL, keeping key order
pub fn parse_base_urls(json: &str) -> Result<Vec<EndpointEntry>, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let map = value.as_object().ok_or(ConfigError::NotAnObject)?;

    map.iter()
        .map(|(name, url)| {
            let url = url.as_str().ok_or(ConfigError::NotAnObject)?;
            Ok(EndpointEntry {
                name: name.clone(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    url::Url::parse(url).map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_base_urls_preserves_order() {
        let entries =
            parse_base_urls(r#"{"zeta": "https://z.example.com", "alpha": "https://a.example.com"}"#)
                .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "zeta");
        assert_eq!(entries[1].name, "alpha");
    }

    #[test]
    fn test_parse_base_urls_rejects_non_object() {
        assert!(matches!(
            parse_base_urls(r#"["https://a.example.com"]"#),
            Err(ConfigError::NotAnObject)
        ));
        assert!(matches!(
            parse_base_urls(r#"{"a": 1}"#),
            Err(ConfigError::NotAnObject)
        ));
        assert!(matches!(parse_base_urls("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_toml_full() {
        let config = Config::from_toml(
            r#"
            default_endpoint = "Main"

            [features]
            show_balance = false

            [export]
            directory = "/tmp/exports"

            [http]
            timeout_secs = 5

            [[endpoints]]
            name = "Main"
            url = "https://api.example.com/"
            "#,
        )
        .unwrap();

        assert!(!config.features.show_balance);
        assert!(config.features.show_detail);
        assert_eq!(config.endpoints.len(), 1);

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.endpoints[0].base_url, "https://api.example.com");
        assert_eq!(settings.default_endpoint.as_deref(), Some("Main"));
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides_endpoints_and_flags() {
        let config = Config::default()
            .with_overrides(env(&[
                (ENV_BASE_URLS, r#"{"one": "https://one.example.com"}"#),
                (ENV_SHOW_BALANCE, "false"),
                (ENV_SHOW_DETAIL, "true"),
            ]))
            .unwrap();

        assert_eq!(config.endpoints[0].name, "one");
        assert!(!config.features.show_balance);
        assert!(config.features.show_detail);
        assert!(config.features.show_exchange_rate);
    }

    #[test]
    fn test_flag_other_than_true_disables() {
        let config = Config::default()
            .with_overrides(env(&[(ENV_SHOW_DETAIL, "yes")]))
            .unwrap();
        assert!(!config.features.show_detail);
    }

    #[test]
    fn test_into_settings_requires_endpoints() {
        assert!(matches!(
            Config::default().into_settings(),
            Err(ConfigError::NoEndpoints)
        ));
    }

    #[test]
    fn test_into_settings_rejects_zero_timeout() {
        let config = Config::from_toml(
            r#"
            [http]
            timeout_secs = 0

            [[endpoints]]
            name = "Main"
            url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.into_settings(),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn test_into_settings_rejects_bad_url() {
        let config = Config {
            endpoints: vec![EndpointEntry {
                name: "bad".to_string(),
                url: "ftp://example.com".to_string(),
            }],
            ..Default::default()
        };
        match config.into_settings() {
            Err(ConfigError::InvalidUrl { name, .. }) => assert_eq!(name, "bad"),
            other => panic!("expected invalid url, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("http://localhost:3000").is_ok());
    }
}
