use serde::{Deserialize, Serialize};

use crate::FallbackPolicy;

/// Environment variable that overrides `[api] base_url`.
pub const API_BASE_URL_ENV: &str = "HR_API_BASE_URL";

/// Optional behaviours toggled from `config.toml`. Every flag defaults to
/// `false` so a missing file disables them all.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export request spans over OTLP from the host process.
    #[serde(default)]
    pub telemetry: bool,
}

/// REST backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Join `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Data-loading behaviour of list pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSettings {
    #[serde(default)]
    pub fallback: FallbackPolicy,
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            search_debounce_ms: default_debounce_ms(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.data.search_debounce_ms, 500);
        assert_eq!(config.data.fallback, FallbackPolicy::Propagate);
        assert!(!config.features.telemetry);
    }

    #[test]
    fn partial_sections_default_missing_fields() {
        let config = AppConfig::parse(
            r#"
            [features]
            telemetry = true

            [api]
            base_url = "https://hr.example.com/api/v1"

            [data]
            fallback = "sample"
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
        assert_eq!(config.api.base_url, "https://hr.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.data.fallback, FallbackPolicy::SampleData);
    }

    #[test]
    fn unknown_fallback_is_rejected() {
        assert!(AppConfig::parse("[data]\nfallback = \"mock\"").is_err());
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == API_BASE_URL_ENV).then(|| " http://api.internal:9000/v1 ".to_string())
        });
        assert_eq!(config.api.base_url, "http://api.internal:9000/v1");

        let mut config = AppConfig::default();
        config.apply_env_overrides(|_| Some("   ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn url_joins_with_single_slash() {
        let api = ApiSettings {
            base_url: "http://h/api/v1/".into(),
            timeout_secs: 5,
        };
        assert_eq!(api.url("/employees/4"), "http://h/api/v1/employees/4");
        assert_eq!(api.url("auth/login"), "http://h/api/v1/auth/login");
    }
}
