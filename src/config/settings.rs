use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::env::{EnvSource, ProcessEnv};

/// Default Courier API origin
pub const DEFAULT_COURIER_URL: &str = "https://api.courier.com/";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub courier: CourierConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourierConfig {
    /// API base URL, always ending in a single `/`
    #[serde(default = "default_url")]
    pub url: String,
    /// Bearer token; absent means an empty token is sent
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// Primary template cache (JSON array of template ids)
    #[serde(default = "default_templates_path")]
    pub templates_path: PathBuf,
    /// Fallback template list used when resolution fails
    #[serde(default = "default_fallback_templates_path")]
    pub fallback_templates_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    /// OTLP gRPC endpoint
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Trace sampling ratio (0.0-1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_url() -> String {
    DEFAULT_COURIER_URL.to_string()
}

fn default_templates_path() -> PathBuf {
    PathBuf::from("storage/templates.json")
}

fn default_fallback_templates_path() -> PathBuf {
    PathBuf::from("storage/fallback-templates.json")
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "courier-client".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

/// Ensure the base URL ends with exactly one `/`
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

impl Settings {
    /// Load settings from the process environment (and `.env`)
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(&ProcessEnv::load())
    }

    /// Load settings through the given environment source.
    ///
    /// Layering: built-in defaults, then `config/courier.*` if present, then the
    /// `COURIER_*` / `OTEL_*` variables. A blank `COURIER_URL` counts as unset.
    pub fn from_env<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let layered = Config::builder()
            .set_default("courier.url", DEFAULT_COURIER_URL)?
            .set_default("courier.templates_path", "storage/templates.json")?
            .set_default(
                "courier.fallback_templates_path",
                "storage/fallback-templates.json",
            )?
            .set_default("otel.enabled", false)?
            .set_default("otel.endpoint", default_otel_endpoint())?
            .set_default("otel.service_name", default_service_name())?
            .set_default("otel.sampling_ratio", default_sampling_ratio())?
            .add_source(File::with_name("config/courier").required(false));

        let file_url = layered.build_cloned()?.get_string("courier.url")?;

        let builder = layered
            .set_override("courier.url", env.get_env("COURIER_URL", &file_url))?
            .set_override_option("courier.bearer_token", env.var("COURIER_BEARER_TOKEN"))?
            .set_override_option("courier.templates_path", env.var("COURIER_TEMPLATES_PATH"))?
            .set_override_option(
                "courier.fallback_templates_path",
                env.var("COURIER_FALLBACK_TEMPLATES_PATH"),
            )?
            .set_override_option("otel.enabled", env.var("OTEL_ENABLED"))?
            .set_override_option("otel.endpoint", env.var("OTEL_ENDPOINT"))?
            .set_override_option("otel.service_name", env.var("OTEL_SERVICE_NAME"))?
            .set_override_option("otel.sampling_ratio", env.var("OTEL_SAMPLING_RATIO"))?;

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.courier.url = normalize_base_url(&settings.courier.url);
        Ok(settings)
    }
}

impl CourierConfig {
    /// Config pointing at `url` with the default cache paths and no token
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: normalize_base_url(url.as_ref()),
            bearer_token: None,
            templates_path: default_templates_path(),
            fallback_templates_path: default_fallback_templates_path(),
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_cache_paths(
        mut self,
        templates_path: impl Into<PathBuf>,
        fallback_templates_path: impl Into<PathBuf>,
    ) -> Self {
        self.templates_path = templates_path.into();
        self.fallback_templates_path = fallback_templates_path.into();
        self
    }
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COURIER_URL)
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_values() {
        let env: HashMap<&str, &str> = HashMap::new();
        let settings = Settings::from_env(&env).unwrap();

        assert_eq!(settings.courier.url, "https://api.courier.com/");
        assert_eq!(settings.courier.bearer_token, None);
        assert_eq!(
            settings.courier.templates_path,
            PathBuf::from("storage/templates.json")
        );
        assert_eq!(
            settings.courier.fallback_templates_path,
            PathBuf::from("storage/fallback-templates.json")
        );
        assert!(!settings.otel.enabled);
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("COURIER_URL", "https://courier.internal/v2"),
            ("COURIER_BEARER_TOKEN", "secret"),
            ("COURIER_TEMPLATES_PATH", "/tmp/t.json"),
            ("OTEL_ENABLED", "true"),
            ("OTEL_SAMPLING_RATIO", "0.25"),
        ]);
        let settings = Settings::from_env(&env).unwrap();

        assert_eq!(settings.courier.url, "https://courier.internal/v2/");
        assert_eq!(settings.courier.bearer_token.as_deref(), Some("secret"));
        assert_eq!(settings.courier.templates_path, PathBuf::from("/tmp/t.json"));
        assert!(settings.otel.enabled);
        assert_eq!(settings.otel.sampling_ratio, 0.25);
    }

    #[test]
    fn test_blank_url_uses_default_origin() {
        for blank in ["", "   "] {
            let env = HashMap::from([("COURIER_URL", blank)]);
            let settings = Settings::from_env(&env).unwrap();
            assert_eq!(settings.courier.url, DEFAULT_COURIER_URL);
        }
    }

    #[test]
    fn test_url_without_trailing_slash_normalized() {
        let env = HashMap::from([("COURIER_URL", "http://localhost:8080")]);
        let settings = Settings::from_env(&env).unwrap();
        assert_eq!(settings.courier.url, "http://localhost:8080/");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://a.test"), "https://a.test/");
        assert_eq!(normalize_base_url("https://a.test/"), "https://a.test/");
        assert_eq!(normalize_base_url("https://a.test//"), "https://a.test/");
    }
}
