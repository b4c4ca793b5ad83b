// src/config.rs
//! Client configuration: environment selection, base URLs and timeouts.
//!
//! Configuration is an explicit value handed to every client. It is built
//! either through the `with_*` builder methods or loaded from `config.yaml`
//! plus environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub const DEV_BASE_URL: &str = "http://localhost:3000";
pub const PROD_BASE_URL: &str = "https://api.offre.app";
pub const DEFAULT_AI_BASE_URL: &str = "http://localhost:5001";
pub const API_PREFIX: &str = "/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Environment::Development => DEV_BASE_URL,
            Environment::Production => PROD_BASE_URL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            other => anyhow::bail!("Unknown environment: {}. Use development or production", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiConfig {
    pub environment: Environment,
    /// Overrides the environment's default base URL when set
    pub base_url: Option<String>,
    pub use_api_prefix: bool,
    pub ai_base_url: String,
    /// Socket.IO invitation channel; defaults to the AI service host
    pub socket_url: Option<String>,
    pub timeout_seconds: u64,
}

/// One environment section of `config.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileSection {
    base_url: Option<String>,
    use_api_prefix: Option<bool>,
    ai_base_url: Option<String>,
    socket_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    development: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(Environment::Development)
    }
}

impl ApiConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            base_url: None,
            use_api_prefix: false,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            socket_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn development() -> Self {
        Self::new(Environment::Development)
    }

    pub fn production() -> Self {
        Self::new(Environment::Production)
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_prefix(mut self, enabled: bool) -> Self {
        self.use_api_prefix = enabled;
        self
    }

    pub fn with_ai_base_url(mut self, ai_base_url: impl Into<String>) -> Self {
        self.ai_base_url = ai_base_url.into();
        self
    }

    pub fn with_socket_url(mut self, socket_url: impl Into<String>) -> Self {
        self.socket_url = Some(socket_url.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Effective backend base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_base_url())
            .trim_end_matches('/')
    }

    pub fn ai_base_url(&self) -> &str {
        self.ai_base_url.trim_end_matches('/')
    }

    pub fn socket_url(&self) -> &str {
        self.socket_url
            .as_deref()
            .unwrap_or(self.ai_base_url.as_str())
            .trim_end_matches('/')
    }

    /// Base URL plus the `/api` prefix when enabled
    pub fn api_root(&self) -> String {
        if self.use_api_prefix {
            format!("{}{}", self.base_url(), API_PREFIX)
        } else {
            self.base_url().to_string()
        }
    }

    /// False only when the base URL is empty or does not parse as an absolute URL
    pub fn is_configured(&self) -> bool {
        is_valid_base_url(self.base_url())
    }

    /// Load configuration from the environment and the optional config file
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::load`] with an injectable variable lookup
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_for(None, lookup)
    }

    /// Load with an explicit environment, which takes precedence over
    /// `OFFRE_ENV`/`ENVIRONMENT` when choosing the config file section
    pub fn load_for<F>(environment: Option<Environment>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match environment {
            Some(environment) => environment,
            None => match lookup("OFFRE_ENV").or_else(|| lookup("ENVIRONMENT")) {
                Some(name) => name.parse()?,
                None => Environment::Development,
            },
        };
        info!("Loading client configuration for environment: {}", environment);

        let mut config = Self::new(environment);

        // An explicit path must exist; the default file is optional
        match lookup("OFFRE_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    anyhow::bail!(
                        "Configuration file {} (from OFFRE_CONFIG) does not exist",
                        path.display()
                    );
                }
                config.apply_file(&path)?;
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    config.apply_file(path)?;
                }
            }
        }

        if let Some(url) = lookup("OFFRE_API_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Some(flag) = lookup("OFFRE_API_PREFIX") {
            config.use_api_prefix = parse_flag(&flag)
                .with_context(|| format!("OFFRE_API_PREFIX must be a boolean, got: {}", flag))?;
        }
        if let Some(url) = lookup("OFFRE_AI_BASE_URL") {
            config.ai_base_url = url;
        }
        if let Some(url) = lookup("OFFRE_SOCKET_URL") {
            config.socket_url = Some(url);
        }
        if let Some(secs) = lookup("OFFRE_TIMEOUT_SECS") {
            config.timeout_seconds = secs
                .parse()
                .with_context(|| format!("OFFRE_TIMEOUT_SECS must be a number, got: {}", secs))?;
        }

        if !config.is_configured() {
            warn!("Base URL is not a valid absolute URL: '{}'", config.base_url());
        }

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let section = match self.environment {
            Environment::Development => file.development,
            Environment::Production => file.production,
        };

        if let Some(url) = section.base_url {
            self.base_url = Some(url);
        }
        if let Some(flag) = section.use_api_prefix {
            self.use_api_prefix = flag;
        }
        if let Some(url) = section.ai_base_url {
            self.ai_base_url = url;
        }
        if let Some(url) = section.socket_url {
            self.socket_url = Some(url);
        }
        if let Some(secs) = section.timeout_seconds {
            self.timeout_seconds = secs;
        }

        info!("Applied configuration file: {}", path.display());
        Ok(())
    }
}

pub fn is_valid_base_url(url: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }
    match reqwest::Url::parse(url) {
        Ok(parsed) => !parsed.cannot_be_a_base() && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn empty_config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();
        file
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_documented_urls_are_configured() {
        assert!(ApiConfig::development().is_configured());
        assert!(ApiConfig::production().is_configured());
    }

    #[test]
    fn test_is_configured_rejects_empty_and_garbage() {
        assert!(!ApiConfig::development().with_base_url("").is_configured());
        assert!(!ApiConfig::development().with_base_url("   ").is_configured());
        assert!(!ApiConfig::development().with_base_url("not a url").is_configured());
        assert!(!ApiConfig::development()
            .with_base_url("localhost:3000")
            .is_configured());
        assert!(ApiConfig::development()
            .with_base_url("http://10.0.2.2:3000")
            .is_configured());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig::development().with_base_url("http://example.com/");
        assert_eq!(config.base_url(), "http://example.com");
        assert_eq!(config.api_root(), "http://example.com");
        assert_eq!(config.with_api_prefix(true).api_root(), "http://example.com/api");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_socket_url_defaults_to_ai_host() {
        let config = ApiConfig::development().with_ai_base_url("http://ai.local:5001/");
        assert_eq!(config.socket_url(), "http://ai.local:5001");
        let config = config.with_socket_url("http://rt.local:7000");
        assert_eq!(config.socket_url(), "http://rt.local:7000");
    }

    #[test]
    fn test_load_with_env_overrides() {
        let file = empty_config_file();
        let path = file.path().to_string_lossy().to_string();
        let config = ApiConfig::load_with(lookup_from(&[
            ("OFFRE_ENV", "production"),
            ("OFFRE_CONFIG", path.as_str()),
            ("OFFRE_API_PREFIX", "true"),
            ("OFFRE_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url(), PROD_BASE_URL);
        assert!(config.use_api_prefix);
        assert_eq!(config.timeout_seconds, 12);
    }

    #[test]
    fn test_load_with_rejects_bad_values() {
        let file = empty_config_file();
        let path = file.path().to_string_lossy().to_string();
        assert!(ApiConfig::load_with(lookup_from(&[("OFFRE_ENV", "qa")])).is_err());
        assert!(ApiConfig::load_with(lookup_from(&[
            ("OFFRE_CONFIG", path.as_str()),
            ("OFFRE_API_PREFIX", "maybe"),
        ]))
        .is_err());
        assert!(ApiConfig::load_with(lookup_from(&[
            ("OFFRE_CONFIG", path.as_str()),
            ("OFFRE_TIMEOUT_SECS", "soon"),
        ]))
        .is_err());
    }

    #[test]
    fn test_explicit_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("offre.yaml").to_string_lossy().to_string();
        let err = ApiConfig::load_with(lookup_from(&[("OFFRE_CONFIG", missing.as_str())]))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_with_config_file_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "development:\n  base_url: http://192.168.1.10:3000\n  use_api_prefix: true\nproduction:\n  base_url: https://prod.example.com\n  timeout_seconds: 60"
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let dev = ApiConfig::load_with(lookup_from(&[("OFFRE_CONFIG", path.as_str())])).unwrap();
        assert_eq!(dev.base_url(), "http://192.168.1.10:3000");
        assert!(dev.use_api_prefix);
        assert_eq!(dev.timeout_seconds, DEFAULT_TIMEOUT_SECS);

        let prod = ApiConfig::load_with(lookup_from(&[
            ("OFFRE_CONFIG", path.as_str()),
            ("ENVIRONMENT", "production"),
            ("OFFRE_API_BASE_URL", "https://override.example.com"),
        ]))
        .unwrap();
        assert_eq!(prod.base_url(), "https://override.example.com");
        assert!(!prod.use_api_prefix);
        assert_eq!(prod.timeout_seconds, 60);
    }

    #[test]
    fn test_explicit_environment_selects_file_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "development:\n  base_url: http://192.168.1.10:3000\nproduction:\n  base_url: https://prod.example.com"
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = ApiConfig::load_for(
            Some(Environment::Production),
            lookup_from(&[("OFFRE_CONFIG", path.as_str()), ("OFFRE_ENV", "development")]),
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url(), "https://prod.example.com");
    }
}
