//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `BACKEND_URL` - Base of every short URL (default: `http://localhost:5000`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:5000`)
//! - `LINKS_FILE` - Link snapshot path (default: `data/urls.json`)
//! - `ANALYTICS_FILE` - Access event snapshot path (default: `data/analytics.json`)
//! - `LINK_TTL_HOURS` - Lifetime of links created without an expiry (default: 24)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Trust forwarding headers for the client address (default: false)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins (default: any origin)

use anyhow::{Context, Result};
use chrono::Duration;
use std::env;
use std::path::PathBuf;
use url::Url;

use crate::application::services::LinkSettings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub listen_addr: String,
    pub links_file: PathBuf,
    pub analytics_file: PathBuf,
    pub link_ttl_hours: i64,
    pub log_level: String,
    pub log_format: String,
    /// When true, the recorded client address comes from X-Forwarded-For /
    /// X-Real-IP. Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LINK_TTL_HOURS` is set but not an integer.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let links_file = env::var("LINKS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/urls.json"));
        let analytics_file = env::var("ANALYTICS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/analytics.json"));

        let link_ttl_hours = match env::var("LINK_TTL_HOURS") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("LINK_TTL_HOURS must be an integer, got '{v}'"))?,
            Err(_) => 24,
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        Ok(Self {
            base_url,
            listen_addr,
            links_file,
            analytics_file,
            link_ttl_hours,
            log_level,
            log_format,
            behind_proxy,
            cors_allowed_origins,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` is not an absolute `http`/`https` URL
    /// - `listen_addr` is not `host:port`
    /// - `link_ttl_hours` is less than 1
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("BACKEND_URL is not a valid URL: '{}'", self.base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "BACKEND_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.link_ttl_hours < 1 {
            anyhow::bail!(
                "LINK_TTL_HOURS must be at least 1, got {}",
                self.link_ttl_hours
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Settings for [`crate::application::services::LinkService`].
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            base_url: self.base_url.clone(),
            default_ttl: Duration::hours(self.link_ttl_hours),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Short URL base: {}", self.base_url);
        tracing::info!("  Links file: {}", self.links_file.display());
        tracing::info!("  Analytics file: {}", self.analytics_file.display());
        tracing::info!("  Default link TTL: {}h", self.link_ttl_hours);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);

        if self.cors_allowed_origins.is_empty() {
            tracing::info!("  CORS origins: any");
        } else {
            tracing::info!("  CORS origins: {}", self.cors_allowed_origins.join(", "));
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BACKEND_URL",
        "LISTEN",
        "LINKS_FILE",
        "ANALYTICS_FILE",
        "LINK_TTL_HOURS",
        "LOG_FORMAT",
        "BEHIND_PROXY",
        "CORS_ALLOWED_ORIGINS",
    ];

    fn clear_env() {
        // SAFETY: callers are #[serial], so no concurrent env access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            base_url: "http://localhost:5000".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            links_file: PathBuf::from("data/urls.json"),
            analytics_file: PathBuf::from("data/analytics.json"),
            link_ttl_hours: 24,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            cors_allowed_origins: Vec::new(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "5000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "127.0.0.1:5000".to_string();

        config.link_ttl_hours = 0;
        assert!(config.validate().is_err());
        config.link_ttl_hours = 1;

        config.base_url = "ftp://files.example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_link_settings() {
        let mut config = valid_config();
        config.link_ttl_hours = 48;

        let settings = config.link_settings();
        assert_eq!(settings.base_url, "http://localhost:5000");
        assert_eq!(settings.default_ttl, Duration::hours(48));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a.test , ,https://b.test"),
            vec!["http://a.test", "https://b.test"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.links_file, PathBuf::from("data/urls.json"));
        assert_eq!(config.analytics_file, PathBuf::from("data/analytics.json"));
        assert_eq!(config.link_ttl_hours, 24);
        assert!(!config.behind_proxy);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BACKEND_URL", "https://sho.rt");
            env::set_var("LINKS_FILE", "/tmp/links.json");
            env::set_var("LINK_TTL_HOURS", "72");
            env::set_var("BEHIND_PROXY", "TRUE");
            env::set_var("CORS_ALLOWED_ORIGINS", "https://app.test");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.base_url, "https://sho.rt");
        assert_eq!(config.links_file, PathBuf::from("/tmp/links.json"));
        assert_eq!(config.link_ttl_hours, 72);
        assert!(config.behind_proxy);
        assert_eq!(config.cors_allowed_origins, vec!["https://app.test"]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_ttl_is_error() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("LINK_TTL_HOURS", "a day");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
