//! Console configuration
//!
//! Connection settings for the campaign page and tuning for the status
//! poll loop. Values come from command-line flags with environment
//! variable fallbacks (see `main.rs`).

use std::path::PathBuf;
use std::time::Duration;

/// Default delay between two status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Default file holding persisted console state
pub const DEFAULT_STATE_PATH: &str = ".mailwatch-state.json";

/// Console configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the campaign page (e.g., "http://localhost:8080/emails/spring")
    pub page_url: String,

    /// URL of the campaign list; derived from `page_url` when unset
    pub list_url: Option<String>,

    /// Delay between two status polls
    pub poll_interval: Duration,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    /// Where the chosen sort and other preferences are stored
    pub state_path: PathBuf,
}

impl Config {
    /// Creates a configuration with defaults for everything but the page URL
    pub fn new(page_url: String) -> Self {
        Self {
            page_url,
            list_url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: Duration::from_secs(30),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }

    /// Campaign list URL
    ///
    /// Falls back to the folder containing the campaign page.
    pub fn list_url(&self) -> String {
        if let Some(url) = &self.list_url {
            return url.clone();
        }

        let page = self.page_url.trim_end_matches('/');
        match page.rfind('/') {
            Some(idx) if !page[..idx].ends_with('/') => page[..idx].to_string(),
            _ => page.to_string(),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_url("page_url", &self.page_url)?;

        if let Some(url) = &self.list_url {
            validate_url("list_url", url)?;
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.state_path.as_os_str().is_empty() {
            anyhow::bail!("state_path cannot be empty");
        }

        Ok(())
    }
}

fn validate_url(name: &str, url: &str) -> anyhow::Result<()> {
    if url.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new("http://localhost:8080/emails/spring".to_string());
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.state_path, PathBuf::from(".mailwatch-state.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new("http://localhost:8080/emails/spring".to_string());

        config.page_url = String::new();
        assert!(config.validate().is_err());

        config.page_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.page_url = "https://example.com/emails/spring".to_string();
        assert!(config.validate().is_ok());

        config.list_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
        config.list_url = None;

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_list_url_derivation() {
        let mut config = Config::new("http://localhost:8080/emails/spring/".to_string());
        assert_eq!(config.list_url(), "http://localhost:8080/emails");

        config.page_url = "http://localhost:8080".to_string();
        assert_eq!(config.list_url(), "http://localhost:8080");

        config.list_url = Some("http://localhost:8080/manage".to_string());
        assert_eq!(config.list_url(), "http://localhost:8080/manage");
    }
}
