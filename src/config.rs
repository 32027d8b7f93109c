//! Dashboard configuration.

use crate::error::{DashboardError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

/// Configuration for a [`Dashboard`](crate::Dashboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Collection resource of the record store.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page size before the user picks one.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Page sizes offered to the user.
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    /// Page numbers shown in the navigation window.
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Buffered events per subscriber before it is dropped.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
    /// File name prefix for CSV exports.
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

fn default_base_url() -> String {
    "https://api.escuelajs.co/api/v1/products".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 20, 50]
}

fn default_max_visible_pages() -> usize {
    5
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_event_buffer_size() -> usize {
    256
}

fn default_export_prefix() -> String {
    "products".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            max_visible_pages: default_max_visible_pages(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            event_buffer_size: default_event_buffer_size(),
            export_prefix: default_export_prefix(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Point the dashboard at another store.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| DashboardError::Config(format!("base_url {:?}: {}", self.base_url, e)))?;

        if self.page_size_options.iter().any(|&size| size == 0) {
            return Err(DashboardError::Config(
                "page_size_options must be positive".to_string(),
            ));
        }
        self.page_size()?;
        if !self.page_size_options.is_empty()
            && !self.page_size_options.contains(&self.default_page_size)
        {
            return Err(DashboardError::Config(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_size_options
            )));
        }
        if self.max_visible_pages == 0 {
            return Err(DashboardError::Config(
                "max_visible_pages must be positive".to_string(),
            ));
        }
        if self.event_buffer_size == 0 {
            return Err(DashboardError::Config(
                "event_buffer_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Default page size as a non-zero value.
    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.default_page_size)
            .ok_or(DashboardError::InvalidPageSize(self.default_page_size))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DashboardConfig::default();
        config.validate().unwrap();
        assert_eq!(config.page_size().unwrap().get(), 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            base_url = "http://127.0.0.1:3000/api/v1/products"
            default_page_size = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:3000/api/v1/products");
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_visible_pages, 5);
        assert_eq!(config.export_prefix, "products");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = DashboardConfig::from_toml_str("default_page_size = 0");
        assert!(matches!(result, Err(DashboardError::InvalidPageSize(0))));
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        let result = DashboardConfig::from_toml_str("default_page_size = 7");
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let result = DashboardConfig::from_toml_str(r#"base_url = "/api/v1/products""#);
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let result = DashboardConfig::from_toml_str("default_page_size = [");
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
