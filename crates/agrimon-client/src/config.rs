//! Connection settings for the analytics API client.

use agrimon_common::{AgriError, Result};
use agrimon_config::ApiSettings;
use std::time::Duration;
use url::Url;

/// Configuration for [`AnalyticsClient`](crate::AnalyticsClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL the `/api/...` paths are joined onto.
    pub base_url: Url,
    /// Request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Connection pool max idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl ApiConfig {
    /// Create a configuration for `base_url` with no timeout and the default pool size.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: None,
            max_idle_per_host: 10,
        })
    }

    /// Build from the `[api]` section of the configuration file.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(&settings.base_url)?,
            timeout: settings.timeout_secs.map(Duration::from_secs),
            max_idle_per_host: settings.max_idle_per_host,
        })
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection pool size
    #[must_use]
    pub const fn with_pool_size(mut self, max_idle_per_host: usize) -> Self {
        self.max_idle_per_host = max_idle_per_host;
        self
    }

    /// Absolute URL for an API path such as `api/metadata/tahun-harga`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AgriError::config_with_source(format!("Invalid API path: {path}"), e))
    }
}

/// Parse a base URL, making sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| AgriError::config_with_source(format!("Invalid API base URL: {raw}"), e))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
