//! Backend factory for creating backend instances from configuration.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use super::{http::HttpBackend, MonitoringBackend};
use crate::config::ApiConfig;

/// Environment variable that overrides the configured API base URL
pub const API_URL_ENV: &str = "FRAUDWATCH_API_URL";

/// Create the backend described by the `[api]` section.
///
/// `FRAUDWATCH_API_URL`, when set and non-empty, takes precedence over the
/// configured base URL.
///
/// # Errors
/// Returns error if the HTTP client cannot be constructed.
pub fn create_backend(api: &ApiConfig) -> Result<Arc<dyn MonitoringBackend>> {
    let base_url = match std::env::var(API_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url,
        _ => api.base_url.clone(),
    };

    let backend = HttpBackend::new(&base_url, Duration::from_secs(api.timeout_secs))
        .with_context(|| format!("Failed to create HTTP backend for {}", base_url))?;
    Ok(Arc::new(backend))
}
