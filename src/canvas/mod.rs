pub mod client;
pub mod payload;
pub mod transport;

#[cfg(test)]
#[path = "../../tests/src_inline/canvas/fake.rs"]
pub mod fake;

use thiserror::Error;
use url::Url;

const API_PREFIX: &str = "api/v1/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing course id (use --course-id or CANVAS_COURSE_ID)")]
    MissingCourseId,
    #[error("missing API token (use --token or CANVAS_TOKEN)")]
    MissingToken,
    #[error("missing base URL (use --base-url or CANVAS_BASE_URL)")]
    MissingBaseUrl,
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {path} failed with status {status}")]
    Status { path: String, status: u16 },
    #[error("request to {path} failed: {reason}")]
    Transport { path: String, reason: String },
    #[error("could not decode response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Immutable connection settings shared by every request of a run.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    token: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        // Url::join drops the last path segment unless it ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let parsed = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }
        Ok(Self {
            base_url: parsed,
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Resolves an API path such as `courses/1/outcome_results` against the base URL.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, FetchError> {
        let relative = format!("{API_PREFIX}{}", path.trim_start_matches('/'));
        let mut url = self
            .base_url
            .join(&relative)
            .map_err(|e| FetchError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/canvas/config.rs"]
mod tests;
