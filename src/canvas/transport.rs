use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;

use crate::canvas::{ClientConfig, FetchError};

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking JSON GET against the Canvas REST API.
pub trait Transport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, FetchError> {
        (**self).get_json(path, query)
    }
}

pub struct HttpTransport {
    config: ClientConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("canvas-masteryqc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport {
                path: config.base_url().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { config, client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, FetchError> {
        let url = self.config.endpoint(path, query)?;
        crate::debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .bearer_auth(self.config.token())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .map_err(|e| FetchError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        let status = res.status();
        if !status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                body: Value::Null,
            });
        }
        let body = res.json::<Value>().map_err(|e| FetchError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
