use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Map, Value, json};

use crate::canvas::FetchError;
use crate::canvas::client::PER_PAGE;
use crate::canvas::transport::{RawResponse, Transport};

/// In-memory Canvas. Unknown routes answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<String, Result<RawResponse, FetchError>>,
    calls: RefCell<Vec<String>>,
}

pub fn route_key(path: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let pairs = query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{pairs}")
}

fn page_key(path: &str, page: usize) -> String {
    route_key(
        path,
        &[("per_page", PER_PAGE.to_string()), ("page", page.to_string())],
    )
}

fn wrap_page(wrap: Option<&str>, page: Value) -> Value {
    match wrap {
        Some(key) => {
            let mut map = Map::new();
            map.insert(key.to_string(), page);
            Value::Object(map)
        }
        None => page,
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(
            path.to_string(),
            Ok(RawResponse { status: 200, body }),
        );
        self
    }

    pub fn status(mut self, key: &str, status: u16) -> Self {
        self.routes.insert(
            key.to_string(),
            Ok(RawResponse {
                status,
                body: Value::Null,
            }),
        );
        self
    }

    pub fn broken(mut self, key: &str) -> Self {
        self.routes.insert(
            key.to_string(),
            Err(FetchError::Transport {
                path: key.to_string(),
                reason: "connection reset".to_string(),
            }),
        );
        self
    }

    /// Registers pages 1..=n of a list endpoint followed by an empty page.
    /// With a `wrap` key each page is an object holding the list under that key.
    pub fn paged(mut self, path: &str, wrap: Option<&str>, pages: Vec<Value>) -> Self {
        let n = pages.len();
        for (i, page) in pages.into_iter().enumerate() {
            let body = wrap_page(wrap, page);
            self.routes.insert(
                page_key(path, i + 1),
                Ok(RawResponse { status: 200, body }),
            );
        }
        let empty = wrap_page(wrap, json!([]));
        self.routes.insert(
            page_key(path, n + 1),
            Ok(RawResponse {
                status: 200,
                body: empty,
            }),
        );
        self
    }

    pub fn page_status(self, path: &str, page: usize, status: u16) -> Self {
        let key = page_key(path, page);
        self.status(&key, status)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, FetchError> {
        let key = route_key(path, query);
        self.calls.borrow_mut().push(key.clone());
        match self.routes.get(&key) {
            Some(res) => res.clone(),
            None => Ok(RawResponse {
                status: 404,
                body: Value::Null,
            }),
        }
    }
}
