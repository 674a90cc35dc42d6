//! Outbound HTTP plumbing.
//!
//! The catalog client only ever issues GET requests, so a request is a target
//! URL plus query parameters. Executors are swappable so the client can be
//! driven by a mock in tests.

mod executor;
mod reqwest;

use std::fmt;
use std::time::Duration;

use url::Url;

pub use self::executor::HttpExecutor;
pub use self::reqwest::ReqwestExecutor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: Url,
    pub params: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            url,
            params: Vec::new(),
            timeout: None,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full target with the query string encoded.
    pub fn target(&self) -> Url {
        let mut url = self.url.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub data: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseErrorKind {
    Timeout,
    Connection,
    BadResponse,
}

impl fmt::Display for ResponseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResponseErrorKind::Timeout => write!(f, "timeout"),
            ResponseErrorKind::Connection => write!(f, "connection"),
            ResponseErrorKind::BadResponse => write!(f, "bad response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    pub kind: ResponseErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ResponseError {
    pub fn new(kind: ResponseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }
}
