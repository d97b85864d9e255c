// Core structs: FetchResponse and the error types
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// Raw page handed back to the caller. The fetcher keeps nothing after returning it.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    /// Final URL after redirects.
    pub url: String,
    pub body: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
}

impl FetchResponse {
    pub fn new(status: StatusCode, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turns a non-2xx response into `FetchError::Status`.
    pub fn error_for_status<E: std::error::Error + 'static>(self) -> Result<Self, FetchError<E>> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status(self.status))
        }
    }
}

/// Failure of a single `fetch` call.
///
/// `Network` and `Request` carry the transport's own error value untouched;
/// use [`FetchError::into_inner`] to get it back.
#[derive(Debug, Error)]
pub enum FetchError<E: std::error::Error + 'static = reqwest::Error> {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Transient failure that survived every attempt.
    #[error(transparent)]
    Network(E),

    /// Permanent failure, returned on first occurrence.
    #[error(transparent)]
    Request(E),

    #[error("fetch cancelled during backoff")]
    Cancelled,

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

impl<E: std::error::Error + 'static> FetchError<E> {
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    pub fn transport_error(&self) -> Option<&E> {
        match self {
            FetchError::Network(e) | FetchError::Request(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_inner(self) -> Option<E> {
        match self {
            FetchError::Network(e) | FetchError::Request(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_replaces_invalid_utf8() {
        let resp = FetchResponse::new(StatusCode::OK, "http://x", vec![b'o', b'k', 0xff]);
        assert_eq!(resp.text(), "ok\u{fffd}");
    }

    #[test]
    fn error_for_status_rejects_non_success() {
        let resp = FetchResponse::new(StatusCode::NOT_FOUND, "http://x", Vec::new());
        match resp.error_for_status::<reqwest::Error>() {
            Err(FetchError::Status(s)) => assert_eq!(s, StatusCode::NOT_FOUND),
            other => panic!("unexpected: {:?}", other),
        }

        let ok = FetchResponse::new(StatusCode::OK, "http://x", b"hi".to_vec());
        assert!(ok.error_for_status::<std::io::Error>().is_ok());
    }
}
