use crate::model::FetchResponse;
use crate::scraper::proxy::ProxyMapping;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Fully merged request as it goes out on one attempt.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub proxy: Option<ProxyMapping>,
    pub timeout: Option<Duration>,
}

/// Decides whether a transport failure is worth another attempt.
pub trait TransientError: std::error::Error + Send + Sync + 'static {
    fn is_transient(&self) -> bool;
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    type Error: TransientError;

    async fn send(&self, req: &OutboundRequest) -> Result<FetchResponse, Self::Error>;
}
