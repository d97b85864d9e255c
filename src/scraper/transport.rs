use crate::model::FetchResponse;
use crate::scraper::traits::{OutboundRequest, TransientError, Transport};
use reqwest::{Client, Proxy};
use std::error::Error;

/// Connection, timeout and socket-level failures are retried; malformed
/// requests, redirect loops, decode errors and proxy auth rejections are not.
impl TransientError for reqwest::Error {
    fn is_transient(&self) -> bool {
        if self.is_builder() || self.is_redirect() || self.is_status() || self.is_decode() {
            return false;
        }
        if proxy_auth_rejected(self) {
            return false;
        }
        self.is_timeout() || self.is_connect() || self.is_request() || self.is_body()
    }
}

/// A 407 answer to CONNECT surfaces as a connect error; the tunnel's
/// message is the only marker left in the source chain.
fn proxy_auth_rejected(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(e) = source {
        let msg = e.to_string().to_ascii_lowercase();
        if msg.contains("proxy authentication required")
            || msg.contains("proxy authorization required")
        {
            return true;
        }
        source = e.source();
    }
    false
}

/// `reqwest` backed transport. A client is built per request so the
/// request's own proxy mapping is always the one in effect.
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }

    fn build_client(&self, req: &OutboundRequest) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder();

        if let Some(proxy) = &req.proxy {
            builder = builder
                .proxy(Proxy::http(&proxy.http)?)
                .proxy(Proxy::https(&proxy.https)?);
        }

        builder.build()
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    type Error = reqwest::Error;

    async fn send(&self, req: &OutboundRequest) -> Result<FetchResponse, Self::Error> {
        let client = self.build_client(req)?;

        let mut request = client.get(&req.url).headers(req.headers.clone());
        if !req.query.is_empty() {
            request = request.query(&req.query);
        }
        if let Some(timeout) = req.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.bytes().await?;

        Ok(FetchResponse::new(status, url, body.to_vec()))
    }
}
