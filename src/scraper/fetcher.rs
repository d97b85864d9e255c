use crate::model::{FetchError, FetchResponse};
use crate::scraper::logger::FetchLogger;
use crate::scraper::proxy::ProxyConfig;
use crate::scraper::retry::{RetryPolicy, RetryState};
use crate::scraper::traits::{OutboundRequest, TransientError, Transport};
use crate::scraper::transport::ReqwestTransport;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Per-call options. Caller headers win over the fetcher's defaults.
#[derive(Clone, Default)]
pub struct FetchOptions {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub logger: Option<Arc<dyn FetchLogger>>,
    pub proxy: Option<ProxyConfig>,
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the proxy taken from the current process environment.
    /// Call this per fetch so credentials are never stale.
    pub fn from_env() -> Self {
        Self {
            proxy: ProxyConfig::from_env(),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn logger(mut self, logger: Arc<dyn FetchLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl std::fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOptions")
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("logger", &self.logger.is_some())
            .field("proxy", &self.proxy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// GET with bounded retries and exponential backoff on transient failures.
pub struct Fetcher<T = ReqwestTransport> {
    transport: T,
    policy: RetryPolicy,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Fetcher<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl Default for Fetcher<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Fallback per-attempt timeout used when the options carry none.
    pub fn default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches `url`, retrying transient network failures.
    ///
    /// On exhaustion the last transport error comes back as
    /// `FetchError::Network`; anything non-transient comes back as
    /// `FetchError::Request` without a retry.
    pub async fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<FetchResponse, FetchError<T::Error>> {
        let request = self.prepare(url, options)?;
        let max = self.policy.max_retries.max(1);
        let proxy_label = options.proxy.as_ref().map(ProxyConfig::redacted_url);
        let logger = options.logger.as_deref();

        let mut state = RetryState::new(max);
        loop {
            if let Some(logger) = logger {
                logger.attempt(url, state.attempt, max, proxy_label.as_deref());
            }

            let err = match self.transport.send(&request).await {
                Ok(response) => return Ok(response),
                Err(err) if !err.is_transient() => return Err(FetchError::Request(err)),
                Err(err) => err,
            };

            if let Some(logger) = logger {
                logger.failure(url, state.attempt, max, &err);
            }
            if state.exhausted() {
                return Err(FetchError::Network(err));
            }

            let delay = self.policy.backoff(state.attempt);
            match &options.cancel {
                Some(token) => {
                    tokio::select! {
                        _ = sleep(delay) => {}
                        _ = token.cancelled() => return Err(FetchError::Cancelled),
                    }
                }
                None => sleep(delay).await,
            }
            state.advance();
        }
    }

    fn prepare(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<OutboundRequest, FetchError<T::Error>> {
        if url.trim().is_empty() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "empty url".into(),
            });
        }
        Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = options.headers.clone();
        if !headers.contains_key(USER_AGENT) {
            let ua = HeaderValue::from_str(&self.user_agent)
                .map_err(|_| FetchError::InvalidHeader(self.user_agent.clone()))?;
            headers.insert(USER_AGENT, ua);
        }

        Ok(OutboundRequest {
            url: url.to_string(),
            headers,
            query: options.query.clone(),
            proxy: options.proxy.as_ref().map(ProxyConfig::mapping),
            timeout: options.timeout.or(self.timeout),
        })
    }
}

/// One-off fetch with the default `reqwest` transport and retry policy.
pub async fn fetch(url: &str, options: &FetchOptions) -> Result<FetchResponse, FetchError> {
    Fetcher::new().fetch(url, options).await
}
