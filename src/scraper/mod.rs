pub mod fetcher;
pub mod logger;
pub mod proxy;
pub mod retry;
pub mod traits;
pub mod transport;

pub use fetcher::{fetch, FetchOptions, Fetcher, DEFAULT_USER_AGENT};
pub use logger::{FetchLogger, TracingLogger};
pub use proxy::{ProxyConfig, ProxyMapping};
pub use retry::RetryPolicy;
pub use traits::{OutboundRequest, TransientError, Transport};
pub use transport::ReqwestTransport;
