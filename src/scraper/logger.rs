// Per-attempt diagnostics sink

use std::error::Error;
use tracing::{debug, warn};

/// Diagnostic sink handed to the fetcher through `FetchOptions`.
///
/// Called once per attempt. Implementations must not panic or block.
pub trait FetchLogger: Send + Sync {
    /// Before an attempt goes out. `proxy` is already redacted.
    fn attempt(&self, url: &str, attempt: u32, max: u32, proxy: Option<&str>);

    /// After a transient failure.
    fn failure(&self, url: &str, attempt: u32, max: u32, error: &(dyn Error + 'static));
}

/// Forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl FetchLogger for TracingLogger {
    fn attempt(&self, url: &str, attempt: u32, max: u32, proxy: Option<&str>) {
        debug!(
            url,
            attempt,
            max,
            proxy = proxy.unwrap_or("none"),
            "sending request"
        );
    }

    fn failure(&self, url: &str, attempt: u32, max: u32, error: &(dyn Error + 'static)) {
        warn!(
            url,
            "Request failed (attempt {}/{}): {}",
            attempt,
            max,
            error
        );
    }
}
