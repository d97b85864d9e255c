// Rotating-country proxy settings

use std::env;
use std::fmt;
use tracing::debug;

pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_PROXY_USERNAME: &str = "PROXY_USERNAME";
pub const ENV_PROXY_PASSWORD: &str = "PROXY_PASSWORD";
pub const ENV_PROXY_HOST: &str = "PROXY_HOST";
pub const ENV_PROXY_PORT: &str = "PROXY_PORT";

/// Credentials for the rotating-country proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

/// Proxy URL per transport scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyMapping {
    pub http: String,
    pub https: String,
}

impl ProxyConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            host: host.into(),
            port: port.into(),
        }
    }

    /// Reads `DEBUG` and the four `PROXY_*` variables from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ProxyConfig::from_env`] with an arbitrary variable source.
    ///
    /// Returns `None` when `DEBUG` is set to anything non-empty, or when one of
    /// the proxy variables is missing or empty. Never fails.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if present(ENV_DEBUG).is_some() {
            debug!("{} is set, proxy disabled", ENV_DEBUG);
            return None;
        }

        let fields = (
            present(ENV_PROXY_USERNAME),
            present(ENV_PROXY_PASSWORD),
            present(ENV_PROXY_HOST),
            present(ENV_PROXY_PORT),
        );
        match fields {
            (Some(username), Some(password), Some(host), Some(port)) => Some(Self {
                username,
                password,
                host,
                port,
            }),
            _ => {
                debug!("proxy environment incomplete, fetching without proxy");
                None
            }
        }
    }

    /// `http://{user}-country-US:{password}@{host}:{port}`
    pub fn url(&self) -> String {
        format!(
            "http://{}-country-US:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }

    /// Proxy URL with the password masked, safe for logs.
    pub fn redacted_url(&self) -> String {
        format!(
            "http://{}-country-US:***@{}:{}",
            self.username, self.host, self.port
        )
    }

    pub fn mapping(&self) -> ProxyMapping {
        let url = self.url();
        ProxyMapping {
            http: url.clone(),
            https: url,
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const FULL: [(&str, &str); 4] = [
        (ENV_PROXY_USERNAME, "u"),
        (ENV_PROXY_PASSWORD, "p"),
        (ENV_PROXY_HOST, "h"),
        (ENV_PROXY_PORT, "1234"),
    ];

    #[test]
    fn builds_template_for_both_schemes() {
        let proxy = ProxyConfig::from_lookup(lookup_from(&FULL)).expect("proxy");
        let mapping = proxy.mapping();
        assert_eq!(mapping.http, "http://u-country-US:p@h:1234");
        assert_eq!(mapping.http, mapping.https);
    }

    #[test]
    fn debug_flag_disables_proxy() {
        let mut vars = FULL.to_vec();
        vars.push((ENV_DEBUG, "1"));
        assert!(ProxyConfig::from_lookup(lookup_from(&vars)).is_none());
    }

    #[test]
    fn empty_debug_flag_is_not_truthy() {
        let mut vars = FULL.to_vec();
        vars.push((ENV_DEBUG, ""));
        assert!(ProxyConfig::from_lookup(lookup_from(&vars)).is_some());
    }

    #[test]
    fn missing_variable_skips_proxy() {
        for skip in 0..FULL.len() {
            let vars: Vec<_> = FULL
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, kv)| *kv)
                .collect();
            assert!(
                ProxyConfig::from_lookup(lookup_from(&vars)).is_none(),
                "expected no proxy without {}",
                FULL[skip].0
            );
        }
    }

    #[test]
    fn debug_output_hides_password() {
        let proxy = ProxyConfig::new("u", "secret", "h", "1");
        let printed = format!("{:?}", proxy);
        assert!(!printed.contains("secret"));
        assert!(!proxy.redacted_url().contains("secret"));
    }
}
