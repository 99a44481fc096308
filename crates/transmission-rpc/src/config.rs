//! Endpoint and client configuration.

use std::{env, fmt, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use url::Url;

use transmission_rpc_types::RpcError;

/// RPC URL used when none is configured.
pub const DEFAULT_RPC_URL: &str = "http://localhost:9091/transmission/rpc";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Username and password for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Returns credentials when both parts are present and non-empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }

    /// The configured username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the password.
        write!(f, "Credentials(username=\"{}\", password=<set>)", self.username)
    }
}

/// The daemon's RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    credentials: Option<Credentials>,
}

impl Endpoint {
    /// Endpoint without authentication.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
        }
    }

    /// Parses `url` into an endpoint.
    pub fn parse(url: &str) -> Result<Self, RpcError> {
        let url = Url::parse(url)
            .map_err(|e| RpcError::InvalidArgument(format!("Invalid RPC URL: {}", e)))?;
        Ok(Self::new(url))
    }

    /// Attaches basic authentication credentials.
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// The RPC URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// Configuration for [`crate::TransmissionClient`] and [`crate::RpcSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Where to send requests.
    pub endpoint: Endpoint,
    /// Deadline applied to every HTTP exchange.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for `endpoint` with default timeout and user agent.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }

    /// Tries to read the configuration from the environment.
    ///
    /// Reads `TRANSMISSION_RPC_URL`, `TRANSMISSION_USERNAME`,
    /// `TRANSMISSION_PASSWORD` and `TRANSMISSION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, RpcError> {
        let url = env::var("TRANSMISSION_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.into());
        let credentials = Credentials::from_parts(
            env::var("TRANSMISSION_USERNAME").ok(),
            env::var("TRANSMISSION_PASSWORD").ok(),
        );
        let timeout = match env::var("TRANSMISSION_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(secs.trim().parse::<u64>().map_err(|e| {
                RpcError::InvalidArgument(format!("Invalid TRANSMISSION_TIMEOUT_SECS: {}", e))
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(Endpoint::parse(&url)?.with_credentials(credentials)).with_timeout(timeout))
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!("transmission-rpc/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        let credentials =
            Credentials::from_parts(Some("admin".into()), Some("secret".into())).unwrap();
        // base64("admin:secret")
        assert_eq!(credentials.basic_auth_header(), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn test_credentials_need_both_parts() {
        assert!(Credentials::from_parts(Some("admin".into()), None).is_none());
        assert!(Credentials::from_parts(None, Some("secret".into())).is_none());
        assert!(Credentials::from_parts(Some("admin".into()), Some(String::new())).is_none());
        assert!(Credentials::from_parts(Some("a".into()), Some("b".into())).is_some());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials =
            Credentials::from_parts(Some("admin".into()), Some("hunter2".into())).unwrap();
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_invalid_url() {
        match Endpoint::parse("not a url").unwrap_err() {
            RpcError::InvalidArgument(msg) => assert!(msg.contains("Invalid RPC URL")),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new(Endpoint::parse(DEFAULT_RPC_URL).unwrap());
        assert_eq!(config.endpoint.url().as_str(), DEFAULT_RPC_URL);
        assert!(config.endpoint.credentials().is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("transmission-rpc/"));
    }
}
