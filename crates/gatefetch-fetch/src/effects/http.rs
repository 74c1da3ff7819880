use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::Stream;

use crate::core::is_ok_status;

/// A boxed stream type for HTTP response bodies.
///
/// The stream yields `Result<Bytes, E>` where E is the error type from the HTTP client.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Metadata returned by a HEAD request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`, empty if unknown.
    pub reason: String,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

impl HeadResponse {
    /// Returns `true` if the status is below 400.
    #[must_use]
    pub fn is_ok(&self) -> bool { is_ok_status(self.status) }
}

/// An opened GET response whose body has not been read yet.
pub struct GetResponse<E> {
    pub status: u16,
    pub reason: String,
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed by the probe and the
/// fetcher. Implementations own connection pooling, TLS and redirects; one
/// client is meant to be shared by many concurrent transfers. Retry policy is
/// not the client's concern: `get` makes a single attempt.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Query resource metadata without downloading the body.
    ///
    /// Non-success statuses are reported in the response, not as errors.
    fn head(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HeadResponse, Self::Error>> + Send;

    /// Open a streaming GET.
    ///
    /// Returns an error only if no response was received (DNS failure,
    /// connection refused, TLS failure). Failure statuses are returned in the
    /// response for the caller to judge.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<GetResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::core::parse_content_length;
    use futures_util::StreamExt;
    use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
    use reqwest::{Proxy, Url};

    /// Settings for building a [`ReqwestClient`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gatefetch_fetch::ClientSettings;
    /// use std::time::Duration;
    ///
    /// let settings = ClientSettings::default()
    ///     .user_agent("gatefetch/0.1")
    ///     .connect_timeout(Duration::from_secs(10));
    /// ```
    #[derive(Debug, Clone)]
    pub struct ClientSettings {
        /// Default: `Mozilla/5.0`
        pub user_agent: String,

        /// Default: None (no connect timeout)
        pub connect_timeout: Option<Duration>,

        /// Longest silence allowed between two reads from a response.
        ///
        /// Default: None (a stalled server is waited on forever)
        pub read_timeout: Option<Duration>,

        /// Proxies, applied to HTTPS or plain HTTP traffic by their own scheme.
        pub proxies: Vec<Url>,
    }

    impl Default for ClientSettings {
        fn default() -> Self {
            Self {
                user_agent: "Mozilla/5.0".to_string(),
                connect_timeout: None,
                read_timeout: None,
                proxies: Vec::new(),
            }
        }
    }

    impl ClientSettings {
        #[must_use]
        pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = user_agent.into();
            self
        }

        #[must_use]
        pub fn connect_timeout(mut self, timeout: Duration) -> Self {
            self.connect_timeout = Some(timeout);
            self
        }

        #[must_use]
        pub fn read_timeout(mut self, timeout: Duration) -> Self {
            self.read_timeout = Some(timeout);
            self
        }

        #[must_use]
        pub fn proxy(mut self, proxy: Url) -> Self {
            self.proxies.push(proxy);
            self
        }

        pub fn build(self) -> reqwest::Result<reqwest::Client> {
            let mut builder = reqwest::Client::builder().user_agent(self.user_agent);

            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }

            if let Some(timeout) = self.read_timeout {
                builder = builder.read_timeout(timeout);
            }

            let (secure, insecure): (Vec<Url>, Vec<Url>) =
                self.proxies.into_iter().partition(|u| u.scheme() == "https");

            for u in secure {
                builder = builder.proxy(Proxy::https(u)?);
            }

            for u in insecure {
                builder = builder.proxy(Proxy::http(u)?);
            }

            builder.build()
        }
    }

    /// Production HTTP client implementation using reqwest.
    ///
    /// Cloning is cheap and shares the underlying connection pool.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default settings.
        pub fn new() -> reqwest::Result<Self> { Self::with_settings(ClientSettings::default()) }

        pub fn with_settings(settings: ClientSettings) -> reqwest::Result<Self> {
            Ok(Self {
                client: settings.build()?,
            })
        }

        /// Wrap an already configured reqwest client.
        pub fn from_client(client: reqwest::Client) -> Self { Self { client } }
    }

    fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<&str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn head(&self, url: &str, timeout: Duration) -> Result<HeadResponse, Self::Error> {
            let response = self.client.head(url).timeout(timeout).send().await?;
            let status = response.status();
            let headers = response.headers();

            Ok(HeadResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                content_type: header_str(headers, CONTENT_TYPE).map(str::to_string),
                content_length: header_str(headers, CONTENT_LENGTH).and_then(parse_content_length),
            })
        }

        async fn get(&self, url: &str) -> Result<GetResponse<Self::Error>, Self::Error> {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let content_length =
                header_str(response.headers(), CONTENT_LENGTH).and_then(parse_content_length);

            Ok(GetResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                content_length,
                body: response.bytes_stream().boxed(),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSettings, ReqwestClient};

#[cfg(all(test, feature = "reqwest"))]
mod tests {
    use super::*;

    #[test]
    fn test_client_settings_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.user_agent, "Mozilla/5.0");
        assert!(settings.connect_timeout.is_none());
        assert!(settings.read_timeout.is_none());
        assert!(settings.proxies.is_empty());
    }

    #[test]
    fn test_client_builds_with_proxies() {
        let settings = ClientSettings::default()
            .proxy("http://127.0.0.1:3128".parse().unwrap())
            .proxy("https://127.0.0.1:3129".parse().unwrap())
            .connect_timeout(Duration::from_secs(3))
            .read_timeout(Duration::from_secs(30));

        assert_eq!(settings.read_timeout, Some(Duration::from_secs(30)));
        assert!(ReqwestClient::with_settings(settings).is_ok());
    }

    #[test]
    fn test_head_response_is_ok() {
        let response = HeadResponse {
            status: 404,
            reason: "Not Found".into(),
            ..Default::default()
        };
        assert!(!response.is_ok());
    }
}
