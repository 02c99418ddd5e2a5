use reqwest::header::HeaderMap;
use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::http::{RawResponse, parse_base_url, resource_url};
use crate::{Accounts, ClientConfig, LibibError, Managers, Patrons};

/// Async Libib API client.
///
/// Holds the credentials and exposes the [`Patrons`], [`Managers`] and
/// [`Accounts`] sub-resources. Constructing the client makes no network call.
/// For a synchronous variant, use [`crate::BlockingLibibClient`].
#[derive(Clone, Debug)]
pub struct LibibClient {
    config: ClientConfig,
    base_url: Url,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl LibibClient {
    /// Creates a client from the given config.
    ///
    /// Fails when the base URL is not absolute or a credential is not a valid
    /// header value.
    pub fn new(config: ClientConfig) -> Result<Self, LibibError> {
        Ok(Self {
            base_url: parse_base_url(config.base_url())?,
            headers: config.headers()?,
            config,
            http: reqwest::Client::new(),
        })
    }

    /// Creates a client from `LIBIB_*` environment variables.
    pub fn from_env() -> Result<Self, LibibError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn patrons(&self) -> Patrons<'_> {
        Patrons::new(self)
    }

    pub fn managers(&self) -> Managers<'_> {
        Managers::new(self)
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    /// Sends one request to `base_url/segments...` with the credential headers.
    pub(crate) async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<RawResponse, LibibError> {
        let url = resource_url(&self.base_url, segments)?;
        debug!(%method, %url, "sending Libib request");

        let mut request = self
            .http
            .request(method, url)
            .headers(self.headers.clone());

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload = response.text().await?;
        debug!(%status, "received Libib response");

        Ok(RawResponse::new(status, &payload))
    }
}
