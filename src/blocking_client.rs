use reqwest::header::HeaderMap;
use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::http::{RawResponse, parse_base_url, resource_url};
use crate::{BlockingAccounts, BlockingManagers, BlockingPatrons, ClientConfig, LibibError};

/// Blocking Libib API client.
///
/// This is the synchronous counterpart of [`crate::LibibClient`].
#[derive(Debug)]
pub struct BlockingLibibClient {
    config: ClientConfig,
    base_url: Url,
    headers: HeaderMap,
    http: reqwest::blocking::Client,
}

impl BlockingLibibClient {
    /// Creates a client from the given config.
    ///
    /// Fails when the base URL is not absolute or a credential is not a valid
    /// header value.
    pub fn new(config: ClientConfig) -> Result<Self, LibibError> {
        Ok(Self {
            base_url: parse_base_url(config.base_url())?,
            headers: config.headers()?,
            config,
            http: reqwest::blocking::Client::new(),
        })
    }

    /// Creates a client from `LIBIB_*` environment variables.
    pub fn from_env() -> Result<Self, LibibError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn patrons(&self) -> BlockingPatrons<'_> {
        BlockingPatrons::new(self)
    }

    pub fn managers(&self) -> BlockingManagers<'_> {
        BlockingManagers::new(self)
    }

    pub fn accounts(&self) -> BlockingAccounts<'_> {
        BlockingAccounts::new(self)
    }

    pub(crate) fn send(
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

        let response = request.send()?;
        let status = response.status();
        let payload = response.text()?;
        debug!(%status, "received Libib response");

        Ok(RawResponse::new(status, &payload))
    }
}
