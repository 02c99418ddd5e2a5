use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};

use crate::LibibError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.libib.com";

/// Pause between patron page fetches.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

const API_KEY_HEADER: &str = "x-api-key";
const API_USER_HEADER: &str = "x-api-user";
const API_ULTIMATE_HEADER: &str = "x-api-ultimate";

const API_KEY_ENV: &str = "LIBIB_API_KEY";
const API_USER_ENV: &str = "LIBIB_API_USER";
const ULTIMATE_ID_ENV: &str = "LIBIB_ULTIMATE_ID";
const BASE_URL_ENV: &str = "LIBIB_BASE_URL";

/// Credentials and connection settings shared by every request.
///
/// The API key is redacted from the `Debug` output.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    user_id: String,
    ultimate_id: Option<String>,
    base_url: String,
    page_delay: Duration,
}

impl ClientConfig {
    /// Creates a config for a standard (single-account) credential.
    pub fn new(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_id: user_id.into(),
            ultimate_id: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Reads credentials from the process environment.
    ///
    /// `LIBIB_API_KEY` and `LIBIB_API_USER` are required; `LIBIB_ULTIMATE_ID`
    /// and `LIBIB_BASE_URL` are optional.
    pub fn from_env() -> Result<Self, LibibError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LibibError> {
        let api_key = lookup(API_KEY_ENV).ok_or(LibibError::MissingCredential(API_KEY_ENV))?;
        let user_id = lookup(API_USER_ENV).ok_or(LibibError::MissingCredential(API_USER_ENV))?;

        let mut config = Self::new(api_key, user_id);
        if let Some(ultimate_id) = lookup(ULTIMATE_ID_ENV).filter(|value| !value.is_empty()) {
            config = config.with_ultimate_id(ultimate_id);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.is_empty()) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Attaches an Ultimate (multi-account) id, sent as `x-api-ultimate`.
    #[must_use]
    pub fn with_ultimate_id(mut self, ultimate_id: impl Into<String>) -> Self {
        self.ultimate_id = Some(ultimate_id.into());
        self
    }

    /// Overrides the API root, e.g. to target a local test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the pause between patron page fetches.
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn ultimate_id(&self) -> Option<&str> {
        self.ultimate_id.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// Builds the header set attached to every request.
    pub fn headers(&self) -> Result<HeaderMap, LibibError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut key = header_value(API_KEY_HEADER, &self.api_key)?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(
            HeaderName::from_static(API_USER_HEADER),
            header_value(API_USER_HEADER, &self.user_id)?,
        );
        if let Some(ultimate_id) = &self.ultimate_id {
            headers.insert(
                HeaderName::from_static(API_ULTIMATE_HEADER),
                header_value(API_ULTIMATE_HEADER, ultimate_id)?,
            );
        }
        Ok(headers)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("ultimate_id", &self.ultimate_id)
            .field("base_url", &self.base_url)
            .field("page_delay", &self.page_delay)
            .finish()
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, LibibError> {
    HeaderValue::from_str(value).map_err(|_| LibibError::InvalidHeader(name))
}
