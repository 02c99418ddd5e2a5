//! Transport helpers shared by the async and blocking clients.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::LibibError;

/// Status and decoded payload of one API response.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RawResponse {
    pub(crate) fn new(status: StatusCode, payload: &str) -> Self {
        Self {
            status,
            body: decode_body(payload),
        }
    }

    /// Returns the body when the status matches exactly, else [`LibibError::Api`].
    pub(crate) fn expect_status(self, expected: StatusCode) -> Result<Value, LibibError> {
        if self.status == expected {
            Ok(self.body)
        } else {
            Err(LibibError::Api {
                status: self.status,
                body: self.body,
            })
        }
    }

    /// Checks for `200 OK` and decodes the body into `T`.
    pub(crate) fn into_json<T: DeserializeOwned>(self) -> Result<T, LibibError> {
        let body = self.expect_status(StatusCode::OK)?;
        Ok(serde_json::from_value(body)?)
    }
}

/// Empty payloads become `null`; payloads that are not JSON are kept as text.
fn decode_body(payload: &str) -> Value {
    if payload.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(payload).unwrap_or_else(|_| Value::String(payload.to_owned()))
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, LibibError> {
    let parsed =
        Url::parse(base_url).map_err(|_| LibibError::InvalidBaseUrl(base_url.to_owned()))?;
    if parsed.cannot_be_a_base() {
        return Err(LibibError::InvalidBaseUrl(base_url.to_owned()));
    }
    Ok(parsed)
}

/// Appends `segments` to the base path, percent-encoding each one.
///
/// Empty segments are rejected so a blank identifier never addresses the
/// collection itself.
pub(crate) fn resource_url(base_url: &Url, segments: &[&str]) -> Result<Url, LibibError> {
    if segments.iter().any(|segment| segment.trim().is_empty()) {
        return Err(LibibError::InvalidPath(segments.join("/")));
    }

    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| LibibError::InvalidPath(segments.join("/")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
