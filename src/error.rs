use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by Libib client operations.
#[derive(Debug, Error)]
pub enum LibibError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Resource path could not be joined to the base URL.
    #[error("invalid resource path '{0}'")]
    InvalidPath(String),

    /// A credential could not be encoded as an HTTP header value.
    #[error("invalid value for header '{0}'")]
    InvalidHeader(&'static str),

    /// A required environment variable was not set.
    #[error("missing credential: environment variable '{0}' is not set")]
    MissingCredential(&'static str),

    /// Create/update was called without any fields.
    #[error("No Data Provided")]
    NoData,

    /// Create/update was called with fields, none of which are accepted.
    #[error("Data is invalid: {0:?}")]
    InvalidFields(Vec<String>),

    /// Manager role is not one of the assignable roles.
    #[error("Role is invalid: {0}")]
    InvalidRole(String),

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be decoded into the expected shape.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a status other than the one the operation expects.
    #[error("server returned status {status}: {body}")]
    Api { status: StatusCode, body: Value },
}

impl LibibError {
    /// Status code associated with this error.
    ///
    /// Remote errors report the HTTP status; local validation errors report
    /// `400 Bad Request`. Configuration and transport errors have no code.
    pub fn code(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NoData | Self::InvalidFields(_) | Self::InvalidRole(_) => {
                Some(StatusCode::BAD_REQUEST)
            }
            _ => None,
        }
    }

    /// Returns `true` when the error was raised locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoData | Self::InvalidFields(_) | Self::InvalidRole(_)
        )
    }

    /// Renders the error in the `{status: "error", code, body}` shape.
    ///
    /// Returns `None` for errors that carry no status code.
    pub fn to_error_result(&self) -> Option<ErrorResult> {
        let code = self.code()?.as_u16();
        let body = match self {
            Self::Api { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        };
        Some(ErrorResult {
            status: "error",
            code,
            body,
        })
    }
}

/// Uniform error payload for callers that forward failures as JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorResult {
    /// Always `"error"`.
    pub status: &'static str,
    /// HTTP status, or 400 for local validation failures.
    pub code: u16,
    /// Response payload, or a descriptive message for local failures.
    pub body: Value,
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::LibibError;

    #[test]
    fn validation_errors_report_bad_request() {
        let error = LibibError::InvalidRole("owner".to_owned());
        assert!(error.is_validation());
        assert_eq!(error.code(), Some(StatusCode::BAD_REQUEST));

        let result = error.to_error_result().expect("has a code");
        assert_eq!(result.code, 400);
        assert_eq!(result.body, json!("Role is invalid: owner"));
    }

    #[test]
    fn remote_error_result_keeps_response_body() {
        let error = LibibError::Api {
            status: StatusCode::NOT_FOUND,
            body: json!({"error": "Patron not found"}),
        };
        let result = error.to_error_result().expect("has a code");
        assert_eq!(
            serde_json::to_value(&result).expect("serializes"),
            json!({"status": "error", "code": 404, "body": {"error": "Patron not found"}})
        );
    }

    #[test]
    fn configuration_errors_have_no_code() {
        let error = LibibError::MissingCredential("LIBIB_API_KEY");
        assert!(error.code().is_none());
        assert!(error.to_error_result().is_none());
    }
}
