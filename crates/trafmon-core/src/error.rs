// ── Core error types ──
//
// User-facing errors from trafmon-core. Consumers never match on HTTP
// status codes or JSON parse failures directly; the
// `From<trafmon_api::Error>` impl translates transport-layer errors into
// domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource} {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<trafmon_api::Error> for CoreError {
    fn from(err: trafmon_api::Error) -> Self {
        match err {
            trafmon_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            trafmon_api::Error::Http { status: 404, message } => CoreError::NotFound {
                resource: "resource".into(),
                identifier: message,
            },
            trafmon_api::Error::Http { status, message } => CoreError::Api {
                message: if message.is_empty() {
                    format!("backend returned HTTP {status}")
                } else {
                    message
                },
                status: Some(status),
            },
            trafmon_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            trafmon_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            trafmon_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Response was not valid JSON: {message}"),
                status: None,
            },
        }
    }
}

impl CoreError {
    /// Attach the resource kind and id to a `NotFound` produced by the
    /// API conversion, which only knows the HTTP status.
    pub(crate) fn with_target(self, resource: &str, id: i64) -> Self {
        match self {
            CoreError::NotFound { .. } => CoreError::NotFound {
                resource: resource.into(),
                identifier: id.to_string(),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn http_404_becomes_not_found() {
        let err: CoreError = trafmon_api::Error::Http {
            status: 404,
            message: "Not Found".into(),
        }
        .into();
        let err = err.with_target("user", 12);
        match err {
            CoreError::NotFound {
                resource,
                identifier,
            } => {
                assert_eq!(resource, "user");
                assert_eq!(identifier, "12");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn server_error_keeps_status() {
        let err: CoreError = trafmon_api::Error::Http {
            status: 500,
            message: String::new(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
        assert_eq!(err.to_string(), "API error: backend returned HTTP 500");
    }

    #[test]
    fn non_json_body_is_an_api_error() {
        let err: CoreError = trafmon_api::Error::Deserialization {
            message: "expected value at line 1 column 1".into(),
            body: "<html>".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: None, .. }));
    }
}
