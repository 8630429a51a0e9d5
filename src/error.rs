// src/error.rs
use serde::Deserialize;
use std::fmt;

/// Structured fields the backend includes in JSON error bodies. Any of them
/// may be missing; missing fields render as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug)]
pub enum BrowserError {
    /// The request never completed, or a success body could not be decoded.
    Http(reqwest::Error),
    /// Non-success response whose body was not parseable JSON. Carries only
    /// the HTTP status code; no backend text is echoed.
    UnparseableBody(u16),
    /// 5xx with a parseable body. Carries the status code only. The backend's
    /// error fields are discarded on this branch; callers match on these
    /// exact messages, so the branch order stays as-is.
    Server(u16),
    /// Any other non-2xx with a parseable body, carrying the backend's
    /// structured error fields.
    Rejected {
        code: u16,
        message: String,
        context: String,
        status: String,
    },
}

impl BrowserError {
    /// Normalize a non-success response from its status code and raw body.
    /// The body is parsed first: an unparseable body wins over the 5xx check,
    /// mirroring the backend contract callers already depend on.
    pub(crate) fn from_status_and_body(code: u16, body: &str) -> Self {
        let parsed: ErrorBody = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(_) => return BrowserError::UnparseableBody(code),
        };

        if (500..600).contains(&code) {
            BrowserError::Server(code)
        } else {
            BrowserError::Rejected {
                code,
                message: parsed.message,
                context: parsed.context,
                status: parsed.status,
            }
        }
    }
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "Request failed: {}", err),
            Self::UnparseableBody(code) => {
                write!(f, "Server error (could not parse response body): {}", code)
            }
            Self::Server(code) => write!(f, "Server error: {}", code),
            Self::Rejected {
                code,
                message,
                context,
                status,
            } => {
                write!(
                    f,
                    "Server could not be updated: error {}.\nMessage: {}\nContext: {}\nStatus: {}\n",
                    code, message, context, status
                )
            }
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        BrowserError::Http(err)
    }
}
