//! Error replies sent by the gateway to page scripts.
//!
//! Failed requests are answered with a JSON body of the form
//! `{"error": "..."}`. Page scripts read the `error` field and show it to the
//! user, so the text must be safe to display: errors that are not an
//! [`HttpError`] are reported with a generic reason phrase only.

use std::error::Error;
use std::fmt;

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

/// JSON body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Message shown to the user.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// An error that maps directly onto an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// Response status.
    pub status: StatusCode,
    /// Public message. Falls back to the reason phrase when absent.
    pub message: Option<String>,
}

impl HttpError {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    /// Attach a public message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message that is safe to show the user.
    pub fn public_message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| reason_phrase(self.status))
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.public_message())
    }
}

impl Error for HttpError {}

/// A rendered error reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReply {
    pub status: StatusCode,
    /// `None` for `HEAD` requests.
    pub body: Option<ErrorResponse>,
    /// Server errors (5xx) should be logged by the caller.
    pub should_log: bool,
}

impl ErrorReply {
    /// Render the reply for an error raised while handling a request.
    ///
    /// Anything other than an [`HttpError`] becomes a 500 whose body only
    /// carries the reason phrase.
    pub fn render(method: &Method, error: &(dyn Error + 'static)) -> Self {
        let http_error = match error.downcast_ref::<HttpError>() {
            Some(http_error) => http_error.clone(),
            None => HttpError::new(StatusCode::INTERNAL_SERVER_ERROR),
        };

        let body = if *method == Method::HEAD {
            None
        } else {
            Some(ErrorResponse::new(http_error.public_message()))
        };

        Self {
            status: http_error.status,
            body,
            should_log: http_error.status.is_server_error(),
        }
    }

    /// Like [`ErrorReply::render`], but yields nothing once the response has
    /// already been committed.
    pub fn for_response(
        committed: bool,
        method: &Method,
        error: &(dyn Error + 'static),
    ) -> Option<Self> {
        if committed {
            return None;
        }
        Some(Self::render(method, error))
    }

    /// Body text as it goes on the wire. Empty when there is no body.
    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .and_then(|body| serde_json::to_string(body).ok())
            .unwrap_or_default()
    }
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Error")
}
