//! Request-feedback coordinator.
//!
//! Turns lifecycle events into progress and toast changes:
//!
//! | Event          | Effect |
//! |----------------|--------|
//! | `BeforeSend`   | start the indicator unless it is already running |
//! | `AfterRequest` | stop the indicator, unless a redirect header announces a follow-up navigation |
//! | `SendError`    | persistent warning toast with the network error text |
//! | `BeforeSwap`   | for failure statuses: cancel the swap, toast the body's `error` field if any |
//!
//! Handlers never fail. Every call returns a [`Reaction`] describing what it
//! did, which is also logged.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::event::{EventDetail, LifecycleEvent};
use crate::progress::{ProgressBar, ProgressIndicator};
use crate::settings::FeedbackSettings;
use crate::toast::{Toast, ToastQueue, ToastSink};
use crate::transaction::Transaction;

/// Why a swap was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Suppression {
    /// The body carried an error message, which was shown.
    Message(String),
    /// The body was JSON without an error message.
    Silent,
    /// The body was not JSON.
    MalformedBody(String),
}

/// Outcome of handling one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reaction", content = "detail", rename_all = "snake_case")]
pub enum Reaction {
    /// Indicator went from idle to running.
    ProgressStarted,
    /// Indicator was already running and was left alone.
    ProgressAlreadyRunning,
    /// Indicator kept running because a redirect follows.
    ProgressKeptForRedirect,
    /// Indicator went from running to idle.
    ProgressFinished,
    /// Request finished while the indicator was idle.
    ProgressIdle,
    /// Network error toast was shown with this text.
    NetworkErrorShown(String),
    /// Response will replace page content.
    SwapAllowed,
    /// Response will not replace page content.
    SwapSuppressed(Suppression),
}

impl Reaction {
    pub fn is_swap_suppressed(&self) -> bool {
        matches!(self, Self::SwapSuppressed(_))
    }

    /// Text of the toast this reaction produced, if any.
    pub fn toast_text(&self) -> Option<&str> {
        match self {
            Self::NetworkErrorShown(text) | Self::SwapSuppressed(Suppression::Message(text)) => {
                Some(text)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgressStarted => f.write_str("progress started"),
            Self::ProgressAlreadyRunning => f.write_str("progress already running"),
            Self::ProgressKeptForRedirect => f.write_str("progress kept for redirect"),
            Self::ProgressFinished => f.write_str("progress finished"),
            Self::ProgressIdle => f.write_str("progress idle"),
            Self::NetworkErrorShown(text) => write!(f, "network error toast: {text}"),
            Self::SwapAllowed => f.write_str("swap"),
            Self::SwapSuppressed(Suppression::Message(text)) => {
                write!(f, "swap suppressed, toast: {text}")
            }
            Self::SwapSuppressed(Suppression::Silent) => f.write_str("swap suppressed"),
            Self::SwapSuppressed(Suppression::MalformedBody(_)) => {
                f.write_str("swap suppressed, body not JSON")
            }
        }
    }
}

/// Drives a progress indicator and a toast sink from lifecycle events.
#[derive(Debug)]
pub struct Coordinator<P, T> {
    settings: FeedbackSettings,
    progress: P,
    toasts: T,
}

impl Coordinator<ProgressBar, ToastQueue> {
    /// Coordinator over the in-memory bar and queue.
    pub fn with_settings(settings: FeedbackSettings) -> Self {
        let progress = ProgressBar::new(settings.progress.clone());
        Self::new(settings, progress, ToastQueue::new())
    }
}

impl<P, T> Coordinator<P, T>
where
    P: ProgressIndicator,
    T: ToastSink,
{
    pub fn new(settings: FeedbackSettings, progress: P, toasts: T) -> Self {
        Self {
            settings,
            progress,
            toasts,
        }
    }

    /// Dispatch one lifecycle event.
    pub fn handle(&mut self, event: LifecycleEvent, detail: &mut EventDetail<'_>) -> Reaction {
        let reaction = match event {
            LifecycleEvent::BeforeSend => self.before_send(),
            LifecycleEvent::AfterRequest => self.after_request(detail.xhr),
            LifecycleEvent::SendError => self.send_error(),
            LifecycleEvent::BeforeSwap => self.before_swap(detail),
        };
        debug!(
            event = %event,
            status = detail.xhr.status(),
            should_swap = detail.should_swap,
            reaction = %reaction,
            "lifecycle event handled"
        );
        reaction
    }

    pub fn before_send(&mut self) -> Reaction {
        if self.progress.is_started() {
            return Reaction::ProgressAlreadyRunning;
        }
        self.progress.start();
        Reaction::ProgressStarted
    }

    pub fn after_request(&mut self, xhr: &dyn Transaction) -> Reaction {
        if xhr.has_response_header(&self.settings.swap.redirect_header) {
            return Reaction::ProgressKeptForRedirect;
        }
        if !self.progress.is_started() {
            return Reaction::ProgressIdle;
        }
        self.progress.done();
        Reaction::ProgressFinished
    }

    pub fn send_error(&mut self) -> Reaction {
        let text = self.settings.toast.network_error_text.clone();
        self.toasts
            .show(Toast::warning(text.as_str(), &self.settings.toast));
        Reaction::NetworkErrorShown(text)
    }

    pub fn before_swap(&mut self, detail: &mut EventDetail<'_>) -> Reaction {
        let status = detail.xhr.status();
        if !self.settings.swap.policy.suppresses(status) {
            return Reaction::SwapAllowed;
        }
        detail.should_swap = false;

        let body: Value = match serde_json::from_str(detail.xhr.response_text()) {
            Ok(body) => body,
            Err(error) => {
                warn!(status, %error, "failure response body is not JSON");
                return Reaction::SwapSuppressed(Suppression::MalformedBody(error.to_string()));
            }
        };

        match body.get("error").and_then(error_message) {
            Some(message) => {
                self.toasts
                    .show(Toast::warning(message.as_str(), &self.settings.toast));
                Reaction::SwapSuppressed(Suppression::Message(message))
            }
            None => Reaction::SwapSuppressed(Suppression::Silent),
        }
    }

    pub fn settings(&self) -> &FeedbackSettings {
        &self.settings
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut P {
        &mut self.progress
    }

    pub fn toasts(&self) -> &T {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut T {
        &mut self.toasts
    }

    pub fn into_parts(self) -> (P, T) {
        (self.progress, self.toasts)
    }
}

/// Text to show for an `error` field, or `None` when the value is falsy.
///
/// Strings are shown as-is. Other truthy values are shown as compact JSON.
pub fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
