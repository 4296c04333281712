//! Request lifecycle events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;
use crate::transaction::Transaction;

/// Points in a request's life the coordinator reacts to.
///
/// For a single request `BeforeSend` always comes first, followed by
/// `BeforeSwap` (if a response arrived) or `SendError`, then `AfterRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LifecycleEvent {
    /// The request is about to go out.
    BeforeSend,
    /// The request finished, successfully or not.
    AfterRequest,
    /// Transport failure. No response body exists.
    SendError,
    /// A response arrived and is about to replace page content.
    BeforeSwap,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 4] = [
        Self::BeforeSend,
        Self::AfterRequest,
        Self::SendError,
        Self::BeforeSwap,
    ];

    /// Name of the DOM event dispatched on the document.
    pub const fn dom_name(&self) -> &'static str {
        match self {
            Self::BeforeSend => "htmx:beforeSend",
            Self::AfterRequest => "htmx:afterRequest",
            Self::SendError => "htmx:sendError",
            Self::BeforeSwap => "htmx:beforeSwap",
        }
    }

    const fn short_name(&self) -> &'static str {
        match self {
            Self::BeforeSend => "beforeSend",
            Self::AfterRequest => "afterRequest",
            Self::SendError => "sendError",
            Self::BeforeSwap => "beforeSwap",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_name())
    }
}

impl FromStr for LifecycleEvent {
    type Err = FeedbackError;

    /// Accepts `htmx:beforeSend` as well as the bare `beforeSend`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let short = name.strip_prefix("htmx:").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|event| event.short_name() == short)
            .ok_or_else(|| FeedbackError::UnknownEvent(name.to_string()))
    }
}

impl TryFrom<String> for LifecycleEvent {
    type Error = FeedbackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LifecycleEvent> for String {
    fn from(event: LifecycleEvent) -> Self {
        event.dom_name().to_string()
    }
}

/// The `detail` object attached to a lifecycle event.
pub struct EventDetail<'a> {
    /// Transaction the event belongs to.
    pub xhr: &'a dyn Transaction,
    /// Whether the response should replace page content. Only meaningful for
    /// [`LifecycleEvent::BeforeSwap`]; handlers may clear it.
    pub should_swap: bool,
}

impl<'a> EventDetail<'a> {
    pub fn new(xhr: &'a dyn Transaction) -> Self {
        Self {
            xhr,
            should_swap: true,
        }
    }
}

impl fmt::Debug for EventDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDetail")
            .field("status", &self.xhr.status())
            .field("should_swap", &self.should_swap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dom_and_short_names() {
        assert_eq!(
            "htmx:beforeSwap".parse::<LifecycleEvent>().unwrap(),
            LifecycleEvent::BeforeSwap
        );
        assert_eq!(
            "sendError".parse::<LifecycleEvent>().unwrap(),
            LifecycleEvent::SendError
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "htmx:afterSwap".parse::<LifecycleEvent>().unwrap_err();
        assert!(matches!(err, FeedbackError::UnknownEvent(name) if name == "htmx:afterSwap"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for event in LifecycleEvent::ALL {
            assert_eq!(event.to_string().parse::<LifecycleEvent>().unwrap(), event);
        }
    }
}
