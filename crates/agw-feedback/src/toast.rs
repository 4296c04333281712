//! Toast notifications.
//!
//! A [`Toast`] describes one notification. Anything that can display one
//! implements [`ToastSink`]; [`ToastQueue`] is the in-memory sink that also
//! handles dismissal and expiry.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::settings::ToastSettings;

/// Severity of a toast. Drives its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastType {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    #[default]
    Top,
    Bottom,
}

/// Horizontal placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Center,
    #[default]
    Right,
}

/// A single toast notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub text: String,
    pub toast_type: ToastType,
    /// Display time in milliseconds. 0 keeps the toast until dismissed.
    pub duration_ms: u64,
    pub gravity: Gravity,
    pub position: Position,
    /// Show a close button.
    pub close: bool,
    /// Pause the timer while focused.
    pub stop_on_focus: bool,
    pub new_window: bool,
    /// CSS background colour.
    pub background: String,
}

impl Toast {
    /// Warning toast styled from settings.
    pub fn warning(text: impl Into<String>, settings: &ToastSettings) -> Self {
        Self {
            text: text.into(),
            toast_type: ToastType::Warning,
            duration_ms: settings.duration_ms,
            gravity: settings.gravity,
            position: settings.position,
            close: settings.close,
            stop_on_focus: settings.stop_on_focus,
            new_window: settings.new_window,
            background: settings.background.clone(),
        }
    }

    /// Override the display time.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn is_persistent(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Anything that can display a toast.
pub trait ToastSink {
    fn show(&mut self, toast: Toast);
}

impl ToastSink for Vec<Toast> {
    fn show(&mut self, toast: Toast) {
        self.push(toast);
    }
}

/// Identifier of a toast inside a [`ToastQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A toast currently on screen.
#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub id: ToastId,
    pub toast: Toast,
    /// `None` for persistent toasts.
    remaining: Option<Duration>,
    focused: bool,
}

impl ActiveToast {
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn is_paused(&self) -> bool {
        self.focused && self.toast.stop_on_focus
    }
}

/// Toasts on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    next_id: u64,
    active: Vec<ActiveToast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and return its id.
    pub fn push(&mut self, toast: Toast) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        let remaining = (!toast.is_persistent()).then(|| Duration::from_millis(toast.duration_ms));
        tracing::trace!(%id, kind = toast.toast_type.label(), text = %toast.text, "toast shown");
        self.active.push(ActiveToast {
            id,
            toast,
            remaining,
            focused: false,
        });
        id
    }

    /// User closed a toast.
    pub fn dismiss(&mut self, id: ToastId) -> Option<Toast> {
        let index = self.active.iter().position(|active| active.id == id)?;
        Some(self.active.remove(index).toast)
    }

    /// Close everything. Returns how many toasts were closed.
    pub fn dismiss_all(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    /// Pointer entered a toast.
    pub fn focus(&mut self, id: ToastId) {
        if let Some(active) = self.get_mut(id) {
            active.focused = true;
        }
    }

    /// Pointer left a toast.
    pub fn blur(&mut self, id: ToastId) {
        if let Some(active) = self.get_mut(id) {
            active.focused = false;
        }
    }

    /// Let `elapsed` pass. Returns the toasts that expired.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Toast> {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.active.len());
        for mut active in self.active.drain(..) {
            if !active.is_paused()
                && let Some(remaining) = active.remaining
            {
                let left = remaining.saturating_sub(elapsed);
                if left.is_zero() {
                    expired.push(active.toast);
                    continue;
                }
                active.remaining = Some(left);
            }
            kept.push(active);
        }
        self.active = kept;
        expired
    }

    pub fn visible(&self) -> &[ActiveToast] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn get_mut(&mut self, id: ToastId) -> Option<&mut ActiveToast> {
        self.active.iter_mut().find(|active| active.id == id)
    }
}

impl ToastSink for ToastQueue {
    fn show(&mut self, toast: Toast) {
        self.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(text: &str, millis: u64) -> Toast {
        Toast::warning(text, &ToastSettings::default())
            .with_duration(Duration::from_millis(millis))
    }

    #[test]
    fn warning_uses_settings() {
        let toast = Toast::warning("A network error occurred", &ToastSettings::default());
        assert_eq!(toast.toast_type, ToastType::Warning);
        assert_eq!(toast.background, "#f97316");
        assert_eq!(toast.gravity, Gravity::Top);
        assert_eq!(toast.position, Position::Right);
        assert!(toast.close);
        assert!(toast.is_persistent());
    }

    #[test]
    fn persistent_toasts_never_expire() {
        let mut queue = ToastQueue::new();
        queue.push(Toast::warning("stay", &ToastSettings::default()));
        assert!(queue.advance(Duration::from_secs(3600)).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn timed_toasts_expire() {
        let mut queue = ToastQueue::new();
        queue.push(timed("short", 1_000));
        queue.push(timed("long", 5_000));

        assert!(queue.advance(Duration::from_millis(999)).is_empty());
        let expired = queue.advance(Duration::from_millis(1));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].text, "short");
        assert_eq!(queue.visible()[0].toast.text, "long");
    }

    #[test]
    fn focus_pauses_timer() {
        let mut queue = ToastQueue::new();
        let id = queue.push(timed("hover me", 1_000));
        queue.focus(id);
        assert!(queue.advance(Duration::from_secs(10)).is_empty());
        queue.blur(id);
        assert_eq!(queue.advance(Duration::from_secs(1)).len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn focus_without_stop_on_focus_keeps_running() {
        let mut queue = ToastQueue::new();
        let mut toast = timed("no pause", 1_000);
        toast.stop_on_focus = false;
        let id = queue.push(toast);
        queue.focus(id);
        assert_eq!(queue.advance(Duration::from_secs(1)).len(), 1);
    }

    #[test]
    fn dismiss_by_id() {
        let mut queue = ToastQueue::new();
        let first = queue.push(timed("one", 1_000));
        let second = queue.push(timed("two", 1_000));
        assert_eq!(queue.dismiss(first).map(|t| t.text), Some("one".to_string()));
        assert!(queue.dismiss(first).is_none());
        assert_eq!(queue.visible()[0].id, second);
        assert_eq!(queue.dismiss_all(), 1);
    }
}
