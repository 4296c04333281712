//! Top-of-page progress indicator.
//!
//! The coordinator only needs `start`, `done` and `is_started`, expressed by
//! [`ProgressIndicator`]. [`ProgressBar`] is the in-memory implementation: it
//! tracks the fill value the way the page's bar does, so callers rendering it
//! (a terminal spinner, a test) see the same state.

use crate::settings::ProgressSettings;

/// Largest value the bar reaches before `done`.
const MAX_TRICKLE: f64 = 0.994;

/// Start/stop control over a progress indicator.
pub trait ProgressIndicator {
    /// Begin showing progress. Must be idempotent.
    fn start(&mut self);

    /// Finish and hide. No-op when idle.
    fn done(&mut self);

    fn is_started(&self) -> bool;
}

/// In-memory progress bar with trickle behaviour.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    settings: ProgressSettings,
    /// `None` while idle, otherwise the fill value in `[minimum, 1)`.
    status: Option<f64>,
    starts: u64,
    completions: u64,
}

impl ProgressBar {
    pub fn new(settings: ProgressSettings) -> Self {
        Self {
            settings,
            status: None,
            starts: 0,
            completions: 0,
        }
    }

    pub fn settings(&self) -> &ProgressSettings {
        &self.settings
    }

    /// Current fill value, `None` while idle.
    pub fn status(&self) -> Option<f64> {
        self.status
    }

    /// Number of idle → running transitions.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    /// Number of running → idle transitions.
    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Move the bar to `value`, clamped to `[minimum, 1]`. Reaching 1 finishes.
    pub fn set(&mut self, value: f64) {
        let value = value.max(self.settings.minimum).min(1.0);
        if self.status.is_none() {
            self.starts += 1;
        }
        if value >= 1.0 {
            self.status = None;
            self.completions += 1;
        } else {
            self.status = Some(value);
        }
    }

    /// Advance by `amount`, or by the trickle step for the current value when
    /// `amount` is `None`. Starts the bar when idle.
    pub fn inc(&mut self, amount: Option<f64>) {
        let Some(current) = self.status else {
            self.start();
            return;
        };
        let amount = amount.unwrap_or_else(|| trickle_step(current));
        self.set((current + amount).clamp(0.0, MAX_TRICKLE));
    }

    /// One tick of the trickle timer. Ignored when idle or trickle is off.
    pub fn trickle(&mut self) {
        if self.settings.trickle && self.status.is_some() {
            self.inc(None);
        }
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(ProgressSettings::default())
    }
}

impl ProgressIndicator for ProgressBar {
    fn start(&mut self) {
        if self.status.is_none() {
            self.set(0.0);
        }
    }

    fn done(&mut self) {
        if self.status.is_some() {
            self.set(1.0);
        }
    }

    fn is_started(&self) -> bool {
        self.status.is_some()
    }
}

/// Trickle step: large while the bar is nearly empty, shrinking as it fills.
pub fn trickle_step(status: f64) -> f64 {
    match status {
        s if s < 0.2 => 0.1,
        s if s < 0.5 => 0.04,
        s if s < 0.8 => 0.02,
        s if s < 0.99 => 0.005,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_sets_minimum() {
        let mut bar = ProgressBar::default();
        bar.start();
        assert_eq!(bar.status(), Some(0.08));
        assert!(bar.is_started());
    }

    #[test]
    fn start_while_running_keeps_value() {
        let mut bar = ProgressBar::default();
        bar.start();
        bar.inc(Some(0.3));
        let before = bar.status();
        bar.start();
        assert_eq!(bar.status(), before);
        assert_eq!(bar.starts(), 1);
    }

    #[test]
    fn done_when_idle_is_noop() {
        let mut bar = ProgressBar::default();
        bar.done();
        assert_eq!(bar.completions(), 0);
        assert!(!bar.is_started());
    }

    #[test]
    fn trickle_never_reaches_the_end() {
        let mut bar = ProgressBar::default();
        bar.start();
        for _ in 0..10_000 {
            bar.trickle();
        }
        let status = bar.status().expect("still running");
        assert!(status <= MAX_TRICKLE);
        assert!(status > 0.98);
    }

    #[test]
    fn trickle_disabled_holds_value() {
        let mut bar = ProgressBar::new(ProgressSettings {
            trickle: false,
            ..ProgressSettings::default()
        });
        bar.start();
        bar.trickle();
        assert_eq!(bar.status(), Some(0.08));
    }

    #[test]
    fn inc_when_idle_starts() {
        let mut bar = ProgressBar::default();
        bar.inc(Some(0.5));
        assert_eq!(bar.status(), Some(0.08));
    }

    #[test]
    fn minimum_above_one_finishes_instead_of_panicking() {
        let mut bar = ProgressBar::new(ProgressSettings {
            minimum: 1.5,
            ..ProgressSettings::default()
        });
        bar.start();
        assert!(!bar.is_started());
        assert_eq!(bar.starts(), 1);
        assert_eq!(bar.completions(), 1);
    }

    #[test]
    fn trickle_steps_shrink() {
        assert_eq!(trickle_step(0.1), 0.1);
        assert_eq!(trickle_step(0.3), 0.04);
        assert_eq!(trickle_step(0.6), 0.02);
        assert_eq!(trickle_step(0.9), 0.005);
        assert_eq!(trickle_step(0.995), 0.0);
    }
}
