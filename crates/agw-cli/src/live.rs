//! Terminal rendering of the progress indicator.
//!
//! [`TerminalProgress`] keeps the in-memory [`agw_feedback::ProgressBar`] as
//! the source of truth and mirrors it onto an `indicatif` bar, so a replay
//! shows the same fill and trickle the page would.

use std::time::Duration;

use agw_feedback::{ProgressBar, ProgressIndicator, ProgressSettings};
use indicatif::{ProgressDrawTarget, ProgressStyle};

/// Resolution of the terminal bar.
const BAR_LENGTH: u64 = 1_000;

pub struct TerminalProgress {
    model: ProgressBar,
    bar: Option<indicatif::ProgressBar>,
    hidden: bool,
}

impl TerminalProgress {
    /// Draws to stderr.
    pub fn new(settings: ProgressSettings) -> Self {
        Self {
            model: ProgressBar::new(settings),
            bar: None,
            hidden: false,
        }
    }

    /// Never draws. For tests and non-interactive runs.
    pub fn hidden(settings: ProgressSettings) -> Self {
        Self {
            hidden: true,
            ..Self::new(settings)
        }
    }

    pub fn model(&self) -> &ProgressBar {
        &self.model
    }

    /// Advance the trickle timer and redraw.
    pub fn tick(&mut self) {
        self.model.trickle();
        self.sync();
    }

    fn style(&self) -> ProgressStyle {
        let template = if self.model.settings().show_spinner {
            "{spinner} [{bar:40}] {msg}"
        } else {
            "[{bar:40}] {msg}"
        };
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn create_bar(&self) -> indicatif::ProgressBar {
        let bar = indicatif::ProgressBar::new(BAR_LENGTH);
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(self.style());
        bar.set_message("request in flight");
        if self.model.settings().show_spinner {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        bar
    }

    fn sync(&mut self) {
        let Some(status) = self.model.status() else {
            if let Some(bar) = self.bar.take() {
                bar.finish_and_clear();
            }
            return;
        };
        if self.bar.is_none() {
            self.bar = Some(self.create_bar());
        }
        if let Some(bar) = &self.bar {
            bar.set_position(scaled(status));
        }
    }
}

impl ProgressIndicator for TerminalProgress {
    fn start(&mut self) {
        self.model.start();
        self.sync();
    }

    fn done(&mut self) {
        self.model.done();
        self.sync();
    }

    fn is_started(&self) -> bool {
        self.model.is_started()
    }
}

fn scaled(status: f64) -> u64 {
    (status.clamp(0.0, 1.0) * BAR_LENGTH as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_model_state() {
        let mut progress = TerminalProgress::hidden(ProgressSettings::default());
        progress.start();
        assert!(progress.is_started());
        assert_eq!(
            progress.bar.as_ref().map(indicatif::ProgressBar::position),
            Some(80)
        );

        progress.tick();
        assert_eq!(
            progress.bar.as_ref().map(indicatif::ProgressBar::position),
            Some(180)
        );

        progress.done();
        assert!(!progress.is_started());
        assert!(progress.bar.is_none());
        assert_eq!(progress.model().completions(), 1);
    }

    #[test]
    fn second_start_keeps_position() {
        let mut progress = TerminalProgress::hidden(ProgressSettings::default());
        progress.start();
        progress.tick();
        progress.start();
        assert_eq!(progress.model().starts(), 1);
        assert_eq!(
            progress.bar.as_ref().map(indicatif::ProgressBar::position),
            Some(180)
        );
    }
}
