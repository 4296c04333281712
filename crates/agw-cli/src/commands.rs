use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use agw_cli::live::TerminalProgress;
use agw_cli::report::{ReplayReport, print_report};
use agw_feedback::{
    Coordinator, FeedbackSettings, LifecycleEvent, ToastQueue, read_transcript, replay,
    replay_entry,
};

use crate::cli::{ReplayArgs, ReportFormatArg};

/// Settings from `--config`, or from the platform config directory.
pub fn load_settings(config: Option<&Path>) -> Result<FeedbackSettings> {
    match config {
        Some(path) => {
            if !path.is_file() {
                bail!("settings file not found: {}", path.display());
            }
            FeedbackSettings::load_from(path)
                .with_context(|| format!("load settings from {}", path.display()))
        }
        None => FeedbackSettings::load().context("load settings"),
    }
}

pub fn run_settings(config: Option<&Path>, defaults: bool) -> Result<()> {
    let settings = if defaults {
        FeedbackSettings::default()
    } else {
        load_settings(config)?
    };
    if config.is_none() && !defaults {
        debug!(path = %FeedbackSettings::config_path().display(), "settings path");
    }
    print!("{}", settings.to_toml().context("render settings")?);
    Ok(())
}

pub fn run_replay(args: &ReplayArgs, config: Option<&Path>) -> Result<ReplayReport> {
    let span = info_span!("replay", transcript = %args.transcript.display());
    let _guard = span.enter();

    let settings = load_settings(config)?;
    let entries = read_transcript(&args.transcript)
        .with_context(|| format!("read transcript {}", args.transcript.display()))?;
    info!(
        entries = entries.len(),
        policy = settings.swap.policy.label(),
        "replaying transcript"
    );

    let report = if args.live {
        let progress = TerminalProgress::new(settings.progress.clone());
        let mut coordinator = Coordinator::new(settings, progress, ToastQueue::default());
        let step = Duration::from_millis(args.step_ms);
        let mut steps = Vec::with_capacity(entries.len());
        for entry in &entries {
            steps.push(replay_entry(&mut coordinator, entry));
            thread::sleep(step);
            coordinator.progress_mut().tick();
            for toast in coordinator.toasts_mut().advance(step) {
                debug!(text = %toast.text, "toast expired");
            }
        }
        ReplayReport::collect(&coordinator, steps)
    } else {
        let mut coordinator = Coordinator::with_settings(settings);
        let steps = replay(&mut coordinator, &entries);
        ReplayReport::collect(&coordinator, steps)
    };

    info!(
        requests = report.count_events(LifecycleEvent::BeforeSend),
        suppressed_swaps = report.suppressed_swaps(),
        toasts = report.toasts.len(),
        "replay finished"
    );
    Ok(report)
}

pub fn print_replay(report: &ReplayReport, format: ReportFormatArg) -> Result<()> {
    match format {
        ReportFormatArg::Table => print_report(report),
        ReportFormatArg::Json => println!("{}", report.to_json().context("render report")?),
    }
    Ok(())
}
