//! Replay reports: what the user would have seen.

use agw_feedback::{
    Coordinator, LifecycleEvent, ProgressIndicator, Reaction, ReplayStep, Suppression, Toast,
    ToastQueue,
};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

/// Result of replaying a transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    /// Toasts still on screen at the end.
    pub toasts: Vec<Toast>,
    /// Indicator state at the end.
    pub progress_running: bool,
}

impl ReplayReport {
    /// Collect the final state of a coordinator after `steps` ran.
    pub fn collect<P: ProgressIndicator>(
        coordinator: &Coordinator<P, ToastQueue>,
        steps: Vec<ReplayStep>,
    ) -> Self {
        Self {
            steps,
            toasts: coordinator
                .toasts()
                .visible()
                .iter()
                .map(|active| active.toast.clone())
                .collect(),
            progress_running: coordinator.progress().is_started(),
        }
    }

    pub fn count_events(&self, event: LifecycleEvent) -> usize {
        self.steps.iter().filter(|step| step.event == event).count()
    }

    pub fn suppressed_swaps(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.reaction.is_swap_suppressed())
            .count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn print_report(report: &ReplayReport) {
    println!("{}", replay_table(report));
    if report.toasts.is_empty() {
        println!("No toasts on screen.");
    } else {
        println!("{}", toast_table(&report.toasts));
    }
    println!(
        "Progress indicator: {}",
        if report.progress_running {
            "running"
        } else {
            "idle"
        }
    );
}

/// One row per replayed event.
pub fn replay_table(report: &ReplayReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Event"),
        header_cell("Status"),
        header_cell("Reaction"),
        header_cell("Swap"),
        header_cell("Progress"),
    ]);
    apply_replay_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    for step in &report.steps {
        table.add_row(vec![
            Cell::new(step.line),
            Cell::new(step.event.dom_name()),
            status_cell(step.status),
            reaction_cell(&step.reaction),
            swap_cell(step),
            progress_cell(step.progress_running),
        ]);
    }
    table
}

/// Toasts still visible at the end of the replay.
pub fn toast_table(toasts: &[Toast]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Toast"),
        header_cell("Type"),
        header_cell("Placement"),
        header_cell("Duration"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for toast in toasts {
        let duration = if toast.is_persistent() {
            "until dismissed".to_string()
        } else {
            format!("{} ms", toast.duration_ms)
        };
        table.add_row(vec![
            Cell::new(&toast.text),
            Cell::new(toast.toast_type.label()).fg(Color::Yellow),
            Cell::new(format!("{:?}-{:?}", toast.gravity, toast.position).to_lowercase()),
            Cell::new(duration),
        ]);
    }
    table
}

fn apply_replay_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: u16) -> Cell {
    match status {
        0 => Cell::new("-").add_attribute(Attribute::Dim),
        200..=299 => Cell::new(status).fg(Color::Green),
        400..=499 => Cell::new(status).fg(Color::Yellow),
        500.. => Cell::new(status).fg(Color::Red),
        _ => Cell::new(status),
    }
}

fn reaction_cell(reaction: &Reaction) -> Cell {
    let cell = Cell::new(reaction.to_string());
    match reaction {
        Reaction::NetworkErrorShown(_) | Reaction::SwapSuppressed(Suppression::Message(_)) => {
            cell.fg(Color::Yellow)
        }
        Reaction::SwapSuppressed(Suppression::MalformedBody(_)) => cell.fg(Color::Red),
        Reaction::ProgressAlreadyRunning | Reaction::ProgressIdle => {
            cell.add_attribute(Attribute::Dim)
        }
        _ => cell,
    }
}

fn swap_cell(step: &ReplayStep) -> Cell {
    if step.event != LifecycleEvent::BeforeSwap {
        return Cell::new("-").add_attribute(Attribute::Dim);
    }
    if step.should_swap {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Yellow)
    }
}

fn progress_cell(running: bool) -> Cell {
    if running {
        Cell::new("running")
    } else {
        Cell::new("idle").add_attribute(Attribute::Dim)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
