//! Colorful console output for planner events.
//!
//! Provides a custom `tracing` layer that formats planner events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solving start/end, level solved)
//! - **DEBUG**: Hand-offs between levels
//! - **WARN**: Exhausted levels

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const DEFAULT_FILTER: &str = "pathforge_planner=info";

/// Initializes the planner console output.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG`, defaulting to INFO for the planner.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlannerConsoleLayer)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats planner events with colors.
pub struct PlannerConsoleLayer;

impl<S: Subscriber> Layer<S> for PlannerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("pathforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    levels: Option<u64>,
    level: Option<u64>,
    from: Option<u64>,
    to: Option<u64>,
    current_level: Option<u64>,
    stop_level: Option<u64>,
    dimension: Option<u64>,
    quanta: Option<u64>,
    feasible_nodes: Option<u64>,
    total_nodes: Option<u64>,
    states: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "status" => self.status = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "levels" => self.levels = Some(value),
            "level" => self.level = Some(value),
            "from" => self.from = Some(value),
            "to" => self.to = Some(value),
            "current_level" => self.current_level = Some(value),
            "stop_level" => self.stop_level = Some(value),
            "dimension" => self.dimension = Some(value),
            "quanta" => self.quanta = Some(value),
            "feasible_nodes" => self.feasible_nodes = Some(value),
            "total_nodes" => self.total_nodes = Some(value),
            "states" => self.states = Some(value),
            "duration_ms" | "elapsed_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "level_solved" => format_level_solved(v),
        "handoff" => format_handoff(v),
        "level_exhausted" => format_level_exhausted(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    format!(
        "{} {} Solving │ {} levels │ from level {} │ stop at level {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.levels.unwrap_or(0).bright_yellow(),
        v.current_level.unwrap_or(0).bright_yellow(),
        v.stop_level.unwrap_or(0).bright_yellow()
    )
}

fn format_level_solved(v: &EventVisitor) -> String {
    format!(
        "{} {} Level {} solved │ dim {} │ {} quanta │ {} nodes │ {}",
        format_elapsed(),
        "✓".bright_green(),
        v.level.unwrap_or(0).white().bold(),
        v.dimension.unwrap_or(0),
        v.quanta
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
        v.feasible_nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_handoff(v: &EventVisitor) -> String {
    format!(
        "{} {} Level {} → {} │ {} states",
        format_elapsed(),
        "↑".bright_blue(),
        v.from.unwrap_or(0),
        v.to.unwrap_or(0),
        v.states.unwrap_or(0)
    )
}

fn format_level_exhausted(v: &EventVisitor) -> String {
    format!(
        "{} {} Level {} exhausted │ {} quanta │ {} samples",
        format_elapsed(),
        "✗".bright_red(),
        v.level.unwrap_or(0).white().bold(),
        v.quanta.unwrap_or(0).to_formatted_string(&Locale::en),
        v.total_nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("Unknown status");
    let colored = match status {
        "Exact solution" => status.bright_green().bold().to_string(),
        "Approximate solution" => status.bright_yellow().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    };
    format!(
        "{} {} Solving ended │ {} │ {} quanta │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        colored,
        v.quanta
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
