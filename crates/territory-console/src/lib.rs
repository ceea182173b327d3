//! Colorful console output for solver events.
//!
//! Provides a `tracing` layer that renders the structured events emitted by
//! `territory-solver` and `territory`.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve/phase start and end) and progress
//! - **WARN**: Seeds that leave players outside their band

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Target prefixes whose events the layer renders.
const TARGET_PREFIXES: [&str; 2] = ["territory_solver", "territory"];

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "territory_solver=info,territory=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing. `RUST_LOG` overrides the default
/// `territory_solver=info,territory=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TerritoryConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _____                _ _
|_   _|__ _ __ _ __ (_) |_ ___  _ __ _   _
  | |/ _ \ '__| '__|| | __/ _ \| '__| | | |
  | |  __/ |  | |   | | || (_) | |  | |_| |
  |_|\___|_|  |_|   |_|\__\___/|_|   \__, |
                                     |___/
"#;

    let version_line = format!("          v{} - Weighted Grid Territory Solver\n", VERSION);

    let _ = writeln!(io::stdout(), "{}", banner.bright_cyan());
    let _ = writeln!(io::stdout(), "{}", version_line.bright_white().bold());
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats solver events with colors.
pub struct TerritoryConsoleLayer;

impl<S: Subscriber> Layer<S> for TerritoryConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if !is_territory_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

fn is_territory_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|prefix| target.starts_with(prefix))
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    phase: Option<String>,
    strategy: Option<String>,
    status: Option<String>,
    score: Option<String>,
    acceptance_rate: Option<String>,
    players_listed: Option<String>,
    steps: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
    cell_count: Option<u64>,
    player_count: Option<u64>,
    constraint_count: Option<u64>,
    time_limit_secs: Option<u64>,
    edge_diff: Option<i64>,
    objective: Option<i64>,
    feasible: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(s),
            "unsatisfied" | "overshoot" => self.players_listed = Some(s),
            "score" => self.score = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "cell_count" => self.cell_count = Some(value),
            "player_count" => self.player_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "edge_diff" => self.edge_diff = Some(value),
            "objective" => self.objective = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "acceptance_rate" => self.acceptance_rate = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "progress" => format_progress(v),
        _ if level == Level::WARN => format_warning(v),
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
    let strategy = v.strategy.as_deref().unwrap_or("heuristic");
    let cells = v.cell_count.unwrap_or(0);
    let players = v.player_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} │ {} cells │ {} players",
        format_elapsed(),
        "▶".bright_green().bold(),
        strategy.white().bold(),
        cells.to_formatted_string(&Locale::en).bright_yellow(),
        players.to_formatted_string(&Locale::en).bright_yellow(),
    );

    if let Some(time_limit) = v.time_limit_secs.filter(|&t| t > 0) {
        output.push_str(&format!(
            " │ {}s limit",
            time_limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let is_feasible = v
        .feasible
        .unwrap_or_else(|| score.starts_with("0hard"));

    let status = if is_feasible {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_score(score),
        status
    );

    if let Some(detail) = v.status.as_deref() {
        output.push_str(&format!(" │ {}", detail.white()));
    }

    output
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    let mut output = format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    );

    if let Some(constraints) = v.constraint_count {
        output.push_str(&format!(
            " │ {} constraints",
            constraints.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} {} ended │ {} │ {} steps",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
    );

    if let Some(speed) = v.speed {
        output.push_str(&format!(
            " │ {} moves/s",
            speed.to_formatted_string(&Locale::en).bright_magenta().bold()
        ));
    }

    if let Some(ref rate) = v.acceptance_rate {
        output.push_str(&format!(" │ {} accepted", rate.bright_yellow()));
    }

    if let Some(status) = v.status.as_deref() {
        output.push_str(&format!(" │ {}", status.white()));
    }

    if let Some(edge_diff) = v.edge_diff.or(v.objective) {
        output.push_str(&format!(" │ objective {}", format_objective(edge_diff)));
    }

    output
}

fn format_progress(v: &EventVisitor) -> String {
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);

    format!(
        "{} {} {:>10} steps │ {:>12}/s │ edge diff {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        steps.to_formatted_string(&Locale::en).white(),
        speed
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        format_objective(v.edge_diff.unwrap_or(0))
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let message = v.message.as_deref().unwrap_or("warning");
    let mut output = format!(
        "{} {} {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        message.yellow()
    );
    if let Some(players) = v.players_listed.as_deref() {
        output.push_str(&format!(" │ players {}", players.bright_yellow()));
    }
    output
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

fn format_objective(value: i64) -> String {
    value
        .to_formatted_string(&Locale::en)
        .bright_white()
        .to_string()
}

fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/') else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");

    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };

    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };

    format!("{}/{}", hard_str, soft_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_score_keeps_values() {
        let rendered = format_score("-3hard/-12soft");
        assert!(rendered.contains("-3hard"));
        assert!(rendered.contains("-12soft"));

        let plain = format_score("N/A");
        assert!(plain.contains("N/A"));
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("step".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_phase_end_lists_counters() {
        let visitor = EventVisitor {
            event: Some("phase_end".to_string()),
            phase: Some("Local Search".to_string()),
            steps: Some(12_345),
            duration_ms: Some(42),
            acceptance_rate: Some("3.10%".to_string()),
            edge_diff: Some(17),
            ..EventVisitor::default()
        };
        let rendered = format_event(&visitor, Level::INFO);
        assert!(rendered.contains("Local Search"));
        assert!(rendered.contains("12,345"));
        assert!(rendered.contains("42ms"));
        assert!(rendered.contains("3.10%"));
        assert!(rendered.contains("17"));
    }

    #[test]
    fn test_target_prefixes() {
        assert!(is_territory_target("territory"));
        assert!(is_territory_target("territory::solver"));
        assert!(is_territory_target("territory_solver::exact"));
        assert!(!is_territory_target("hyper::client"));
    }

    #[test]
    fn test_exact_phase_end_without_objective() {
        let visitor = EventVisitor {
            event: Some("phase_end".to_string()),
            phase: Some("Exact".to_string()),
            duration_ms: Some(3),
            status: Some("infeasible".to_string()),
            ..EventVisitor::default()
        };
        let rendered = format_event(&visitor, Level::INFO);
        assert!(rendered.contains("infeasible"));
        assert!(!rendered.contains("objective"));

        let solved = EventVisitor {
            objective: Some(6),
            status: Some("optimal".to_string()),
            ..visitor
        };
        assert!(format_event(&solved, Level::INFO).contains("objective"));
    }

    #[test]
    fn test_warning_without_event_field() {
        let visitor = EventVisitor {
            message: Some("initial assignment leaves players below their requirement".to_string()),
            players_listed: Some("[2]".to_string()),
            ..EventVisitor::default()
        };
        let rendered = format_event(&visitor, Level::WARN);
        assert!(rendered.contains("below their requirement"));
        assert!(rendered.contains("[2]"));
    }
}
