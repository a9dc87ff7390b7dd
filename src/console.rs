//! Terminal front end: command parsing and plain-text rendering.

use std::fmt::Write;

use crate::vitals::{health_tips, AlertRecord, MetricType, SanitizedVitals, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    Vitals,
    Tips,
    Alerts(Option<Severity>),
    Read(String),
    Delete(String),
    ReadAll,
    Help,
    Quit,
}

impl Command {
    /// `None` for blank input. Unknown slash commands map to `Help`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Command::Chat(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        let command = match (name.as_str(), arg) {
            ("vitals", _) => Command::Vitals,
            ("tips", _) => Command::Tips,
            ("alerts", None) => Command::Alerts(None),
            ("alerts", Some(filter)) => match Severity::from_str(&filter.to_lowercase()) {
                Some(severity) => Command::Alerts(Some(severity)),
                None => Command::Help,
            },
            ("read", Some(id)) => Command::Read(id.to_string()),
            ("delete", Some(id)) => Command::Delete(id.to_string()),
            ("readall", _) => Command::ReadAll,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Help,
        };
        Some(command)
    }
}

pub const HELP: &str = "\
Type a question to chat, or one of:
  /vitals                       current readings
  /tips                         health tips
  /alerts [critical|warning]    alert feed
  /read <id>  /delete <id>      update one alert
  /readall                      mark every alert read
  /quit";

pub fn render_vitals(vitals: &SanitizedVitals) -> String {
    let statuses = vitals.statuses();
    let mut out = String::new();
    for metric in MetricType::ALL {
        let shown = vitals
            .get(metric)
            .map(|value| format!("{} {}", metric.format_value(value), metric.unit()))
            .unwrap_or_else(|| "--".to_string());
        let _ = writeln!(out, "{:<12} {:>12}  [{}]", metric.as_str(), shown, statuses.get(metric));
    }
    let _ = write!(out, "overall: {}", statuses.overall());
    out
}

pub fn render_tips(vitals: &SanitizedVitals) -> String {
    health_tips(vitals)
        .iter()
        .map(|tip| format!("[{}] {}: {}", tip.severity, tip.title, tip.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_alerts(alerts: &[AlertRecord], unread: usize, critical_unread: usize) -> String {
    let mut out = format!("{unread} unread ({critical_unread} critical)");
    for alert in alerts {
        let _ = write!(
            out,
            "\n{} {} [{}] {} {}: {}",
            if alert.read { " " } else { "*" },
            alert.timestamp.format("%H:%M:%S"),
            alert.severity,
            alert.id,
            alert.title,
            alert.message
        );
    }
    out
}
