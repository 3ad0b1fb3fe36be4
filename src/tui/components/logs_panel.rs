//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, color-coded by level.
//! Toggled with `L`; always follows the newest entry.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Format a log entry for display
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        short_target(&entry.target),
        entry.message
    )
}

/// Last path segment of a tracing target (`posttable::engine::view` -> `view`)
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.highlight),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

pub fn render(f: &mut Frame, area: Rect, buffer: &LogBuffer, theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = if buffer.is_empty() {
        vec![ListItem::new("No log entries yet").style(Style::default().fg(theme.muted))]
    } else {
        buffer
            .recent(visible)
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level, theme))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(format!(" System Logs ({}) ", buffer.len())),
        )
        .style(theme.base());

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_entry_shows_short_target() {
        let entry = LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Warn,
            target: "posttable::engine::view".to_string(),
            message: "Dropped 1 record(s) with duplicate ids".to_string(),
        };
        let line = format_log_entry(&entry);
        assert!(line.ends_with("WARN  view: Dropped 1 record(s) with duplicate ids"));
    }
}
