//! Common UI components.
//!
//! This module contains the header bar, status bar, legend, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::token_color;
use crate::app::{App, Pane};
use crate::data::duration::format_duration;
use crate::data::CategorySeries;

/// Render the header bar.
///
/// Displays: statement id, plan and session counts, data source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ORAMAN ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ SQL "),
        Span::styled(
            app.sql_id().to_string(),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
    ];

    match app.detail {
        Some(ref detail) => {
            spans.push(Span::raw(format!(
                "{} plans │ {} sessions │ ",
                detail.execution_plans.len(),
                detail.top_sessions.len()
            )));
        }
        None => spans.push(Span::raw("Loading... │ ")),
    }

    spans.push(Span::styled(
        app.source_description().to_string(),
        Style::default().add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Build a legend line: a colored square and label per category.
pub fn legend_line(series: &CategorySeries) -> Line<'static> {
    let mut spans = Vec::with_capacity(series.len() * 2);
    for category in series.iter() {
        spans.push(Span::styled(
            " ■ ",
            Style::default().fg(token_color(&category.color)),
        ));
        spans.push(Span::raw(category.label.clone()));
    }
    Line::from(spans)
}

/// Render the status bar at the bottom.
///
/// Shows: focused pane, time since last update, fetch latency, controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.focus {
        Pane::Plans => "Tab:sessions ↑↓:select r:reload e:export ?:help q:quit",
        Pane::Sessions => "Tab:plans ↑↓:select r:reload e:export ?:help q:quit",
    };

    let status = match app.last_updated {
        Some(updated) => {
            let latency = app
                .last_latency
                .map(|d| format!(" in {}", format_duration(d)))
                .unwrap_or_default();
            let loading = if app.is_loading() { " | Reloading..." } else { "" };
            format!(
                " {} | Fetched{} {:.1}s ago{} | {}",
                app.focus.label(),
                latency,
                updated.elapsed().as_secs_f64(),
                loading,
                controls
            )
        }
        None if app.is_loading() => " Loading... | q:quit".to_string(),
        None => " No data | r:retry q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab         Switch plans/sessions"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload statement"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_line() {
        let series = CategorySeries::from_keys(&["CPU", "log file sync"]);
        let line = legend_line(&series);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[1].content, "CPU");
        assert_eq!(line.spans[3].content, "log file sync");
        assert_eq!(line.spans[0].style.fg, Some(token_color(crate::data::PALETTE[0])));
    }
}
