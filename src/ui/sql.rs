//! SQL detail view rendering.
//!
//! Displays the statement text, the statement's activity per wait event
//! over time, a table of execution plans with their wait-class activity
//! bars, and a table of top sessions with their wait-event activity bars.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::bar::{render_bar, sparkline};
use super::common::legend_line;
use super::theme::token_color;
use crate::app::{App, Pane};
use crate::data::format::{format_count, micros_to_seconds, per_execution};
use crate::data::timeline::common_scale;
use crate::data::{CategorySeries, PlanDetail, SessionDetail, SqlDetail};

/// Width of the activity bar column, in cells.
pub const BAR_WIDTH: u16 = 30;

/// Most event trends shown at once.
const MAX_TRENDS: usize = 6;

/// Width of the event name column in the trend panel.
const TREND_LABEL_WIDTH: usize = 24;

/// Render the SQL detail view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref detail) = app.detail else {
        let message = if app.is_loading() {
            "  Fetching statement..."
        } else {
            "  No data"
        };
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
        frame.render_widget(paragraph, area);
        return;
    };

    let trend_rows = detail.trends.len().min(MAX_TRENDS) as u16;
    let trend_height = if trend_rows == 0 { 0 } else { trend_rows + 2 };

    let chunks = Layout::vertical([
        Constraint::Length(6),            // Statement text
        Constraint::Length(trend_height), // Activity by event
        Constraint::Percentage(40),       // Plans
        Constraint::Min(6),               // Sessions
    ])
    .split(area);

    render_text(frame, app, detail, chunks[0]);
    if trend_height > 0 {
        render_trends(frame, app, detail, chunks[1]);
    }
    render_plans(frame, app, detail, chunks[2]);
    render_sessions(frame, app, detail, chunks[3]);
}

fn render_text(frame: &mut Frame, app: &App, detail: &SqlDetail, area: Rect) {
    let block = Block::default()
        .title(" SQL Text ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(detail.full_text.as_str())
        .style(Style::default().fg(app.theme.sql_text))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_trends(frame: &mut Frame, app: &App, detail: &SqlDetail, area: Rect) {
    let block = Block::default()
        .title(format!(" Activity by Event ({} samples) ", detail.snapshots.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    // Label, sparkline, then " peak 0.00"
    let inner_width = area.width.saturating_sub(2) as usize;
    let spark_width = inner_width.saturating_sub(TREND_LABEL_WIDTH + 12);
    let scale = common_scale(&detail.trends);

    let lines: Vec<Line> = detail
        .trends
        .iter()
        .take(MAX_TRENDS)
        .map(|trend| {
            let color = token_color(&trend.color);
            Line::from(vec![
                Span::styled(
                    format!(" {:<w$.w$}", trend.label, w = TREND_LABEL_WIDTH - 1),
                    Style::default().fg(color),
                ),
                Span::styled(
                    sparkline(&trend.levels(scale), spark_width),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" peak {:.2}", trend.peak),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn plan_row(plan: &PlanDetail) -> Row<'static> {
    let raw = &plan.plan;
    let executions = raw.executions.unwrap_or(0);
    Row::new(vec![
        Cell::from(raw.plan_hash_value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())),
        Cell::from(format_count(executions)),
        Cell::from(micros_to_seconds(raw.elapsed_time)),
        Cell::from(per_execution(raw.elapsed_time / 1_000_000.0, executions)),
        Cell::from(micros_to_seconds(raw.cpu_time)),
        Cell::from(micros_to_seconds(plan.remaining_waits_time)),
        Cell::from(render_bar(&plan.activity_bar, BAR_WIDTH)),
    ])
}

fn render_plans(frame: &mut Frame, app: &App, detail: &SqlDetail, area: Rect) {
    let focused = app.focus == Pane::Plans;

    let header = Row::new(vec![
        Cell::from("Plan Hash"),
        Cell::from("Execs"),
        Cell::from("Elapsed (s)"),
        Cell::from("Per Exec (s)"),
        Cell::from("CPU (s)"),
        Cell::from("Other Waits (s)"),
        Cell::from("Activity"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = detail.execution_plans.iter().map(plan_row).collect();

    let widths = [
        Constraint::Fill(2),          // Plan hash
        Constraint::Fill(1),          // Executions
        Constraint::Fill(1),          // Elapsed
        Constraint::Fill(1),          // Per execution
        Constraint::Fill(1),          // CPU
        Constraint::Fill(1),          // Remaining waits
        Constraint::Length(BAR_WIDTH), // Activity bar
    ];

    let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Execution Plans ({}) ", detail.execution_plans.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(app.theme.border_style(focused)),
        )
        .row_highlight_style(if focused {
            app.theme.selected
        } else {
            Style::default()
        })
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !detail.execution_plans.is_empty() {
        state.select(Some(app.selected_plan_index));
    }
    frame.render_stateful_widget(table, layout[0], &mut state);

    frame.render_widget(
        Paragraph::new(legend_line(&CategorySeries::wait_classes())),
        layout[1],
    );
}

fn session_row(session: &SessionDetail) -> Row<'static> {
    let raw = &session.session;
    Row::new(vec![
        Cell::from(session.session_id()),
        Cell::from(raw.username.clone().unwrap_or_else(|| "-".into())),
        Cell::from(raw.program.clone().unwrap_or_else(|| "-".into())),
        Cell::from(format!("{}%", session.percentage_fixed)),
        Cell::from(render_bar(&session.activity_bar, BAR_WIDTH)),
    ])
}

fn render_sessions(frame: &mut Frame, app: &App, detail: &SqlDetail, area: Rect) {
    let focused = app.focus == Pane::Sessions;

    let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    let block = Block::default()
        .title(format!(" Top Sessions ({}) ", detail.top_sessions.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style(focused));

    if detail.top_sessions.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No session activity",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, layout[0]);
        return;
    }

    let header = Row::new(vec![
        Cell::from("SID,Serial#"),
        Cell::from("User"),
        Cell::from("Program"),
        Cell::from("Activity %"),
        Cell::from("Activity"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = detail.top_sessions.iter().map(session_row).collect();

    let widths = [
        Constraint::Fill(1),           // Session id
        Constraint::Fill(1),           // User
        Constraint::Fill(2),           // Program
        Constraint::Length(10),        // Activity %
        Constraint::Length(BAR_WIDTH), // Activity bar
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(if focused {
            app.theme.selected
        } else {
            Style::default()
        })
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_session_index));
    frame.render_stateful_widget(table, layout[0], &mut state);

    frame.render_widget(Paragraph::new(legend_line(&detail.series)), layout[1]);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::source::{
        ExecutionPlan, FetchError, SessionRecord, Snapshot, SqlDocument, SqlSource,
    };
    use crate::ui::Theme;

    #[derive(Debug)]
    struct NoSource;

    #[async_trait]
    impl SqlSource for NoSource {
        async fn fetch(&self, _sql_id: &str) -> Result<SqlDocument, FetchError> {
            Err(FetchError::Timeout)
        }

        fn description(&self) -> &str {
            "none"
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(doc: Option<SqlDocument>) -> App {
        let mut app = App::new(Arc::new(NoSource), "g4y6nw3tts7cc", Theme::dark());
        app.detail = doc.map(|d| SqlDetail::assemble("g4y6nw3tts7cc", d));
        app
    }

    #[test]
    fn test_render_without_data() {
        let app = app_with(None);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, frame.area())).unwrap();
        assert!(screen_text(&terminal).contains("No data"));
    }

    #[test]
    fn test_render_detail() {
        let doc = SqlDocument {
            full_text: None,
            execution_plans: vec![ExecutionPlan {
                plan_hash_value: Some(272002086),
                executions: Some(2),
                elapsed_time: 100.0,
                cpu_time: 50.0,
                user_io_wait_time: 20.0,
                ..Default::default()
            }],
            top_sessions: vec![SessionRecord {
                sid: Some("131".to_string()),
                serial_number: Some("4021".to_string()),
                username: Some("SCOTT".to_string()),
                activity: 4.0,
                percentage_total_activity: 100.0,
                activity_by_event: [("CPU".to_string(), 4.0)].into_iter().collect(),
                ..Default::default()
            }],
            keys: vec!["CPU".to_string()],
            ..Default::default()
        };

        let app = app_with(Some(doc));
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, frame.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Not Available"));
        assert!(text.contains("272002086"));
        assert!(text.contains("Execution Plans (1)"));
        assert!(text.contains("Top Sessions (1)"));
        assert!(text.contains("131,4021"));
        assert!(text.contains("SCOTT"));
        assert!(text.contains("Remaining Waits"));
    }

    #[test]
    fn test_render_event_trends() {
        let snapshot = |timestamp: i64, cpu: f64| Snapshot {
            timestamp,
            values: [("CPU".to_string(), cpu), ("enq: TX".to_string(), 0.5)].into_iter().collect(),
        };
        let doc = SqlDocument {
            keys: vec!["CPU".to_string(), "enq: TX".to_string(), "idle".to_string()],
            snapshots: vec![snapshot(1_000, 0.0), snapshot(2_000, 1.0), snapshot(3_000, 2.0)],
            ..Default::default()
        };

        let app = app_with(Some(doc));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, frame.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Activity by Event (3 samples)"));
        assert!(text.contains("▁▅█"));
        assert!(text.contains("peak 2.00"));
        assert!(text.contains("enq: TX"));
        assert!(!text.contains(" idle"));
    }

    #[test]
    fn test_render_without_snapshots_has_no_trend_panel() {
        let app = app_with(Some(SqlDocument::default()));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, frame.area())).unwrap();
        assert!(!screen_text(&terminal).contains("Activity by Event"));
    }

    #[test]
    fn test_render_empty_sessions() {
        let doc = SqlDocument::default();
        let app = app_with(Some(doc));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, frame.area())).unwrap();
        assert!(screen_text(&terminal).contains("No session activity"));
    }
}
