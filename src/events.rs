use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// File the `e` key exports to.
pub fn export_path(sql_id: &str) -> PathBuf {
    PathBuf::from(format!("sql_{}.json", sql_id))
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Switch between plans and sessions
        KeyCode::Tab | KeyCode::BackTab => app.next_pane(),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Reload
        KeyCode::Char('r') => app.activate(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let path = export_path(app.sql_id());
            match app.export_state(&path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::app::Pane;
    use crate::source::{FetchError, SqlDocument, SqlSource};
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

    fn app() -> App {
        App::new(Arc::new(NoSource), "abc", Theme::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_export_path() {
        assert_eq!(export_path("g4y6nw3tts7cc"), PathBuf::from("sql_g4y6nw3tts7cc.json"));
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_tab_switches_pane() {
        let mut app = app();
        assert_eq!(app.focus, Pane::Plans);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Pane::Sessions);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Pane::Plans);
    }

    #[test]
    fn test_export_without_data_sets_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        let message = app.get_status_message().unwrap();
        assert!(message.starts_with("Export failed"));
    }

    #[tokio::test]
    async fn test_reload_key_issues_fetch() {
        let mut app = app();
        assert!(!app.is_loading());
        press(&mut app, KeyCode::Char('r'));
        assert!(app.is_loading());
        app.teardown();
    }
}
