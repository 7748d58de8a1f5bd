//! Application state and the SQL detail assembler.
//!
//! Each activation issues exactly one fetch for the current statement. The
//! fetch runs as a background task; [`App::poll`] picks up its result on a
//! later turn of the UI loop, normalizes it, and publishes the view-model.
//! Re-activating or tearing down the view aborts the in-flight fetch, so a
//! stale response is never published.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::data::SqlDetail;
use crate::source::{FetchError, SqlDocument, SqlSource};
use crate::ui::Theme;

/// The table that has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Execution plans with their wait-class bars.
    #[default]
    Plans,
    /// Top sessions with their wait-event bars.
    Sessions,
}

impl Pane {
    /// Cycle to the other pane.
    pub fn next(self) -> Self {
        match self {
            Pane::Plans => Pane::Sessions,
            Pane::Sessions => Pane::Plans,
        }
    }

    /// Returns the display label for this pane.
    pub fn label(&self) -> &'static str {
        match self {
            Pane::Plans => "Plans",
            Pane::Sessions => "Sessions",
        }
    }
}

/// A fetch that has been issued but not yet picked up.
///
/// Dropping it aborts the task, which is how a torn-down or re-activated
/// view cancels its request.
struct PendingFetch {
    sql_id: String,
    started: Instant,
    receiver: oneshot::Receiver<Result<SqlDocument, FetchError>>,
    task: JoinHandle<()>,
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetch and assemble a statement's detail in one step.
///
/// Used by the non-interactive export mode.
pub async fn load_detail(source: &dyn SqlSource, sql_id: &str) -> Result<SqlDetail, FetchError> {
    let doc = source.fetch(sql_id).await?;
    Ok(SqlDetail::assemble(sql_id, doc))
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub focus: Pane,

    // Data source
    source: Arc<dyn SqlSource>,
    sql_id: String,
    pending: Option<PendingFetch>,
    pub detail: Option<SqlDetail>,
    pub last_updated: Option<Instant>,
    pub last_latency: Option<Duration>,

    // Navigation state
    pub selected_plan_index: usize,
    pub selected_session_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App for `sql_id`. No fetch is issued until
    /// [`activate`](Self::activate) is called.
    pub fn new(source: Arc<dyn SqlSource>, sql_id: impl Into<String>, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            focus: Pane::default(),
            source,
            sql_id: sql_id.into(),
            pending: None,
            detail: None,
            last_updated: None,
            last_latency: None,
            selected_plan_index: 0,
            selected_session_index: 0,
            theme,
            status_message: None,
        }
    }

    /// The statement this view shows.
    pub fn sql_id(&self) -> &str {
        &self.sql_id
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Issue the fetch for the current statement.
    ///
    /// Must be called from within a tokio runtime. Any fetch still in
    /// flight is cancelled first. The current view-model is kept until the
    /// new document arrives.
    pub fn activate(&mut self) {
        self.pending = None;

        let (tx, receiver) = oneshot::channel();
        let source = Arc::clone(&self.source);
        let sql_id = self.sql_id.clone();

        let task = tokio::spawn(async move {
            let result = source.fetch(&sql_id).await;
            // Receiver dropped: the view is gone, nothing to deliver.
            let _ = tx.send(result);
        });

        self.pending = Some(PendingFetch {
            sql_id: self.sql_id.clone(),
            started: Instant::now(),
            receiver,
            task,
        });
    }

    /// Switch to another statement and fetch it.
    ///
    /// The previous statement's view-model is discarded.
    pub fn navigate(&mut self, sql_id: impl Into<String>) {
        self.sql_id = sql_id.into();
        self.detail = None;
        self.last_updated = None;
        self.selected_plan_index = 0;
        self.selected_session_index = 0;
        self.activate();
    }

    /// Tear down the view: cancel any in-flight fetch.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            info!(sql_id = %pending.sql_id, "cancelling in-flight fetch");
        }
    }

    /// Pick up a completed fetch, if any.
    ///
    /// Returns `true` if a new view-model was published. A failed fetch
    /// leaves the current view-model untouched.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => {
                // Task ended without sending (aborted or panicked).
                self.pending = None;
                return false;
            }
        };

        let Some(pending) = self.pending.take() else {
            return false;
        };

        if pending.sql_id != self.sql_id {
            return false;
        }

        match result {
            Ok(doc) => {
                let detail = SqlDetail::assemble(&pending.sql_id, doc);
                info!(
                    sql_id = %pending.sql_id,
                    plans = detail.execution_plans.len(),
                    sessions = detail.top_sessions.len(),
                    "published sql detail"
                );
                self.publish(detail);
                self.last_latency = Some(pending.started.elapsed());
                true
            }
            Err(e) => {
                warn!(sql_id = %pending.sql_id, error = %e, "fetch failed");
                false
            }
        }
    }

    fn publish(&mut self, detail: SqlDetail) {
        self.selected_plan_index =
            clamp_index(self.selected_plan_index, detail.execution_plans.len());
        self.selected_session_index =
            clamp_index(self.selected_session_index, detail.top_sessions.len());
        self.detail = Some(detail);
        self.last_updated = Some(Instant::now());
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Move keyboard focus to the other table.
    pub fn next_pane(&mut self) {
        self.focus = self.focus.next();
    }

    fn focused_len(&self) -> usize {
        let Some(ref detail) = self.detail else {
            return 0;
        };
        match self.focus {
            Pane::Plans => detail.execution_plans.len(),
            Pane::Sessions => detail.top_sessions.len(),
        }
    }

    fn focused_index_mut(&mut self) -> &mut usize {
        match self.focus {
            Pane::Plans => &mut self.selected_plan_index,
            Pane::Sessions => &mut self.selected_session_index,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.focused_len().saturating_sub(1);
        let index = self.focused_index_mut();
        *index = (*index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        let index = self.focused_index_mut();
        *index = index.saturating_sub(n);
    }

    /// Jump to the first item in the focused table.
    pub fn select_first(&mut self) {
        *self.focused_index_mut() = 0;
    }

    /// Jump to the last item in the focused table.
    pub fn select_last(&mut self) {
        let last = self.focused_len().saturating_sub(1);
        *self.focused_index_mut() = last;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.teardown();
        self.running = false;
    }

    /// Export the current view-model to a JSON file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(ref detail) = self.detail else {
            anyhow::bail!("No data to export");
        };
        std::fs::write(path, detail.to_json()?)?;
        Ok(())
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
