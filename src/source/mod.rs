//! Data source abstraction for fetching SQL detail documents.
//!
//! The backend monitor serves one JSON document per SQL statement. This
//! module provides a trait-based abstraction over where that document comes
//! from: the monitor's web service, or documents saved on disk.

mod document;
mod error;
mod file;
mod http;

pub(crate) use document::number;
pub use document::{ExecutionPlan, SessionRecord, Snapshot, SqlDocument};
pub use error::FetchError;
pub use file::FileSource;
pub use http::{HttpSource, HttpSourceBuilder, DEFAULT_ENDPOINT};

use std::fmt::Debug;

use async_trait::async_trait;

/// Trait for fetching SQL detail documents from various backends.
///
/// Sources are shared with the background fetch task, so they must be
/// `Send + Sync`.
///
/// # Example
///
/// ```no_run
/// use oraman_tui::{FileSource, SqlSource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("captures");
/// let doc = source.fetch("g4y6nw3tts7cc").await.unwrap();
/// println!("{} plans", doc.execution_plans.len());
/// # });
/// ```
#[async_trait]
pub trait SqlSource: Send + Sync + Debug {
    /// Fetch the detail document for `sql_id`.
    ///
    /// The id is used verbatim; sources do not validate or escape it.
    async fn fetch(&self, sql_id: &str) -> Result<SqlDocument, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
