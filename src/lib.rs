//! # oraman-tui
//!
//! A terminal view of the SQL detail page of an Oracle performance monitor.
//!
//! For one statement (identified by its SQL id) the crate fetches the
//! detail document the monitor serves at `ws/sql/{sqlId}`, annotates every
//! execution plan with a wait-class activity bar and every top session with
//! a wait-event activity bar, charts the statement's activity per wait event
//! over time, and renders the result in an interactive terminal UI or
//! exports it as JSON.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(normalize)    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource                     │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, the fetch lifecycle (activate, poll,
//!   teardown) and user interaction logic
//! - **[`source`]**: Document source abstraction ([`SqlSource`] trait) with
//!   implementations for the monitor's web service and a directory of saved
//!   documents
//! - **[`data`]**: Normalizers that turn a raw [`SqlDocument`] into an
//!   annotated [`SqlDetail`]
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration (defaults, file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Show a statement from the monitor's web service
//! oraman g4y6nw3tts7cc --endpoint http://dbmon:8080/oraman
//!
//! # Show a saved document from captures/g4y6nw3tts7cc.json
//! oraman g4y6nw3tts7cc --dir captures
//!
//! # Fetch once and write the annotated document
//! oraman g4y6nw3tts7cc --export detail.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use oraman_tui::{load_detail, HttpSource};
//!
//! # tokio_test::block_on(async {
//! let source = HttpSource::builder()
//!     .endpoint("http://dbmon:8080/oraman")
//!     .build()
//!     .unwrap();
//! let detail = load_detail(&source, "g4y6nw3tts7cc").await.unwrap();
//! for plan in &detail.execution_plans {
//!     for segment in &plan.activity_bar {
//!         println!("{} {}", segment.label, segment.width());
//!     }
//! }
//! # });
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for library users
pub use app::{load_detail, App, Pane};
pub use data::{
    ActivitySegment, CategorySeries, EventTrend, PlanDetail, SessionDetail, SqlDetail, WaitClass,
};
pub use settings::Settings;
pub use source::{
    ExecutionPlan, FetchError, FileSource, HttpSource, SessionRecord, Snapshot, SqlDocument,
    SqlSource,
};
pub use ui::Theme;
