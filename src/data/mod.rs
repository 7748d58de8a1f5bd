//! Data shaping for the SQL detail view.
//!
//! This module turns a raw [`SqlDocument`](crate::source::SqlDocument) into
//! display-ready data: wait-time activity bars for each execution plan and
//! relative activity bars for each top session.
//!
//! ## Submodules
//!
//! - [`activity`]: Activity bar segments and the shared width computation
//! - [`series`]: Wait classes, runtime-built event series, and the palette
//! - [`plan`]: Execution plan normalization ([`PlanDetail`])
//! - [`session`]: Top-session normalization ([`SessionDetail`])
//! - [`timeline`]: Per-event activity over time ([`EventTrend`])
//! - [`detail`]: The assembled view-model ([`SqlDetail`])
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "10s", "500ms")
//! - [`format`]: Number formatting used by the views
//!
//! ## Data Flow
//!
//! ```text
//! SqlDocument (raw JSON)
//!        │
//!        ▼
//! SqlDetail::assemble()
//!        │
//!        ├──▶ PlanDetail::from_plan()        (fixed wait-class series)
//!        │
//!        └──▶ CategorySeries::from_keys()
//!                    │
//!                    ├──▶ normalize_sessions()   (scaled to the top session)
//!                    │
//!                    └──▶ event_trends()         (snapshots per event)
//! ```

pub mod activity;
pub mod detail;
pub mod duration;
pub mod format;
pub mod plan;
pub mod series;
pub mod session;
pub mod timeline;

pub use activity::ActivitySegment;
pub use detail::{SqlDetail, TEXT_NOT_AVAILABLE};
pub use plan::PlanDetail;
pub use series::{Category, CategorySeries, WaitClass, PALETTE};
pub use session::{normalize_sessions, SessionDetail};
pub use timeline::{event_trends, EventTrend};
