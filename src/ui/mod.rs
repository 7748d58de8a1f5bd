//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`sql`]: The SQL detail view (statement text, plans, top sessions)
//! - [`bar`]: Activity bars drawn as colored block characters
//! - [`common`]: Shared components (header, status bar, legend, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ SQL Text                             │
//! ├──────────────────────────────────────┤
//! │ Execution Plans      ████████▒▒▒▒    │
//! │ legend                               │
//! ├──────────────────────────────────────┤
//! │ Top Sessions         ██████▒▒        │
//! │ legend                               │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod bar;
pub mod common;
pub mod sql;
pub mod theme;

pub use theme::Theme;
