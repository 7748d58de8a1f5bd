//! The assembled SQL detail view-model.

use serde::Serialize;
use serde_json::{Map, Value};

use super::plan::PlanDetail;
use super::series::CategorySeries;
use super::session::{normalize_sessions, SessionDetail};
use super::timeline::{event_trends, EventTrend};
use crate::source::{Snapshot, SqlDocument};

/// Statement text shown when the server has none.
pub const TEXT_NOT_AVAILABLE: &str = "Not Available";

/// A fully annotated SQL detail document, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlDetail {
    pub sql_id: String,
    pub full_text: String,
    pub execution_plans: Vec<PlanDetail>,
    pub top_sessions: Vec<SessionDetail>,
    pub keys: Vec<String>,
    /// Legend for the session bars, built from `keys`.
    pub series: CategorySeries,
    /// Activity samples, oldest first.
    pub snapshots: Vec<Snapshot>,
    /// Per-event view of `snapshots`, in series order.
    #[serde(skip)]
    pub trends: Vec<EventTrend>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SqlDetail {
    /// Normalize a fetched document.
    pub fn assemble(sql_id: &str, doc: SqlDocument) -> Self {
        let full_text = doc
            .full_text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| TEXT_NOT_AVAILABLE.to_string());

        let execution_plans = doc.execution_plans.into_iter().map(PlanDetail::from_plan).collect();

        let series = CategorySeries::from_keys(&doc.keys);
        let top_sessions = normalize_sessions(doc.top_sessions, &series);

        let mut snapshots = doc.snapshots;
        snapshots.sort_by_key(|s| s.timestamp);
        let trends = event_trends(&series, &snapshots);

        // Fields owned by the view-model win over pass-through copies.
        let mut extra = doc.extra;
        for key in ["sqlId", "series"] {
            extra.remove(key);
        }

        Self {
            sql_id: sql_id.to_string(),
            full_text,
            execution_plans,
            top_sessions,
            keys: doc.keys,
            series,
            snapshots,
            trends,
            extra,
        }
    }

    /// Pretty JSON for export.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
