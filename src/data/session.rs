//! Top-session normalization.
//!
//! Each session's bar is scaled against the activity of the top session
//! (the first in the list), so the busiest session spans the full width
//! and the others show their activity relative to it.

use serde::Serialize;

use super::activity::{build_bar, ActivitySegment};
use super::format::fixed_percentage;
use super::series::CategorySeries;
use crate::source::SessionRecord;

/// A session annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: SessionRecord,
    /// `percentage_total_activity` rounded to a whole number.
    pub percentage_fixed: String,
    pub activity_bar: Vec<ActivitySegment>,
}

impl SessionDetail {
    fn annotate(mut session: SessionRecord, series: &CategorySeries, top_activity: f64) -> Self {
        // A re-loaded export already carries these; they are recomputed here.
        for key in ["percentageFixed", "activityBar"] {
            session.extra.remove(key);
        }

        let activity_bar = build_bar(
            series.iter().map(|c| {
                (
                    c.label.as_str(),
                    c.color.as_str(),
                    session.event_activity(&c.label),
                )
            }),
            top_activity,
        );

        Self {
            percentage_fixed: fixed_percentage(session.percentage_total_activity),
            activity_bar,
            session,
        }
    }

    /// Display label, e.g. `"131,4021"`.
    pub fn session_id(&self) -> String {
        match (&self.session.sid, &self.session.serial_number) {
            (Some(sid), Some(serial)) => format!("{},{}", sid, serial),
            (Some(sid), None) => sid.clone(),
            _ => "-".to_string(),
        }
    }
}

/// Activity of the top-ranked session, or `None` for an empty list.
pub fn top_activity(sessions: &[SessionRecord]) -> Option<f64> {
    sessions.first().map(|s| s.activity)
}

/// Annotate sessions in input order.
///
/// Sessions are expected to arrive sorted by activity, highest first; they
/// are not re-sorted here.
pub fn normalize_sessions(
    sessions: Vec<SessionRecord>,
    series: &CategorySeries,
) -> Vec<SessionDetail> {
    let Some(top) = top_activity(&sessions) else {
        return Vec::new();
    };

    sessions
        .into_iter()
        .map(|s| SessionDetail::annotate(s, series, top))
        .collect()
}
