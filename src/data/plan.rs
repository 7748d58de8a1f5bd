//! Execution plan normalization.
//!
//! Turns a raw [`ExecutionPlan`] into a [`PlanDetail`] carrying the derived
//! remaining-waits time and the wait-class activity bar.

use serde::Serialize;

use super::activity::{build_bar, ActivitySegment};
use super::series::WaitClass;
use crate::source::ExecutionPlan;

/// An execution plan annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    #[serde(flatten)]
    pub plan: ExecutionPlan,
    /// Elapsed time not covered by the named wait classes. Never negative.
    #[serde(serialize_with = "crate::source::number")]
    pub remaining_waits_time: f64,
    pub activity_bar: Vec<ActivitySegment>,
}

impl PlanDetail {
    /// Normalize a plan.
    ///
    /// The bar is scaled against `max(elapsed, sum of named waits)`, so a
    /// plan whose waits overshoot its elapsed time still fits in 100%.
    pub fn from_plan(mut plan: ExecutionPlan) -> Self {
        // A re-loaded export already carries these; they are recomputed here.
        for key in ["remainingWaitsTime", "activityBar"] {
            plan.extra.remove(key);
        }

        let sum = plan.named_waits();
        let remaining_waits_time = (plan.elapsed_time - sum).max(0.0);
        let total = plan.elapsed_time.max(sum);

        let activity_bar = build_bar(
            WaitClass::ALL
                .iter()
                .map(|w| (w.label(), w.color(), w.value(&plan, remaining_waits_time))),
            total,
        );

        Self {
            plan,
            remaining_waits_time,
            activity_bar,
        }
    }

    /// Sum of the bar's segment widths.
    pub fn bar_total(&self) -> u32 {
        self.activity_bar.iter().map(|s| s.fraction_percent as u32).sum()
    }
}
