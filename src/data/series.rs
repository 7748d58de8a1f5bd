//! Chart categories and their colors.
//!
//! The plan view uses a fixed set of wait classes ([`WaitClass`]). The
//! top-sessions view builds its [`CategorySeries`] per response from the
//! event names the server reports, coloring each one from [`PALETTE`].

use serde::Serialize;

use crate::source::ExecutionPlan;

/// Categorical palette for dynamically discovered events.
///
/// Colors are assigned by position and reused cyclically past the end.
pub const PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Color for the category at `index` in encounter order.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Time categories of an execution plan, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitClass {
    Cpu,
    UserIo,
    Concurrency,
    Application,
    Cluster,
    RemainingWaits,
}

impl WaitClass {
    /// All wait classes in display order.
    pub const ALL: [WaitClass; 6] = [
        WaitClass::Cpu,
        WaitClass::UserIo,
        WaitClass::Concurrency,
        WaitClass::Application,
        WaitClass::Cluster,
        WaitClass::RemainingWaits,
    ];

    /// Legend label.
    pub fn label(&self) -> &'static str {
        match self {
            WaitClass::Cpu => "CPU",
            WaitClass::UserIo => "User I/O",
            WaitClass::Concurrency => "Concurrency",
            WaitClass::Application => "Application",
            WaitClass::Cluster => "Cluster",
            WaitClass::RemainingWaits => "Remaining Waits",
        }
    }

    /// Fixed color token.
    pub fn color(&self) -> &'static str {
        match self {
            WaitClass::Cpu => "#04ce04",
            WaitClass::UserIo => "#044ae4",
            WaitClass::Concurrency => "#8b1a04",
            WaitClass::Application => "#bd2b06",
            WaitClass::Cluster => "#cec4a7",
            WaitClass::RemainingWaits => "#e46a04",
        }
    }

    /// Time spent in this class. `remaining` is the derived remaining-waits
    /// value, which the raw plan does not carry.
    pub fn value(&self, plan: &ExecutionPlan, remaining: f64) -> f64 {
        match self {
            WaitClass::Cpu => plan.cpu_time,
            WaitClass::UserIo => plan.user_io_wait_time,
            WaitClass::Concurrency => plan.concurrency_wait_time,
            WaitClass::Application => plan.application_wait_time,
            WaitClass::Cluster => plan.cluster_wait_time,
            WaitClass::RemainingWaits => remaining,
        }
    }
}

/// A labelled, colored chart category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: String,
    pub color: String,
}

/// Ordered categories for a chart legend.
///
/// Order is the order keys were encountered, which fixes both the segment
/// order within each bar and the color each key receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategorySeries {
    categories: Vec<Category>,
}

impl CategorySeries {
    /// Build a series from server-provided keys, coloring by position.
    ///
    /// A key repeated later in the list keeps its first position and color.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut categories: Vec<Category> = Vec::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            if categories.iter().any(|c| c.label == key) {
                continue;
            }
            let color = palette_color(categories.len());
            categories.push(Category {
                label: key.to_string(),
                color: color.to_string(),
            });
        }
        Self { categories }
    }

    /// The fixed plan series.
    pub fn wait_classes() -> Self {
        Self {
            categories: WaitClass::ALL
                .iter()
                .map(|w| Category {
                    label: w.label().to_string(),
                    color: w.color().to_string(),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Color assigned to `label`, if it is part of the series.
    pub fn color_of(&self, label: &str) -> Option<&str> {
        self.categories.iter().find(|c| c.label == label).map(|c| c.color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), "#1f77b4");
        assert_eq!(palette_color(19), "#9edae5");
        assert_eq!(palette_color(20), palette_color(0));
        assert_eq!(palette_color(45), palette_color(5));
    }

    #[test]
    fn test_series_from_keys_keeps_order() {
        let series = CategorySeries::from_keys(&["db file sequential read", "CPU", "log file sync"]);
        let labels: Vec<&str> = series.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["db file sequential read", "CPU", "log file sync"]);
        assert_eq!(series.color_of("db file sequential read"), Some(PALETTE[0]));
        assert_eq!(series.color_of("CPU"), Some(PALETTE[1]));
        assert_eq!(series.color_of("log file sync"), Some(PALETTE[2]));
        assert_eq!(series.color_of("missing"), None);
    }

    #[test]
    fn test_series_from_keys_ignores_duplicates() {
        let series = CategorySeries::from_keys(&["a", "b", "a", "c"]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.color_of("c"), Some(PALETTE[2]));
    }

    #[test]
    fn test_series_reuses_palette_past_twenty() {
        let keys: Vec<String> = (0..22).map(|i| format!("event-{}", i)).collect();
        let series = CategorySeries::from_keys(&keys);
        assert_eq!(series.color_of("event-20"), Some(PALETTE[0]));
        assert_eq!(series.color_of("event-21"), Some(PALETTE[1]));
    }

    #[test]
    fn test_wait_class_series() {
        let series = CategorySeries::wait_classes();
        assert_eq!(series.len(), 6);
        assert_eq!(series.color_of("CPU"), Some("#04ce04"));
        assert_eq!(series.color_of("Remaining Waits"), Some("#e46a04"));

        let plan = ExecutionPlan {
            user_io_wait_time: 20.0,
            ..Default::default()
        };
        assert_eq!(WaitClass::UserIo.value(&plan, 7.0), 20.0);
        assert_eq!(WaitClass::RemainingWaits.value(&plan, 7.0), 7.0);
    }
}
