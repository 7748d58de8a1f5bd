//! Activity bar segments.
//!
//! An activity bar is a horizontal stack of segments, one per category,
//! each as wide as that category's share of a total. Both the plan view
//! and the top-sessions view build their bars through [`build_bar`].

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One colored segment of an activity bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySegment {
    /// Category label (e.g. "CPU", "User I/O", or a wait event name).
    pub label: String,
    /// Width of the segment in percent, always in `1..=100`.
    pub fraction_percent: u8,
    /// Color token in `#rrggbb` form.
    pub color: String,
}

impl ActivitySegment {
    /// The CSS-style width string, e.g. `"50%"`.
    pub fn width(&self) -> String {
        format!("{}%", self.fraction_percent)
    }
}

/// Exported as `{title, style: {width, background-color}}`, the shape the
/// dashboard templates bind to.
impl Serialize for ActivitySegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut segment = serializer.serialize_struct("ActivitySegment", 2)?;
        segment.serialize_field("title", &self.label)?;
        segment.serialize_field("style", &SegmentStyle(self))?;
        segment.end()
    }
}

struct SegmentStyle<'a>(&'a ActivitySegment);

impl Serialize for SegmentStyle<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut style = serializer.serialize_struct("SegmentStyle", 2)?;
        style.serialize_field("width", &self.0.width())?;
        style.serialize_field("background-color", &self.0.color)?;
        style.end()
    }
}

/// Compute `floor(value * 100 / total)` as a percentage.
///
/// A non-positive (or NaN) total yields 0 rather than a division fault.
/// Results are clamped to 100.
pub fn segment_width(value: f64, total: f64) -> u8 {
    if !(total > 0.0) {
        return 0;
    }
    let width = (value * 100.0 / total).floor();
    if width.is_nan() || width <= 0.0 {
        0
    } else {
        width.min(100.0) as u8
    }
}

/// Build an activity bar from `(label, color, value)` triples, in order.
///
/// Categories whose width truncates to zero are left out, so the result
/// never contains a zero-width segment. Widths are floored independently
/// and may sum to less than 100.
pub fn build_bar<'a, I>(categories: I, total: f64) -> Vec<ActivitySegment>
where
    I: IntoIterator<Item = (&'a str, &'a str, f64)>,
{
    categories
        .into_iter()
        .filter_map(|(label, color, value)| {
            let width = segment_width(value, total);
            (width > 0).then(|| ActivitySegment {
                label: label.to_string(),
                fraction_percent: width,
                color: color.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_width_floors() {
        assert_eq!(segment_width(50.0, 100.0), 50);
        assert_eq!(segment_width(1.0, 3.0), 33);
        assert_eq!(segment_width(2.0, 3.0), 66);
        assert_eq!(segment_width(0.9, 100.0), 0);
    }

    #[test]
    fn test_segment_width_degenerate_total() {
        assert_eq!(segment_width(10.0, 0.0), 0);
        assert_eq!(segment_width(10.0, -5.0), 0);
        assert_eq!(segment_width(10.0, f64::NAN), 0);
        assert_eq!(segment_width(f64::NAN, 10.0), 0);
    }

    #[test]
    fn test_segment_width_clamps() {
        assert_eq!(segment_width(300.0, 100.0), 100);
        assert_eq!(segment_width(-30.0, 100.0), 0);
    }

    #[test]
    fn test_build_bar_skips_zero_width() {
        let bar = build_bar(
            [
                ("A", "#000001", 1.0),
                ("B", "#000002", 0.0),
                ("C", "#000003", 2.0),
            ],
            3.0,
        );
        assert_eq!(bar.len(), 2);
        assert_eq!(bar[0].label, "A");
        assert_eq!(bar[0].fraction_percent, 33);
        assert_eq!(bar[1].label, "C");
        assert_eq!(bar[1].fraction_percent, 66);
        assert!(bar.iter().map(|s| s.fraction_percent as u32).sum::<u32>() <= 100);
    }

    #[test]
    fn test_segment_serializes_as_style() {
        let segment = ActivitySegment {
            label: "CPU".to_string(),
            fraction_percent: 50,
            color: "#04ce04".to_string(),
        };
        let value = serde_json::to_value(&segment).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "CPU",
                "style": { "width": "50%", "background-color": "#04ce04" }
            })
        );
    }
}
