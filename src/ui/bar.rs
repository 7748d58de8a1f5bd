//! Activity bar and sparkline rendering.
//!
//! Draws an activity bar as a row of block characters, each segment in its
//! category color and as many cells wide as its share of the bar. Trends
//! over time are drawn as sparklines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::theme::token_color;
use crate::data::ActivitySegment;

const BAR_CHAR: &str = "█";

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of cells a segment occupies in a bar `width` cells wide.
pub fn segment_cells(segment: &ActivitySegment, width: u16) -> u16 {
    (segment.fraction_percent as u32 * width as u32 / 100) as u16
}

/// Render segments into a line at most `width` cells wide.
///
/// Cells left over by truncation stay blank, so the bar reads as
/// "less than 100%" the same way the percentages do.
pub fn render_bar(segments: &[ActivitySegment], width: u16) -> Line<'static> {
    let mut used = 0u16;
    let mut spans = Vec::with_capacity(segments.len());

    for segment in segments {
        let cells = segment_cells(segment, width).min(width - used);
        if cells == 0 {
            continue;
        }
        used += cells;
        spans.push(Span::styled(
            BAR_CHAR.repeat(cells as usize),
            Style::default().fg(token_color(&segment.color)),
        ));
    }

    Line::from(spans)
}

/// Render the most recent `width` levels as sparkline characters.
pub fn sparkline(levels: &[u8], width: usize) -> String {
    let skip = levels.len().saturating_sub(width);
    levels[skip..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[(v as usize).min(SPARKLINE_CHARS.len() - 1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(percent: u8, color: &str) -> ActivitySegment {
        ActivitySegment {
            label: "x".to_string(),
            fraction_percent: percent,
            color: color.to_string(),
        }
    }

    #[test]
    fn test_segment_cells() {
        assert_eq!(segment_cells(&segment(50, "#000000"), 20), 10);
        assert_eq!(segment_cells(&segment(33, "#000000"), 20), 6);
        assert_eq!(segment_cells(&segment(100, "#000000"), 30), 30);
        assert_eq!(segment_cells(&segment(4, "#000000"), 20), 0);
    }

    #[test]
    fn test_render_bar_widths() {
        let segments = [
            segment(50, "#04ce04"),
            segment(20, "#044ae4"),
            segment(30, "#e46a04"),
        ];
        let line = render_bar(&segments, 20);
        let widths: Vec<usize> = line.spans.iter().map(|s| s.content.chars().count()).collect();
        assert_eq!(widths, vec![10, 4, 6]);
        assert_eq!(line.spans[0].style.fg, Some(token_color("#04ce04")));
    }

    #[test]
    fn test_render_bar_skips_sub_cell_segments() {
        let line = render_bar(&[segment(2, "#04ce04"), segment(50, "#044ae4")], 20);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.width(), 10);
    }

    #[test]
    fn test_render_bar_never_overflows() {
        let line = render_bar(&[segment(100, "#04ce04"), segment(100, "#044ae4")], 10);
        assert_eq!(line.width(), 10);
    }

    #[test]
    fn test_render_empty_bar() {
        assert_eq!(render_bar(&[], 20).width(), 0);
    }

    #[test]
    fn test_sparkline_keeps_latest() {
        assert_eq!(sparkline(&[0, 3, 7], 8), "▁▄█");
        assert_eq!(sparkline(&[0, 1, 2, 3, 4, 5, 6, 7, 7, 9], 4), "▇███");
        assert_eq!(sparkline(&[], 4), "");
        assert_eq!(sparkline(&[7], 0), "");
    }
}
