use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Repeat a short ASCII motif until it fills the requested width.
pub(crate) fn repeat_pattern_row(row: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if row.is_empty() {
        return " ".repeat(width);
    }
    let repeat_count = width / row.len() + 2;
    let mut repeated = row.repeat(repeat_count);
    repeated.truncate(width);
    repeated
}

/// Overlay the duration badge onto the right end of a pattern row, the way a
/// duration badge sits on a video thumbnail.
pub(crate) fn badge_row(base: &str, duration: &str, width: usize) -> String {
    let mut row: Vec<char> = repeat_pattern_row(base, width).chars().collect();
    let badge: Vec<char> = format!(" {} ", duration.trim()).chars().collect();
    if badge.len() <= row.len() {
        let start = row.len() - badge.len();
        row[start..].copy_from_slice(&badge);
    }
    row.into_iter().collect()
}

/// Build the textual stand-in for a video thumbnail: a repeating texture with
/// the duration badge on the bottom row. The terminal cannot decode frames,
/// so the texture fills the same visual slot the unplayed video element does.
pub(crate) fn thumbnail_lines(
    pattern: &[&str],
    duration: &str,
    inner_width: u16,
    rows: u16,
    selected: bool,
) -> Vec<Line<'static>> {
    let width = inner_width as usize;
    let height = rows as usize;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let pattern_style = if selected {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let badge_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(height);
    let pattern_rows = pattern.len().max(1);
    for row_idx in 0..height.saturating_sub(1) {
        let base = pattern.get(row_idx % pattern_rows).copied().unwrap_or("");
        lines.push(Line::from(Span::styled(
            repeat_pattern_row(base, width),
            pattern_style,
        )));
    }

    let base = pattern
        .get(height.saturating_sub(1) % pattern_rows)
        .copied()
        .unwrap_or("");
    let last = badge_row(base, duration, width);
    let badge_chars = duration.trim().chars().count() + 2;
    if badge_chars <= width {
        let split_at: usize = last
            .chars()
            .count()
            .saturating_sub(badge_chars);
        let prefix: String = last.chars().take(split_at).collect();
        let badge: String = last.chars().skip(split_at).collect();
        lines.push(Line::from(vec![
            Span::styled(prefix, pattern_style),
            Span::styled(badge, badge_style),
        ]));
    } else {
        lines.push(Line::from(Span::styled(last, pattern_style)));
    }

    lines
}

/// Produce a rectangle centered within `area` that spans the requested
/// percent of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_rows_fill_the_requested_width() {
        assert_eq!(repeat_pattern_row("ab", 5), "ababa");
        assert_eq!(repeat_pattern_row("", 3), "   ");
        assert_eq!(repeat_pattern_row("ab", 0), "");
    }

    #[test]
    fn badge_sits_at_the_right_edge() {
        let row = badge_row("..", "12:34", 12);
        assert_eq!(row.chars().count(), 12);
        assert!(row.ends_with(" 12:34 "));
    }

    #[test]
    fn badge_wider_than_the_row_is_dropped() {
        let row = badge_row("..", "999:59:59", 4);
        assert_eq!(row, "....");
    }

    #[test]
    fn thumbnail_has_exactly_the_requested_rows() {
        let lines = thumbnail_lines(&["/\\", "\\/"], "0:30", 10, 4, false);
        assert_eq!(lines.len(), 4);
    }
}
