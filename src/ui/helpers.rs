use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
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

/// Pad or truncate text into a fixed-width column so the ledger rows line up
/// without pulling in a table widget. Width is counted in characters, which
/// is close enough for the terminal fonts this runs under.
pub(crate) fn fixed_width(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    let used = cell.chars().count();
    if used < width {
        cell.push_str(&" ".repeat(width - used));
    }
    cell
}

/// Right-align a numeric column the same way.
pub(crate) fn fixed_width_right(text: &str, width: usize) -> String {
    let cell: String = text.chars().take(width).collect();
    let used = cell.chars().count();
    if used < width {
        format!("{}{}", " ".repeat(width - used), cell)
    } else {
        cell
    }
}
