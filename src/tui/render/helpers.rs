use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::model::{Priority, TaskStatus};
use crate::ops::filter::Choice;
use crate::util::unicode;

pub use crate::util::format::{format_currency, format_date, format_days_left, team_summary};

/// Checkbox-style symbol for a task status
pub(super) fn task_symbol(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[>]",
        TaskStatus::Completed => "[x]",
    }
}

/// Upper-case badge text, e.g. `HIGH`
pub(super) fn priority_badge(priority: Priority) -> String {
    priority.as_str().to_uppercase()
}

/// Selector label: `All` or the value's label
pub(super) fn choice_label<T: Copy>(choice: Choice<T>, label: impl Fn(T) -> &'static str) -> &'static str {
    match choice {
        Choice::All => "All",
        Choice::Only(v) => label(v),
    }
}

/// Filled and empty halves of a `width`-cell progress bar
pub(super) fn progress_bar(percent: u8, width: usize) -> (String, String) {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    ("\u{2588}".repeat(filled), "\u{2591}".repeat(width - filled))
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
