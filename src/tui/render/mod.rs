pub mod confirm_popup;
pub mod dashboard_view;
pub mod detail_view;
pub mod help_overlay;
pub mod helpers;
pub mod modal;
pub mod projects_view;
pub mod status_row;
pub mod summary;
pub mod tab_bar;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode, Tab};

/// Below this height the summary tiles are dropped to leave room for content
const MIN_HEIGHT_FOR_TILES: u16 = 18;

/// Draw the whole screen for the current state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let tiles_height = if area.height >= MIN_HEIGHT_FOR_TILES {
        summary::TILE_HEIGHT
    } else {
        0
    };

    // Layout: header | summary tiles | tab bar (2 rows) | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(tiles_height),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    summary::render_header(frame, app, chunks[0]);
    if tiles_height > 0 {
        summary::render_summary(frame, app, chunks[1]);
    }
    tab_bar::render_tab_bar(frame, app, chunks[2]);

    match app.tab {
        Tab::Projects => projects_view::render_projects_view(frame, app, chunks[3]),
        Tab::Dashboard => dashboard_view::render_dashboard_view(frame, app, chunks[3]),
        Tab::Details => detail_view::render_detail_view(frame, app, chunks[3]),
    }

    status_row::render_status_row(frame, app, chunks[4]);

    // Overlays (rendered on top of everything)
    match app.mode {
        Mode::Modal => modal::render_modal(frame, app, area),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Navigate | Mode::Search => {}
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
