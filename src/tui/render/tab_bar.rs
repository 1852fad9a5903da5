use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Priority, ProjectStatus};
use crate::tui::app::{App, Tab};

use super::helpers::{choice_label, spans_width};

/// Render the tab bar with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Tabs currently offered. Details only exists while a project is selected.
pub fn visible_tabs(app: &App) -> Vec<Tab> {
    let mut tabs = vec![Tab::Projects, Tab::Dashboard];
    if app.selected().is_some() {
        tabs.push(Tab::Details);
    }
    tabs
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    let bg_style = Style::default().bg(app.theme.background);
    spans.push(Span::styled(" ", bg_style));

    for (i, tab) in visible_tabs(app).into_iter().enumerate() {
        let style = tab_style(app, app.tab == tab);
        spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    let indicator = if app.tab == Tab::Projects && app.filter.is_active() {
        filter_indicator(app)
    } else {
        Vec::new()
    };

    let indicator_width = spans_width(&indicator);
    // One space before the indicator, one after
    let separator_end = if indicator.is_empty() {
        width
    } else {
        width.saturating_sub(indicator_width + 2)
    };

    let mut sep_text = String::with_capacity(separator_end * 3);
    for col in 0..separator_end {
        if sep_cols.contains(&col) {
            sep_text.push('\u{2534}');
        } else {
            sep_text.push('\u{2500}');
        }
    }

    let mut spans = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if !indicator.is_empty() {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator);
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// `filter: high in-progress "api"`, listing only the active criteria
fn filter_indicator(app: &App) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let filter = &app.filter;
    let mut spans = vec![Span::styled(
        "filter:",
        Style::default().fg(app.theme.purple).bg(bg),
    )];
    if let crate::ops::filter::Choice::Only(p) = filter.priority {
        spans.push(Span::styled(
            format!(" {}", choice_label(filter.priority, Priority::label)),
            Style::default().fg(app.theme.priority_color(p)).bg(bg),
        ));
    }
    if let crate::ops::filter::Choice::Only(s) = filter.status {
        spans.push(Span::styled(
            format!(" {}", choice_label(filter.status, ProjectStatus::label)),
            Style::default().fg(app.theme.project_status_color(s)).bg(bg),
        ));
    }
    if !filter.search.is_empty() {
        spans.push(Span::styled(
            format!(" \"{}\"", filter.search),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }
    spans
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn details_tab_appears_with_selection() {
        let mut app = seed_app();
        let before = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        assert!(before.contains("1 All Projects"));
        assert!(before.contains("2 Dashboard"));
        assert!(!before.contains("Project Details"));

        app.open_details(3);
        let after = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        assert!(after.contains("3 Project Details"));
    }

    #[test]
    fn separator_shows_active_filters() {
        let mut app = seed_app();
        app.cycle_priority_filter();
        app.set_search("web".into());
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        assert!(output.contains("filter: Critical \"web\""));
        assert!(output.contains('\u{2534}'));
    }
}
