use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{format_currency, format_date, spans_width};

/// Border plus a value line and a subtitle line
pub const TILE_HEIGHT: u16 = 4;

/// Title row: app name on the left, today's date on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(" \u{25C6} ", Style::default().fg(app.theme.purple).bg(bg)),
        Span::styled(
            "Project Dashboard",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let date = format!("{} ", format_date(Some(app.today)));
    let used = spans_width(&spans) + unicode::display_width(&date);
    let width = area.width as usize;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(date, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// The four statistic tiles
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let tiles = [
        (
            "Total Projects",
            stats.total.to_string(),
            format!("{} in progress", stats.in_progress),
            app.theme.blue,
        ),
        (
            "Completed Projects",
            stats.completed.to_string(),
            format!("{}% completion rate", stats.completion_rate()),
            app.theme.green,
        ),
        (
            "Total Tasks",
            stats.total_tasks.to_string(),
            format!("{} completed", stats.completed_tasks),
            app.theme.purple,
        ),
        (
            "Total Budget",
            format_currency(stats.total_budget),
            "Across all projects".to_string(),
            app.theme.yellow,
        ),
    ];

    for ((label, value, subtitle, accent), chunk) in tiles.into_iter().zip(chunks.iter()) {
        render_tile(frame, app, *chunk, label, &value, &subtitle, accent);
    }
}

fn render_tile(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &str,
    value: &str,
    subtitle: &str,
    accent: Color,
) {
    let bg = app.theme.background;
    let inner_w = area.width.saturating_sub(2) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            unicode::truncate_to_width(label, inner_w),
            Style::default().fg(app.theme.text).bg(bg),
        ))
        .style(Style::default().bg(bg));

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", value),
            Style::default()
                .fg(accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", unicode::truncate_to_width(subtitle, inner_w.saturating_sub(1))),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
