use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, Tab};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Navigate => {
            if let Some(message) = &app.status_message {
                spans.push(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ));
            }
            if app.show_key_hints {
                navigate_hint(app.tab)
            } else {
                ""
            }
        }
        Mode::Search => {
            // Search prompt: /pattern▌
            spans.push(Span::styled(
                format!("/{}", app.filter.search),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            "Enter keep  Esc cancel"
        }
        Mode::Modal => "Tab/\u{2193} next  Shift-Tab/\u{2191} prev  Enter submit  Esc cancel",
        Mode::Confirm => "y confirm  n cancel",
    };

    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if !hint.is_empty() && content_width + hint_width + 1 < width {
        let padding = width - content_width - hint_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn navigate_hint(tab: Tab) -> &'static str {
    match tab {
        Tab::Projects => "n new  t task  / search  p/s filter  ? help",
        Tab::Dashboard => "1 projects  n new  ? help",
        Tab::Details => "space toggle  s status  e edit  x delete  ? help",
    }
}
