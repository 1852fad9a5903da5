use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::App;
use crate::tui::modal::{Field, FieldValue};
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

const MODAL_WIDTH: u16 = 64;
/// Column where field values start
const LABEL_WIDTH: usize = 16;

/// Render the create/edit form on top of everything
pub fn render_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(modal) = &app.modal else {
        return;
    };

    let bg = app.theme.background;
    let highlight = app.theme.highlight;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w = MODAL_WIDTH.min(area.width.saturating_sub(2));
    let value_w = (popup_w as usize).saturating_sub(LABEL_WIDTH + 4);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, field) in modal.fields.iter().enumerate() {
        lines.push(field_line(app, field, i == modal.focus, value_w));
    }
    lines.push(Line::from(""));

    if let Some(error) = &modal.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("  ", text_style),
        Span::styled("Enter", dim_style),
        Span::styled(format!(" {}  ", modal.kind.submit_label()), text_style),
        Span::styled("Tab", dim_style),
        Span::styled(" next  ", text_style),
        Span::styled("\u{2190}\u{2192}", dim_style),
        Span::styled(" change  ", text_style),
        Span::styled("Esc", dim_style),
        Span::styled(" cancel", text_style),
    ]));

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(highlight).bg(bg))
        .title(Span::styled(
            format!(" {} ", modal.kind.title()),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn field_line<'a>(app: &App, field: &Field, focused: bool, width: usize) -> Line<'a> {
    let bg = app.theme.background;
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(bg).bg(app.theme.highlight);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let marker = if focused { "\u{25B8}" } else { " " };
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };
    let mut spans = vec![
        Span::styled(format!(" {} ", marker), label_style),
        Span::styled(format!("{:<w$}", label, w = LABEL_WIDTH), label_style),
    ];

    match &field.value {
        FieldValue::Text { text, cursor } => {
            if text.is_empty() && !focused {
                spans.push(Span::styled(field.placeholder.to_string(), dim_style));
            } else if focused {
                let (before, at, after) = text_window(text, *cursor, width);
                spans.push(Span::styled(before, value_style));
                spans.push(Span::styled(at, cursor_style));
                spans.push(Span::styled(after, value_style));
            } else {
                spans.push(Span::styled(
                    unicode::truncate_to_width(text, width),
                    value_style,
                ));
            }
        }
        FieldValue::Priority(p) => {
            choice_spans(&mut spans, p.label(), app.theme.priority_color(*p), focused, app);
        }
        FieldValue::Status(s) => {
            choice_spans(&mut spans, s.label(), app.theme.task_status_color(*s), focused, app);
        }
        FieldValue::Project(selected) => {
            let name = selected
                .and_then(|id| app.portfolio.get(id))
                .map(|p| unicode::truncate_to_width(&p.name, width.saturating_sub(4)))
                .unwrap_or_else(|| "Select a project".to_string());
            let color = if selected.is_some() {
                app.theme.text_bright
            } else {
                app.theme.dim
            };
            choice_spans(&mut spans, &name, color, focused, app);
        }
    }
    Line::from(spans)
}

fn choice_spans(
    spans: &mut Vec<Span<'_>>,
    label: &str,
    color: ratatui::style::Color,
    focused: bool,
    app: &App,
) {
    let bg = app.theme.background;
    let arrow = Style::default().fg(app.theme.dim).bg(bg);
    if focused {
        spans.push(Span::styled("\u{25C0} ", arrow));
    }
    spans.push(Span::styled(
        label.to_string(),
        Style::default().fg(color).bg(bg),
    ));
    if focused {
        spans.push(Span::styled(" \u{25B6}", arrow));
    }
}

/// Split `text` around the cursor so the cursor cell stays within `width`.
/// Returns (before, cursor cell, after). The cursor cell is a space at the end.
fn text_window(text: &str, cursor: usize, width: usize) -> (String, String, String) {
    let cursor = cursor.min(text.len());
    let before = &text[..cursor];
    let rest = &text[cursor..];
    let at = rest.graphemes(true).next().unwrap_or(" ");
    let after = rest.get(at.len()..).unwrap_or("");

    // Keep the tail of `before` that fits with the cursor cell
    let room = width.saturating_sub(unicode::display_width(at));
    let mut start = 0;
    while unicode::display_width(&before[start..]) > room {
        match unicode::next_grapheme_boundary(before, start) {
            Some(next) => start = next,
            None => break,
        }
    }
    let shown_before = before[start..].to_string();
    let left = room.saturating_sub(unicode::display_width(&shown_before));
    let shown_after = if unicode::display_width(after) > left {
        unicode::truncate_to_width(after, left)
    } else {
        after.to_string()
    };
    (shown_before, at.to_string(), shown_after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_modal(frame, app, area);
        })
    }

    #[test]
    fn new_project_form_layout() {
        let mut app = seed_app();
        app.open_new_project();
        let output = render(&app);
        assert!(output.contains("Create New Project"));
        assert!(output.contains("Project Name *"));
        assert!(output.contains("Budget ($)"));
        assert!(output.contains("YYYY-MM-DD"));
        assert!(output.contains("Medium"));
        assert!(output.contains("Enter Create Project"));
    }

    #[test]
    fn new_task_form_shows_project_choice() {
        let mut app = seed_app();
        app.open_new_task();
        assert!(render(&app).contains("\u{25C0} Select a project \u{25B6}"));

        app.open_details(2);
        app.cancel_modal();
        app.open_new_task();
        assert_eq!(app.mode, Mode::Modal);
        assert!(render(&app).contains("Mobile Application Development"));
    }

    #[test]
    fn validation_error_is_shown() {
        let mut app = seed_app();
        app.open_new_project();
        app.submit_modal();
        assert!(render(&app).contains("project name is required"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let mut app = seed_app();
        app.open_edit_task(1, 4);
        let output = render(&app);
        assert!(output.contains("Edit Task"));
        assert!(output.contains("Quality Assurance"));
        assert!(output.contains("2025-12-25"));
        assert!(output.contains("Pending"));
        assert!(output.contains("Rebecca Louise Martinez"));
        assert!(output.contains("Enter Save"));
    }

    #[test]
    fn text_window_keeps_cursor_visible() {
        let (before, at, after) = text_window("abcdefghij", 10, 5);
        assert_eq!(before, "ghij");
        assert_eq!(at, " ");
        assert_eq!(after, "");

        let (before, at, after) = text_window("abcdefghij", 0, 5);
        assert_eq!(before, "");
        assert_eq!(at, "a");
        assert_eq!(after, "bcd\u{2026}");
    }
}
