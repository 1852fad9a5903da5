use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction};
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the y/n confirmation for a destructive action
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.confirm_state else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let warn_style = Style::default().fg(app.theme.red).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let detail = match state.action {
        ConfirmAction::DeleteProject { project_id } => app
            .portfolio
            .get(project_id)
            .map(|p| format!("Its {} tasks will be removed too.", p.tasks.len())),
        ConfirmAction::DeleteTask {
            project_id,
            task_id,
        } => app
            .portfolio
            .get(project_id)
            .and_then(|p| p.task(task_id))
            .map(|t| t.title.clone()),
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Confirm", header_style)),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", unicode::truncate_to_width(&state.message, inner_w)),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = detail {
        lines.push(Line::from(Span::styled(
            format!("  {}", unicode::truncate_to_width(&detail, inner_w)),
            text_style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  u undoes this afterwards.", warn_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ", text_style),
        Span::styled("y", dim_style),
        Span::styled(" confirm  ", text_style),
        Span::styled("n/Esc", dim_style),
        Span::styled(" cancel", text_style),
    ]));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn delete_project_prompt() {
        let mut app = seed_app();
        app.request_delete_project(3);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(output.contains("Delete project \"Legacy Database"));
        assert!(output.contains("Its 6 tasks will be removed too."));
        assert!(output.contains("y confirm  n/Esc cancel"));
    }

    #[test]
    fn delete_task_prompt_names_the_task() {
        let mut app = seed_app();
        app.request_delete_task(2, 9);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(output.contains("Delete this task?"));
        assert!(output.contains("Android Development"));
    }
}
