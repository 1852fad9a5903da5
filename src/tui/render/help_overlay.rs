use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Tab};

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    match app.tab {
        Tab::Projects => {
            lines.push(Line::from(Span::styled(" All Projects", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " Enter", "View project details", key_style, desc_style);
            add_binding(&mut lines, " e", "Edit project", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete project", key_style, desc_style);
            add_binding(&mut lines, " /", "Search", key_style, desc_style);
            add_binding(&mut lines, " p / s", "Cycle priority / status filter", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Clear filters", key_style, desc_style);
        }
        Tab::Dashboard => {
            lines.push(Line::from(Span::styled(" Dashboard", header_style)));
            add_binding(&mut lines, " 1 / 3", "Back to projects / details", key_style, desc_style);
        }
        Tab::Details => {
            lines.push(Line::from(Span::styled(" Project Details", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " Space", "Toggle completed", key_style, desc_style);
            add_binding(&mut lines, " s", "Cycle task status", key_style, desc_style);
            add_binding(&mut lines, " e / E", "Edit task / project", key_style, desc_style);
            add_binding(&mut lines, " x / D", "Delete task / project", key_style, desc_style);
            add_binding(&mut lines, " f", "Filter tasks by status", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Back to list", key_style, desc_style);
        }
    }
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " 1 2 3 / Tab", "Switch tabs", key_style, desc_style);
    add_binding(&mut lines, " n / t", "New project / add task", key_style, desc_style);
    add_binding(&mut lines, " u / Ctrl+R", "Undo / redo", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_follows_current_tab() {
        let mut app = seed_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Cycle priority / status filter"));
        assert!(output.contains("Undo / redo"));

        app.open_details(1);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Toggle completed"));
        assert!(!output.contains("Clear filters"));
    }
}
