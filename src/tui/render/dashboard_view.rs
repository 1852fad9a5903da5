use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::ProjectStatus;
use crate::ops::stats::{PortfolioStats, rounded_percent};
use crate::tui::app::App;

use super::helpers::progress_bar;

/// Side by side from this width, stacked below it
const MIN_WIDTH_FOR_COLUMNS: u16 = 60;

pub fn render_dashboard_view(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let direction = if area.width >= MIN_WIDTH_FOR_COLUMNS {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    render_status_distribution(frame, app, &stats, chunks[0]);
    render_task_overview(frame, app, &stats, chunks[1]);
}

fn panel<'a>(app: &App, title: &'a str) -> Block<'a> {
    let bg = app.theme.background;
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg))
}

fn render_status_distribution(frame: &mut Frame, app: &App, stats: &PortfolioStats, area: Rect) {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let inner_w = area.width.saturating_sub(2) as usize;
    // Label and count columns take 20 cells, the bar gets the rest
    let bar_w = inner_w.saturating_sub(21).min(30);

    let mut lines = vec![Line::from("")];
    for status in ProjectStatus::ALL {
        let count = app.portfolio.iter().filter(|p| p.status == status).count();
        let percent = rounded_percent(count, stats.total);
        let (full, empty) = progress_bar(percent, bar_w);
        let color = app.theme.project_status_color(status);
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<13}", status.label()), text),
            Span::styled(
                format!("{:>3}  ", count),
                Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(full, Style::default().fg(color).bg(bg)),
            Span::styled(empty, Style::default().fg(app.theme.dim).bg(bg)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Average progress  ", text),
        Span::styled(
            format!("{}%", stats.average_progress),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(panel(app, "Project Status Distribution")),
        area,
    );
}

fn render_task_overview(frame: &mut Frame, app: &App, stats: &PortfolioStats, area: Rect) {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let bright = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let inner_w = area.width.saturating_sub(2) as usize;
    let rate = stats.task_completion_rate();

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", label), text),
            Span::styled(value, bright),
        ])
    };

    let (full, empty) = progress_bar(rate, inner_w.saturating_sub(10).min(30));
    let mut lines = vec![
        Line::from(""),
        row("Total tasks", stats.total_tasks.to_string()),
        row("Completed", stats.completed_tasks.to_string()),
        row(
            "Remaining",
            (stats.total_tasks - stats.completed_tasks).to_string(),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text),
            Span::styled(full, Style::default().fg(app.theme.green).bg(bg)),
            Span::styled(empty, Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(format!(" {}%", rate), bright),
        ]),
        Line::from(""),
    ];

    let mut by_priority = vec![Span::styled("  ", text)];
    for (priority, count) in &stats.by_priority {
        by_priority.push(Span::styled(
            format!("{} {}  ", priority.label(), count),
            Style::default().fg(app.theme.priority_color(*priority)).bg(bg),
        ));
    }
    lines.push(Line::from(by_priority));

    frame.render_widget(
        Paragraph::new(lines).block(panel(app, "Task Overview")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn dashboard_counts_seed_data() {
        let app = seed_app();
        let output = render_to_string(TERM_W, 14, |frame, area| {
            render_dashboard_view(frame, &app, area);
        });
        assert!(output.contains("Project Status Distribution"));
        assert!(output.contains("Task Overview"));
        assert!(output.contains("Planning"));
        assert!(output.contains("In Progress"));
        assert!(output.contains("Total tasks   28"));
        assert!(output.contains("Completed     4"));
        assert!(output.contains("Remaining     24"));
        assert!(output.contains(" 14%"));
        assert!(output.contains("Critical 1"));
    }

    #[test]
    fn narrow_terminal_stacks_panels() {
        let app = seed_app();
        let output = render_to_string(50, 24, |frame, area| {
            render_dashboard_view(frame, &app, area);
        });
        let status_row = output
            .lines()
            .position(|l| l.contains("Project Status Distribution"))
            .unwrap();
        let tasks_row = output
            .lines()
            .position(|l| l.contains("Task Overview"))
            .unwrap();
        assert!(tasks_row > status_row);
    }

    #[test]
    fn empty_collection_renders_zeroes() {
        let app = empty_app();
        let output = render_to_string(TERM_W, 14, |frame, area| {
            render_dashboard_view(frame, &app, area);
        });
        assert!(output.contains("Average progress  0%"));
        assert!(output.contains("Total tasks   0"));
    }
}
