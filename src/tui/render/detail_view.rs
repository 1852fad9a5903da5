use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::{Project, Task, TaskStatus};
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{
    format_currency, format_date, format_days_left, priority_badge, progress_bar, spans_width,
    task_symbol, team_summary,
};

/// Render the selected project's header, fact boxes and task list
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let Some(project) = app.selected() else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No project selected",
                Style::default().fg(app.theme.dim).bg(bg),
            ))
            .style(Style::default().bg(bg)),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // name and badge
            Constraint::Length(1), // category and team
            Constraint::Length(2), // description
            Constraint::Length(4), // fact boxes
            Constraint::Length(1), // tasks header
            Constraint::Min(1),    // task rows
        ])
        .split(area);

    render_title(frame, app, project, chunks[0]);
    render_meta(frame, app, project, chunks[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            project.description.clone(),
            Style::default().fg(app.theme.text).bg(bg),
        ))
        .wrap(Wrap { trim: true })
        .block(Block::default().padding(ratatui::widgets::Padding::horizontal(1)))
        .style(Style::default().bg(bg)),
        chunks[2],
    );
    render_fact_boxes(frame, app, project, chunks[3]);
    render_tasks_header(frame, app, project, chunks[4]);
    render_tasks(frame, app, chunks[5]);
}

fn render_title(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(" \u{2190} ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            project.name.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let badge = format!(" {} ", priority_badge(project.priority));
    let used = spans_width(&spans) + unicode::display_width(&badge) + 1;
    let width = area.width as usize;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(
            badge,
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.priority_color(project.priority))
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_meta(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);
    let mut spans = vec![Span::styled("   ", dim)];
    if !project.category.is_empty() {
        spans.push(Span::styled(project.category.clone(), text));
        spans.push(Span::styled(" \u{00B7} ", dim));
    }
    if !project.team.is_empty() {
        spans.push(Span::styled("Team: ", dim));
        spans.push(Span::styled(team_summary(&project.team), text));
        spans.push(Span::styled(" \u{00B7} ", dim));
    }
    spans.push(Span::styled(
        format!("Started {}", format_date(Some(project.start_date))),
        dim,
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_fact_boxes(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    let theme = &app.theme;
    let bg = theme.background;
    let dim = Style::default().fg(theme.dim).bg(bg);

    let bar_w = (chunks[1].width.saturating_sub(8) as usize).min(10);
    let (full, empty) = progress_bar(project.progress, bar_w);
    let progress = vec![
        Line::from(vec![
            Span::styled(
                format!("{}% ", project.progress),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
            Span::styled(full, Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(empty, dim),
        ]),
        Line::from(Span::styled(
            format!(
                "{}/{} tasks",
                project.completed_task_count(),
                project.tasks.len()
            ),
            dim,
        )),
    ];

    let deadline = vec![
        Line::from(Span::styled(
            format_date(project.deadline),
            Style::default().fg(theme.text).bg(bg),
        )),
        Line::from(Span::styled(
            format_days_left(project.days_until_deadline(app.today)),
            dim,
        )),
    ];

    fact_box(
        frame,
        app,
        chunks[0],
        "Status",
        vec![Line::from(Span::styled(
            project.status.label(),
            Style::default()
                .fg(theme.project_status_color(project.status))
                .bg(bg),
        ))],
    );
    fact_box(frame, app, chunks[1], "Progress", progress);
    fact_box(frame, app, chunks[2], "Deadline", deadline);
    fact_box(
        frame,
        app,
        chunks[3],
        "Budget",
        vec![Line::from(Span::styled(
            format_currency(project.budget),
            Style::default().fg(theme.green).bg(bg),
        ))],
    );
}

fn fact_box(frame: &mut Frame, app: &App, area: Rect, title: &str, lines: Vec<Line>) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .padding(ratatui::widgets::Padding::horizontal(1))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_tasks_header(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!(" Tasks ({})", project.tasks.len()),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if let crate::ops::filter::Choice::Only(status) = app.task_filter {
        spans.push(Span::styled("  filter: ", Style::default().fg(app.theme.purple).bg(bg)));
        spans.push(Span::styled(
            status.label(),
            Style::default().fg(app.theme.task_status_color(status)).bg(bg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let message = match app.task_filter {
            crate::ops::filter::Choice::All => "No tasks yet".to_string(),
            crate::ops::filter::Choice::Only(s) => format!("No {} tasks", s.label().to_lowercase()),
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(app.theme.dim).bg(bg))),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().bg(bg)),
            area,
        );
        return;
    }

    let height = usize::from(area.height);
    let start = app.task_cursor.saturating_sub(height.saturating_sub(1));
    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, task)| task_line(app, task, i == app.task_cursor, area.width as usize))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn task_line<'a>(app: &App, task: &'a Task, selected: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let bg: Color = if selected { theme.selection_bg } else { theme.background };
    let status_color = theme.task_status_color(task.status);
    let dim = Style::default().fg(theme.dim).bg(bg);

    let mut right = vec![
        Span::styled(
            format!("{:<8}", task.priority.as_str()),
            Style::default().fg(theme.priority_color(task.priority)).bg(bg),
        ),
        Span::styled(format!("  {:<12}", format_date(task.deadline)), dim),
    ];
    if let Some(first_name) = task.assignee.split_whitespace().next() {
        right.push(Span::styled(format!("  {}", first_name), dim));
    }
    right.push(Span::styled(
        format!("  {:<11} ", task.status.label()),
        Style::default().fg(status_color).bg(bg),
    ));

    let marker = if selected { "\u{25B8}" } else { " " };
    let mut left = vec![
        Span::styled(
            format!("{} ", marker),
            Style::default().fg(theme.selection_border).bg(bg),
        ),
        Span::styled(
            format!("{} ", task_symbol(task.status)),
            Style::default().fg(status_color).bg(bg),
        ),
    ];
    let title_style = if task.status == TaskStatus::Completed {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text_bright).bg(bg)
    };

    // Drop columns from the right until the title gets some room
    while right.len() > 1 && spans_width(&left) + spans_width(&right) + 12 > width {
        right.remove(right.len() - 2);
    }
    let title_budget = width.saturating_sub(spans_width(&left) + spans_width(&right) + 1);
    let title = unicode::truncate_to_width(&task.title, title_budget);
    let pad = title_budget.saturating_sub(unicode::display_width(&title)) + 1;
    left.push(Span::styled(title, title_style));
    left.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    left.extend(right);
    Line::from(left)
}
