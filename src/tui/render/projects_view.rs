use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use regex::Regex;

use crate::model::{Priority, Project, ProjectStatus};
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{
    choice_label, format_currency, format_date, format_days_left, priority_badge, progress_bar,
    spans_width, team_summary,
};
use super::push_highlighted_spans;

/// Border plus four content lines
const CARD_HEIGHT: u16 = 6;

/// Deadlines this close are flagged
const DEADLINE_WARN_DAYS: i64 = 14;

/// Render the filter bar and the scrolling list of project cards
pub fn render_projects_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // filter bar
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // cards
        ])
        .split(area);

    render_filter_bar(frame, app, chunks[0]);

    let projects = app.filtered_projects();
    if projects.is_empty() {
        render_empty(frame, app, chunks[2]);
        return;
    }

    let list = chunks[2];
    let visible = usize::from((list.height / CARD_HEIGHT).max(1));
    let start = app.list_cursor.saturating_sub(visible - 1);
    let re = app.search_re();

    for (slot, (index, project)) in projects
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .enumerate()
    {
        let y = list.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(list.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let card = Rect::new(list.x, y, list.width, height);
        render_card(frame, app, project, index == app.list_cursor, re.as_ref(), card);
    }
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text_bright).bg(bg);
    let searching = app.mode == Mode::Search;

    let mut spans = vec![Span::styled(" Search: ", label)];
    if app.filter.search.is_empty() && !searching {
        spans.push(Span::styled(
            "Search projects...",
            Style::default().fg(app.theme.dim).bg(bg).add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(app.filter.search.clone(), value));
    }
    if searching {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    spans.push(Span::styled("   Priority: ", label));
    spans.push(Span::styled(
        choice_label(app.filter.priority, Priority::label),
        value,
    ));
    spans.push(Span::styled("   Status: ", label));
    spans.push(Span::styled(
        choice_label(app.filter.status, ProjectStatus::label),
        value,
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No projects found",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try adjusting your search or filters",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().bg(bg)),
        area,
    );
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    project: &Project,
    selected: bool,
    re: Option<&Regex>,
    area: Rect,
) {
    let theme = &app.theme;
    let bg = if selected { theme.selection_bg } else { theme.background };
    let border = if selected { theme.selection_border } else { theme.dim };
    let inner_w = area.width.saturating_sub(2) as usize;

    let base = Style::default().fg(theme.text).bg(bg);
    let dim = Style::default().fg(theme.dim).bg(bg);
    let hl = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    // Line 1: name, category ............ [PRIORITY] Status
    let right = vec![
        Span::styled(
            format!(" {} ", priority_badge(project.priority)),
            Style::default()
                .fg(theme.background)
                .bg(theme.priority_color(project.priority))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", base),
        Span::styled(
            project.status.label(),
            Style::default().fg(theme.project_status_color(project.status)).bg(bg),
        ),
    ];
    let right_w = spans_width(&right);
    let name_budget = inner_w.saturating_sub(right_w + 2);
    let name = unicode::truncate_to_width(&project.name, name_budget);
    let mut title = Vec::new();
    push_highlighted_spans(
        &mut title,
        &name,
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        hl,
        re,
    );
    let category_budget = name_budget.saturating_sub(unicode::display_width(&name) + 2);
    if !project.category.is_empty() && category_budget > 3 {
        title.push(Span::styled("  ", base));
        push_highlighted_spans(
            &mut title,
            &unicode::truncate_to_width(&project.category, category_budget),
            dim,
            hl,
            re,
        );
    }
    let line1 = justify(title, right, inner_w, base);

    // Line 2: description
    let mut line2 = Vec::new();
    push_highlighted_spans(
        &mut line2,
        &unicode::truncate_to_width(&project.description, inner_w),
        base,
        hl,
        re,
    );

    // Line 3: progress bar, task count, budget
    let bar_w = (inner_w / 3).clamp(4, 24);
    let (full, empty) = progress_bar(project.progress, bar_w);
    let line3 = vec![
        Span::styled(full, Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(empty, dim),
        Span::styled(format!(" {:>3}%", project.progress), base),
        Span::styled(
            format!(
                "   {}/{} Tasks",
                project.completed_task_count(),
                project.tasks.len()
            ),
            base,
        ),
        Span::styled(
            format!("   {}", format_currency(project.budget)),
            Style::default().fg(theme.green).bg(bg),
        ),
    ];

    // Line 4: deadline and days left ............ team
    let days = project.days_until_deadline(app.today);
    let days_color = match days {
        Some(d) if d < 0 => theme.red,
        Some(d) if d <= DEADLINE_WARN_DAYS => theme.yellow,
        _ => theme.dim,
    };
    let mut deadline = vec![Span::styled(
        format!("Due {}", format_date(project.deadline)),
        base,
    )];
    let days_text = format_days_left(days);
    if !days_text.is_empty() {
        deadline.push(Span::styled(" \u{00B7} ", dim));
        deadline.push(Span::styled(days_text, Style::default().fg(days_color).bg(bg)));
    }
    let team = vec![Span::styled(team_summary(&project.team), dim)];
    let line4 = justify(deadline, team, inner_w, base);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(vec![
        line1,
        Line::from(line2),
        Line::from(line3),
        line4,
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}

/// Left spans, padding, then right spans. Drops the right side if it does
/// not fit.
fn justify<'a>(left: Vec<Span<'a>>, right: Vec<Span<'a>>, width: usize, pad: Style) -> Line<'a> {
    let used = spans_width(&left) + spans_width(&right);
    let mut spans = left;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), pad));
        spans.extend(right);
    }
    Line::from(spans)
}
