use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Priority, Project, ProjectStatus, Task, TaskStatus};
use crate::ops::filter::TaskStatusFilter;
use crate::ops::stats::PortfolioStats;
use crate::util::format::{format_currency, format_date};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectSummaryJson {
    pub id: u32,
    pub name: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub progress: u8,
    pub category: String,
    pub deadline: Option<NaiveDate>,
    pub budget: u64,
    pub tasks: usize,
    pub completed_tasks: usize,
}

#[derive(Serialize)]
pub struct ProjectDetailJson {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub progress: u8,
    pub category: String,
    pub deadline: Option<NaiveDate>,
    pub budget: u64,
    pub team: Vec<String>,
    pub start_date: NaiveDate,
    pub created_date: NaiveDate,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub assignee: String,
}

#[derive(Serialize)]
pub struct StatsJson<'a> {
    #[serde(flatten)]
    pub stats: &'a PortfolioStats,
    pub completion_rate: u8,
    pub task_completion_rate: u8,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn project_summary_json(project: &Project) -> ProjectSummaryJson {
    ProjectSummaryJson {
        id: project.id,
        name: project.name.clone(),
        status: project.status,
        priority: project.priority,
        progress: project.progress,
        category: project.category.clone(),
        deadline: project.deadline,
        budget: project.budget,
        tasks: project.tasks.len(),
        completed_tasks: project.completed_task_count(),
    }
}

pub fn project_detail_json(project: &Project, tasks: &[&Task]) -> ProjectDetailJson {
    ProjectDetailJson {
        id: project.id,
        name: project.name.clone(),
        description: project.description.clone(),
        status: project.status,
        priority: project.priority,
        progress: project.progress,
        category: project.category.clone(),
        deadline: project.deadline,
        budget: project.budget,
        team: project.team.clone(),
        start_date: project.start_date,
        created_date: project.created_date,
        tasks: tasks.iter().map(|t| task_to_json(t)).collect(),
    }
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status,
        priority: task.priority,
        deadline: task.deadline,
        assignee: task.assignee.clone(),
    }
}

pub fn stats_to_json(stats: &PortfolioStats) -> StatsJson<'_> {
    StatsJson {
        stats,
        completion_rate: stats.completion_rate(),
        task_completion_rate: stats.task_completion_rate(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_mark(status: TaskStatus) -> char {
    match status {
        TaskStatus::Pending => ' ',
        TaskStatus::InProgress => '>',
        TaskStatus::Completed => 'x',
    }
}

/// One row of `docket list`
pub fn format_project_line(project: &Project) -> String {
    format!(
        "#{:<3} {:<11}  {:<8}  {:>3}%  {}",
        project.id,
        project.status.as_str(),
        project.priority.as_str(),
        project.progress,
        project.name
    )
}

/// A task as a checkbox line
pub fn format_task_line(task: &Task) -> String {
    let mut meta = vec![
        task.priority.as_str().to_string(),
        format!("due {}", format_date(task.deadline)),
    ];
    if !task.assignee.is_empty() {
        meta.push(task.assignee.clone());
    }
    format!(
        "[{}] {}  {}  ({})",
        status_mark(task.status),
        task.id,
        task.title,
        meta.join(", ")
    )
}

fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<11}{}", format!("{}:", label), value)
}

/// Full project view for `docket show`
pub fn format_project_detail(
    project: &Project,
    tasks: &[&Task],
    filter: TaskStatusFilter,
) -> Vec<String> {
    let mut lines = vec![format!("#{} {}", project.id, project.name)];
    if !project.description.is_empty() {
        lines.push(project.description.clone());
    }
    lines.push(String::new());

    let team = if project.team.is_empty() {
        "-".to_string()
    } else {
        project.team.join(", ")
    };
    lines.push(field("Status", project.status.label()));
    lines.push(field("Priority", project.priority.label()));
    lines.push(field(
        "Progress",
        format!(
            "{}% ({}/{} tasks)",
            project.progress,
            project.completed_task_count(),
            project.tasks.len()
        ),
    ));
    lines.push(field("Category", &project.category));
    lines.push(field("Budget", format_currency(project.budget)));
    lines.push(field("Deadline", format_date(project.deadline)));
    lines.push(field("Started", format_date(Some(project.start_date))));
    lines.push(field("Created", format_date(Some(project.created_date))));
    lines.push(field("Team", team));
    lines.push(String::new());

    if filter.is_all() {
        lines.push(format!("Tasks ({})", project.tasks.len()));
    } else {
        lines.push(format!(
            "Tasks ({} of {}, {})",
            tasks.len(),
            project.tasks.len(),
            filter
        ));
    }
    if tasks.is_empty() {
        lines.push("No tasks".to_string());
    }
    lines.extend(tasks.iter().map(|t| format_task_line(t)));
    lines
}

/// Summary block for `docket stats`
pub fn format_stats(stats: &PortfolioStats) -> Vec<String> {
    let row = |label: &str, value: String| format!("{:<16}{}", label, value);
    let mut lines = vec![
        row("Projects:", stats.total.to_string()),
        row(
            "  Completed:",
            format!("{} ({}%)", stats.completed, stats.completion_rate()),
        ),
        row("  In progress:", stats.in_progress.to_string()),
        row("  Planning:", stats.planning.to_string()),
        row(
            "Tasks:",
            format!(
                "{}/{} completed ({}%)",
                stats.completed_tasks,
                stats.total_tasks,
                stats.task_completion_rate()
            ),
        ),
        row("Total budget:", format_currency(stats.total_budget)),
        row("Avg progress:", format!("{}%", stats.average_progress)),
        String::new(),
        "By priority:".to_string(),
    ];
    for (priority, count) in &stats.by_priority {
        lines.push(row(&format!("  {}", priority.as_str()), count.to_string()));
    }
    lines
}
