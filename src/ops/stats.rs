use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Portfolio, Priority, ProjectStatus};

/// Aggregate figures for the summary tiles, dashboard, and `stats` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub planning: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Sum of budgets, capped at `u64::MAX`
    pub total_budget: u64,
    /// Rounded mean of project progress, 0 with no projects
    pub average_progress: u8,
    /// Project count per priority, highest priority first
    pub by_priority: IndexMap<Priority, usize>,
}

impl PortfolioStats {
    /// Share of projects completed, as a rounded percentage
    pub fn completion_rate(&self) -> u8 {
        rounded_percent(self.completed, self.total)
    }

    /// Share of tasks completed across all projects
    pub fn task_completion_rate(&self) -> u8 {
        rounded_percent(self.completed_tasks, self.total_tasks)
    }
}

/// round(100 × part / whole), half-up; 0 when `whole` is 0
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u8
}

pub fn portfolio_stats(portfolio: &Portfolio) -> PortfolioStats {
    let mut stats = PortfolioStats {
        by_priority: [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ]
        .into_iter()
        .map(|p| (p, 0))
        .collect(),
        ..Default::default()
    };
    let mut progress_sum = 0usize;

    for project in portfolio.iter() {
        stats.total += 1;
        match project.status {
            ProjectStatus::Completed => stats.completed += 1,
            ProjectStatus::InProgress => stats.in_progress += 1,
            ProjectStatus::Planning => stats.planning += 1,
            ProjectStatus::Pending => {}
        }
        stats.total_tasks += project.tasks.len();
        stats.completed_tasks += project.completed_task_count();
        stats.total_budget = stats.total_budget.saturating_add(project.budget);
        progress_sum += project.progress as usize;
        *stats.by_priority.entry(project.priority).or_insert(0) += 1;
    }

    if stats.total > 0 {
        stats.average_progress =
            ((2 * progress_sum + stats.total) / (2 * stats.total)) as u8;
    }
    stats
}
