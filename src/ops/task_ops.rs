use crate::model::{Portfolio, Priority, Project, ProjectStatus, Task, TaskStatus};
use crate::ops::validate::{self, ValidationError};

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Percentage of completed tasks, rounded half-up. Zero tasks is 0%.
pub fn progress_percentage(tasks: &[Task]) -> u8 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    // round(100 * c / t) in integers: (200c + t) / 2t
    ((200 * completed + total) / (2 * total)) as u8
}

/// Project status implied by its tasks: completed when every task is,
/// in-progress when any task has left pending, otherwise pending.
pub fn derived_status(tasks: &[Task]) -> ProjectStatus {
    if tasks.iter().all(|t| t.status == TaskStatus::Completed) {
        ProjectStatus::Completed
    } else if tasks.iter().any(|t| t.status != TaskStatus::Pending) {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::Pending
    }
}

/// One greater than the largest task id in the project, or 1 when empty.
/// `None` once the largest id is `u32::MAX`.
pub fn next_task_id(project: &Project) -> Option<u32> {
    project
        .tasks
        .iter()
        .map(|t| t.id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

/// Rebuild a project around a new task list, keeping progress in sync
fn with_tasks(project: &Project, tasks: Vec<Task>) -> Project {
    Project {
        progress: progress_percentage(&tasks),
        tasks,
        ..project.clone()
    }
}

/// Like `with_tasks`, and also re-derive the project status
fn with_tasks_and_status(project: &Project, tasks: Vec<Task>) -> Project {
    let status = if tasks.is_empty() {
        project.status
    } else {
        derived_status(&tasks)
    };
    Project {
        status,
        ..with_tasks(project, tasks)
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Raw field values from the "new task" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Parent project; `None` until one is chosen
    pub project_id: Option<u32>,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub deadline: String,
    pub priority: Priority,
}

/// Add a task to the chosen project.
/// Returns the new collection and the id assigned to the task.
pub fn create_task(
    portfolio: &Portfolio,
    form: &TaskForm,
) -> Result<(Portfolio, u32), ValidationError> {
    let title = validate::required(&form.title, ValidationError::MissingTitle)?;
    let project_id = form.project_id.ok_or(ValidationError::MissingProject)?;
    let project = portfolio
        .get(project_id)
        .ok_or(ValidationError::UnknownProject(project_id))?;
    let deadline =
        validate::optional_date(&form.deadline)?.ok_or(ValidationError::MissingDeadline)?;

    let task_id = next_task_id(project).ok_or(ValidationError::TaskIdsExhausted(project_id))?;
    let task = Task {
        id: task_id,
        title,
        description: form.description.trim().to_string(),
        status: TaskStatus::Pending,
        deadline: Some(deadline),
        priority: form.priority,
        assignee: String::new(),
    };

    let next = portfolio
        .with_project(project_id, |p| {
            let mut tasks = p.tasks.clone();
            tasks.push(task);
            with_tasks(p, tasks)
        })
        .ok_or(ValidationError::UnknownProject(project_id))?;
    Ok((next, task_id))
}

// ---------------------------------------------------------------------------
// Status and edits
// ---------------------------------------------------------------------------

/// Set one task's status, recomputing the parent's progress and status.
/// Unknown ids leave the collection as it was.
pub fn set_task_status(
    portfolio: &Portfolio,
    project_id: u32,
    task_id: u32,
    status: TaskStatus,
) -> Portfolio {
    let rebuilt = portfolio.with_project(project_id, |p| {
        let tasks = p
            .tasks
            .iter()
            .map(|t| {
                if t.id == task_id {
                    Task {
                        status,
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        with_tasks_and_status(p, tasks)
    });
    match rebuilt {
        Some(next) if next.get(project_id).is_some_and(|p| p.task(task_id).is_some()) => next,
        _ => portfolio.clone(),
    }
}

/// Partial update of a task's fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`; blank is rejected since tasks always carry a deadline
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Apply a field edit to one task.
pub fn update_task(
    portfolio: &Portfolio,
    project_id: u32,
    task_id: u32,
    patch: &TaskPatch,
) -> Result<Portfolio, ValidationError> {
    let project = portfolio
        .get(project_id)
        .ok_or(ValidationError::UnknownProject(project_id))?;
    let current = project
        .task(task_id)
        .ok_or(ValidationError::UnknownTask {
            project_id,
            task_id,
        })?;

    let mut updated = current.clone();
    if let Some(title) = &patch.title {
        updated.title = validate::required(title, ValidationError::MissingTitle)?;
    }
    if let Some(description) = &patch.description {
        updated.description = description.trim().to_string();
    }
    if let Some(deadline) = &patch.deadline {
        updated.deadline =
            Some(validate::optional_date(deadline)?.ok_or(ValidationError::MissingDeadline)?);
    }
    if let Some(priority) = patch.priority {
        updated.priority = priority;
    }
    if let Some(assignee) = &patch.assignee {
        updated.assignee = assignee.trim().to_string();
    }
    let status_changed = patch.status.is_some_and(|s| s != current.status);
    if let Some(status) = patch.status {
        updated.status = status;
    }

    portfolio
        .with_project(project_id, |p| {
            let tasks = p
                .tasks
                .iter()
                .map(|t| if t.id == task_id { updated.clone() } else { t.clone() })
                .collect();
            if status_changed {
                with_tasks_and_status(p, tasks)
            } else {
                with_tasks(p, tasks)
            }
        })
        .ok_or(ValidationError::UnknownProject(project_id))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Remove a task from its project, recomputing progress.
pub fn delete_task(portfolio: &Portfolio, project_id: u32, task_id: u32) -> Portfolio {
    portfolio
        .with_project(project_id, |p| {
            let tasks = p.tasks.iter().filter(|t| t.id != task_id).cloned().collect();
            with_tasks(p, tasks)
        })
        .unwrap_or_else(|| portfolio.clone())
}
