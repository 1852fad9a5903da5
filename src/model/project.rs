use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{ParseError, Priority, Task};

/// Project lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Pending,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::Pending,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Pending => "pending",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Pending => "Pending",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ParseError {
                kind: "project status",
                value: s.to_string(),
                expected: "planning, pending, in-progress, completed",
            })
    }
}

/// Top-level unit of work with a deadline, budget, team, and task list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Globally unique
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Percentage of completed tasks; kept in sync by the task operations
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub team: Vec<String>,
    /// Whole currency units
    #[serde(default)]
    pub budget: u64,
    pub start_date: NaiveDate,
    pub created_date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn task(&self, task_id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// Whole days from `today` until the deadline (negative when overdue)
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|d| (d - today).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskStatus;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Project {
        Project {
            id: 1,
            name: "Website".into(),
            description: String::new(),
            status: ProjectStatus::InProgress,
            progress: 50,
            deadline: Some(date("2025-12-31")),
            priority: Priority::High,
            team: vec![],
            budget: 100,
            start_date: date("2025-10-01"),
            created_date: date("2025-09-15"),
            category: "Web".into(),
            tasks: vec![
                Task {
                    id: 1,
                    title: "Design".into(),
                    description: String::new(),
                    status: TaskStatus::Completed,
                    deadline: None,
                    priority: Priority::High,
                    assignee: String::new(),
                },
                Task {
                    id: 2,
                    title: "Build".into(),
                    description: String::new(),
                    status: TaskStatus::Pending,
                    deadline: None,
                    priority: Priority::Low,
                    assignee: String::new(),
                },
            ],
        }
    }

    #[test]
    fn project_status_wire_names() {
        assert_eq!("in-progress".parse(), Ok(ProjectStatus::InProgress));
        assert_eq!("Planning".parse(), Ok(ProjectStatus::Planning));
        assert!("done".parse::<ProjectStatus>().is_err());
        assert_eq!(ProjectStatus::InProgress.label(), "In Progress");
    }

    #[test]
    fn completed_count_and_lookup() {
        let p = sample();
        assert_eq!(p.completed_task_count(), 1);
        assert_eq!(p.task(2).map(|t| t.title.as_str()), Some("Build"));
        assert!(p.task(9).is_none());
    }

    #[test]
    fn days_until_deadline_signed() {
        let p = sample();
        assert_eq!(p.days_until_deadline(date("2025-12-21")), Some(10));
        assert_eq!(p.days_until_deadline(date("2026-01-02")), Some(-2));
        let no_deadline = Project {
            deadline: None,
            ..sample()
        };
        assert_eq!(no_deadline.days_until_deadline(date("2025-12-21")), None);
    }

    #[test]
    fn deserializes_camel_case_dates() {
        let json = r#"{
            "id": 7, "name": "Audit", "status": "planning",
            "startDate": "2025-12-01", "createdDate": "2025-10-15"
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.created_date, date("2025-10-15"));
        assert!(p.tasks.is_empty());
        assert_eq!(p.budget, 0);
    }
}
