//! Small builders shared by the ops unit tests.

use chrono::NaiveDate;

use crate::model::{Portfolio, Priority, Project, ProjectStatus, Task, TaskStatus};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn task(id: u32, status: TaskStatus) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: String::new(),
        status,
        deadline: Some(day(2026, 1, 15)),
        priority: Priority::Medium,
        assignee: String::new(),
    }
}

pub fn project(id: u32, name: &str, tasks: Vec<Task>) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        status: ProjectStatus::Planning,
        progress: 0,
        deadline: Some(day(2026, 3, 31)),
        priority: Priority::Medium,
        team: vec![],
        budget: 1000,
        start_date: day(2025, 10, 1),
        created_date: day(2025, 9, 1),
        category: "General".to_string(),
        tasks,
    }
}

pub fn portfolio(projects: Vec<Project>) -> Portfolio {
    Portfolio::new(projects)
}
