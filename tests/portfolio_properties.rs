//! Invariants that hold across the built-in data set and every mutation.

use std::collections::HashSet;

use docket::io::data_io::{builtin_portfolio, parse_portfolio};
use docket::model::{Portfolio, ProjectStatus, TaskStatus};
use docket::ops::ValidationError;
use docket::ops::project_ops::{ProjectForm, create_project, delete_project};
use docket::ops::stats::portfolio_stats;
use docket::ops::task_ops::{
    TaskForm, create_task, delete_task, progress_percentage, set_task_status,
};
use pretty_assertions::assert_eq;

fn seed() -> Portfolio {
    builtin_portfolio().unwrap()
}

/// Every project's stored progress matches its tasks
fn assert_progress_consistent(portfolio: &Portfolio) {
    for project in portfolio.iter() {
        assert_eq!(
            project.progress,
            progress_percentage(&project.tasks),
            "progress of project {}",
            project.id
        );
    }
}

#[test]
fn seed_ids_are_unique() {
    let portfolio = seed();
    let ids: HashSet<u32> = portfolio.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), portfolio.len());
    for project in portfolio.iter() {
        let task_ids: HashSet<u32> = project.tasks.iter().map(|t| t.id).collect();
        assert_eq!(task_ids.len(), project.tasks.len(), "project {}", project.id);
    }
}

#[test]
fn seed_progress_is_normalized_on_load() {
    let portfolio = seed();
    assert_progress_consistent(&portfolio);
    let progress: Vec<u8> = portfolio.iter().map(|p| p.progress).collect();
    assert_eq!(progress, vec![17, 17, 17, 17, 0]);
}

#[test]
fn completing_a_task_moves_progress_and_stats() {
    let portfolio = seed();
    let next = set_task_status(&portfolio, 1, 2, TaskStatus::Completed);
    assert_progress_consistent(&next);
    assert_eq!(next.get(1).unwrap().progress, 33);

    let before = portfolio_stats(&portfolio);
    let after = portfolio_stats(&next);
    assert_eq!(after.completed_tasks, before.completed_tasks + 1);
    assert_eq!(after.total_tasks, before.total_tasks);

    // The original value is untouched
    assert_eq!(portfolio.get(1).unwrap().progress, 17);
}

#[test]
fn completing_every_task_completes_the_project() {
    let mut portfolio = seed();
    let ids: Vec<u32> = portfolio.get(5).unwrap().tasks.iter().map(|t| t.id).collect();
    for id in ids {
        portfolio = set_task_status(&portfolio, 5, id, TaskStatus::Completed);
    }
    let project = portfolio.get(5).unwrap();
    assert_eq!(project.progress, 100);
    assert_eq!(project.status, ProjectStatus::Completed);
    assert_eq!(portfolio_stats(&portfolio).completed, 1);
}

#[test]
fn deleting_every_task_leaves_zero_progress() {
    let mut portfolio = seed();
    let ids: Vec<u32> = portfolio.get(1).unwrap().tasks.iter().map(|t| t.id).collect();
    for id in ids {
        portfolio = delete_task(&portfolio, 1, id);
        assert_progress_consistent(&portfolio);
    }
    let project = portfolio.get(1).unwrap();
    assert!(project.tasks.is_empty());
    assert_eq!(project.progress, 0);
}

#[test]
fn deleting_a_project_removes_its_tasks_from_stats() {
    let portfolio = seed();
    let next = delete_project(&portfolio, 5);
    assert!(next.get(5).is_none());

    let stats = portfolio_stats(&next);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.total_tasks, 24);
    assert_eq!(stats.total_budget, 465_000 - 150_000);
}

#[test]
fn deleting_everything_gives_empty_stats() {
    let mut portfolio = seed();
    for id in 1..=5 {
        portfolio = delete_project(&portfolio, id);
    }
    assert!(portfolio.is_empty());
    let stats = portfolio_stats(&portfolio);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.average_progress, 0);
    assert_eq!(stats.completion_rate(), 0);
    assert_eq!(stats.task_completion_rate(), 0);
}

#[test]
fn loaded_max_ids_reject_further_creates() {
    let portfolio = parse_portfolio(
        r#"[{"id": 4294967295, "name": "big", "startDate": "2025-01-01",
             "createdDate": "2025-01-01",
             "tasks": [{"id": 4294967295, "title": "last", "deadline": "2025-02-01"}]}]"#,
    )
    .unwrap();

    let form = ProjectForm {
        name: "x".into(),
        ..Default::default()
    };
    let today = chrono::NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
    assert_eq!(
        create_project(&portfolio, &form, today),
        Err(ValidationError::ProjectIdsExhausted)
    );

    let form = TaskForm {
        project_id: Some(u32::MAX),
        title: "y".into(),
        deadline: "2025-12-01".into(),
        ..Default::default()
    };
    assert_eq!(
        create_task(&portfolio, &form),
        Err(ValidationError::TaskIdsExhausted(u32::MAX))
    );
}

#[test]
fn huge_budgets_cap_the_total() {
    let portfolio = parse_portfolio(
        r#"[{"id": 1, "name": "a", "budget": 18446744073709551615,
             "startDate": "2025-01-01", "createdDate": "2025-01-01"},
            {"id": 2, "name": "b", "budget": 1,
             "startDate": "2025-01-01", "createdDate": "2025-01-01"}]"#,
    )
    .unwrap();
    assert_eq!(portfolio_stats(&portfolio).total_budget, u64::MAX);
}
