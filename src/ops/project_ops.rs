use chrono::NaiveDate;

use crate::model::{Portfolio, Priority, Project, ProjectStatus};
use crate::ops::validate::{self, ValidationError};

/// Raw field values from the "new project" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    /// `YYYY-MM-DD`, or blank for no deadline
    pub deadline: String,
    pub priority: Priority,
    /// Whole currency units, or blank for zero
    pub budget: String,
    pub category: String,
}

/// Append a new project built from the form.
/// Returns the new collection and the id assigned to the project.
pub fn create_project(
    portfolio: &Portfolio,
    form: &ProjectForm,
    today: NaiveDate,
) -> Result<(Portfolio, u32), ValidationError> {
    let name = validate::required(&form.name, ValidationError::MissingName)?;
    let deadline = validate::optional_date(&form.deadline)?;
    let budget = validate::budget(&form.budget)?;

    let id = portfolio
        .next_project_id()
        .ok_or(ValidationError::ProjectIdsExhausted)?;
    let project = Project {
        id,
        name,
        description: form.description.trim().to_string(),
        status: ProjectStatus::Planning,
        progress: 0,
        deadline,
        priority: form.priority,
        team: Vec::new(),
        budget,
        start_date: today,
        created_date: today,
        category: form.category.trim().to_string(),
        tasks: Vec::new(),
    };
    Ok((portfolio.with_appended(project), id))
}

/// Partial update of a project's descriptive fields. `None` leaves a field
/// unchanged. Status and progress are derived from tasks and are not edited
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`; blank clears the deadline
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
    pub budget: Option<String>,
    pub category: Option<String>,
    /// Comma-separated member names
    pub team: Option<String>,
}

/// Apply a field edit to one project.
pub fn update_project(
    portfolio: &Portfolio,
    id: u32,
    patch: &ProjectPatch,
) -> Result<Portfolio, ValidationError> {
    let current = portfolio.get(id).ok_or(ValidationError::UnknownProject(id))?;

    let mut updated = current.clone();
    if let Some(name) = &patch.name {
        updated.name = validate::required(name, ValidationError::MissingName)?;
    }
    if let Some(description) = &patch.description {
        updated.description = description.trim().to_string();
    }
    if let Some(deadline) = &patch.deadline {
        updated.deadline = validate::optional_date(deadline)?;
    }
    if let Some(priority) = patch.priority {
        updated.priority = priority;
    }
    if let Some(budget) = &patch.budget {
        updated.budget = validate::budget(budget)?;
    }
    if let Some(category) = &patch.category {
        updated.category = category.trim().to_string();
    }
    if let Some(team) = &patch.team {
        updated.team = validate::team_list(team);
    }

    portfolio
        .with_project(id, |_| updated)
        .ok_or(ValidationError::UnknownProject(id))
}

/// Remove a project together with all of its tasks.
pub fn delete_project(portfolio: &Portfolio, id: u32) -> Portfolio {
    portfolio.without(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::ops::fixtures::*;

    fn two_projects() -> Portfolio {
        portfolio(vec![
            project(1, "Website", vec![task(1, TaskStatus::Completed)]),
            project(3, "Mobile", vec![]),
        ])
    }

    #[test]
    fn create_project_defaults() {
        let pf = two_projects();
        let form = ProjectForm {
            name: " Data Lake ".into(),
            description: "Central store".into(),
            deadline: "2026-06-30".into(),
            priority: Priority::Critical,
            budget: "25000".into(),
            category: "Data".into(),
        };
        let today = day(2026, 10, 16);
        let (after, id) = create_project(&pf, &form, today).unwrap();

        assert_eq!(id, 4);
        assert_eq!(after.len(), 3);
        let p = after.get(4).unwrap();
        assert_eq!(p.name, "Data Lake");
        assert_eq!(p.status, ProjectStatus::Planning);
        assert_eq!(p.progress, 0);
        assert!(p.team.is_empty());
        assert!(p.tasks.is_empty());
        assert_eq!(p.budget, 25000);
        assert_eq!(p.start_date, today);
        assert_eq!(p.created_date, today);
        assert_eq!(p.deadline, Some(day(2026, 6, 30)));
        // Appended at the end
        assert_eq!(after.projects().last().map(|p| p.id), Some(4));
    }

    #[test]
    fn create_project_in_empty_collection_gets_id_one() {
        let form = ProjectForm {
            name: "First".into(),
            ..Default::default()
        };
        let (after, id) = create_project(&Portfolio::default(), &form, day(2026, 1, 1)).unwrap();
        assert_eq!(id, 1);
        assert_eq!(after.get(1).unwrap().budget, 0);
        assert_eq!(after.get(1).unwrap().deadline, None);
    }

    #[test]
    fn create_project_after_max_id_is_rejected() {
        let pf = portfolio(vec![project(u32::MAX, "Last", vec![])]);
        let form = ProjectForm {
            name: "One more".into(),
            ..Default::default()
        };
        assert_eq!(
            create_project(&pf, &form, day(2026, 1, 1)),
            Err(ValidationError::ProjectIdsExhausted)
        );
    }

    #[test]
    fn create_project_without_name_is_rejected() {
        let pf = two_projects();
        let form = ProjectForm {
            name: "   ".into(),
            budget: "100".into(),
            ..Default::default()
        };
        assert_eq!(
            create_project(&pf, &form, day(2026, 1, 1)),
            Err(ValidationError::MissingName)
        );
        assert_eq!(pf.len(), 2);
    }

    #[test]
    fn create_project_rejects_bad_date_and_budget() {
        let pf = two_projects();
        let bad_date = ProjectForm {
            name: "X".into(),
            deadline: "next week".into(),
            ..Default::default()
        };
        assert_eq!(
            create_project(&pf, &bad_date, day(2026, 1, 1)),
            Err(ValidationError::InvalidDate("next week".into()))
        );
        let bad_budget = ProjectForm {
            name: "X".into(),
            budget: "lots".into(),
            ..Default::default()
        };
        assert_eq!(
            create_project(&pf, &bad_budget, day(2026, 1, 1)),
            Err(ValidationError::InvalidBudget("lots".into()))
        );
    }

    #[test]
    fn delete_project_removes_tasks_transitively() {
        let pf = two_projects();
        let after = delete_project(&pf, 1);
        assert!(after.get(1).is_none());
        assert_eq!(after.len(), 1);
        let remaining_tasks: usize = after.iter().map(|p| p.tasks.len()).sum();
        assert_eq!(remaining_tasks, 0);
    }

    #[test]
    fn delete_unknown_project_is_noop() {
        let pf = two_projects();
        assert_eq!(delete_project(&pf, 9), pf);
    }

    #[test]
    fn id_reuse_after_deleting_the_max() {
        let pf = delete_project(&two_projects(), 3);
        assert_eq!(pf.next_project_id(), Some(2));
    }

    #[test]
    fn update_project_fields() {
        let pf = two_projects();
        let patch = ProjectPatch {
            name: Some("Website 2.0".into()),
            deadline: Some(String::new()),
            budget: Some("9000".into()),
            team: Some("Ann Lee, Bo Chen".into()),
            ..Default::default()
        };
        let after = update_project(&pf, 1, &patch).unwrap();
        let p = after.get(1).unwrap();
        assert_eq!(p.name, "Website 2.0");
        assert_eq!(p.deadline, None);
        assert_eq!(p.budget, 9000);
        assert_eq!(p.team, vec!["Ann Lee".to_string(), "Bo Chen".to_string()]);
        // Untouched fields survive
        assert_eq!(p.category, "General");
        assert_eq!(p.tasks.len(), 1);
    }

    #[test]
    fn update_project_rejects_blank_name() {
        let pf = two_projects();
        let patch = ProjectPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            update_project(&pf, 1, &patch),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            update_project(&pf, 8, &ProjectPatch::default()),
            Err(ValidationError::UnknownProject(8))
        );
    }
}
