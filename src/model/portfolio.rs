use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::project::Project;

/// The ordered collection of projects for a session.
///
/// A `Portfolio` is a value: operations never mutate it in place, they build
/// a replacement. Projects are held behind `Arc` so a replacement shares
/// every project the operation did not touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    projects: Vec<Arc<Project>>,
}

impl Portfolio {
    pub fn new(projects: Vec<Project>) -> Self {
        Portfolio {
            projects: projects.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Index of a project in display order
    pub fn position(&self, id: u32) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// One greater than the largest project id, or 1 when empty.
    /// `None` once the largest id is `u32::MAX`.
    pub fn next_project_id(&self) -> Option<u32> {
        self.iter()
            .map(|p| p.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
    }

    /// A new portfolio with `project` appended
    pub fn with_appended(&self, project: Project) -> Portfolio {
        let mut projects = self.projects.clone();
        projects.push(Arc::new(project));
        Portfolio { projects }
    }

    /// A new portfolio with the project `id` rebuilt by `f`.
    /// Returns `None` when no project has that id.
    pub fn with_project<F>(&self, id: u32, f: F) -> Option<Portfolio>
    where
        F: FnOnce(&Project) -> Project,
    {
        let idx = self.position(id)?;
        let mut projects = self.projects.clone();
        projects[idx] = Arc::new(f(&self.projects[idx]));
        Some(Portfolio { projects })
    }

    /// A new portfolio without the project `id`
    pub fn without(&self, id: u32) -> Portfolio {
        Portfolio {
            projects: self
                .projects
                .iter()
                .filter(|p| p.id != id)
                .cloned()
                .collect(),
        }
    }
}
