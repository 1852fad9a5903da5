use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{Portfolio, Project};
use crate::ops::task_ops::progress_percentage;

const SEED: &str = include_str!("../templates/seed.json");

/// Error type for loading a data set
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse data set: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("duplicate project id {0}")]
    DuplicateProjectId(u32),
    #[error("duplicate task id {task_id} in project {project_id}")]
    DuplicateTaskId { project_id: u32, task_id: u32 },
}

/// The embedded seed data set
pub fn builtin_portfolio() -> Result<Portfolio, DataError> {
    parse_portfolio(SEED)
}

/// Load the data set at `path`, or the seed when no path is given
pub fn load_portfolio(path: Option<&Path>) -> Result<Portfolio, DataError> {
    let Some(path) = path else {
        tracing::debug!("loading built-in seed data set");
        return builtin_portfolio();
    };
    let text = fs::read_to_string(path).map_err(|e| DataError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let portfolio = parse_portfolio(&text)?;
    tracing::debug!(path = %path.display(), projects = portfolio.len(), "loaded data set");
    Ok(portfolio)
}

/// Parse a JSON array of projects, check ids, and normalize progress
pub fn parse_portfolio(text: &str) -> Result<Portfolio, DataError> {
    let mut projects: Vec<Project> = serde_json::from_str(text)?;
    check_ids(&projects)?;
    for project in &mut projects {
        let progress = progress_percentage(&project.tasks);
        if progress != project.progress {
            tracing::debug!(
                project = project.id,
                stored = project.progress,
                computed = progress,
                "normalized progress"
            );
            project.progress = progress;
        }
    }
    Ok(Portfolio::new(projects))
}

fn check_ids(projects: &[Project]) -> Result<(), DataError> {
    let mut project_ids = HashSet::new();
    for project in projects {
        if !project_ids.insert(project.id) {
            return Err(DataError::DuplicateProjectId(project.id));
        }
        let mut task_ids = HashSet::new();
        for task in &project.tasks {
            if !task_ids.insert(task.id) {
                return Err(DataError::DuplicateTaskId {
                    project_id: project.id,
                    task_id: task.id,
                });
            }
        }
    }
    Ok(())
}
