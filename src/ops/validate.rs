use chrono::NaiveDate;

/// Reason a submitted form was rejected. The message is shown to the user
/// as-is, so it reads as a sentence fragment rather than a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("project name is required")]
    MissingName,
    #[error("task title is required")]
    MissingTitle,
    #[error("select a project for the task")]
    MissingProject,
    #[error("project {0} no longer exists")]
    UnknownProject(u32),
    #[error("task {task_id} not found in project {project_id}")]
    UnknownTask { project_id: u32, task_id: u32 },
    #[error("deadline is required")]
    MissingDeadline,
    #[error("invalid date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid budget \"{0}\" (expected a whole non-negative number)")]
    InvalidBudget(String),
    #[error("no project ids left")]
    ProjectIdsExhausted,
    #[error("no task ids left in project {0}")]
    TaskIdsExhausted(u32),
}

/// Trimmed copy of a required text field, or `err` when it is blank
pub(crate) fn required(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse an optional `YYYY-MM-DD` field. Blank input means no date.
pub(crate) fn optional_date(value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parse a budget field. Blank input means zero.
pub(crate) fn budget(value: &str) -> Result<u64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidBudget(trimmed.to_string()))
}

/// Split a comma-separated member list, dropping blanks
pub(crate) fn team_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(
            required("  Audit ", ValidationError::MissingName),
            Ok("Audit".to_string())
        );
        assert_eq!(
            required("   ", ValidationError::MissingName),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn optional_date_blank_and_malformed() {
        assert_eq!(optional_date(""), Ok(None));
        assert_eq!(
            optional_date("2026-02-15"),
            Ok(NaiveDate::from_ymd_opt(2026, 2, 15))
        );
        assert_eq!(
            optional_date("15/02/2026"),
            Err(ValidationError::InvalidDate("15/02/2026".into()))
        );
        assert!(optional_date("2026-02-30").is_err());
    }

    #[test]
    fn budget_blank_is_zero() {
        assert_eq!(budget(""), Ok(0));
        assert_eq!(budget(" 45000 "), Ok(45000));
        assert_eq!(budget("-5"), Err(ValidationError::InvalidBudget("-5".into())));
        assert!(budget("12k").is_err());
    }

    #[test]
    fn team_list_splits_on_commas() {
        assert_eq!(
            team_list("Ann Lee, , Bo Chen ,"),
            vec!["Ann Lee".to_string(), "Bo Chen".to_string()]
        );
        assert!(team_list("").is_empty());
    }
}
