use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::model::{ParseError, Portfolio, Priority, Project, ProjectStatus, Task, TaskStatus};

/// Either "all" or a single value to match exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq + Copy> Choice<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => *v == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("all"),
            Choice::Only(v) => v.fmt(f),
        }
    }
}

impl<T: FromStr<Err = ParseError>> FromStr for Choice<T> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Choice::All)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

pub type PriorityFilter = Choice<Priority>;
pub type StatusFilter = Choice<ProjectStatus>;
pub type TaskStatusFilter = Choice<TaskStatus>;

impl PriorityFilter {
    /// all → critical → high → medium → low → all, the order of the selector
    pub fn cycle(self) -> Self {
        match self {
            Choice::All => Choice::Only(Priority::Critical),
            Choice::Only(Priority::Critical) => Choice::Only(Priority::High),
            Choice::Only(Priority::High) => Choice::Only(Priority::Medium),
            Choice::Only(Priority::Medium) => Choice::Only(Priority::Low),
            Choice::Only(Priority::Low) => Choice::All,
        }
    }
}

impl StatusFilter {
    /// all → planning → in-progress → completed → all
    pub fn cycle(self) -> Self {
        match self {
            Choice::All => Choice::Only(ProjectStatus::Planning),
            Choice::Only(ProjectStatus::Planning) => Choice::Only(ProjectStatus::InProgress),
            Choice::Only(ProjectStatus::InProgress) => Choice::Only(ProjectStatus::Completed),
            Choice::Only(ProjectStatus::Completed) | Choice::Only(ProjectStatus::Pending) => {
                Choice::All
            }
        }
    }
}

/// Transient view criteria for the projects list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub search: String,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
}

impl ProjectFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.priority.is_all() || !self.status.is_all()
    }

    /// Case-insensitive literal matcher for the search text, `None` when
    /// empty. The list filter and match highlighting share it, so every
    /// listed project has a highlightable match.
    pub fn search_regex(&self) -> Option<Regex> {
        if self.search.is_empty() {
            return None;
        }
        RegexBuilder::new(&regex::escape(&self.search))
            .case_insensitive(true)
            .build()
            .ok()
    }

    pub fn matches(&self, project: &Project) -> bool {
        self.matches_with(project, self.search_regex().as_ref())
    }

    fn matches_with(&self, project: &Project, search: Option<&Regex>) -> bool {
        search.is_none_or(|re| {
            [&project.name, &project.description, &project.category]
                .iter()
                .any(|field| re.is_match(field))
        }) && self.priority.matches(project.priority)
            && self.status.matches(project.status)
    }
}

/// Projects that pass every criterion, in collection order
pub fn filter_projects<'a>(portfolio: &'a Portfolio, filter: &ProjectFilter) -> Vec<&'a Project> {
    let search = filter.search_regex();
    portfolio
        .iter()
        .filter(|p| filter.matches_with(p, search.as_ref()))
        .collect()
}

/// Tasks of a project with the given status, in list order
pub fn filter_tasks<'a>(project: &'a Project, status: TaskStatusFilter) -> Vec<&'a Task> {
    project
        .tasks
        .iter()
        .filter(|t| status.matches(t.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures::*;

    fn sample() -> Portfolio {
        let mut web = project(1, "Website Redesign", vec![]);
        web.priority = Priority::High;
        web.status = ProjectStatus::InProgress;
        web.category = "Web Development".into();

        let mut api = project(2, "RESTful API Development", vec![]);
        api.priority = Priority::High;
        api.status = ProjectStatus::InProgress;

        let mut mobile = project(3, "Mobile App", vec![]);
        mobile.description = "Integration with the cloud backend api".into();
        mobile.priority = Priority::Medium;
        mobile.status = ProjectStatus::Planning;

        let mut audit = project(4, "Security Audit", vec![]);
        audit.priority = Priority::Critical;
        audit.category = "Security".into();
        audit.status = ProjectStatus::Planning;

        portfolio(vec![web, api, mobile, audit])
    }

    fn ids(projects: &[&Project]) -> Vec<u32> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let pf = sample();
        assert_eq!(ids(&filter_projects(&pf, &ProjectFilter::default())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let pf = sample();
        let f = ProjectFilter {
            search: "API".into(),
            ..Default::default()
        };
        // name match (2) and description match (3)
        assert_eq!(ids(&filter_projects(&pf, &f)), vec![2, 3]);

        let by_category = ProjectFilter {
            search: "security".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&pf, &by_category)), vec![4]);
    }

    #[test]
    fn listing_and_highlighting_agree_beyond_ascii() {
        let pf = portfolio(vec![
            project(1, "\u{130}zmir Office", vec![]),
            project(2, "Stra\u{df}e Redesign", vec![]),
            project(3, "Strasse Depot", vec![]),
        ]);
        for search in ["\u{130}ZMIR", "izmir", "i\u{307}zmir", "STRA\u{1E9E}E", "stra\u{df}e", "STRASSE"] {
            let filter = ProjectFilter {
                search: search.into(),
                ..Default::default()
            };
            let re = filter.search_regex().unwrap();
            let listed = filter_projects(&pf, &filter);
            for p in pf.iter() {
                let highlighted = [&p.name, &p.description, &p.category]
                    .iter()
                    .any(|field| re.is_match(field));
                let is_listed = listed.iter().any(|l| l.id == p.id);
                assert_eq!(is_listed, highlighted, "{:?} against {:?}", search, p.name);
            }
        }

        let filter = |search: &str| ProjectFilter {
            search: search.into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&pf, &filter("\u{130}ZMIR"))), vec![1]);
        assert_eq!(ids(&filter_projects(&pf, &filter("STRA\u{1E9E}E"))), vec![2]);
        assert_eq!(ids(&filter_projects(&pf, &filter("STRASSE"))), vec![3]);
    }

    #[test]
    fn priority_is_exact() {
        let pf = sample();
        let f = ProjectFilter {
            priority: Choice::Only(Priority::High),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&pf, &f)), vec![1, 2]);
    }

    #[test]
    fn filters_compose_with_and() {
        let pf = sample();
        let f = ProjectFilter {
            search: "api".into(),
            priority: Choice::Only(Priority::Medium),
            status: Choice::Only(ProjectStatus::Planning),
        };
        assert_eq!(ids(&filter_projects(&pf, &f)), vec![3]);

        let none = ProjectFilter {
            search: "api".into(),
            priority: Choice::Only(Priority::Critical),
            ..Default::default()
        };
        assert!(filter_projects(&pf, &none).is_empty());
    }

    #[test]
    fn choice_parses_all_and_values() {
        assert_eq!("all".parse::<PriorityFilter>(), Ok(Choice::All));
        assert_eq!("ALL".parse::<StatusFilter>(), Ok(Choice::All));
        assert_eq!(
            "in-progress".parse::<StatusFilter>(),
            Ok(Choice::Only(ProjectStatus::InProgress))
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());
        assert_eq!(Choice::Only(Priority::High).to_string(), "high");
        assert_eq!(PriorityFilter::All.to_string(), "all");
    }

    #[test]
    fn cycles_return_to_all() {
        let mut p = PriorityFilter::All;
        for _ in 0..5 {
            p = p.cycle();
        }
        assert_eq!(p, Choice::All);

        let mut s = StatusFilter::All;
        for _ in 0..4 {
            s = s.cycle();
        }
        assert_eq!(s, Choice::All);
    }

    #[test]
    fn filter_tasks_by_status() {
        let p = project(
            1,
            "P",
            vec![
                task(1, TaskStatus::Completed),
                task(2, TaskStatus::Pending),
                task(3, TaskStatus::Completed),
            ],
        );
        let done: Vec<u32> = filter_tasks(&p, Choice::Only(TaskStatus::Completed))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(done, vec![1, 3]);
        assert_eq!(filter_tasks(&p, Choice::All).len(), 3);
    }
}
