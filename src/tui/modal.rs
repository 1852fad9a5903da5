use crate::model::{Priority, Project, Task, TaskStatus};
use crate::ops::project_ops::{ProjectForm, ProjectPatch};
use crate::ops::task_ops::{TaskForm, TaskPatch};
use crate::util::unicode;

/// Which form the modal is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    NewProject,
    NewTask,
    EditProject { project_id: u32 },
    EditTask { project_id: u32, task_id: u32 },
}

impl ModalKind {
    pub fn title(self) -> &'static str {
        match self {
            ModalKind::NewProject => "Create New Project",
            ModalKind::NewTask => "Add New Task",
            ModalKind::EditProject { .. } => "Edit Project",
            ModalKind::EditTask { .. } => "Edit Task",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            ModalKind::NewProject => "Create Project",
            ModalKind::NewTask => "Add Task",
            ModalKind::EditProject { .. } | ModalKind::EditTask { .. } => "Save",
        }
    }
}

/// Identifies a form field independently of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Project,
    Name,
    Title,
    Description,
    Deadline,
    Priority,
    Status,
    Budget,
    Category,
    Team,
    Assignee,
}

/// Current value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text with a byte-offset cursor
    Text { text: String, cursor: usize },
    Priority(Priority),
    Status(TaskStatus),
    /// Parent project for a new task; `None` until one is chosen
    Project(Option<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: FieldId,
    pub label: &'static str,
    pub required: bool,
    pub placeholder: &'static str,
    pub value: FieldValue,
}

impl Field {
    fn text(id: FieldId, label: &'static str, required: bool, placeholder: &'static str) -> Self {
        Field {
            id,
            label,
            required,
            placeholder,
            value: FieldValue::Text {
                text: String::new(),
                cursor: 0,
            },
        }
    }

    fn with_text(mut self, value: &str) -> Self {
        self.value = FieldValue::Text {
            text: value.to_string(),
            cursor: value.len(),
        };
        self
    }

    fn choice(id: FieldId, label: &'static str, value: FieldValue) -> Self {
        Field {
            id,
            label,
            required: id == FieldId::Project,
            placeholder: "",
            value,
        }
    }

    pub fn text_value(&self) -> &str {
        match &self.value {
            FieldValue::Text { text, .. } => text,
            _ => "",
        }
    }
}

/// Transient form state for the create/edit modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: ModalKind,
    pub fields: Vec<Field>,
    /// Index of the focused field
    pub focus: usize,
    /// Validation message from the last rejected submit
    pub error: Option<String>,
}

fn date_text(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl Modal {
    fn new(kind: ModalKind, fields: Vec<Field>) -> Self {
        Modal {
            kind,
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn new_project() -> Self {
        Self::new(
            ModalKind::NewProject,
            vec![
                Field::text(FieldId::Name, "Project Name", true, "Enter project name"),
                Field::text(FieldId::Description, "Description", false, ""),
                Field::text(FieldId::Deadline, "Deadline", false, "YYYY-MM-DD"),
                Field::choice(FieldId::Priority, "Priority", FieldValue::Priority(Priority::Medium)),
                Field::text(FieldId::Budget, "Budget ($)", false, "0"),
                Field::text(FieldId::Category, "Category", false, "e.g., Web Development"),
            ],
        )
    }

    /// New-task form, optionally with the parent already chosen
    pub fn new_task(project_id: Option<u32>) -> Self {
        Self::new(
            ModalKind::NewTask,
            vec![
                Field::choice(FieldId::Project, "Project", FieldValue::Project(project_id)),
                Field::text(FieldId::Title, "Task Title", true, "Enter task title"),
                Field::text(FieldId::Description, "Description", false, ""),
                Field::text(FieldId::Deadline, "Deadline", true, "YYYY-MM-DD"),
                Field::choice(FieldId::Priority, "Priority", FieldValue::Priority(Priority::Medium)),
            ],
        )
    }

    pub fn edit_project(project: &Project) -> Self {
        Self::new(
            ModalKind::EditProject {
                project_id: project.id,
            },
            vec![
                Field::text(FieldId::Name, "Project Name", true, "").with_text(&project.name),
                Field::text(FieldId::Description, "Description", false, "")
                    .with_text(&project.description),
                Field::text(FieldId::Deadline, "Deadline", false, "YYYY-MM-DD")
                    .with_text(&date_text(project.deadline)),
                Field::choice(FieldId::Priority, "Priority", FieldValue::Priority(project.priority)),
                Field::text(FieldId::Budget, "Budget ($)", false, "0")
                    .with_text(&project.budget.to_string()),
                Field::text(FieldId::Category, "Category", false, "").with_text(&project.category),
                Field::text(FieldId::Team, "Team", false, "Comma-separated names")
                    .with_text(&project.team.join(", ")),
            ],
        )
    }

    pub fn edit_task(project_id: u32, task: &Task) -> Self {
        Self::new(
            ModalKind::EditTask {
                project_id,
                task_id: task.id,
            },
            vec![
                Field::text(FieldId::Title, "Task Title", true, "").with_text(&task.title),
                Field::text(FieldId::Description, "Description", false, "")
                    .with_text(&task.description),
                Field::text(FieldId::Deadline, "Deadline", true, "YYYY-MM-DD")
                    .with_text(&date_text(task.deadline)),
                Field::choice(FieldId::Priority, "Priority", FieldValue::Priority(task.priority)),
                Field::choice(FieldId::Status, "Status", FieldValue::Status(task.status)),
                Field::text(FieldId::Assignee, "Assignee", false, "").with_text(&task.assignee),
            ],
        )
    }

    pub fn focused(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn focused_value_mut(&mut self) -> Option<&mut FieldValue> {
        self.fields.get_mut(self.focus).map(|f| &mut f.value)
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(FieldValue::Text { text, cursor }) = self.focused_value_mut() {
            text.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(FieldValue::Text { text, cursor }) = self.focused_value_mut()
            && let Some(prev) = unicode::prev_grapheme_boundary(text, *cursor)
        {
            text.replace_range(prev..*cursor, "");
            *cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(FieldValue::Text { text, cursor }) = self.focused_value_mut()
            && let Some(next) = unicode::next_grapheme_boundary(text, *cursor)
        {
            text.replace_range(*cursor..next, "");
        }
    }

    pub fn cursor_home(&mut self) {
        if let Some(FieldValue::Text { cursor, .. }) = self.focused_value_mut() {
            *cursor = 0;
        }
    }

    pub fn cursor_end(&mut self) {
        if let Some(FieldValue::Text { text, cursor }) = self.focused_value_mut() {
            *cursor = text.len();
        }
    }

    /// ← on a text field moves the cursor; on a choice field it picks the
    /// previous option. `project_ids` lists the selectable parents in order.
    pub fn left(&mut self, project_ids: &[u32]) {
        match self.focused_value_mut() {
            Some(FieldValue::Text { text, cursor }) => {
                if let Some(prev) = unicode::prev_grapheme_boundary(text, *cursor) {
                    *cursor = prev;
                }
            }
            Some(FieldValue::Priority(p)) => *p = p.prev(),
            Some(FieldValue::Status(s)) => *s = s.prev(),
            Some(FieldValue::Project(selected)) => {
                *selected = step_project(*selected, project_ids, false)
            }
            None => {}
        }
    }

    pub fn right(&mut self, project_ids: &[u32]) {
        match self.focused_value_mut() {
            Some(FieldValue::Text { text, cursor }) => {
                if let Some(next) = unicode::next_grapheme_boundary(text, *cursor) {
                    *cursor = next;
                }
            }
            Some(FieldValue::Priority(p)) => *p = p.next(),
            Some(FieldValue::Status(s)) => *s = s.next(),
            Some(FieldValue::Project(selected)) => {
                *selected = step_project(*selected, project_ids, true)
            }
            None => {}
        }
    }

    /// Drop a parent selection that no longer exists
    pub fn retain_project(&mut self, exists: impl Fn(u32) -> bool) {
        for field in &mut self.fields {
            if let FieldValue::Project(selected) = &mut field.value
                && selected.is_some_and(|id| !exists(id))
            {
                *selected = None;
            }
        }
    }

    fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn text(&self, id: FieldId) -> String {
        self.field(id).map(|f| f.text_value().to_string()).unwrap_or_default()
    }

    fn priority(&self) -> Priority {
        match self.field(FieldId::Priority).map(|f| &f.value) {
            Some(FieldValue::Priority(p)) => *p,
            _ => Priority::default(),
        }
    }

    pub fn selected_project(&self) -> Option<u32> {
        match self.field(FieldId::Project).map(|f| &f.value) {
            Some(FieldValue::Project(selected)) => *selected,
            _ => None,
        }
    }

    fn status(&self) -> Option<TaskStatus> {
        match self.field(FieldId::Status).map(|f| &f.value) {
            Some(FieldValue::Status(s)) => Some(*s),
            _ => None,
        }
    }

    pub fn project_form(&self) -> ProjectForm {
        ProjectForm {
            name: self.text(FieldId::Name),
            description: self.text(FieldId::Description),
            deadline: self.text(FieldId::Deadline),
            priority: self.priority(),
            budget: self.text(FieldId::Budget),
            category: self.text(FieldId::Category),
        }
    }

    pub fn task_form(&self) -> TaskForm {
        TaskForm {
            project_id: self.selected_project(),
            title: self.text(FieldId::Title),
            description: self.text(FieldId::Description),
            deadline: self.text(FieldId::Deadline),
            priority: self.priority(),
        }
    }

    pub fn project_patch(&self) -> ProjectPatch {
        ProjectPatch {
            name: Some(self.text(FieldId::Name)),
            description: Some(self.text(FieldId::Description)),
            deadline: Some(self.text(FieldId::Deadline)),
            priority: Some(self.priority()),
            budget: Some(self.text(FieldId::Budget)),
            category: Some(self.text(FieldId::Category)),
            team: Some(self.text(FieldId::Team)),
        }
    }

    pub fn task_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.text(FieldId::Title)),
            description: Some(self.text(FieldId::Description)),
            deadline: Some(self.text(FieldId::Deadline)),
            priority: Some(self.priority()),
            assignee: Some(self.text(FieldId::Assignee)),
            status: self.status(),
        }
    }
}

/// Move a project selection one step through `ids`, wrapping through "none"
fn step_project(selected: Option<u32>, ids: &[u32], forward: bool) -> Option<u32> {
    if ids.is_empty() {
        return None;
    }
    let pos = selected.and_then(|id| ids.iter().position(|&i| i == id));
    match (pos, forward) {
        (None, true) => ids.first().copied(),
        (None, false) => ids.last().copied(),
        (Some(i), true) => ids.get(i + 1).copied(),
        (Some(0), false) => None,
        (Some(i), false) => ids.get(i - 1).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures::*;

    fn type_str(modal: &mut Modal, s: &str) {
        for c in s.chars() {
            modal.insert_char(c);
        }
    }

    #[test]
    fn new_project_form_collects_fields() {
        let mut m = Modal::new_project();
        type_str(&mut m, "Data Lake");
        m.focus_next();
        m.focus_next();
        type_str(&mut m, "2026-06-30");
        m.focus_next();
        m.right(&[]); // medium → high
        m.focus_next();
        type_str(&mut m, "5000");

        let form = m.project_form();
        assert_eq!(form.name, "Data Lake");
        assert_eq!(form.deadline, "2026-06-30");
        assert_eq!(form.priority, Priority::High);
        assert_eq!(form.budget, "5000");
        assert_eq!(form.category, "");
    }

    #[test]
    fn text_editing_moves_by_grapheme() {
        let mut m = Modal::new_project();
        type_str(&mut m, "cafe\u{0301}s");
        m.left(&[]);
        m.backspace(); // removes "é"
        assert_eq!(m.project_form().name, "cafs");
        m.cursor_home();
        m.delete_forward();
        assert_eq!(m.project_form().name, "afs");
        m.cursor_end();
        m.insert_char('!');
        assert_eq!(m.project_form().name, "afs!");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut m = Modal::new_task(None);
        m.focus_prev();
        assert_eq!(m.focused().map(|f| f.id), Some(FieldId::Priority));
        m.focus_next();
        assert_eq!(m.focused().map(|f| f.id), Some(FieldId::Project));
    }

    #[test]
    fn project_choice_cycles_through_none() {
        let mut m = Modal::new_task(None);
        let ids = [1, 4, 5];
        m.right(&ids);
        assert_eq!(m.selected_project(), Some(1));
        m.right(&ids);
        m.right(&ids);
        assert_eq!(m.selected_project(), Some(5));
        m.right(&ids);
        assert_eq!(m.selected_project(), None);
        m.left(&ids);
        assert_eq!(m.selected_project(), Some(5));
        assert_eq!(m.task_form().project_id, Some(5));
    }

    #[test]
    fn retain_project_clears_deleted_parent() {
        let mut m = Modal::new_task(Some(3));
        m.retain_project(|id| id != 3);
        assert_eq!(m.selected_project(), None);
    }

    #[test]
    fn edit_variants_are_prefilled() {
        let mut p = project(2, "Mobile", vec![task(1, TaskStatus::InProgress)]);
        p.team = vec!["Ann Lee".into(), "Bo Chen".into()];
        let m = Modal::edit_project(&p);
        let patch = m.project_patch();
        assert_eq!(patch.name.as_deref(), Some("Mobile"));
        assert_eq!(patch.deadline.as_deref(), Some("2026-03-31"));
        assert_eq!(patch.budget.as_deref(), Some("1000"));
        assert_eq!(patch.team.as_deref(), Some("Ann Lee, Bo Chen"));

        let mut t = Modal::edit_task(2, &p.tasks[0]);
        assert_eq!(t.kind, ModalKind::EditTask { project_id: 2, task_id: 1 });
        t.focus = 4;
        t.right(&[]);
        let patch = t.task_patch();
        assert_eq!(patch.status, Some(TaskStatus::Completed));
        assert_eq!(patch.title.as_deref(), Some("Task 1"));
    }
}
