use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use regex::Regex;

use crate::model::config::Config;
use crate::model::{Portfolio, Project, Task, TaskStatus};
use crate::ops::filter::{self, ProjectFilter, TaskStatusFilter};
use crate::ops::stats::{PortfolioStats, portfolio_stats};
use crate::ops::{project_ops, task_ops};

use super::input;
use super::modal::{Modal, ModalKind};
use super::render;
use super::theme::Theme;
use super::undo::UndoStack;

/// Which tab is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Projects,
    Dashboard,
    /// Only reachable while a project is selected
    Details,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Projects => "All Projects",
            Tab::Dashboard => "Dashboard",
            Tab::Details => "Project Details",
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Modal,
    Confirm,
}

/// A destructive action waiting for y/n
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteProject { project_id: u32 },
    DeleteTask { project_id: u32, task_id: u32 },
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

/// Main application state
pub struct App {
    pub portfolio: Portfolio,
    pub tab: Tab,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Reference date for "days remaining" and new project dates
    pub today: NaiveDate,
    /// Search text and selector state for the projects list
    pub filter: ProjectFilter,
    /// Search text before entering search mode, restored on Esc
    pub search_backup: String,
    /// Cursor into the filtered projects list
    pub list_cursor: usize,
    /// The viewed project, looked up by id on every frame
    pub selected_project: Option<u32>,
    /// Cursor into the visible tasks of the selected project
    pub task_cursor: usize,
    pub task_filter: TaskStatusFilter,
    /// Open create/edit form
    pub modal: Option<Modal>,
    /// Cancelled "new project" form, reopened as-is
    pub project_draft: Option<Modal>,
    /// Cancelled "new task" form, reopened as-is
    pub task_draft: Option<Modal>,
    pub confirm_state: Option<ConfirmState>,
    pub undo_stack: UndoStack,
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(portfolio: Portfolio, config: &Config, today: NaiveDate) -> Self {
        App {
            portfolio,
            tab: Tab::Projects,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            today,
            filter: ProjectFilter::default(),
            search_backup: String::new(),
            list_cursor: 0,
            selected_project: None,
            task_cursor: 0,
            task_filter: TaskStatusFilter::default(),
            modal: None,
            project_draft: None,
            task_draft: None,
            confirm_state: None,
            undo_stack: UndoStack::new(),
            status_message: None,
            show_help: false,
        }
    }

    pub fn filtered_projects(&self) -> Vec<&Project> {
        filter::filter_projects(&self.portfolio, &self.filter)
    }

    pub fn stats(&self) -> PortfolioStats {
        portfolio_stats(&self.portfolio)
    }

    /// Project under the list cursor
    pub fn cursor_project(&self) -> Option<&Project> {
        self.filtered_projects().get(self.list_cursor).copied()
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected_project.and_then(|id| self.portfolio.get(id))
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.selected()
            .map(|p| filter::filter_tasks(p, self.task_filter))
            .unwrap_or_default()
    }

    /// Task under the details cursor
    pub fn cursor_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.task_cursor).copied()
    }

    /// Matcher for highlighting, the same one the list filter uses
    pub fn search_re(&self) -> Option<Regex> {
        self.filter.search_regex()
    }

    fn clamp_cursors(&mut self) {
        let projects = self.filtered_projects().len();
        self.list_cursor = self.list_cursor.min(projects.saturating_sub(1));
        let tasks = self.visible_tasks().len();
        self.task_cursor = self.task_cursor.min(tasks.saturating_sub(1));
    }

    /// Switch tabs. The details tab is ignored with nothing selected.
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == Tab::Details && self.selected().is_none() {
            return;
        }
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        let next = match self.tab {
            Tab::Projects => Tab::Dashboard,
            Tab::Dashboard if self.selected().is_some() => Tab::Details,
            Tab::Dashboard | Tab::Details => Tab::Projects,
        };
        self.tab = next;
    }

    pub fn open_details(&mut self, project_id: u32) {
        if !self.portfolio.contains(project_id) {
            return;
        }
        if self.selected_project != Some(project_id) {
            self.task_cursor = 0;
            self.task_filter = TaskStatusFilter::default();
        }
        self.selected_project = Some(project_id);
        self.tab = Tab::Details;
    }

    pub fn back_to_list(&mut self) {
        self.tab = Tab::Projects;
    }

    pub fn move_list_cursor(&mut self, delta: isize) {
        let len = self.filtered_projects().len();
        self.list_cursor = step(self.list_cursor, delta, len);
    }

    pub fn move_task_cursor(&mut self, delta: isize) {
        let len = self.visible_tasks().len();
        self.task_cursor = step(self.task_cursor, delta, len);
    }

    pub fn set_search(&mut self, text: String) {
        self.filter.search = text;
        self.list_cursor = 0;
        tracing::debug!(search = %self.filter.search, "search changed");
    }

    pub fn cycle_priority_filter(&mut self) {
        self.filter.priority = self.filter.priority.cycle();
        self.list_cursor = 0;
        tracing::debug!(priority = %self.filter.priority, "priority filter changed");
    }

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = self.filter.status.cycle();
        self.list_cursor = 0;
        tracing::debug!(status = %self.filter.status, "status filter changed");
    }

    pub fn clear_filters(&mut self) {
        if self.filter.is_active() {
            self.filter = ProjectFilter::default();
            self.list_cursor = 0;
            tracing::debug!("filters cleared");
        }
    }

    /// all → pending → in-progress → completed → all
    pub fn cycle_task_filter(&mut self) {
        self.task_filter = match self.task_filter {
            filter::Choice::All => filter::Choice::Only(TaskStatus::Pending),
            filter::Choice::Only(TaskStatus::Completed) => filter::Choice::All,
            filter::Choice::Only(s) => filter::Choice::Only(s.next()),
        };
        self.task_cursor = 0;
        tracing::debug!(tasks = %self.task_filter, "task filter changed");
    }

    /// Replace the collection, recording the old one for undo
    fn apply(&mut self, label: &'static str, next: Portfolio) {
        let before = std::mem::replace(&mut self.portfolio, next);
        self.undo_stack.push(label, before);
        self.after_change();
    }

    /// Re-validate every id-based reference after the collection changed
    fn after_change(&mut self) {
        if let Some(id) = self.selected_project
            && !self.portfolio.contains(id)
        {
            self.selected_project = None;
            if self.tab == Tab::Details {
                self.tab = Tab::Projects;
            }
        }
        let portfolio = &self.portfolio;
        if let Some(draft) = &mut self.task_draft {
            draft.retain_project(|id| portfolio.contains(id));
        }
        self.clamp_cursors();
    }

    pub fn set_task_status(&mut self, project_id: u32, task_id: u32, status: TaskStatus) {
        let next = task_ops::set_task_status(&self.portfolio, project_id, task_id, status);
        if next == self.portfolio {
            return;
        }
        tracing::info!(project = project_id, task = task_id, status = %status, "task status changed");
        self.apply("change task status", next);
    }

    /// Space on a task: completed ↔ pending
    pub fn toggle_task(&mut self, project_id: u32, task_id: u32) {
        let Some(task) = self.portfolio.get(project_id).and_then(|p| p.task(task_id)) else {
            return;
        };
        let status = if task.is_completed() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
        self.set_task_status(project_id, task_id, status);
    }

    pub fn cycle_task_status(&mut self, project_id: u32, task_id: u32) {
        let Some(task) = self.portfolio.get(project_id).and_then(|p| p.task(task_id)) else {
            return;
        };
        let status = task.status.next();
        self.set_task_status(project_id, task_id, status);
    }

    pub fn delete_project(&mut self, project_id: u32) {
        let Some(name) = self.portfolio.get(project_id).map(|p| p.name.clone()) else {
            return;
        };
        let next = project_ops::delete_project(&self.portfolio, project_id);
        tracing::info!(project = project_id, "project deleted");
        self.apply("delete project", next);
        self.status_message = Some(format!("deleted \"{}\"", name));
    }

    pub fn delete_task(&mut self, project_id: u32, task_id: u32) {
        let next = task_ops::delete_task(&self.portfolio, project_id, task_id);
        if next == self.portfolio {
            return;
        }
        tracing::info!(project = project_id, task = task_id, "task deleted");
        self.apply("delete task", next);
        self.status_message = Some("deleted task".to_string());
    }

    pub fn undo(&mut self) {
        match self.undo_stack.undo(&self.portfolio) {
            Some((restored, label)) => {
                self.portfolio = restored;
                self.after_change();
                tracing::info!(action = label, "undo");
                self.status_message = Some(format!("undid {}", label));
            }
            None => self.status_message = Some("nothing to undo".to_string()),
        }
    }

    pub fn redo(&mut self) {
        match self.undo_stack.redo(&self.portfolio) {
            Some((restored, label)) => {
                self.portfolio = restored;
                self.after_change();
                tracing::info!(action = label, "redo");
                self.status_message = Some(format!("redid {}", label));
            }
            None => self.status_message = Some("nothing to redo".to_string()),
        }
    }

    pub fn open_new_project(&mut self) {
        let modal = self.project_draft.take().unwrap_or_else(Modal::new_project);
        self.modal = Some(modal);
        self.mode = Mode::Modal;
    }

    /// Open the new-task form; from the details tab the viewed project is
    /// preselected
    pub fn open_new_task(&mut self) {
        if self.portfolio.is_empty() {
            self.status_message = Some("create a project first".to_string());
            return;
        }
        let preselect = match self.tab {
            Tab::Details => self.selected_project,
            _ => None,
        };
        let mut modal = self
            .task_draft
            .take()
            .unwrap_or_else(|| Modal::new_task(preselect));
        if let Some(id) = preselect {
            modal = with_project(modal, id);
        }
        self.modal = Some(modal);
        self.mode = Mode::Modal;
    }

    pub fn open_edit_project(&mut self, project_id: u32) {
        if let Some(project) = self.portfolio.get(project_id) {
            self.modal = Some(Modal::edit_project(project));
            self.mode = Mode::Modal;
        }
    }

    pub fn open_edit_task(&mut self, project_id: u32, task_id: u32) {
        if let Some(task) = self.portfolio.get(project_id).and_then(|p| p.task(task_id)) {
            self.modal = Some(Modal::edit_task(project_id, task));
            self.mode = Mode::Modal;
        }
    }

    /// Close the form. A new-item form keeps its draft for next time.
    pub fn cancel_modal(&mut self) {
        if let Some(mut modal) = self.modal.take() {
            modal.error = None;
            match modal.kind {
                ModalKind::NewProject => self.project_draft = Some(modal),
                ModalKind::NewTask => self.task_draft = Some(modal),
                ModalKind::EditProject { .. } | ModalKind::EditTask { .. } => {}
            }
        }
        self.mode = Mode::Navigate;
    }

    /// Validate and apply the open form. On rejection the form stays open
    /// with the message and the collection is untouched.
    pub fn submit_modal(&mut self) {
        let Some(modal) = self.modal.as_ref() else {
            return;
        };
        let kind = modal.kind;
        let outcome = match kind {
            ModalKind::NewProject => {
                project_ops::create_project(&self.portfolio, &modal.project_form(), self.today)
                    .map(|(next, id)| (next, "create project", format!("created project #{}", id)))
            }
            ModalKind::NewTask => task_ops::create_task(&self.portfolio, &modal.task_form())
                .map(|(next, id)| (next, "add task", format!("added task #{}", id))),
            ModalKind::EditProject { project_id } => {
                project_ops::update_project(&self.portfolio, project_id, &modal.project_patch())
                    .map(|next| (next, "edit project", "saved project".to_string()))
            }
            ModalKind::EditTask {
                project_id,
                task_id,
            } => task_ops::update_task(&self.portfolio, project_id, task_id, &modal.task_patch())
                .map(|next| (next, "edit task", "saved task".to_string())),
        };

        match outcome {
            Ok((next, label, message)) => {
                tracing::info!(action = label, "form submitted");
                self.modal = None;
                match kind {
                    ModalKind::NewProject => self.project_draft = None,
                    ModalKind::NewTask => self.task_draft = None,
                    _ => {}
                }
                self.mode = Mode::Navigate;
                self.apply(label, next);
                self.status_message = Some(message);
            }
            Err(e) => {
                tracing::warn!(form = kind.title(), error = %e, "form rejected");
                if let Some(modal) = self.modal.as_mut() {
                    modal.error = Some(e.to_string());
                }
            }
        }
    }

    pub fn request_delete_project(&mut self, project_id: u32) {
        if let Some(project) = self.portfolio.get(project_id) {
            self.confirm_state = Some(ConfirmState {
                message: format!("Delete project \"{}\"?", project.name),
                action: ConfirmAction::DeleteProject { project_id },
            });
            self.mode = Mode::Confirm;
        }
    }

    pub fn request_delete_task(&mut self, project_id: u32, task_id: u32) {
        if self.portfolio.get(project_id).and_then(|p| p.task(task_id)).is_some() {
            self.confirm_state = Some(ConfirmState {
                message: "Delete this task?".to_string(),
                action: ConfirmAction::DeleteTask {
                    project_id,
                    task_id,
                },
            });
            self.mode = Mode::Confirm;
        }
    }

    pub fn confirm(&mut self) {
        let state = self.confirm_state.take();
        self.mode = Mode::Navigate;
        match state.map(|s| s.action) {
            Some(ConfirmAction::DeleteProject { project_id }) => self.delete_project(project_id),
            Some(ConfirmAction::DeleteTask {
                project_id,
                task_id,
            }) => self.delete_task(project_id, task_id),
            None => {}
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm_state = None;
        self.mode = Mode::Navigate;
    }
}

/// Point a new-task form at `project_id`
fn with_project(mut modal: Modal, project_id: u32) -> Modal {
    for field in &mut modal.fields {
        if let super::modal::FieldValue::Project(selected) = &mut field.value {
            *selected = Some(project_id);
        }
    }
    modal
}

/// Move `cursor` by `delta` within `0..len`, clamping at the ends
fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

/// Run the TUI application
pub fn run(config: Config, portfolio: Portfolio) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let mut app = App::new(portfolio, &config, today);
    tracing::info!(projects = app.portfolio.len(), %today, "starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting TUI");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
