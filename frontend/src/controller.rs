use std::cell::{Cell, RefCell};

use shared::{validation, CreateTaskRequest, Filter};
use uuid::Uuid;

use crate::api::{ApiError, TaskApi};
use crate::config::ControllerConfig;
use crate::console;
use crate::page::{AlertId, Page, Severity, Validity, ALERT_TIMEOUT};

const NETWORK_ERROR: &str = "network error, please retry";

/// Mediates between user input, the task service and the page.
///
/// The service is the only source of truth: every mutation is followed by
/// a fresh fetch of both the list and the stats.
pub struct TaskListController<A, P> {
    config: ControllerConfig,
    api: A,
    page: P,
    current_filter: RefCell<Filter>,
    next_alert: Cell<u64>,
}

impl<A: TaskApi, P: Page> TaskListController<A, P> {
    pub fn new(config: ControllerConfig, api: A, page: P) -> Self {
        Self {
            config,
            api,
            page,
            current_filter: RefCell::new(Filter::All),
            next_alert: Cell::new(0),
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn current_filter(&self) -> Filter {
        self.current_filter.borrow().clone()
    }

    /// Initial load. Event wiring happens separately, once per page.
    pub async fn init(&self) {
        console::log(&format!("task list controller using {}", self.config.endpoint));
        self.refresh().await;
    }

    pub async fn set_filter(&self, filter: Filter) {
        self.page.mark_active_filter(&filter);
        *self.current_filter.borrow_mut() = filter;
        self.load_todos().await;
    }

    pub async fn load_todos(&self) {
        self.page.clear_tasks();

        match self.api.list_tasks().await {
            Ok(tasks) => {
                let filter = self.current_filter();
                let shown = filter.apply(&tasks);
                self.page.render_tasks(&shown);
                self.page.set_empty_state(shown.is_empty());
            }
            Err(e) => {
                self.show_alert("failed to load tasks", Severity::Danger);
                console::error(&format!("Error loading todos: {}", e));
            }
        }
    }

    /// Stats are non-critical: failures are logged, never shown.
    pub async fn load_stats(&self) {
        match self.api.fetch_stats().await {
            Ok(stats) => self.page.render_stats(&stats),
            Err(e) => console::error(&format!("Error loading stats: {}", e)),
        }
    }

    pub async fn add_todo(&self) {
        let title = self.page.title_value().trim().to_string();
        let description = self.page.description_value().trim().to_string();

        if !self.validate_title(&title) {
            return;
        }

        match self.api.create_task(CreateTaskRequest { title, description }).await {
            Ok(task) => {
                console::log(&format!("created task {}", task.id));
                self.page.clear_form();
                self.show_alert("task added", Severity::Success);
                self.refresh().await;
            }
            Err(e @ ApiError::Rejected { .. }) => {
                self.show_alert(&e.user_message("failed to add task"), Severity::Danger);
            }
            Err(e) => {
                self.show_alert(NETWORK_ERROR, Severity::Danger);
                console::error(&format!("Error adding todo: {}", e));
            }
        }
    }

    pub async fn toggle_todo_status(&self, id: Uuid) {
        match self.api.toggle_task(id).await {
            Ok(()) => self.refresh().await,
            Err(ApiError::Rejected { .. }) => {
                self.show_alert("failed to update task status", Severity::Danger);
            }
            Err(e) => {
                self.show_alert(NETWORK_ERROR, Severity::Danger);
                console::error(&format!("Error toggling todo: {}", e));
            }
        }
    }

    pub async fn delete_todo(&self, id: Uuid) {
        if !self.page.confirm("delete this task?") {
            return;
        }

        match self.api.delete_task(id).await {
            Ok(()) => {
                self.show_alert("task deleted", Severity::Success);
                self.refresh().await;
            }
            Err(ApiError::Rejected { .. }) => {
                self.show_alert("failed to delete task", Severity::Danger);
            }
            Err(e) => {
                self.show_alert(NETWORK_ERROR, Severity::Danger);
                console::error(&format!("Error deleting todo: {}", e));
            }
        }
    }

    /// Decorates the title input and returns whether `title` may be
    /// submitted.
    pub fn validate_title(&self, title: &str) -> bool {
        match validation::validate_title(title) {
            Ok(_) => {
                self.page.set_title_validity(Validity::Valid, "");
                true
            }
            Err(e) => {
                self.page.set_title_validity(Validity::Invalid, &e.to_string());
                false
            }
        }
    }

    pub fn show_alert(&self, message: &str, severity: Severity) -> AlertId {
        let id = AlertId(self.next_alert.get());
        self.next_alert.set(id.0 + 1);

        self.page.show_alert(&id, message, severity);
        self.page.schedule_alert_removal(id.clone(), ALERT_TIMEOUT);
        id
    }

    /// List and stats requests go out together; whichever finishes last
    /// writes last.
    async fn refresh(&self) {
        futures::join!(self.load_todos(), self.load_stats());
    }
}
