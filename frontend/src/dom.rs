use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use shared::render::{task_item_class, task_item_html};
use shared::{Filter, Stats, Task};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement};

use crate::api::TaskApi;
use crate::console;
use crate::controller::TaskListController;
use crate::page::{AlertId, Page, Severity, Validity};

const HIDDEN: &str = "d-none";

/// `Page` over the real document, addressed by the element ids of the
/// task list markup.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            console::error(&format!("missing element #{}", id));
        }
        element
    }

    fn field_value(&self, id: &str) -> String {
        let Some(element) = self.element(id) else {
            return String::new();
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => input.value(),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .map(|area| area.value())
                .unwrap_or_default(),
        }
    }

    fn clear_field(&self, id: &str) {
        let Some(element) = self.element(id) else {
            return;
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => input.set_value(""),
            Err(element) => {
                if let Ok(area) = element.dyn_into::<HtmlTextAreaElement>() {
                    area.set_value("");
                }
            }
        }
    }

    fn set_text(&self, id: &str, value: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(value));
        }
    }

    fn filter_controls(&self) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all("[data-filter]") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn build_task_item(&self, task: &Task) -> Result<Element, JsValue> {
        let item = self.document.create_element("li")?;
        item.set_class_name(&task_item_class(task));
        item.set_inner_html(&task_item_html(task, Utc::now()));
        Ok(item)
    }

    fn build_alert(&self, id: &AlertId, message: &str, severity: Severity) -> Result<Element, JsValue> {
        let alert = self.document.create_element("div")?;
        alert.set_id(&id.to_string());
        alert.set_class_name(&format!(
            "alert alert-{} alert-dismissible fade show",
            severity.as_str()
        ));
        alert.set_attribute("role", "alert")?;
        alert.set_text_content(Some(message));

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert")?;
        alert.append_child(&close)?;
        Ok(alert)
    }
}

impl Page for DomPage {
    fn title_value(&self) -> String {
        self.field_value("title")
    }

    fn description_value(&self) -> String {
        self.field_value("description")
    }

    fn clear_form(&self) {
        self.clear_field("title");
        self.clear_field("description");
        if let Some(title) = self.element("title") {
            report(title.class_list().remove_2("is-valid", "is-invalid"), "clear title validity");
        }
    }

    fn set_title_validity(&self, validity: Validity, error: &str) {
        if let Some(title) = self.element("title") {
            let classes = title.class_list();
            let updated = match validity {
                Validity::Valid => classes
                    .remove_1("is-invalid")
                    .and_then(|_| classes.add_1("is-valid")),
                Validity::Invalid => classes
                    .remove_1("is-valid")
                    .and_then(|_| classes.add_1("is-invalid")),
                Validity::Unset => classes.remove_2("is-valid", "is-invalid"),
            };
            report(updated, "set title validity");
        }
        self.set_text("titleError", error);
    }

    fn mark_active_filter(&self, filter: &Filter) {
        for control in self.filter_controls() {
            let classes = control.class_list();
            report(classes.remove_1("active"), "clear active filter");
            if control.get_attribute("data-filter").as_deref() == Some(filter.as_str()) {
                report(classes.add_1("active"), "mark active filter");
            }
        }
    }

    fn clear_tasks(&self) {
        if let Some(list) = self.element("todoList") {
            list.set_inner_html("");
        }
    }

    fn render_tasks(&self, tasks: &[&Task]) {
        let Some(list) = self.element("todoList") else {
            return;
        };
        list.set_inner_html("");

        for task in tasks {
            let appended = self
                .build_task_item(task)
                .and_then(|item| list.append_child(&item));
            if let Err(e) = appended {
                console::error(&format!("failed to render task {}: {:?}", task.id, e));
            }
        }
    }

    fn set_empty_state(&self, empty: bool) {
        let (Some(placeholder), Some(list)) = (self.element("emptyState"), self.element("todoList")) else {
            return;
        };
        let (show, hide) = if empty { (placeholder, list) } else { (list, placeholder) };
        report(show.class_list().remove_1(HIDDEN), "show empty state");
        report(hide.class_list().add_1(HIDDEN), "hide empty state");
    }

    fn render_stats(&self, stats: &Stats) {
        self.set_text("totalCount", &stats.total.to_string());
        self.set_text("activeCount", &stats.active.to_string());
        self.set_text("completedCount", &stats.completed.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn show_alert(&self, id: &AlertId, message: &str, severity: Severity) {
        let Some(container) = self.element("alertContainer") else {
            return;
        };
        let shown = self
            .build_alert(id, message, severity)
            .and_then(|alert| container.append_child(&alert));
        if let Err(e) = shown {
            console::error(&format!("failed to show alert: {:?}", e));
        }
    }

    /// A no-op when the alert was already dismissed, so the removal timer
    /// can fire after an early click.
    fn remove_alert(&self, id: &AlertId) {
        if let Some(alert) = self.document.get_element_by_id(&id.to_string()) {
            alert.remove();
        }
    }

    fn schedule_alert_removal(&self, id: AlertId, after: Duration) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let document = self.document.clone();
        let callback = Closure::once_into_js(move || {
            DomPage::new(document).remove_alert(&id);
        });
        let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            after.as_millis() as i32,
        );
        if let Err(e) = scheduled {
            console::error(&format!("failed to schedule alert removal: {:?}", e));
        }
    }
}

fn report(result: Result<(), JsValue>, action: &str) {
    if let Err(e) = result {
        console::error(&format!("failed to {}: {:?}", action, e));
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn task_id(element: &Element) -> Option<Uuid> {
    element
        .get_attribute("data-id")
        .and_then(|id| Uuid::parse_str(&id).ok())
}

fn required(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

/// Wires every listener the controller needs. Call once per page.
///
/// Task rows are rebuilt on every render, so their checkbox and delete
/// events are delegated to the list container.
pub fn bind_events<A>(controller: &Rc<TaskListController<A, DomPage>>, document: &Document) -> Result<(), JsValue>
where
    A: TaskApi + 'static,
{
    let ctrl = Rc::clone(controller);
    listen(required(document, "addTodoForm")?.as_ref(), "submit", move |event| {
        event.prevent_default();
        let ctrl = Rc::clone(&ctrl);
        spawn_local(async move { ctrl.add_todo().await });
    })?;

    let nodes = document.query_selector_all("[data-filter]")?;
    for node in (0..nodes.length()).filter_map(|i| nodes.item(i)) {
        let ctrl = Rc::clone(controller);
        listen(&node, "click", move |event| {
            let value = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|control| control.get_attribute("data-filter"))
                .unwrap_or_default();
            let ctrl = Rc::clone(&ctrl);
            spawn_local(async move { ctrl.set_filter(Filter::from(value.as_str())).await });
        })?;
    }

    let ctrl = Rc::clone(controller);
    listen(required(document, "title")?.as_ref(), "input", move |event| {
        if let Some(input) = event.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            ctrl.validate_title(&input.value());
        }
    })?;

    let list = required(document, "todoList")?;

    let ctrl = Rc::clone(controller);
    listen(&list, "change", move |event| {
        let Some(checkbox) = event_element(&event).filter(|el| el.class_list().contains("form-check-input")) else {
            return;
        };
        if let Some(id) = task_id(&checkbox) {
            let ctrl = Rc::clone(&ctrl);
            spawn_local(async move { ctrl.toggle_todo_status(id).await });
        }
    })?;

    let ctrl = Rc::clone(controller);
    listen(&list, "click", move |event| {
        let Some(button) = event_element(&event).and_then(|el| el.closest(".delete-btn").ok().flatten()) else {
            return;
        };
        if let Some(id) = task_id(&button) {
            let ctrl = Rc::clone(&ctrl);
            spawn_local(async move { ctrl.delete_todo(id).await });
        }
    })?;

    listen(required(document, "alertContainer")?.as_ref(), "click", |event| {
        let alert = event_element(&event)
            .filter(|el| el.class_list().contains("btn-close"))
            .and_then(|close| close.closest(".alert").ok().flatten());
        if let Some(alert) = alert {
            alert.remove();
        }
    })?;

    Ok(())
}
