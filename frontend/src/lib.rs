use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

pub mod api;
pub mod config;
pub mod console;
pub mod controller;
pub mod dom;
pub mod page;

pub use api::{ApiError, FetchClient, TaskApi};
pub use config::ControllerConfig;
pub use controller::TaskListController;
pub use page::{AlertId, Page, Severity, Validity};

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let config = ControllerConfig::from_document(&document);
    let api = FetchClient::new(&config);
    let controller = Rc::new(TaskListController::new(
        config,
        api,
        dom::DomPage::new(document.clone()),
    ));

    dom::bind_events(&controller, &document)?;
    spawn_local(async move { controller.init().await });
    Ok(())
}
