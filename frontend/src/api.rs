use async_trait::async_trait;
use shared::{CreateTaskRequest, Stats, Task};
use thiserror::Error;
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::config::ControllerConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// A response arrived but its body was not what we expected.
    #[error("invalid response: {0}")]
    Parse(String),
    /// Non-ok status with a JSON body.
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, message: Option<String> },
}

impl ApiError {
    /// Text shown to the user for a rejected request: the server's own
    /// message if it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// The REST contract the controller consumes.
#[async_trait(?Send)]
pub trait TaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn fetch_stats(&self) -> Result<Stats, ApiError>;
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ApiError>;
    async fn toggle_task(&self, id: Uuid) -> Result<(), ApiError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError>;
}

/// `TaskApi` over the browser's `fetch`.
pub struct FetchClient {
    endpoint: String,
}

impl FetchClient {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&self.url(path), &opts)
            .map_err(|_| ApiError::Transport("failed to create request".to_string()))?;

        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|_| ApiError::Transport("failed to set header".to_string()))?;
        }

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("no window available".to_string()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::Transport(format!("{:?}", e)))?
            .into();

        Ok(response)
    }

    async fn read_text(response: &Response) -> Result<String, ApiError> {
        let text_promise = response
            .text()
            .map_err(|_| ApiError::Parse("failed to read response".to_string()))?;

        JsFuture::from(text_promise)
            .await
            .map_err(|_| ApiError::Parse("failed to get text".to_string()))?
            .as_string()
            .ok_or_else(|| ApiError::Parse("response body is not a string".to_string()))
    }

    /// Reads a JSON body, turning a non-ok status into `Rejected`.
    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = Self::read_text(&response).await?;

        if !response.ok() {
            let body: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| ApiError::Parse(format!("failed to parse JSON: {}", e)))?;
            return Err(ApiError::Rejected {
                status: response.status(),
                message: body.get("error").and_then(|e| e.as_str()).map(str::to_string),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Parse(format!("failed to parse JSON: {}", e)))
    }

    fn check_status(response: &Response) -> Result<(), ApiError> {
        if response.ok() {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                status: response.status(),
                message: None,
            })
        }
    }
}

#[async_trait(?Send)]
impl TaskApi for FetchClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.send("GET", "", None).await?;
        Self::read_json(response).await
    }

    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        let response = self.send("GET", "/stats", None).await?;
        Self::read_json(response).await
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ApiError> {
        let body = serde_json::to_string(&request)
            .map_err(|e| ApiError::Transport(format!("failed to serialize request: {}", e)))?;
        let response = self.send("POST", "", Some(body)).await?;
        Self::read_json(response).await
    }

    async fn toggle_task(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.send("PATCH", &format!("/{}/toggle", id), None).await?;
        Self::check_status(&response)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.send("DELETE", &format!("/{}", id), None).await?;
        Self::check_status(&response)
    }
}
