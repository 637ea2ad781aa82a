use web_sys::Document;

pub const DEFAULT_ENDPOINT: &str = "/api/todos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Base path of the task service.
    pub endpoint: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Reads `data-endpoint` from `<body>`, falling back to the default.
    pub fn from_document(document: &Document) -> Self {
        document
            .body()
            .and_then(|body| body.get_attribute("data-endpoint"))
            .filter(|endpoint| !endpoint.trim().is_empty())
            .map(|endpoint| Self { endpoint })
            .unwrap_or_default()
    }
}
