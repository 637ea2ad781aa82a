use std::fmt;
use std::time::Duration;

use shared::{Filter, Stats, Task};

/// How long a notification stays up unless dismissed.
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unset,
    Valid,
    Invalid,
}

/// Element id of a notification, unique per controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// Every DOM side effect the controller performs.
pub trait Page {
    fn title_value(&self) -> String;
    fn description_value(&self) -> String;

    /// Empties both inputs and drops any validity decoration on the title.
    fn clear_form(&self);
    fn set_title_validity(&self, validity: Validity, error: &str);

    /// Marks the filter control whose `data-filter` equals `filter` as
    /// active and every other one inactive.
    fn mark_active_filter(&self, filter: &Filter);

    fn clear_tasks(&self);
    /// Replaces the list contents with `tasks`, in order.
    fn render_tasks(&self, tasks: &[&Task]);
    /// Shows the placeholder and hides the list when `empty`, and the
    /// reverse otherwise.
    fn set_empty_state(&self, empty: bool);
    fn render_stats(&self, stats: &Stats);

    /// Blocking yes/no prompt.
    fn confirm(&self, message: &str) -> bool;

    fn show_alert(&self, id: &AlertId, message: &str, severity: Severity);
    /// Removes a notification. Must be a no-op if it is already gone.
    fn remove_alert(&self, id: &AlertId);
    fn schedule_alert_removal(&self, id: AlertId, after: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_ids_render_as_element_ids() {
        assert_eq!(AlertId(7).to_string(), "alert-7");
    }

    #[test]
    fn severities_match_alert_classes() {
        let all = [Severity::Success, Severity::Danger, Severity::Warning, Severity::Info];
        let names: Vec<_> = all.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["success", "danger", "warning", "info"]);
    }
}
