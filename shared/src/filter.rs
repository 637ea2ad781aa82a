use std::fmt;

use crate::Task;

/// Which subset of the fetched collection is displayed.
///
/// Values other than the three known ones are kept as `Other` and match
/// no task at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
    Other(String),
}

impl Filter {
    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
            Filter::Other(value) => value,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
            Filter::Other(_) => false,
        }
    }

    /// Keeps the matching tasks in server order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Filter::All,
            "active" => Filter::Active,
            "completed" => Filter::Completed,
            other => Filter::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
