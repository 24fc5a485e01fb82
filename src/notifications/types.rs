// Output records handed to host surfaces

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title of every datasource workflow notification
pub const NOTIFICATION_TITLE: &str = "Datasource Item in Workflow";

/// Name the save-time validator reports under
pub const VALIDATOR_NAME: &str = "Component Workflow State";

/// Kind of a notification record. Datasource workflow notifications are
/// advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Warning,
}

/// One selectable action attached to a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOption {
    pub label: String,
    /// Opaque token the host uses to run the action
    pub action_token: String,
}

/// A warning about one datasource item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub title: String,
    pub text: String,
    pub icon: String,
    #[serde(default)]
    pub kind: NotificationKind,
    pub options: Vec<NotificationOption>,
}

/// Severity of the save-time validation, capped at `Warning` so the gate
/// never blocks a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Valid,
    Warning,
}

impl Severity {
    /// Highest severity the save gate may report
    pub const MAX: Severity = Severity::Warning;
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Valid => f.write_str("valid"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Result of the save-time validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub validator: String,
    pub severity: Severity,
    pub text: String,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            validator: VALIDATOR_NAME.to_string(),
            severity: Severity::Valid,
            text: String::new(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            validator: VALIDATOR_NAME.to_string(),
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.severity == Severity::Valid
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::valid()
    }
}
