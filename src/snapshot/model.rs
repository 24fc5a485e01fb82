// On-disk snapshot document (JSON or TOML)

use crate::content::types::{ItemId, RenderingReference};
use crate::workflow::types::WorkflowState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub repositories: Vec<RepositoryDocument>,
    /// User name -> granted locators. A grant is an item id or a path
    /// prefix covering the item and its descendants.
    #[serde(default)]
    pub write_access: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryDocument {
    pub name: String,
    #[serde(default)]
    pub workflows: Vec<WorkflowDocument>,
    #[serde(default)]
    pub items: Vec<ItemDocument>,
    /// Multivariate test locator -> locator of its variable item. Tests
    /// without an entry resolve the test locator itself.
    #[serde(default)]
    pub test_variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowDocument {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub states: Vec<WorkflowState>,
    #[serde(default)]
    pub commands: Vec<CommandDocument>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandDocument {
    pub id: String,
    pub display_name: String,
    /// State the command can be executed from
    pub from_state: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Users the command is shown to; everyone when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visible_to: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemDocument {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub path: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Device name -> rendering references in layout order
    #[serde(default)]
    pub renderings: BTreeMap<String, Vec<RenderingReference>>,
    #[serde(default)]
    pub workflow: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_version() -> u32 {
    1
}

fn default_language() -> String {
    "en".to_string()
}
