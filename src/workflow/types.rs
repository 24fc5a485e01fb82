// Workflow state snapshots

use crate::content::types::ContentItem;
use crate::workflow::traits::Workflow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One state of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub icon: String,
    /// Final (approved/published) state
    #[serde(default, alias = "final")]
    pub is_terminal: bool,
}

/// A transition the host can execute from the current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowCommand {
    /// Opaque identifier of the command within its workflow
    pub id: String,
    pub display_name: String,
    /// Host visibility policy for this command
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Commands a user may be offered on one item, with the write-access
/// decision they were gated on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOffer {
    pub has_write_access: bool,
    /// Empty without write access
    pub commands: Vec<WorkflowCommand>,
}

/// Step of the repository -> provider -> workflow -> state chain that
/// failed to link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedReason {
    NoRepository,
    NoWorkflowProvider,
    NoWorkflow,
    NoState,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnresolvedReason::NoRepository => "item has no repository",
            UnresolvedReason::NoWorkflowProvider => "repository has no workflow provider",
            UnresolvedReason::NoWorkflow => "item is not governed by a workflow",
            UnresolvedReason::NoState => "item has no current workflow state",
        };
        f.write_str(text)
    }
}

/// Fully linked workflow information for one item
pub struct ResolvedAssignment<'a> {
    pub item: ContentItem,
    pub workflow: &'a dyn Workflow,
    pub state: WorkflowState,
    /// Item backing the state definition, when it could be read
    pub state_item: Option<ContentItem>,
}

impl ResolvedAssignment<'_> {
    pub fn workflow_name(&self) -> &str {
        self.workflow.display_name()
    }
}

impl fmt::Debug for ResolvedAssignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAssignment")
            .field("item", &self.item.path)
            .field("workflow", &self.workflow.id())
            .field("state", &self.state)
            .field("state_item", &self.state_item.as_ref().map(|i| &i.path))
            .finish()
    }
}

/// Workflow snapshot of one item. Unresolved assignments carry no meaning
/// and are excluded from every downstream decision.
#[derive(Debug)]
pub enum WorkflowAssignment<'a> {
    Resolved(ResolvedAssignment<'a>),
    Unresolved {
        item: ContentItem,
        reason: UnresolvedReason,
    },
}

impl<'a> WorkflowAssignment<'a> {
    pub fn item(&self) -> &ContentItem {
        match self {
            WorkflowAssignment::Resolved(resolved) => &resolved.item,
            WorkflowAssignment::Unresolved { item, .. } => item,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, WorkflowAssignment::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&ResolvedAssignment<'a>> {
        match self {
            WorkflowAssignment::Resolved(resolved) => Some(resolved),
            WorkflowAssignment::Unresolved { .. } => None,
        }
    }

    pub fn into_resolved(self) -> Option<ResolvedAssignment<'a>> {
        match self {
            WorkflowAssignment::Resolved(resolved) => Some(resolved),
            WorkflowAssignment::Unresolved { .. } => None,
        }
    }

    pub fn state(&self) -> Option<&WorkflowState> {
        self.resolved().map(|r| &r.state)
    }

    /// Resolved and not yet in a terminal state
    pub fn is_actionable(&self) -> bool {
        self.state().is_some_and(|s| !s.is_terminal)
    }
}
