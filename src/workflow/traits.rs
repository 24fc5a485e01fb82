// Traits for the host workflow subsystem and authorization

use crate::content::types::{ContentItem, User};
use crate::error::HostError;
use crate::workflow::types::{WorkflowCommand, WorkflowState};

#[cfg(test)]
use mockall::automock;

/// Resolves which workflow governs an item
pub trait WorkflowProvider {
    fn workflow_for(&self, item: &ContentItem) -> Result<Option<&dyn Workflow>, HostError>;
}

/// A workflow definition as exposed by the host
pub trait Workflow {
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Current state of the item's version
    fn state_for(&self, item: &ContentItem) -> Result<Option<WorkflowState>, HostError>;

    /// Commands executable from the item's current state, visible or not.
    /// `visible` reflects the host policy for `user`.
    fn commands_for(
        &self,
        item: &ContentItem,
        user: &User,
    ) -> Result<Vec<WorkflowCommand>, HostError>;
}

/// Authorization collaborator
#[cfg_attr(test, automock)]
pub trait AccessChecker {
    /// Whether `user` holds item-write rights on `item`
    fn is_write_allowed(&self, item: &ContentItem, user: &User) -> bool;
}

/// Produces the opaque action token a host surface uses to run a command
pub trait CommandBinder {
    fn bind(&self, item: &ContentItem, workflow: &dyn Workflow, command: &WorkflowCommand) -> String;
}

/// Binder producing `item:workflow(...)` command strings
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkflowCommandBinder;

impl CommandBinder for WorkflowCommandBinder {
    fn bind(&self, item: &ContentItem, workflow: &dyn Workflow, command: &WorkflowCommand) -> String {
        format!(
            "item:workflow(id={},language={},version={},command={},workflow={})",
            item.id,
            item.language,
            item.version,
            command.id,
            workflow.id()
        )
    }
}
