// Workflow state inspection for datasource items

use crate::content::traits::{ContentRepository, RepositoryCatalog};
use crate::content::types::{ContentItem, ItemId, User};
use crate::context::RequestContext;
use crate::security::ElevatedScope;
use crate::workflow::traits::WorkflowProvider;
use crate::workflow::types::{
    CommandOffer, ResolvedAssignment, UnresolvedReason, WorkflowAssignment, WorkflowCommand,
    WorkflowState,
};
use tracing::{debug, warn};

/// Field holding the icon of a workflow state item
pub const ICON_FIELD: &str = "__Icon";

/// Walks repository -> workflow provider -> workflow -> state for items
pub struct WorkflowInspector<'c, 'a> {
    ctx: &'c RequestContext<'a>,
}

impl<'c, 'a> WorkflowInspector<'c, 'a> {
    pub fn new(ctx: &'c RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// Snapshot of the workflow state of `item`
    pub fn assignment(&self, item: &ContentItem) -> WorkflowAssignment<'a> {
        match self.link(item) {
            Ok(resolved) => WorkflowAssignment::Resolved(resolved),
            Err(reason) => {
                debug!(item = %item.path, reason = %reason, "Workflow assignment unresolved");
                WorkflowAssignment::Unresolved {
                    item: item.clone(),
                    reason,
                }
            }
        }
    }

    fn link(&self, item: &ContentItem) -> Result<ResolvedAssignment<'a>, UnresolvedReason> {
        let catalog: &'a dyn RepositoryCatalog = self.ctx.catalog;
        let repository = item
            .repository
            .as_deref()
            .and_then(|name| catalog.repository(name))
            .ok_or(UnresolvedReason::NoRepository)?;

        let provider: &'a dyn WorkflowProvider = repository
            .workflow_provider()
            .ok_or(UnresolvedReason::NoWorkflowProvider)?;

        let workflow = match provider.workflow_for(item) {
            Ok(Some(workflow)) => workflow,
            Ok(None) => return Err(UnresolvedReason::NoWorkflow),
            Err(e) => {
                warn!(item = %item.path, error = %e, "Workflow lookup failed");
                return Err(UnresolvedReason::NoWorkflow);
            }
        };

        let mut state = match workflow.state_for(item) {
            Ok(Some(state)) => state,
            Ok(None) => return Err(UnresolvedReason::NoState),
            Err(e) => {
                warn!(item = %item.path, workflow = workflow.id(), error = %e, "Workflow state lookup failed");
                return Err(UnresolvedReason::NoState);
            }
        };

        let (state_item, icon) = self.state_item(&state, repository, state.icon.is_empty());
        if let Some(icon) = icon {
            state.icon = icon;
        }

        Ok(ResolvedAssignment {
            item: item.clone(),
            workflow,
            state,
            state_item,
        })
    }

    /// State item and, when `with_icon`, its icon field. Both are read under
    /// one elevation: state items usually sit outside the author's read rights.
    fn state_item(
        &self,
        state: &WorkflowState,
        repository: &dyn ContentRepository,
        with_icon: bool,
    ) -> (Option<ContentItem>, Option<String>) {
        let Some(id) = ItemId::parse(&state.id) else {
            return (None, None);
        };
        let _elevated = ElevatedScope::enter(self.ctx.elevator, "workflow-state-item");
        let state_item = match repository.item_by_id(id) {
            Ok(Some(found)) => found,
            Ok(None) => return (None, None),
            Err(e) => {
                warn!(state = %state.id, error = %e, "Could not read workflow state item");
                return (None, None);
            }
        };

        if !with_icon {
            return (Some(state_item), None);
        }
        let icon = match repository.field_value(&state_item, ICON_FIELD) {
            Ok(icon) => icon.filter(|i| !i.is_empty()),
            Err(e) => {
                warn!(state = %state.id, error = %e, "Could not read workflow state icon");
                None
            }
        };
        (Some(state_item), icon)
    }

    /// Resolved and not in a terminal state
    pub fn is_actionable(&self, assignment: &WorkflowAssignment<'_>) -> bool {
        assignment.is_actionable()
    }

    /// Commands executable from the current state that the host marks
    /// visible to `user`. Computed afresh on every call.
    pub fn visible_commands(
        &self,
        assignment: &WorkflowAssignment<'_>,
        user: &User,
    ) -> Vec<WorkflowCommand> {
        let Some(resolved) = assignment.resolved() else {
            return Vec::new();
        };
        match resolved.workflow.commands_for(&resolved.item, user) {
            Ok(commands) => commands.into_iter().filter(|c| c.visible).collect(),
            Err(e) => {
                warn!(
                    item = %resolved.item.path,
                    workflow = resolved.workflow.id(),
                    error = %e,
                    "Could not list workflow commands"
                );
                Vec::new()
            }
        }
    }

    /// Commands that may be offered to `user`. The access checker is asked
    /// once; without write access no commands are listed.
    pub fn offered_commands(&self, assignment: &WorkflowAssignment<'_>, user: &User) -> CommandOffer {
        let has_write_access = self.has_write_access(assignment.item(), user);
        let commands = if has_write_access {
            self.visible_commands(assignment, user)
        } else {
            Vec::new()
        };
        CommandOffer {
            has_write_access,
            commands,
        }
    }

    pub fn has_write_access(&self, item: &ContentItem, user: &User) -> bool {
        self.ctx.access.is_write_allowed(item, user)
    }
}
