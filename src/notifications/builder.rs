// Shared pipeline behind every host surface: collect datasources, inspect
// their workflow state and turn the actionable ones into records.

use crate::content::collector::{CollectOptions, ReferenceCollector};
use crate::content::types::ContentItem;
use crate::context::RequestContext;
use crate::notifications::composer::{compose_single, TextMode};
use crate::notifications::types::{
    NotificationKind, NotificationOption, NotificationRecord, NOTIFICATION_TITLE,
};
use crate::workflow::inspector::WorkflowInspector;
use crate::workflow::types::{CommandOffer, WorkflowAssignment};
use tracing::debug;

pub struct NotificationBuilder<'c, 'a> {
    ctx: &'c RequestContext<'a>,
    collector: ReferenceCollector<'c, 'a>,
    inspector: WorkflowInspector<'c, 'a>,
    options: CollectOptions,
}

impl<'c, 'a> NotificationBuilder<'c, 'a> {
    pub fn new(ctx: &'c RequestContext<'a>) -> Self {
        Self {
            ctx,
            collector: ReferenceCollector::new(ctx),
            inspector: WorkflowInspector::new(ctx),
            options: CollectOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }

    /// Assignments of every datasource of `item`, in collection order
    pub fn datasource_assignments(&self, item: &ContentItem) -> Vec<WorkflowAssignment<'a>> {
        self.collector
            .all_unique_datasource_items(item, self.options)
            .iter()
            .map(|ds| self.inspector.assignment(ds))
            .collect()
    }

    /// Datasources that are resolved and not yet in a terminal state
    pub fn actionable_datasources(&self, item: &ContentItem) -> Vec<WorkflowAssignment<'a>> {
        self.datasource_assignments(item)
            .into_iter()
            .filter(WorkflowAssignment::is_actionable)
            .collect()
    }

    /// Content paths of the actionable datasources
    pub fn non_final_paths(&self, item: &ContentItem) -> Vec<String> {
        self.actionable_datasources(item)
            .iter()
            .map(|a| a.item().path.clone())
            .collect()
    }

    /// Notification for one assignment, if the user should see one.
    ///
    /// A record is produced for an actionable datasource when the user can
    /// run at least one command on it, or when the host asks to inform users
    /// without access as well.
    pub fn record_for(
        &self,
        assignment: &WorkflowAssignment<'_>,
        mode: TextMode,
    ) -> Option<NotificationRecord> {
        if !assignment.is_actionable() {
            return None;
        }
        let resolved = assignment.resolved()?;
        let item = &resolved.item;

        let CommandOffer {
            has_write_access,
            commands,
        } = self.inspector.offered_commands(assignment, self.ctx.user);

        if commands.is_empty() && !self.ctx.settings.show_workflow_no_access_message {
            debug!(
                item = %item.path,
                write_access = has_write_access,
                "Skipping notification: nothing the user can act on"
            );
            return None;
        }

        let options = commands
            .iter()
            .map(|command| NotificationOption {
                label: command.display_name.clone(),
                action_token: self.ctx.command_binder.bind(item, resolved.workflow, command),
            })
            .collect();

        Some(NotificationRecord {
            title: NOTIFICATION_TITLE.to_string(),
            text: compose_single(
                &item.path,
                &resolved.state.display_name,
                resolved.workflow_name(),
                has_write_access,
                mode,
            ),
            icon: resolved.state.icon.clone(),
            kind: NotificationKind::Warning,
            options,
        })
    }

    /// Records for every actionable datasource of `item`
    pub fn records(&self, item: &ContentItem, mode: TextMode) -> Vec<NotificationRecord> {
        self.actionable_datasources(item)
            .iter()
            .filter_map(|assignment| self.record_for(assignment, mode))
            .collect()
    }
}
