// Inline (page editing) notifications

use crate::adapters::Processor;
use crate::content::collector::CollectOptions;
use crate::content::types::ContentItem;
use crate::context::RequestContext;
use crate::error::NotifierError;
use crate::notifications::builder::NotificationBuilder;
use crate::notifications::composer::TextMode;
use crate::notifications::types::NotificationRecord;
use crate::telemetry::{create_surface_span, generate_correlation_id};
use tracing::info;

#[derive(Debug, Default)]
pub struct InlineNotificationArgs {
    pub item: Option<ContentItem>,
    pub notifications: Vec<NotificationRecord>,
}

impl InlineNotificationArgs {
    pub fn new(item: ContentItem) -> Self {
        Self {
            item: Some(item),
            notifications: Vec::new(),
        }
    }
}

/// Same records as the editor warnings; labels are emphasized when the host
/// enables HTML messaging.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineNotifications {
    options: CollectOptions,
}

impl InlineNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }
}

impl Processor<InlineNotificationArgs> for InlineNotifications {
    fn surface(&self) -> &'static str {
        "inline-notifications"
    }

    fn process(
        &self,
        ctx: &RequestContext<'_>,
        args: &mut InlineNotificationArgs,
    ) -> Result<(), NotifierError> {
        let item = args.item.as_ref().ok_or(NotifierError::MissingContextItem {
            surface: self.surface(),
        })?;

        let span = create_surface_span(self.surface(), &item.path, &generate_correlation_id());
        let _entered = span.enter();

        let mode = TextMode::from_html_flag(ctx.settings.use_html_in_messaging);
        let records = NotificationBuilder::new(ctx)
            .with_options(self.options)
            .records(item, mode);
        info!(count = records.len(), ?mode, "Datasource workflow notifications produced");
        args.notifications.extend(records);
        Ok(())
    }
}
