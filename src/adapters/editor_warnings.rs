// Content editor warnings: one warning per datasource awaiting workflow

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
pub struct EditorWarningsArgs {
    pub item: Option<ContentItem>,
    pub warnings: Vec<NotificationRecord>,
}

impl EditorWarningsArgs {
    pub fn new(item: ContentItem) -> Self {
        Self {
            item: Some(item),
            warnings: Vec::new(),
        }
    }
}

/// Editor warnings always use plain, quoted labels
#[derive(Debug, Default, Clone, Copy)]
pub struct EditorWarnings {
    options: CollectOptions,
}

impl EditorWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }
}

impl Processor<EditorWarningsArgs> for EditorWarnings {
    fn surface(&self) -> &'static str {
        "editor-warnings"
    }

    fn process(
        &self,
        ctx: &RequestContext<'_>,
        args: &mut EditorWarningsArgs,
    ) -> Result<(), NotifierError> {
        let item = args.item.as_ref().ok_or(NotifierError::MissingContextItem {
            surface: self.surface(),
        })?;

        let span = create_surface_span(self.surface(), &item.path, &generate_correlation_id());
        let _entered = span.enter();

        let records = NotificationBuilder::new(ctx)
            .with_options(self.options)
            .records(item, TextMode::Plain);
        info!(count = records.len(), "Datasource workflow warnings produced");
        args.warnings.extend(records);
        Ok(())
    }
}
