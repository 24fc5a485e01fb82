// Save-time validation: warn when datasources are not in a final state

use crate::adapters::Processor;
use crate::content::collector::CollectOptions;
use crate::content::types::ContentItem;
use crate::context::RequestContext;
use crate::error::NotifierError;
use crate::notifications::builder::NotificationBuilder;
use crate::notifications::composer::compose_save_gate;
use crate::notifications::types::ValidationOutcome;
use crate::telemetry::{create_surface_span, generate_correlation_id};
use tracing::info;

#[derive(Debug, Default)]
pub struct SaveGateArgs {
    pub item: Option<ContentItem>,
    pub outcome: ValidationOutcome,
}

impl SaveGateArgs {
    pub fn new(item: ContentItem) -> Self {
        Self {
            item: Some(item),
            outcome: ValidationOutcome::valid(),
        }
    }
}

/// Reports `Warning` at most; a save is never rejected by this gate
#[derive(Debug, Default, Clone, Copy)]
pub struct SaveGate {
    options: CollectOptions,
}

impl SaveGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate `item` directly, without going through pipeline args
    pub fn evaluate(&self, ctx: &RequestContext<'_>, item: &ContentItem) -> ValidationOutcome {
        let paths = NotificationBuilder::new(ctx)
            .with_options(self.options)
            .non_final_paths(item);
        if paths.is_empty() {
            ValidationOutcome::valid()
        } else {
            ValidationOutcome::warning(compose_save_gate(&paths))
        }
    }
}

impl Processor<SaveGateArgs> for SaveGate {
    fn surface(&self) -> &'static str {
        "save-gate"
    }

    fn process(&self, ctx: &RequestContext<'_>, args: &mut SaveGateArgs) -> Result<(), NotifierError> {
        let item = args.item.as_ref().ok_or(NotifierError::MissingContextItem {
            surface: self.surface(),
        })?;

        let span = create_surface_span(self.surface(), &item.path, &generate_correlation_id());
        let _entered = span.enter();

        let outcome = self.evaluate(ctx, item);
        info!(severity = %outcome.severity, "Datasource workflow validation finished");
        args.outcome = outcome;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationSettings;
    use crate::content::types::{DeviceId, User};
    use crate::mocks::{sample_item, sample_snapshot};
    use crate::notifications::types::{Severity, VALIDATOR_NAME};

    #[test]
    fn warns_with_joined_paths() {
        let snapshot = sample_snapshot();
        let user = User::new("author");
        let device = DeviceId::default();
        let settings = NotificationSettings::default();
        let ctx = snapshot.context(&user, &device, &settings);

        let mut args = SaveGateArgs::new(sample_item(&snapshot, "/sitecore/content/Home"));
        SaveGate::new().process(&ctx, &mut args).unwrap();

        assert_eq!(args.outcome.severity, Severity::Warning);
        assert_eq!(args.outcome.validator, VALIDATOR_NAME);
        assert_eq!(
            args.outcome.text,
            "The datasource items /sitecore/content/Data/Promo, /sitecore/content/Data/News, \
             and /sitecore/content/Data/Banner are not in a final workflow state."
        );
    }

    #[test]
    fn access_does_not_change_the_gate() {
        let snapshot = sample_snapshot();
        let user = User::new("visitor");
        let device = DeviceId::default();
        let settings = NotificationSettings::default();
        let ctx = snapshot.context(&user, &device, &settings);

        let outcome = SaveGate::new().evaluate(&ctx, &sample_item(&snapshot, "/sitecore/content/Home"));
        assert_eq!(outcome.severity, Severity::Warning);
        assert!(outcome.severity <= Severity::MAX);
    }

    #[test]
    fn final_datasources_are_valid() {
        let snapshot = sample_snapshot();
        let user = User::new("author");
        let device = DeviceId::default();
        let settings = NotificationSettings::default();
        let ctx = snapshot.context(&user, &device, &settings);

        let mut args = SaveGateArgs::new(sample_item(&snapshot, "/sitecore/content/About"));
        SaveGate::new().process(&ctx, &mut args).unwrap();

        assert!(args.outcome.is_valid());
        assert!(args.outcome.text.is_empty());
    }

    #[test]
    fn missing_item_is_a_contract_violation() {
        let snapshot = sample_snapshot();
        let user = User::new("author");
        let device = DeviceId::default();
        let settings = NotificationSettings::default();
        let ctx = snapshot.context(&user, &device, &settings);

        let mut args = SaveGateArgs::default();
        assert!(SaveGate::new().process(&ctx, &mut args).is_err());
        assert!(args.outcome.is_valid());
    }
}
