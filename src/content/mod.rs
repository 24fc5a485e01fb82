// Content graph - items, rendering references and datasource discovery

pub mod types;
pub mod traits;
pub mod resolver;
pub mod collector;
pub mod links;

pub use types::{
    ContentItem, DeviceId, ItemId, Locator, PersonalizationRule, RenderingReference,
    RenderingSettings, RuleAction, UniqueItemKey, User,
};
pub use traits::{ContentRepository, RenderingSource, RepositoryCatalog, TestVariantSource};
pub use resolver::DatasourceResolver;
pub use collector::{CollectOptions, DatasourceSet, ReferenceCollector, VARIANT_DATASOURCE_FIELD};
pub use links::content_editor_url;
