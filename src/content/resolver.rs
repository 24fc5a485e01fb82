// Datasource locator resolution

use crate::content::traits::ContentRepository;
use crate::content::types::{ContentItem, Locator};
use tracing::{debug, warn};

/// Resolves datasource locators (identifier or path) against a repository.
///
/// Nothing found is the steady state and yields `None`. Host failures are
/// logged and also yield `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasourceResolver;

impl DatasourceResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, locator: &str, repository: &dyn ContentRepository) -> Option<ContentItem> {
        let parsed = Locator::parse(locator)?;
        let lookup = match &parsed {
            Locator::Id(id) => repository.item_by_id(*id),
            Locator::Path(path) => repository.item_by_path(path),
        };

        match lookup {
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                debug!(
                    locator = locator,
                    repository = repository.name(),
                    "Datasource locator did not resolve"
                );
                None
            }
            Err(e) => {
                warn!(
                    locator = locator,
                    repository = repository.name(),
                    error = %e,
                    "Datasource lookup failed, treating as absent"
                );
                None
            }
        }
    }

    /// Target of an internal-link field on `item`
    pub fn internal_link_target(
        &self,
        item: &ContentItem,
        field: &str,
        repository: &dyn ContentRepository,
    ) -> Option<ContentItem> {
        match repository.field_value(item, field) {
            Ok(Some(raw)) => self.resolve(&raw, repository),
            Ok(None) => None,
            Err(e) => {
                warn!(
                    item = %item.path,
                    field = field,
                    error = %e,
                    "Could not read internal link field"
                );
                None
            }
        }
    }
}
