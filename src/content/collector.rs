// Datasource discovery across rendering references

use crate::content::resolver::DatasourceResolver;
use crate::content::traits::{ContentRepository, RepositoryCatalog};
use crate::content::types::{ContentItem, RenderingReference, UniqueItemKey};
use crate::context::RequestContext;
use crate::security::ElevatedScope;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Internal-link field on a multivariate test variant
pub const VARIANT_DATASOURCE_FIELD: &str = "Datasource";

/// Which indirect reference kinds to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    pub personalization: bool,
    pub multivariate: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            personalization: true,
            multivariate: true,
        }
    }
}

/// Insertion-ordered set of datasource items keyed by resolved identity
#[derive(Debug, Clone, Default)]
pub struct DatasourceSet {
    items: IndexMap<UniqueItemKey, ContentItem>,
}

impl DatasourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item unless an item with the same identity is already present.
    /// Returns whether the item was added.
    pub fn insert(&mut self, item: ContentItem) -> bool {
        let key = item.unique_key();
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, item);
        true
    }

    pub fn insert_opt(&mut self, item: Option<ContentItem>) -> bool {
        item.map(|i| self.insert(i)).unwrap_or(false)
    }

    pub fn contains(&self, item: &ContentItem) -> bool {
        self.items.contains_key(&item.unique_key())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.values()
    }

    pub fn into_vec(self) -> Vec<ContentItem> {
        self.items.into_values().collect()
    }
}

impl IntoIterator for DatasourceSet {
    type Item = ContentItem;
    type IntoIter = indexmap::map::IntoValues<UniqueItemKey, ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

/// Walks the rendering references of an item and collects the items they
/// use as datasources.
pub struct ReferenceCollector<'c, 'a> {
    ctx: &'c RequestContext<'a>,
    resolver: DatasourceResolver,
}

impl<'c, 'a> ReferenceCollector<'c, 'a> {
    pub fn new(ctx: &'c RequestContext<'a>) -> Self {
        Self {
            ctx,
            resolver: DatasourceResolver::new(),
        }
    }

    /// References bound to `item` for the context device
    pub fn rendering_references(&self, item: Option<&ContentItem>) -> Vec<RenderingReference> {
        let Some(item) = item else {
            return Vec::new();
        };
        match self.ctx.renderings.renderings(item, self.ctx.device) {
            Ok(references) => references,
            Err(e) => {
                warn!(
                    item = %item.path,
                    device = %self.ctx.device,
                    error = %e,
                    "Could not read rendering references"
                );
                Vec::new()
            }
        }
    }

    /// Every distinct datasource item reachable from `item`.
    ///
    /// Order: references in their natural sequence; within a reference the
    /// direct datasource, then personalization datasources, then
    /// multivariate test variants.
    pub fn all_unique_datasource_items(
        &self,
        item: &ContentItem,
        options: CollectOptions,
    ) -> DatasourceSet {
        let mut set = DatasourceSet::new();
        for reference in self.rendering_references(Some(item)) {
            let Some(repository) = self.repository_for(&reference) else {
                continue;
            };

            set.insert_opt(self.direct_datasource(&reference, repository));

            if options.personalization {
                for ds in self.personalization_datasources(&reference, repository) {
                    set.insert(ds);
                }
            }

            if options.multivariate {
                for ds in self.multivariate_datasources(&reference, repository) {
                    set.insert(ds);
                }
            }
        }

        debug!(
            item = %item.path,
            count = set.len(),
            "Collected unique datasource items"
        );
        set
    }

    /// Direct datasources of every reference, one entry per reference
    pub fn datasource_items(&self, item: &ContentItem) -> Vec<ContentItem> {
        self.per_reference(item, |reference, repository| {
            self.direct_datasource(reference, repository).into_iter().collect()
        })
    }

    /// Datasources substituted by personalization rules
    pub fn personalization_datasource_items(&self, item: &ContentItem) -> Vec<ContentItem> {
        self.per_reference(item, |reference, repository| {
            self.personalization_datasources(reference, repository)
        })
    }

    /// Datasources of multivariate test variants
    pub fn multivariate_datasource_items(&self, item: &ContentItem) -> Vec<ContentItem> {
        self.per_reference(item, |reference, repository| {
            self.multivariate_datasources(reference, repository)
        })
    }

    fn per_reference<F>(&self, item: &ContentItem, mut f: F) -> Vec<ContentItem>
    where
        F: FnMut(&RenderingReference, &dyn ContentRepository) -> Vec<ContentItem>,
    {
        let mut items = Vec::new();
        for reference in self.rendering_references(Some(item)) {
            if let Some(repository) = self.repository_for(&reference) {
                items.extend(f(&reference, repository));
            }
        }
        items
    }

    fn repository_for(&self, reference: &RenderingReference) -> Option<&'a dyn ContentRepository> {
        let catalog: &'a dyn RepositoryCatalog = self.ctx.catalog;
        let repository = catalog.repository(&reference.repository);
        if repository.is_none() {
            debug!(
                repository = %reference.repository,
                "Rendering reference points at an unknown repository"
            );
        }
        repository
    }

    fn direct_datasource(
        &self,
        reference: &RenderingReference,
        repository: &dyn ContentRepository,
    ) -> Option<ContentItem> {
        let locator = reference.settings.datasource.as_deref()?;
        self.resolver.resolve(locator, repository)
    }

    fn personalization_datasources(
        &self,
        reference: &RenderingReference,
        repository: &dyn ContentRepository,
    ) -> Vec<ContentItem> {
        reference
            .settings
            .rules
            .iter()
            .flat_map(|rule| rule.actions.iter())
            .filter_map(|action| action.datasource_locator())
            .filter_map(|locator| self.resolver.resolve(locator, repository))
            .collect()
    }

    fn multivariate_datasources(
        &self,
        reference: &RenderingReference,
        repository: &dyn ContentRepository,
    ) -> Vec<ContentItem> {
        let has_test = reference
            .settings
            .multivariate_test
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_test {
            return Vec::new();
        }

        // Test definitions may be unreadable for the current user
        let _elevated = ElevatedScope::enter(self.ctx.elevator, "multivariate-test");

        let variable = match self.ctx.test_variants.variable_item(reference) {
            Ok(Some(variable)) => variable,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(
                    test = reference.settings.multivariate_test.as_deref().unwrap_or_default(),
                    error = %e,
                    "Could not resolve multivariate test variable"
                );
                return Vec::new();
            }
        };

        let variants = match repository.children(&variable) {
            Ok(children) => children,
            Err(e) => {
                warn!(item = %variable.path, error = %e, "Could not read test variants");
                return Vec::new();
            }
        };

        variants
            .iter()
            .filter_map(|variant| {
                self.resolver
                    .internal_link_target(variant, VARIANT_DATASOURCE_FIELD, repository)
            })
            .collect()
    }
}
