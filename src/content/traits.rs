// Traits for the host content repository - read-only accessors only

use crate::content::types::{ContentItem, DeviceId, ItemId, RenderingReference};
use crate::error::HostError;
use crate::workflow::traits::WorkflowProvider;

/// Read access to one content repository (database)
pub trait ContentRepository {
    /// Repository name, e.g. `master`
    fn name(&self) -> &str;

    /// Look up an item by its canonical identifier
    fn item_by_id(&self, id: ItemId) -> Result<Option<ContentItem>, HostError>;

    /// Look up an item by its content path
    fn item_by_path(&self, path: &str) -> Result<Option<ContentItem>, HostError>;

    /// Ordered children of an item
    fn children(&self, item: &ContentItem) -> Result<Vec<ContentItem>, HostError>;

    /// Raw value of a named field
    fn field_value(&self, item: &ContentItem, field: &str) -> Result<Option<String>, HostError>;

    /// Workflow provider attached to this repository, if any
    fn workflow_provider(&self) -> Option<&dyn WorkflowProvider>;
}

/// Lookup of repositories by name
pub trait RepositoryCatalog {
    fn repository(&self, name: &str) -> Option<&dyn ContentRepository>;
}

/// Presentation details of items: which renderings are bound for a device
pub trait RenderingSource {
    fn renderings(
        &self,
        item: &ContentItem,
        device: &DeviceId,
    ) -> Result<Vec<RenderingReference>, HostError>;
}

/// Multivariate testing store
pub trait TestVariantSource {
    /// Item whose children are the test variants configured for a reference.
    /// Reads here may require elevated privileges.
    fn variable_item(
        &self,
        reference: &RenderingReference,
    ) -> Result<Option<ContentItem>, HostError>;
}
