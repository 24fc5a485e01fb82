//! In-memory content host
//!
//! `ContentSnapshot` implements every host collaborator trait over a
//! document loaded from JSON or TOML. The CLI runs the surfaces against a
//! snapshot file and the tests use it as their host.
//!
//! Item children are derived from content paths, in declaration order.
//! Path lookups ignore ASCII case.

mod error;
pub mod model;

pub use error::SnapshotError;
pub use model::{CommandDocument, ItemDocument, RepositoryDocument, SnapshotDocument, WorkflowDocument};

use crate::config::NotificationSettings;
use crate::content::traits::{ContentRepository, RenderingSource, RepositoryCatalog, TestVariantSource};
use crate::content::types::{ContentItem, DeviceId, ItemId, Locator, RenderingReference, User};
use crate::context::RequestContext;
use crate::error::HostError;
use crate::security::NoElevation;
use crate::workflow::traits::{AccessChecker, Workflow, WorkflowCommandBinder, WorkflowProvider};
use crate::workflow::types::{WorkflowCommand, WorkflowState};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub struct ContentSnapshot {
    repositories: Vec<SnapshotRepository>,
    write_access: BTreeMap<String, Vec<String>>,
}

impl ContentSnapshot {
    pub fn from_document(document: SnapshotDocument) -> Result<Self, SnapshotError> {
        let repositories = document
            .repositories
            .into_iter()
            .map(SnapshotRepository::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            repositories,
            write_access: document.write_access,
        })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        Self::from_document(serde_json::from_value(value)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        Self::from_document(serde_json::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, SnapshotError> {
        Self::from_document(toml::from_str(raw)?)
    }

    /// Load a snapshot file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let parse: fn(&str) -> Result<Self, SnapshotError> = match extension.as_str() {
            "json" => Self::from_json_str,
            "toml" => Self::from_toml_str,
            _ => return Err(SnapshotError::UnsupportedFormat(path.display().to_string())),
        };

        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = parse(&raw)?;
        info!(
            path = %path.display(),
            repositories = snapshot.repositories.len(),
            "Loaded content snapshot"
        );
        Ok(snapshot)
    }

    pub fn repository_names(&self) -> impl Iterator<Item = &str> {
        self.repositories.iter().map(|r| r.name.as_str())
    }

    /// Named repository, or `UnknownRepository`
    pub fn require_repository(&self, name: &str) -> Result<&SnapshotRepository, SnapshotError> {
        self.find_repository(name)
            .ok_or_else(|| SnapshotError::UnknownRepository(name.to_string()))
    }

    /// Item addressed by an id or path locator in `repository`
    pub fn find_item(&self, repository: &str, locator: &str) -> Option<ContentItem> {
        self.find_repository(repository)?.find(locator)
    }

    /// Request context using this snapshot for every host collaborator.
    /// The snapshot has no security model, so elevation is a no-op.
    pub fn context<'a>(
        &'a self,
        user: &'a User,
        device: &'a DeviceId,
        settings: &'a NotificationSettings,
    ) -> RequestContext<'a> {
        RequestContext {
            user,
            device,
            catalog: self,
            renderings: self,
            test_variants: self,
            access: self,
            elevator: &NoElevation,
            command_binder: &WorkflowCommandBinder,
            settings,
        }
    }

    fn find_repository(&self, name: &str) -> Option<&SnapshotRepository> {
        self.repositories
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

impl RepositoryCatalog for ContentSnapshot {
    fn repository(&self, name: &str) -> Option<&dyn ContentRepository> {
        self.find_repository(name).map(|r| r as &dyn ContentRepository)
    }
}

impl RenderingSource for ContentSnapshot {
    fn renderings(
        &self,
        item: &ContentItem,
        device: &DeviceId,
    ) -> Result<Vec<RenderingReference>, HostError> {
        let Some(name) = item.repository.as_deref() else {
            return Ok(Vec::new());
        };
        let repository = self
            .find_repository(name)
            .ok_or_else(|| HostError::lookup(name, "unknown repository"))?;
        Ok(repository
            .stored(item)
            .and_then(|stored| stored.renderings.get(device.as_str()))
            .cloned()
            .unwrap_or_default())
    }
}

impl TestVariantSource for ContentSnapshot {
    fn variable_item(
        &self,
        reference: &RenderingReference,
    ) -> Result<Option<ContentItem>, HostError> {
        let Some(test) = reference.settings.multivariate_test.as_deref() else {
            return Ok(None);
        };
        let repository = self
            .find_repository(&reference.repository)
            .ok_or_else(|| HostError::lookup(&reference.repository, "unknown repository"))?;
        let locator = repository
            .test_variables
            .get(test)
            .map(String::as_str)
            .unwrap_or(test);
        Ok(repository.find(locator))
    }
}

impl AccessChecker for ContentSnapshot {
    fn is_write_allowed(&self, item: &ContentItem, user: &User) -> bool {
        self.write_access
            .get(&user.name)
            .is_some_and(|grants| grants.iter().any(|grant| grant_covers(grant, item)))
    }
}

/// One repository of a snapshot
#[derive(Debug)]
pub struct SnapshotRepository {
    name: String,
    items: Vec<StoredItem>,
    by_id: HashMap<ItemId, usize>,
    by_path: HashMap<String, usize>,
    workflows: Vec<SnapshotWorkflow>,
    test_variables: BTreeMap<String, String>,
}

#[derive(Debug)]
struct StoredItem {
    item: ContentItem,
    fields: BTreeMap<String, String>,
    renderings: BTreeMap<String, Vec<RenderingReference>>,
    workflow: Option<String>,
}

impl SnapshotRepository {
    fn build(document: RepositoryDocument) -> Result<Self, SnapshotError> {
        let mut repository = Self {
            name: document.name,
            items: Vec::with_capacity(document.items.len()),
            by_id: HashMap::new(),
            by_path: HashMap::new(),
            workflows: document.workflows.into_iter().map(SnapshotWorkflow::new).collect(),
            test_variables: document.test_variables,
        };

        for item in document.items {
            repository.add(item)?;
        }
        Ok(repository)
    }

    fn add(&mut self, document: ItemDocument) -> Result<(), SnapshotError> {
        let path_key = normalize_path(&document.path);
        if self.by_id.contains_key(&document.id) {
            return Err(self.duplicate(document.id.to_string()));
        }
        if self.by_path.contains_key(&path_key) {
            return Err(self.duplicate(document.path));
        }

        let workflow = document.workflow.filter(|w| !w.trim().is_empty());
        if let (Some(workflow_id), Some(state)) = (&workflow, document.state) {
            if let Some(target) = self.workflows.iter_mut().find(|w| same_id(&w.id, workflow_id)) {
                target.item_states.insert(document.id, state);
            }
        }

        let index = self.items.len();
        self.by_id.insert(document.id, index);
        self.by_path.insert(path_key, index);
        self.items.push(StoredItem {
            item: ContentItem {
                id: document.id,
                name: document.name,
                display_name: document.display_name,
                path: document.path,
                version: document.version,
                language: document.language,
                repository: Some(self.name.clone()),
            },
            fields: document.fields,
            renderings: document.renderings,
            workflow,
        });
        Ok(())
    }

    fn duplicate(&self, key: String) -> SnapshotError {
        SnapshotError::DuplicateItem {
            repository: self.name.clone(),
            key,
        }
    }

    fn find(&self, locator: &str) -> Option<ContentItem> {
        let index = match Locator::parse(locator)? {
            Locator::Id(id) => self.by_id.get(&id),
            Locator::Path(path) => self.by_path.get(&normalize_path(&path)),
        }?;
        self.items.get(*index).map(|stored| stored.item.clone())
    }

    fn stored(&self, item: &ContentItem) -> Option<&StoredItem> {
        self.by_id.get(&item.id).and_then(|&index| self.items.get(index))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl ContentRepository for SnapshotRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn item_by_id(&self, id: ItemId) -> Result<Option<ContentItem>, HostError> {
        Ok(self
            .by_id
            .get(&id)
            .and_then(|&index| self.items.get(index))
            .map(|stored| stored.item.clone()))
    }

    fn item_by_path(&self, path: &str) -> Result<Option<ContentItem>, HostError> {
        Ok(self
            .by_path
            .get(&normalize_path(path))
            .and_then(|&index| self.items.get(index))
            .map(|stored| stored.item.clone()))
    }

    fn children(&self, item: &ContentItem) -> Result<Vec<ContentItem>, HostError> {
        let parent = normalize_path(&item.path);
        Ok(self
            .items
            .iter()
            .filter(|stored| parent_key(&stored.item.path).as_deref() == Some(parent.as_str()))
            .map(|stored| stored.item.clone())
            .collect())
    }

    fn field_value(&self, item: &ContentItem, field: &str) -> Result<Option<String>, HostError> {
        Ok(self
            .stored(item)
            .and_then(|stored| stored.fields.get(field))
            .cloned())
    }

    fn workflow_provider(&self) -> Option<&dyn WorkflowProvider> {
        if self.workflows.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl WorkflowProvider for SnapshotRepository {
    fn workflow_for(&self, item: &ContentItem) -> Result<Option<&dyn Workflow>, HostError> {
        let Some(workflow_id) = self.stored(item).and_then(|s| s.workflow.as_deref()) else {
            return Ok(None);
        };
        self.workflows
            .iter()
            .find(|w| same_id(&w.id, workflow_id))
            .map(|w| Some(w as &dyn Workflow))
            .ok_or_else(|| HostError::Corrupt {
                target: item.path.clone(),
                message: format!("unknown workflow '{workflow_id}'"),
            })
    }
}

/// Workflow definition with the current state of every item it governs
#[derive(Debug)]
pub struct SnapshotWorkflow {
    id: String,
    display_name: String,
    states: Vec<WorkflowState>,
    commands: Vec<CommandDocument>,
    item_states: HashMap<ItemId, String>,
}

impl SnapshotWorkflow {
    fn new(document: WorkflowDocument) -> Self {
        Self {
            id: document.id,
            display_name: document.display_name,
            states: document.states,
            commands: document.commands,
            item_states: HashMap::new(),
        }
    }

    fn current_state_id(&self, item: &ContentItem) -> Option<&str> {
        self.item_states
            .get(&item.id)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

impl Workflow for SnapshotWorkflow {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn state_for(&self, item: &ContentItem) -> Result<Option<WorkflowState>, HostError> {
        let Some(state_id) = self.current_state_id(item) else {
            return Ok(None);
        };
        match self.states.iter().find(|s| same_id(&s.id, state_id)) {
            Some(state) => Ok(Some(state.clone())),
            None => Err(HostError::Corrupt {
                target: item.path.clone(),
                message: format!(
                    "state '{state_id}' is not part of workflow '{}'",
                    self.display_name
                ),
            }),
        }
    }

    fn commands_for(
        &self,
        item: &ContentItem,
        user: &User,
    ) -> Result<Vec<WorkflowCommand>, HostError> {
        let Some(state_id) = self.current_state_id(item) else {
            return Ok(Vec::new());
        };
        Ok(self
            .commands
            .iter()
            .filter(|c| same_id(&c.from_state, state_id))
            .map(|c| WorkflowCommand {
                id: c.id.clone(),
                display_name: c.display_name.clone(),
                visible: c.visible
                    && (c.visible_to.is_empty()
                        || c.visible_to.iter().any(|u| u.eq_ignore_ascii_case(&user.name))),
            })
            .collect())
    }
}

/// Identifiers compare as GUIDs when both sides parse as one
fn same_id(a: &str, b: &str) -> bool {
    match (ItemId::parse(a), ItemId::parse(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}

fn normalize_path(path: &str) -> String {
    path.trim().trim_end_matches('/').to_ascii_lowercase()
}

fn parent_key(path: &str) -> Option<String> {
    let normalized = normalize_path(path);
    normalized
        .rsplit_once('/')
        .map(|(parent, _)| parent.to_string())
}

fn grant_covers(grant: &str, item: &ContentItem) -> bool {
    match Locator::parse(grant) {
        Some(Locator::Id(id)) => id == item.id,
        Some(Locator::Path(prefix)) => {
            let prefix = normalize_path(&prefix);
            let path = normalize_path(&item.path);
            path == prefix || path.starts_with(&format!("{prefix}/"))
        }
        None => false,
    }
}
