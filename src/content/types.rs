// Core types for content items and their rendering bindings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Canonical unique identifier of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse any textual GUID form: braced, hyphenated, simple or urn,
    /// in either case. Returns `None` for everything else, including paths.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.braced())
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Device a page is being rendered for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user an invocation is performed on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Read-only view of a content item owned by the host repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Full content path, e.g. `/sitecore/content/Home/Data/Promo`
    pub path: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_language")]
    pub language: String,
    /// Name of the repository the item was read from
    #[serde(default)]
    pub repository: Option<String>,
}

fn default_version() -> u32 {
    1
}

fn default_language() -> String {
    "en".to_string()
}

impl ContentItem {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Identity used when collapsing datasources that were reached through
    /// different locators.
    pub fn unique_key(&self) -> UniqueItemKey {
        UniqueItemKey {
            repository: self.repository.clone(),
            id: self.id,
            language: self.language.clone(),
            version: self.version,
        }
    }
}

/// Resolved identity of a specific item version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueItemKey {
    pub repository: Option<String>,
    pub id: ItemId,
    pub language: String,
    pub version: u32,
}

impl fmt::Display for UniqueItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.repository.as_deref().unwrap_or("-"),
            self.id,
            self.language,
            self.version
        )
    }
}

/// A datasource locator is either a canonical identifier or a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(ItemId),
    Path(String),
}

impl Locator {
    /// Classify a raw locator string. Empty or blank input has no locator.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match ItemId::parse(trimmed) {
            Some(id) => Locator::Id(id),
            None => Locator::Path(trimmed.to_string()),
        })
    }
}

/// Binding of a rendering to a placeholder of an item, for one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingReference {
    #[serde(default)]
    pub rendering_id: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Repository the reference's locators are resolved against
    pub repository: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub settings: RenderingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderingSettings {
    #[serde(default)]
    pub datasource: Option<String>,
    #[serde(default)]
    pub rules: Vec<PersonalizationRule>,
    #[serde(default)]
    pub multivariate_test: Option<String>,
}

/// Conditional rule attached to a rendering reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationRule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub actions: Vec<RuleAction>,
}

/// Actions a personalization rule can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleAction {
    SetDatasource { datasource: String },
    SetRendering { rendering: String },
    SetParameters {
        #[serde(default)]
        parameters: BTreeMap<String, String>,
    },
    HideRendering,
}

impl RuleAction {
    /// Locator carried by a set-datasource action
    pub fn datasource_locator(&self) -> Option<&str> {
        match self {
            RuleAction::SetDatasource { datasource } => Some(datasource.as_str()),
            _ => None,
        }
    }
}
