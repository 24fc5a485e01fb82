// Datasource Workflow Library - workflow state of the datasource items a page uses
// This exposes the engine, the host collaborator traits and the snapshot host

pub mod adapters;
pub mod cli;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod notifications;
pub mod security;
pub mod snapshot;
pub mod telemetry;
pub mod workflow;

#[cfg(test)]
pub mod mocks;

// Re-export key types for easy access
pub use adapters::{
    EditorWarnings, EditorWarningsArgs, InlineNotificationArgs, InlineNotifications, Processor,
    SaveGate, SaveGateArgs,
};
pub use config::{NotificationSettings, NotifierConfig};
pub use content::{
    CollectOptions, ContentItem, ContentRepository, DatasourceResolver, DatasourceSet, DeviceId,
    ItemId, ReferenceCollector, RenderingReference, RenderingSource, RepositoryCatalog,
    TestVariantSource, User,
};
pub use context::RequestContext;
pub use error::{HostError, NotifierError};
pub use notifications::{
    NotificationBuilder, NotificationOption, NotificationRecord, Severity, TextMode,
    ValidationOutcome,
};
pub use security::{ElevatedScope, NoElevation, PrivilegeElevator};
pub use snapshot::{ContentSnapshot, SnapshotError};
pub use telemetry::{create_surface_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    AccessChecker, CommandBinder, CommandOffer, Workflow, WorkflowAssignment, WorkflowCommand,
    WorkflowCommandBinder, WorkflowInspector, WorkflowProvider, WorkflowState,
};
