// Workflow inspection - read-only view of the host's workflow subsystem

pub mod types;
pub mod traits;
pub mod inspector;

pub use types::{
    CommandOffer, ResolvedAssignment, UnresolvedReason, WorkflowAssignment, WorkflowCommand, WorkflowState,
};
pub use traits::{AccessChecker, CommandBinder, Workflow, WorkflowCommandBinder, WorkflowProvider};
pub use inspector::{WorkflowInspector, ICON_FIELD};
