//! Host surface adapters
//!
//! Each adapter is a plug-in for one host pipeline. They share the
//! notification builder and only differ in the arguments they fill and the
//! text mode they use.

use crate::context::RequestContext;
use crate::error::NotifierError;

pub mod editor_warnings;
pub mod inline_notifications;
pub mod save_gate;

pub use editor_warnings::{EditorWarnings, EditorWarningsArgs};
pub use inline_notifications::{InlineNotificationArgs, InlineNotifications};
pub use save_gate::{SaveGate, SaveGateArgs};

/// A host pipeline processor
pub trait Processor<Args> {
    /// Surface name used in logs and errors
    fn surface(&self) -> &'static str;

    fn process(&self, ctx: &RequestContext<'_>, args: &mut Args) -> Result<(), NotifierError>;
}
