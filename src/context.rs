//! Per-invocation request context
//!
//! Everything the engine needs from its host is passed explicitly: the
//! current user and device, the repository and presentation accessors, the
//! authorization and privilege-elevation hooks, the command binder and the
//! notification settings. A context is built per page view or save and
//! dropped afterwards.

use crate::config::NotificationSettings;
use crate::content::traits::{RenderingSource, RepositoryCatalog, TestVariantSource};
use crate::content::types::{DeviceId, User};
use crate::security::PrivilegeElevator;
use crate::workflow::traits::{AccessChecker, CommandBinder};

#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub user: &'a User,
    pub device: &'a DeviceId,
    pub catalog: &'a dyn RepositoryCatalog,
    pub renderings: &'a dyn RenderingSource,
    pub test_variants: &'a dyn TestVariantSource,
    pub access: &'a dyn AccessChecker,
    pub elevator: &'a dyn PrivilegeElevator,
    pub command_binder: &'a dyn CommandBinder,
    pub settings: &'a NotificationSettings,
}

impl std::fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("user", &self.user.name)
            .field("device", &self.device)
            .field("settings", self.settings)
            .finish_non_exhaustive()
    }
}
