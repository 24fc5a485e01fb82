//! Scoped privilege elevation
//!
//! Some reads (multivariate test definitions, workflow state items) may sit
//! outside what the current user is allowed to see. Those reads run inside an
//! `ElevatedScope`, which acquires elevation on entry and releases it when
//! dropped, so release happens on every exit path including `?`, early
//! return and unwinding.

use tracing::trace;

/// Host hook that switches privilege elevation on and off
pub trait PrivilegeElevator {
    fn acquire(&self);
    fn release(&self);
}

/// Elevator for hosts without a security model
#[derive(Debug, Default, Clone, Copy)]
pub struct NoElevation;

impl PrivilegeElevator for NoElevation {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// Guard holding elevated privileges until dropped
#[must_use = "elevation is released as soon as the scope is dropped"]
pub struct ElevatedScope<'a> {
    elevator: &'a dyn PrivilegeElevator,
    purpose: &'static str,
}

impl<'a> ElevatedScope<'a> {
    pub fn enter(elevator: &'a dyn PrivilegeElevator, purpose: &'static str) -> Self {
        elevator.acquire();
        trace!(purpose = purpose, "Privilege elevation acquired");
        Self { elevator, purpose }
    }
}

impl Drop for ElevatedScope<'_> {
    fn drop(&mut self) {
        self.elevator.release();
        trace!(purpose = self.purpose, "Privilege elevation released");
    }
}

/// Run `f` with elevated privileges
pub fn with_elevation<T>(
    elevator: &dyn PrivilegeElevator,
    purpose: &'static str,
    f: impl FnOnce() -> T,
) -> T {
    let _scope = ElevatedScope::enter(elevator, purpose);
    f()
}
