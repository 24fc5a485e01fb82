// Recording collaborators and shared fixtures for unit tests

use std::cell::{Cell, RefCell};

use crate::content::traits::TestVariantSource;
use crate::content::types::{ContentItem, RenderingReference};
use crate::error::HostError;
use crate::security::PrivilegeElevator;
use crate::snapshot::ContentSnapshot;
use crate::workflow::traits::{CommandBinder, Workflow};
use crate::workflow::types::WorkflowCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationEvent {
    Acquired,
    Released,
}

/// Elevator that records every acquire and release
#[derive(Debug, Default)]
pub struct RecordingElevator {
    events: RefCell<Vec<ElevationEvent>>,
    depth: Cell<i32>,
}

impl RecordingElevator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ElevationEvent> {
        self.events.borrow().clone()
    }

    /// Currently held elevations
    pub fn depth(&self) -> i32 {
        self.depth.get()
    }

    pub fn acquire_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| **e == ElevationEvent::Acquired)
            .count()
    }

    /// Every acquire was matched by a release, and never the other way round
    pub fn is_balanced(&self) -> bool {
        let mut open = 0i32;
        for event in self.events.borrow().iter() {
            match event {
                ElevationEvent::Acquired => open += 1,
                ElevationEvent::Released => open -= 1,
            }
            if open < 0 {
                return false;
            }
        }
        open == 0
    }
}

impl PrivilegeElevator for RecordingElevator {
    fn acquire(&self) {
        self.events.borrow_mut().push(ElevationEvent::Acquired);
        self.depth.set(self.depth.get() + 1);
    }

    fn release(&self) {
        self.events.borrow_mut().push(ElevationEvent::Released);
        self.depth.set(self.depth.get() - 1);
    }
}

/// Test variant source whose every lookup fails
#[derive(Debug)]
pub struct FailingTestVariants {
    error: HostError,
    calls: Cell<usize>,
}

impl FailingTestVariants {
    pub fn new(error: HostError) -> Self {
        Self {
            error,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TestVariantSource for FailingTestVariants {
    fn variable_item(
        &self,
        _reference: &RenderingReference,
    ) -> Result<Option<ContentItem>, HostError> {
        self.calls.set(self.calls.get() + 1);
        Err(self.error.clone())
    }
}

/// Command binder that records which commands were bound
#[derive(Debug, Default)]
pub struct RecordingBinder {
    bound: RefCell<Vec<String>>,
}

impl RecordingBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&self) -> Vec<String> {
        self.bound.borrow().clone()
    }
}

impl CommandBinder for RecordingBinder {
    fn bind(&self, item: &ContentItem, workflow: &dyn Workflow, command: &WorkflowCommand) -> String {
        self.bound.borrow_mut().push(command.id.clone());
        format!("test:{}:{}:{}", workflow.id(), item.name, command.id)
    }
}

/// The site fixture shared with the integration tests
pub fn sample_snapshot() -> ContentSnapshot {
    ContentSnapshot::from_json_str(include_str!("../tests/fixtures/site.json"))
        .expect("site fixture should parse")
}

pub fn sample_item(snapshot: &ContentSnapshot, path: &str) -> ContentItem {
    snapshot
        .find_item("master", path)
        .unwrap_or_else(|| panic!("fixture item {path} should exist"))
}
