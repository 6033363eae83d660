//! Process-wide registry of per-wizard extension handlers.
//!
//! Registration happens during a one-time initialization phase, before
//! any request is served. `RegistryBuilder::finish` freezes the entries
//! into an immutable snapshot sorted by descending priority (stable for
//! ties, so equal priorities keep registration order). The snapshot is an
//! `Arc` slice: cloning is cheap and concurrent reads need no
//! synchronization. There is no removal and no post-boot registration.

use crate::error::RegistryError;
use crate::update::Updater;
use itertools::Itertools;
use log::debug;
use std::cmp::Reverse;
use std::sync::{Arc, OnceLock};

/// An extension callback invoked during update processing. Handlers may
/// inspect the in-flight [`Updater`] and record further errors.
pub type StepHandler = dyn Fn(&mut Updater) + Send + Sync;

/// One registered handler: its priority, the wizard it applies to, and
/// the callback itself.
pub struct HandlerEntry {
    pub priority: i32,
    pub wizard_id: String,
    handler: Arc<StepHandler>,
}

impl HandlerEntry {
    pub fn call(&self, updater: &mut Updater) {
        (self.handler.as_ref())(updater)
    }
}

/// Collects handler registrations during initialization.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<HandlerEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a wizard id. Priority defaults to 0 by
    /// convention; higher priorities run first.
    pub fn add_step_handler<F>(mut self, priority: i32, wizard_id: &str, handler: F) -> Self
    where
        F: Fn(&mut Updater) + Send + Sync + 'static,
    {
        self.entries.push(HandlerEntry {
            priority,
            wizard_id: wizard_id.to_string(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Freezes the registrations into an immutable, priority-sorted
    /// snapshot.
    pub fn finish(self) -> HandlerRegistry {
        let entries: Vec<HandlerEntry> = self
            .entries
            .into_iter()
            .sorted_by_key(|entry| Reverse(entry.priority))
            .collect();
        debug!("handler registry frozen with {} entries", entries.len());
        HandlerRegistry {
            entries: entries.into(),
        }
    }
}

/// The immutable handler snapshot queried on every step update.
#[derive(Clone)]
pub struct HandlerRegistry {
    entries: Arc<[HandlerEntry]>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    pub fn entries(&self) -> &[HandlerEntry] {
        &self.entries
    }

    /// All entries registered for a wizard id, in descending priority
    /// order (registration order for ties).
    pub fn for_wizard<'a>(&'a self, wizard_id: &'a str) -> impl Iterator<Item = &'a HandlerEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.wizard_id == wizard_id)
    }
}

static GLOBAL: OnceLock<HandlerRegistry> = OnceLock::new();

/// Installs the process-wide registry. Callable exactly once, during
/// initialization.
pub fn install(registry: HandlerRegistry) -> Result<(), RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// The installed process-wide registry, or an empty one when nothing was
/// installed.
pub fn global() -> HandlerRegistry {
    GLOBAL.get().cloned().unwrap_or_else(HandlerRegistry::empty)
}
