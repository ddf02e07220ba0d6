//! High-level arena orchestrator.
//!
//! The orchestrator owns the background worker, wires up command/event
//! channels, and exposes a builder-based API for embedding the arena in a
//! transport of the caller's choosing.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::{ArenaError, ArenaHandle, Result};
use crate::events::{Event, EventBus, Topic};
use crate::repository::StoreSet;
use crate::workers::{ArenaWorker, Command};

/// Arena configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub command_buffer_size: usize,
    pub event_capacity: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32,
            event_capacity: 100,
        }
    }
}

/// Running arena engine.
///
/// Design: the arena owns the worker task and coordinates shutdown;
/// [`ArenaHandle`] provides a cloneable façade for clients.
pub struct Arena {
    handle: ArenaHandle,
    worker_handle: JoinHandle<()>,
}

impl Arena {
    /// Create a new arena builder.
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::new()
    }

    /// Get a cloneable handle to this arena.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> ArenaHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shut the arena down gracefully.
    ///
    /// Drops the owned handle and waits for the worker to drain its command
    /// queue. Clones of the handle keep the worker alive until they drop too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(ArenaError::WorkerJoin)
    }
}

/// Builder for [`Arena`] with flexible configuration.
pub struct ArenaBuilder {
    config: ArenaConfig,
    stores: Option<StoreSet>,
}

impl ArenaBuilder {
    fn new() -> Self {
        Self {
            config: ArenaConfig::default(),
            stores: None,
        }
    }

    /// Override arena configuration.
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a store set (defaults to fully in-memory).
    ///
    /// This is the seam for durable backends: anything implementing the
    /// repository traits plugs in here without touching the engine.
    pub fn stores(mut self, stores: StoreSet) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Build the arena and spawn its worker.
    pub async fn build(self) -> Arena {
        let stores = self.stores.unwrap_or_else(StoreSet::in_memory);

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size);
        let events = EventBus::with_capacity(self.config.event_capacity);

        let handle = ArenaHandle::new(command_tx, events.clone());

        let worker = ArenaWorker::new(stores, command_rx, events);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Arena {
            handle,
            worker_handle,
        }
    }
}
