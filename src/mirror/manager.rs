//! Manager facade
//!
//! Owns the connection, the object store, the subscriber list and the sync
//! barrier, and routes every [`ConnectionEvent`] to the right place. All of
//! it runs on the single thread that drains the connection's event queue;
//! each event is handled to completion before the next one is looked at.
//!
//! # Accept path
//!
//! An advertisement is mirrored only when the type registry resolves it and
//! the registry bind succeeds. Acceptance broadcasts `added` and issues a
//! sync request, so a later `sync` broadcast tells observers the batch that
//! contained the advertisement has fully landed.
//!
//! # Teardown paths
//!
//! Remote withdrawal (`GlobalRemove`) deletes the store entry, broadcasting
//! `removed` with the last known view. Local invalidation (`Destroyed`)
//! clears the entry's cached state but keeps it in the store until the
//! withdrawal arrives. The two can come in either order; see
//! [`object`](crate::mirror::object) for the state machine.

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::connection::{
    Connection, ConnectionEvent, GlobalInfo, PropertyChange, RegistryHandle,
};
use crate::error::Result;
use crate::mirror::hooks::{HookList, ManagerEvents};
use crate::mirror::info::Info;
use crate::mirror::object::Object;
use crate::mirror::store::ObjectStore;
use crate::mirror::sync::SyncBarrier;
use crate::mirror::types::{self, ObjectKind};
use crate::stats::MirrorStats;

/// Registry interface version the mirror speaks.
pub const REGISTRY_VERSION: u32 = 3;

/// The mirror facade.
///
/// Create one per connection, subscribe, then feed it the connection's
/// events: either call [`dispatch`](Manager::dispatch) directly or hand a
/// channel receiver to [`run`](Manager::run).
pub struct Manager<C: Connection> {
    connection: C,
    /// Registry binding; emptied by teardown so teardown can run only once
    registry: Option<Box<dyn RegistryHandle>>,
    store: ObjectStore,
    hooks: HookList,
    barrier: SyncBarrier,
}

impl<C: Connection> Manager<C> {
    /// Create a mirror bound to `connection`.
    ///
    /// Obtains the registry handle and issues the first sync request, so the
    /// very first settled barrier already means "the initial enumeration has
    /// been applied".
    pub fn new(mut connection: C) -> Result<Self> {
        let registry = connection.get_registry(REGISTRY_VERSION)?;

        let mut manager = Self {
            connection,
            registry: Some(registry),
            store: ObjectStore::new(),
            hooks: HookList::new(),
            barrier: SyncBarrier::new(),
        };
        manager.core_sync();

        Ok(manager)
    }

    /// Append a subscriber record.
    ///
    /// Subscribers are invoked in subscription order. A record appended while
    /// an event is being broadcast receives later events only.
    pub fn subscribe(&mut self, events: ManagerEvents) {
        self.hooks.append(events);
    }

    /// Look up a mirrored object by id.
    ///
    /// The reference is only valid until the next event is dispatched; do not
    /// hold it across a return to the event loop.
    pub fn find(&self, id: u32) -> Option<&Object> {
        self.store.find(id)
    }

    /// Visit mirrored objects in acceptance order until the callback yields
    /// a value, which is returned.
    pub fn for_each<R>(&self, callback: impl FnMut(&Object) -> Option<R>) -> Option<R> {
        self.store.for_each(callback)
    }

    /// Number of mirrored objects.
    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    /// Point-in-time mirror statistics.
    pub fn stats(&self) -> MirrorStats {
        let mut stats = MirrorStats::new();
        stats.syncs = self.barrier.settled();
        for object in self.store.iter() {
            stats.objects += 1;
            if object.is_bound() {
                stats.bound += 1;
            }
            match object.kind() {
                ObjectKind::Module => stats.modules += 1,
                ObjectKind::Client => stats.clients += 1,
                ObjectKind::Device => stats.devices += 1,
                ObjectKind::Node => stats.nodes += 1,
                ObjectKind::Link => stats.links += 1,
                ObjectKind::Metadata => stats.metadata += 1,
            }
        }
        stats
    }

    /// Route one connection event.
    pub fn dispatch(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Done { id, seq } => self.on_done(id, seq),
            ConnectionEvent::Global(global) => self.on_global(global),
            ConnectionEvent::GlobalRemove { id } => self.on_global_remove(id),
            ConnectionEvent::Removed { id } => self.on_proxy_removed(id),
            ConnectionEvent::Destroyed { id } => self.on_proxy_destroyed(id),
            ConnectionEvent::Info { id, info } => self.on_info(id, info),
            ConnectionEvent::Param { id, param_id, data } => self.on_param(id, param_id, data),
            ConnectionEvent::Property { id, change } => self.on_property(id, change),
        }
    }

    /// Drain `events` until the transport closes the channel.
    ///
    /// The channel is unbounded because registry notifications are lossless
    /// control traffic; dropping one would desynchronize the mirror for the
    /// rest of the connection's lifetime.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<ConnectionEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event);
        }
        tracing::debug!("event queue closed, dispatch loop exiting");
    }

    /// Tear the mirror down, force-destroying every remaining binding.
    ///
    /// Also performed on drop; calling this merely makes the point explicit.
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn core_sync(&mut self) {
        let seq = self.connection.request_sync();
        self.barrier.expect(seq);
    }

    fn on_global(&mut self, global: GlobalInfo) {
        let GlobalInfo {
            id,
            permissions,
            type_tag,
            version,
            properties,
        } = global;

        let Some(descriptor) = types::resolve(&type_tag, version) else {
            tracing::trace!(
                id,
                type_tag = %type_tag,
                version,
                "No descriptor for advertisement, skipping"
            );
            return;
        };

        let Some(registry) = self.registry.as_mut() else {
            return;
        };

        // Bind at the descriptor's version, not the advertised one.
        let proxy = match registry.bind(id, &type_tag, descriptor.version, 0) {
            Ok(proxy) => proxy,
            Err(e) => {
                tracing::error!(
                    id,
                    type_tag = %type_tag,
                    version,
                    error = %e,
                    "Failed to bind advertised object"
                );
                return;
            }
        };

        let object = Object::new(
            id,
            type_tag,
            version,
            permissions,
            properties,
            descriptor.kind,
            proxy,
        );

        tracing::info!(
            id,
            kind = %object.kind(),
            version,
            "Object mirrored"
        );

        self.store.insert(object);
        if let Some(object) = self.store.last() {
            self.hooks.emit_added(object);
        }

        self.core_sync();
    }

    fn on_global_remove(&mut self, id: u32) {
        let Some(mut object) = self.store.remove(id) else {
            return;
        };

        tracing::info!(id, kind = %object.kind(), "Object withdrawn");

        self.hooks.emit_removed(&object);

        // Best-effort: a no-op when the proxy already reported invalidation.
        object.release_proxy();
    }

    fn on_proxy_removed(&mut self, id: u32) {
        if let Some(object) = self.store.find_mut(id) {
            tracing::debug!(id, "Remote removed bound object, destroying proxy");
            object.release_proxy();
        }
    }

    fn on_proxy_destroyed(&mut self, id: u32) {
        if let Some(object) = self.store.find_mut(id) {
            tracing::debug!(id, "Proxy invalidated, clearing cached state");
            object.invalidate();
        }
    }

    fn on_info(&mut self, id: u32, info: Info) {
        let Some(object) = self.store.find_mut(id) else {
            tracing::trace!(id, "Info update for unknown object");
            return;
        };

        if !object.is_bound() {
            tracing::debug!(id, "Info update after invalidation, dropping");
            return;
        }

        if !object.update_info(info) {
            tracing::warn!(
                id,
                kind = %object.kind(),
                "Info payload kind mismatch, dropping"
            );
            return;
        }

        if let Some(object) = self.store.find(id) {
            self.hooks.emit_updated(object);
        }
    }

    fn on_param(&mut self, id: u32, param_id: u32, data: Bytes) {
        let Some(object) = self.store.find_mut(id) else {
            tracing::trace!(id, param_id, "Param for unknown object");
            return;
        };

        if !object.is_bound() || !object.kind().has_info() {
            tracing::debug!(id, param_id, "Param for non-parameterized or invalidated object");
            return;
        }

        object.add_param(param_id, data);
        tracing::trace!(id, param_id, "Param stored");
    }

    fn on_property(&mut self, id: u32, change: PropertyChange) {
        let Some(object) = self.store.find(id) else {
            tracing::trace!(id, "Property change from unknown object");
            return;
        };

        if object.kind() != ObjectKind::Metadata || !object.is_bound() {
            tracing::debug!(id, kind = %object.kind(), "Property change from non-metadata object");
            return;
        }

        // Pass through untouched; the mirror caches nothing for metadata.
        self.hooks.emit_metadata(&change);
    }

    fn on_done(&mut self, id: u32, seq: u32) {
        if !self.barrier.settle(id, seq) {
            return;
        }

        tracing::debug!(seq, objects = self.store.len(), "Sync barrier settled");

        // The batch that created these entries has been fully applied.
        for object in self.store.iter_mut() {
            object.new = false;
        }

        self.hooks.emit_sync();
    }

    fn teardown(&mut self) {
        let objects = self.store.drain();
        if !objects.is_empty() {
            tracing::info!(objects = objects.len(), "Tearing down mirror");
        }
        for mut object in objects {
            object.release_proxy();
        }
        if let Some(mut registry) = self.registry.take() {
            registry.destroy();
        }
    }
}

impl<C: Connection> Drop for Manager<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
