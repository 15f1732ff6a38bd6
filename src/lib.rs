//! Client-side mirror of a server-owned media object graph
//!
//! A media server advertises its object graph (devices, nodes, links, clients,
//! modules, metadata stores) over an asynchronous connection. This crate keeps
//! a consistent local copy of that graph so consumers can query it without a
//! round trip, and exposes a synchronization barrier that turns the server's
//! completion notifications into "everything queued up to now has been
//! applied" signals.
//!
//! # Architecture
//!
//! ```text
//!   transport (out of scope)
//!        │  ConnectionEvent values
//!        ▼
//!   ┌──────────────────────────────┐
//!   │ Manager                      │
//!   │   dispatch() ──► ObjectStore │──► find()/for_each()
//!   │        │            ▲        │
//!   │   TypeRegistry ─────┘        │
//!   │        │                     │
//!   │   SyncBarrier ──► HookList ──│──► sync/added/updated/
//!   └──────────────────────────────┘     removed/metadata
//! ```
//!
//! All mutation happens on the single thread that drains the connection's
//! event queue; handlers run to completion before the next event is
//! dispatched, so no locking is needed anywhere in the mirror.
//!
//! # Example
//! ```
//! use mirror_rs::{Connection, Manager, ManagerEvents};
//!
//! fn watch<C: Connection>(manager: &mut Manager<C>) {
//!     manager.subscribe(ManagerEvents {
//!         added: Some(Box::new(|o| println!("mirrored {} ({})", o.id, o.type_tag))),
//!         sync: Some(Box::new(|| println!("mirror is consistent"))),
//!         ..ManagerEvents::default()
//!     });
//! }
//! ```

pub mod connection;
pub mod error;
pub mod mirror;
pub mod stats;

pub use connection::{
    Connection, ConnectionError, ConnectionEvent, GlobalInfo, PropertyChange, ProxyHandle,
    RegistryHandle, CORE_ID,
};
pub use error::{Error, Result};
pub use mirror::{
    BindingState, ClientInfo, DeviceInfo, Info, Manager, ManagerEvents, ModuleInfo, NodeInfo,
    NodeState, Object, ObjectKind, Param, TypeDescriptor,
};
pub use stats::MirrorStats;
