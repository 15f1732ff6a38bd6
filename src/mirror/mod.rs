//! The mirror core
//!
//! Keeps the local copy of the remote object graph consistent with the
//! notifications the connection delivers, and broadcasts changes to
//! subscribers.
//!
//! # Components
//!
//! - [`types`]: static type registry deciding which advertised objects are
//!   mirrored at all, and as what kind
//! - [`object`]: one mirrored entry and its binding lifecycle
//! - [`store`]: the insertion-ordered set of mirrored entries
//! - [`hooks`]: ordered multi-subscriber event broadcast
//! - [`sync`]: the sequence-number barrier behind the `sync` event
//! - [`manager`]: the facade wiring all of the above to a connection

pub mod hooks;
pub mod info;
pub mod manager;
pub mod object;
pub mod store;
pub mod sync;
pub mod types;

pub use hooks::ManagerEvents;
pub use info::{ClientInfo, DeviceInfo, Info, ModuleInfo, NodeInfo, NodeState};
pub use manager::Manager;
pub use object::{BindingState, Object, Param};
pub use store::ObjectStore;
pub use types::{ObjectKind, TypeDescriptor};
