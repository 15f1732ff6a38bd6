//! Connection interface boundary
//!
//! The mirror does not own a transport. Connection setup, authentication and
//! wire framing live elsewhere; this module defines the seam between them and
//! the mirror: three traits the transport implements, and the event values it
//! delivers into the manager's dispatch loop.
//!
//! The traits cover the *outbound* half (sync requests, registry binds, proxy
//! teardown). The *inbound* half is [`ConnectionEvent`]: instead of
//! registering per-object callbacks with the transport, the transport tags
//! every notification with the object id it concerns and pushes it onto one
//! queue. The manager routes from there.

pub mod error;
pub mod event;

pub use error::ConnectionError;
pub use event::{ConnectionEvent, GlobalInfo, PropertyChange, CORE_ID};

/// Live connection to the remote core.
///
/// One manager is bound to one connection for its whole lifetime.
pub trait Connection {
    /// Issue a sync request against the core.
    ///
    /// Returns the sequence number the core will echo in a
    /// [`ConnectionEvent::Done`] notification once everything queued before
    /// the request has been processed.
    fn request_sync(&mut self) -> u32;

    /// Obtain a handle to the remote object registry.
    ///
    /// The registry delivers [`ConnectionEvent::Global`] and
    /// [`ConnectionEvent::GlobalRemove`] notifications for every object the
    /// remote side advertises.
    fn get_registry(
        &mut self,
        version: u32,
    ) -> std::result::Result<Box<dyn RegistryHandle>, ConnectionError>;
}

/// Handle to the remote object registry.
pub trait RegistryHandle {
    /// Bind a proxy to the advertised object `id`.
    ///
    /// `version` is the interface version the mirror speaks, not the version
    /// the remote advertised. Events for the bound object arrive tagged with
    /// `id` on the connection's event queue.
    fn bind(
        &mut self,
        id: u32,
        type_tag: &str,
        version: u32,
        flags: u32,
    ) -> std::result::Result<Box<dyn ProxyHandle>, ConnectionError>;

    /// Release the registry binding itself.
    fn destroy(&mut self);
}

/// Local handle representing a bound connection to one remote object.
pub trait ProxyHandle {
    /// Request teardown of the binding.
    ///
    /// Asynchronous: the transport confirms with a
    /// [`ConnectionEvent::Destroyed`] notification once the handle is
    /// invalidated. Dropping the box without calling this leaks the remote
    /// binding until the connection closes.
    fn destroy(&mut self);
}
