//! Event values delivered by the transport
//!
//! Every notification the remote side emits (registry advertisements, proxy
//! lifecycle signals, typed object updates, sync completions) arrives as one
//! [`ConnectionEvent`] value on a single queue. The manager drains that queue
//! and routes each event by the object id it carries.

use std::collections::HashMap;

use bytes::Bytes;

use crate::mirror::Info;

/// Well-known id of the connection core itself.
///
/// Sync completions are addressed to this id; completions for other ids
/// belong to other consumers of the connection and are ignored by the mirror.
pub const CORE_ID: u32 = 0;

/// A remote object advertisement.
#[derive(Debug, Clone)]
pub struct GlobalInfo {
    /// Object id, unique on the remote side while the object exists
    pub id: u32,
    /// Permission bitmask the remote grants us on this object
    pub permissions: u32,
    /// Object type tag (e.g. `"Node"`)
    pub type_tag: String,
    /// Interface version the remote advertises
    pub version: u32,
    /// Initial key/value properties
    pub properties: HashMap<String, String>,
}

/// A single metadata property change.
///
/// Carried through to observers verbatim; the mirror neither interprets nor
/// stores these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    /// Id of the object the property describes
    pub subject: u32,
    /// Property key (e.g. `"default.audio.sink"`)
    pub key: String,
    /// Type marker of the value (e.g. `"s"` for string)
    pub value_type: String,
    /// Property value
    pub value: String,
}

/// A notification delivered by the connection.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// The core finished processing everything queued before sync request
    /// `seq`. Only meaningful when `id` is [`CORE_ID`].
    Done {
        /// Id the completion is addressed to
        id: u32,
        /// Sequence number returned by the matching sync request
        seq: u32,
    },

    /// The registry advertises a new remote object.
    Global(GlobalInfo),

    /// The registry withdraws a remote object.
    GlobalRemove {
        /// Id of the withdrawn object
        id: u32,
    },

    /// The remote side removed the object a proxy is bound to.
    ///
    /// The binding is still alive; the mirror reacts by requesting its
    /// teardown.
    Removed {
        /// Id of the bound object
        id: u32,
    },

    /// A proxy binding has been invalidated and must not be used again.
    Destroyed {
        /// Id of the bound object
        id: u32,
    },

    /// Typed update carrying a full replacement info payload.
    Info {
        /// Id of the bound object
        id: u32,
        /// New payload; replaces the cached one wholesale
        info: Info,
    },

    /// A parameter blob for an object that exposes parameters.
    Param {
        /// Id of the bound object
        id: u32,
        /// Parameter category id
        param_id: u32,
        /// Opaque parameter payload
        data: Bytes,
    },

    /// A property change reported by a metadata object.
    Property {
        /// Id of the metadata object that reported the change
        id: u32,
        /// The change itself
        change: PropertyChange,
    },
}
