//! Static type registry
//!
//! The remote side advertises objects with a free-form type tag and an
//! interface version. The mirror only tracks the closed set of kinds it
//! understands; everything else is skipped without becoming visible anywhere.
//! The table below is immutable and scanned in a fixed priority order.

use crate::mirror::info::Info;

/// Type tag of loaded server modules
pub const TYPE_MODULE: &str = "Module";
/// Type tag of connected client handles
pub const TYPE_CLIENT: &str = "Client";
/// Type tag of devices
pub const TYPE_DEVICE: &str = "Device";
/// Type tag of media-processing nodes
pub const TYPE_NODE: &str = "Node";
/// Type tag of links between node ports
pub const TYPE_LINK: &str = "Link";
/// Type tag of key/value metadata stores
pub const TYPE_METADATA: &str = "Metadata";

/// The closed set of object kinds the mirror understands.
///
/// The kind is selected once when an advertisement is accepted; all later
/// updates pattern-match on it instead of consulting the tag again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A loaded server module
    Module,
    /// A connected client handle
    Client,
    /// A device
    Device,
    /// A media-processing node
    Node,
    /// A link between node ports
    Link,
    /// A key/value metadata store
    Metadata,
}

impl ObjectKind {
    /// Whether this kind receives typed info updates.
    ///
    /// Links are tracked for existence only; metadata objects relay property
    /// changes but cache nothing.
    pub fn has_info(self) -> bool {
        matches!(
            self,
            ObjectKind::Module | ObjectKind::Client | ObjectKind::Device | ObjectKind::Node
        )
    }

    /// Whether this kind receives any typed events at all.
    pub fn has_events(self) -> bool {
        !matches!(self, ObjectKind::Link)
    }

    /// Whether `info` is a payload this kind caches.
    pub fn accepts(self, info: &Info) -> bool {
        self == info.kind()
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ObjectKind::Module => TYPE_MODULE,
            ObjectKind::Client => TYPE_CLIENT,
            ObjectKind::Device => TYPE_DEVICE,
            ObjectKind::Node => TYPE_NODE,
            ObjectKind::Link => TYPE_LINK,
            ObjectKind::Metadata => TYPE_METADATA,
        };
        f.write_str(tag)
    }
}

/// One entry of the static type table.
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    /// Type tag the remote must advertise
    pub type_tag: &'static str,
    /// Minimum interface version the remote must advertise; also the version
    /// the mirror binds at
    pub version: u32,
    /// Kind assigned to accepted objects
    pub kind: ObjectKind,
}

/// The descriptor table, in priority order.
const TYPES: &[TypeDescriptor] = &[
    TypeDescriptor {
        type_tag: TYPE_MODULE,
        version: 3,
        kind: ObjectKind::Module,
    },
    TypeDescriptor {
        type_tag: TYPE_CLIENT,
        version: 3,
        kind: ObjectKind::Client,
    },
    TypeDescriptor {
        type_tag: TYPE_DEVICE,
        version: 3,
        kind: ObjectKind::Device,
    },
    TypeDescriptor {
        type_tag: TYPE_NODE,
        version: 3,
        kind: ObjectKind::Node,
    },
    TypeDescriptor {
        type_tag: TYPE_LINK,
        version: 3,
        kind: ObjectKind::Link,
    },
    TypeDescriptor {
        type_tag: TYPE_METADATA,
        version: 3,
        kind: ObjectKind::Metadata,
    },
];

/// Resolve an advertisement to a descriptor.
///
/// Returns the first entry whose tag matches and whose minimum version is at
/// most the advertised one. `None` is not an error: the advertisement is
/// simply not mirrored.
pub fn resolve(type_tag: &str, version: u32) -> Option<&'static TypeDescriptor> {
    TYPES
        .iter()
        .find(|t| t.type_tag == type_tag && t.version <= version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_types() {
        for (tag, kind) in [
            (TYPE_MODULE, ObjectKind::Module),
            (TYPE_CLIENT, ObjectKind::Client),
            (TYPE_DEVICE, ObjectKind::Device),
            (TYPE_NODE, ObjectKind::Node),
            (TYPE_LINK, ObjectKind::Link),
            (TYPE_METADATA, ObjectKind::Metadata),
        ] {
            let descriptor = resolve(tag, 3).expect(tag);
            assert_eq!(descriptor.kind, kind);
            assert_eq!(descriptor.type_tag, tag);
        }
    }

    #[test]
    fn test_resolve_newer_advertised_version() {
        // A remote speaking a newer interface still matches the entry.
        let descriptor = resolve(TYPE_NODE, 7).unwrap();
        assert_eq!(descriptor.version, 3);
    }

    #[test]
    fn test_resolve_rejects_old_version() {
        assert!(resolve(TYPE_NODE, 2).is_none());
        assert!(resolve(TYPE_NODE, 0).is_none());
    }

    #[test]
    fn test_resolve_rejects_unknown_tag() {
        assert!(resolve("Obsolete", 3).is_none());
        assert!(resolve("", 3).is_none());
    }

    #[test]
    fn test_kind_bindings() {
        assert!(ObjectKind::Node.has_info());
        assert!(ObjectKind::Node.has_events());
        assert!(!ObjectKind::Metadata.has_info());
        assert!(ObjectKind::Metadata.has_events());
        assert!(!ObjectKind::Link.has_info());
        assert!(!ObjectKind::Link.has_events());
    }
}
