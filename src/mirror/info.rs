//! Typed info payloads
//!
//! Each mirrored kind that caches state has its own payload shape. Updates
//! replace the whole payload; there is no partial merging, so a truncated or
//! malformed update can never leave a previously valid payload half-patched.

use std::collections::HashMap;

use crate::mirror::types::ObjectKind;

/// Cached info payload of a mirrored object.
///
/// Which variant an object carries is fixed at acceptance time by its kind;
/// link and metadata objects never carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Info {
    /// Payload of a module object
    Module(ModuleInfo),
    /// Payload of a client object
    Client(ClientInfo),
    /// Payload of a device object
    Device(DeviceInfo),
    /// Payload of a node object
    Node(NodeInfo),
}

impl Info {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Info::Module(_) => ObjectKind::Module,
            Info::Client(_) => ObjectKind::Client,
            Info::Device(_) => ObjectKind::Device,
            Info::Node(_) => ObjectKind::Node,
        }
    }
}

/// Info payload of a loaded server module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module name
    pub name: String,
    /// Path the module was loaded from
    pub filename: Option<String>,
    /// Arguments the module was loaded with
    pub args: Option<String>,
    /// Module properties
    pub props: HashMap<String, String>,
}

/// Info payload of a connected client handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client properties (application name, pid, ...)
    pub props: HashMap<String, String>,
}

/// Info payload of a device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device name
    pub name: String,
    /// Device properties
    pub props: HashMap<String, String>,
}

/// Processing state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// The node is in an error state
    Error,
    /// The node is being created
    Creating,
    /// The node is suspended, its device closed
    Suspended,
    /// The node is ready but not processing
    Idle,
    /// The node is processing
    Running,
}

/// Info payload of a media-processing node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// Current processing state
    pub state: NodeState,
    /// Error message, set when `state` is [`NodeState::Error`]
    pub error: Option<String>,
    /// Maximum number of input ports
    pub max_input_ports: u32,
    /// Maximum number of output ports
    pub max_output_ports: u32,
    /// Current number of input ports
    pub n_input_ports: u32,
    /// Current number of output ports
    pub n_output_ports: u32,
    /// Node properties
    pub props: HashMap<String, String>,
}

impl Default for NodeInfo {
    fn default() -> Self {
        Self {
            state: NodeState::Creating,
            error: None,
            max_input_ports: 0,
            max_output_ports: 0,
            n_input_ports: 0,
            n_output_ports: 0,
            props: HashMap::new(),
        }
    }
}
