//! Connection error types

/// Error type for connection-layer operations
#[derive(Debug, Clone)]
pub enum ConnectionError {
    /// The remote core refused or cannot provide a registry handle
    RegistryUnavailable(String),
    /// Binding a proxy to an advertised object failed
    BindFailed {
        /// Advertised object id
        id: u32,
        /// Reason reported by the transport
        reason: String,
    },
    /// The connection is closed
    Closed,
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::RegistryUnavailable(reason) => {
                write!(f, "Registry unavailable: {}", reason)
            }
            ConnectionError::BindFailed { id, reason } => {
                write!(f, "Bind failed for object {}: {}", id, reason)
            }
            ConnectionError::Closed => write!(f, "Connection closed"),
        }
    }
}

impl std::error::Error for ConnectionError {}
