//! Mirrored object entries
//!
//! One [`Object`] mirrors one remote entity: the common fields every kind
//! shares, a kind-dependent cached info payload, and the proxy binding that
//! keeps the remote side delivering updates for it.
//!
//! # Binding lifecycle
//!
//! ```text
//!          global accepted
//!                │
//!                ▼
//!             Bound ──────destroyed event──────► Invalidated
//!                │                                    │
//!          global_remove                        global_remove
//!                │                                    │
//!                ▼                                    ▼
//!         (entry deleted) ◄───────────────── (entry deleted)
//! ```
//!
//! The remote removal notification and the local invalidation signal are not
//! ordered with respect to each other by the transport. Whichever arrives
//! first wins its half of the teardown; the proxy slot is an `Option` so the
//! losing half degrades to a no-op instead of a double free.

use std::collections::HashMap;

use bytes::Bytes;

use crate::connection::ProxyHandle;
use crate::mirror::info::Info;
use crate::mirror::types::ObjectKind;

/// Binding lifecycle state of a mirrored object that is still in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// The proxy is attached and delivering events
    Bound,
    /// The proxy reported invalidation; the entry survives until the remote
    /// removal notification arrives
    Invalidated,
}

/// One parameter blob attached to an object
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter category id
    pub id: u32,
    /// Opaque payload
    pub data: Bytes,
}

/// A mirrored remote object.
pub struct Object {
    /// Remote object id
    pub id: u32,

    /// Type tag the remote advertised
    pub type_tag: String,

    /// Interface version the remote advertised
    pub version: u32,

    /// Permission bitmask granted on this object
    pub permissions: u32,

    /// Key/value properties from the advertisement
    pub properties: HashMap<String, String>,

    /// Cached info payload; replaced wholesale on every update
    pub info: Option<Info>,

    /// Accumulated parameter blobs, in delivery order
    pub params: Vec<Param>,

    /// Set at creation, cleared once the sync barrier covering the
    /// advertisement settles
    pub new: bool,

    /// Kind selected from the type registry at acceptance
    kind: ObjectKind,

    /// The live binding; emptied on invalidation
    proxy: Option<Box<dyn ProxyHandle>>,
}

impl Object {
    pub(crate) fn new(
        id: u32,
        type_tag: String,
        version: u32,
        permissions: u32,
        properties: HashMap<String, String>,
        kind: ObjectKind,
        proxy: Box<dyn ProxyHandle>,
    ) -> Self {
        Self {
            id,
            type_tag,
            version,
            permissions,
            properties,
            info: None,
            params: Vec::new(),
            new: true,
            kind,
            proxy: Some(proxy),
        }
    }

    /// The kind assigned at acceptance time.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Current binding lifecycle state.
    pub fn binding_state(&self) -> BindingState {
        if self.proxy.is_some() {
            BindingState::Bound
        } else {
            BindingState::Invalidated
        }
    }

    /// Whether the proxy binding is still attached.
    pub fn is_bound(&self) -> bool {
        self.proxy.is_some()
    }

    /// Look up a property by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Append a parameter blob.
    pub fn add_param(&mut self, id: u32, data: Bytes) {
        self.params.push(Param { id, data });
    }

    /// Clear parameters, either one category or all of them.
    ///
    /// Returns how many entries were removed.
    pub fn clear_params(&mut self, id: Option<u32>) -> usize {
        match id {
            Some(id) => {
                let before = self.params.len();
                self.params.retain(|p| p.id != id);
                before - self.params.len()
            }
            None => {
                let count = self.params.len();
                self.params.clear();
                count
            }
        }
    }

    /// Replace the cached info payload.
    ///
    /// Returns `false` without touching state when the payload does not match
    /// this object's kind.
    pub(crate) fn update_info(&mut self, info: Info) -> bool {
        if !self.kind.accepts(&info) {
            return false;
        }
        self.info = Some(info);
        true
    }

    /// Local-destroy step: the proxy reported invalidation.
    ///
    /// Clears parameters, drops the cached payload and empties the proxy
    /// slot. The store entry itself stays until the remote removal arrives.
    pub(crate) fn invalidate(&mut self) {
        self.clear_params(None);
        self.info = None;
        self.proxy = None;
    }

    /// Best-effort proxy teardown for the removal path.
    ///
    /// A no-op when the binding was already invalidated.
    pub(crate) fn release_proxy(&mut self) {
        if let Some(mut proxy) = self.proxy.take() {
            proxy.destroy();
        }
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("id", &self.id)
            .field("type_tag", &self.type_tag)
            .field("version", &self.version)
            .field("permissions", &self.permissions)
            .field("kind", &self.kind)
            .field("binding_state", &self.binding_state())
            .field("new", &self.new)
            .field("params", &self.params.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct TestProxy {
        destroyed: Rc<Cell<u32>>,
    }

    impl ProxyHandle for TestProxy {
        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    fn test_object(destroyed: &Rc<Cell<u32>>) -> Object {
        Object::new(
            7,
            "Node".into(),
            3,
            0,
            HashMap::new(),
            ObjectKind::Node,
            Box::new(TestProxy {
                destroyed: Rc::clone(destroyed),
            }),
        )
    }

    #[test]
    fn test_new_object_is_bound() {
        let destroyed = Rc::new(Cell::new(0));
        let object = test_object(&destroyed);

        assert_eq!(object.binding_state(), BindingState::Bound);
        assert!(object.new);
        assert!(object.info.is_none());
    }

    #[test]
    fn test_invalidate_clears_cached_state() {
        let destroyed = Rc::new(Cell::new(0));
        let mut object = test_object(&destroyed);
        object.info = Some(Info::Node(crate::mirror::info::NodeInfo::default()));
        object.add_param(2, Bytes::from_static(b"fmt"));

        object.invalidate();

        assert_eq!(object.binding_state(), BindingState::Invalidated);
        assert!(object.info.is_none());
        assert!(object.params.is_empty());
        // Invalidation releases the slot without issuing a destroy request;
        // the proxy is already gone on the transport side.
        assert_eq!(destroyed.get(), 0);
    }

    #[test]
    fn test_release_proxy_is_idempotent() {
        let destroyed = Rc::new(Cell::new(0));
        let mut object = test_object(&destroyed);

        object.release_proxy();
        object.release_proxy();

        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn test_release_after_invalidate_is_noop() {
        let destroyed = Rc::new(Cell::new(0));
        let mut object = test_object(&destroyed);

        object.invalidate();
        object.release_proxy();

        assert_eq!(destroyed.get(), 0);
    }

    #[test]
    fn test_update_info_rejects_kind_mismatch() {
        let destroyed = Rc::new(Cell::new(0));
        let mut object = test_object(&destroyed);

        assert!(!object.update_info(Info::Client(crate::mirror::info::ClientInfo::default())));
        assert!(object.info.is_none());

        assert!(object.update_info(Info::Node(crate::mirror::info::NodeInfo::default())));
        assert!(object.info.is_some());
    }

    #[test]
    fn test_clear_params_by_id_and_entirely() {
        let destroyed = Rc::new(Cell::new(0));
        let mut object = test_object(&destroyed);
        object.add_param(2, Bytes::from_static(b"a"));
        object.add_param(3, Bytes::from_static(b"b"));
        object.add_param(2, Bytes::from_static(b"c"));

        assert_eq!(object.clear_params(Some(2)), 2);
        assert_eq!(object.params.len(), 1);
        assert_eq!(object.params[0].id, 3);

        assert_eq!(object.clear_params(None), 1);
        assert!(object.params.is_empty());
    }
}
