//! Ordered multi-subscriber event broadcast
//!
//! Subscribers register a [`ManagerEvents`] record holding whichever handlers
//! they care about; any context they need lives in the closure captures.
//! Emission walks the records in subscription order and skips absent
//! handlers. The subscriber count is snapshotted before the walk, so a record
//! appended while an event is being delivered only sees later events.

use crate::connection::PropertyChange;
use crate::mirror::object::Object;

/// Handler set of one subscriber.
///
/// Every slot is optional; fill in the ones you need and take the rest from
/// `Default`:
///
/// ```
/// use mirror_rs::ManagerEvents;
///
/// let events = ManagerEvents {
///     added: Some(Box::new(|o| println!("added {}", o.id))),
///     ..ManagerEvents::default()
/// };
/// ```
#[derive(Default)]
pub struct ManagerEvents {
    /// All updates queued before the last sync request have been applied
    pub sync: Option<Box<dyn FnMut()>>,
    /// A remote object was accepted into the mirror
    pub added: Option<Box<dyn FnMut(&Object)>>,
    /// A mirrored object's cached info payload was replaced
    pub updated: Option<Box<dyn FnMut(&Object)>>,
    /// A mirrored object was withdrawn; the argument is its last known view
    pub removed: Option<Box<dyn FnMut(&Object)>>,
    /// A metadata object relayed a property change
    pub metadata: Option<Box<dyn FnMut(&PropertyChange)>>,
}

/// Append-ordered subscriber list.
#[derive(Default)]
pub struct HookList {
    subscribers: Vec<ManagerEvents>,
}

impl HookList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber record.
    pub fn append(&mut self, events: ManagerEvents) {
        self.subscribers.push(events);
    }

    /// Number of subscriber records.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn emit_sync(&mut self) {
        let count = self.subscribers.len();
        for subscriber in &mut self.subscribers[..count] {
            if let Some(handler) = subscriber.sync.as_mut() {
                handler();
            }
        }
    }

    pub fn emit_added(&mut self, object: &Object) {
        let count = self.subscribers.len();
        for subscriber in &mut self.subscribers[..count] {
            if let Some(handler) = subscriber.added.as_mut() {
                handler(object);
            }
        }
    }

    pub fn emit_updated(&mut self, object: &Object) {
        let count = self.subscribers.len();
        for subscriber in &mut self.subscribers[..count] {
            if let Some(handler) = subscriber.updated.as_mut() {
                handler(object);
            }
        }
    }

    pub fn emit_removed(&mut self, object: &Object) {
        let count = self.subscribers.len();
        for subscriber in &mut self.subscribers[..count] {
            if let Some(handler) = subscriber.removed.as_mut() {
                handler(object);
            }
        }
    }

    pub fn emit_metadata(&mut self, change: &PropertyChange) {
        let count = self.subscribers.len();
        for subscriber in &mut self.subscribers[..count] {
            if let Some(handler) = subscriber.metadata.as_mut() {
                handler(change);
            }
        }
    }
}
