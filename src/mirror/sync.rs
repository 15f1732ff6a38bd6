//! Synchronization barrier
//!
//! Every accepted advertisement is followed by a sync request against the
//! connection core. Only the most recent request matters: its sequence number
//! overwrites the pending one, and the barrier settles when the core reports
//! completion of exactly that number. Completions for superseded numbers can
//! never match and are ignored without bookkeeping.

use crate::connection::CORE_ID;

/// Matches core completion notifications against the latest sync request.
#[derive(Debug, Default)]
pub struct SyncBarrier {
    /// Sequence number of the most recent sync request
    pending_seq: u32,
    /// How many barriers have settled so far
    settled: u64,
}

impl SyncBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sequence number of a freshly issued sync request,
    /// superseding any prior one.
    pub fn expect(&mut self, seq: u32) {
        self.pending_seq = seq;
    }

    /// The sequence number the barrier is currently waiting on.
    pub fn pending(&self) -> u32 {
        self.pending_seq
    }

    /// Process a completion notification.
    ///
    /// Returns `true` exactly when the notification is addressed to the core
    /// and matches the pending sequence number, which is the moment the
    /// mirror is consistent with everything queued before the request.
    pub fn settle(&mut self, id: u32, seq: u32) -> bool {
        if id != CORE_ID || seq != self.pending_seq {
            return false;
        }
        self.settled += 1;
        true
    }

    /// Number of barriers that have settled.
    pub fn settled(&self) -> u64 {
        self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_only_on_pending_seq() {
        let mut barrier = SyncBarrier::new();
        barrier.expect(3);

        assert!(!barrier.settle(CORE_ID, 2));
        assert!(barrier.settle(CORE_ID, 3));
        assert_eq!(barrier.settled(), 1);
    }

    #[test]
    fn test_superseded_request_never_settles() {
        let mut barrier = SyncBarrier::new();
        barrier.expect(3);
        barrier.expect(4);

        assert!(!barrier.settle(CORE_ID, 3));
        assert!(barrier.settle(CORE_ID, 4));
    }

    #[test]
    fn test_ignores_other_recipients() {
        let mut barrier = SyncBarrier::new();
        barrier.expect(3);

        assert!(!barrier.settle(42, 3));
        assert!(barrier.settle(CORE_ID, 3));
    }
}
