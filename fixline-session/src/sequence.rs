/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/2/26
******************************************************************************/

//! Outbound sequence number management.
//!
//! The counter is only mutated inside the outbound critical section, after a
//! successful transport write. The atomic makes reads safe from any thread;
//! serialization of peek/advance pairs is the caller's job.

use fixline_core::SeqNum;
use std::sync::atomic::{AtomicU64, Ordering};

/// Manages the outbound sequence number for one session.
#[derive(Debug)]
pub struct SequenceManager {
    /// Next outgoing sequence number.
    next_seq: AtomicU64,
}

impl SequenceManager {
    /// Creates a new sequence manager starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_seq: AtomicU64::new(1),
        }
    }

    /// Returns the next sequence number without consuming it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> SeqNum {
        SeqNum::new(self.next_seq.load(Ordering::SeqCst))
    }

    /// Consumes the current sequence number after a successful write.
    #[inline]
    pub fn advance(&self) {
        self.next_seq.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for SequenceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mgr = SequenceManager::new();
        assert_eq!(mgr.peek().value(), 1);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mgr = SequenceManager::new();
        assert_eq!(mgr.peek().value(), 1);
        assert_eq!(mgr.peek().value(), 1);
    }

    #[test]
    fn test_advance_increments_by_one() {
        let mgr = SequenceManager::new();
        mgr.advance();
        assert_eq!(mgr.peek().value(), 2);
        mgr.advance();
        assert_eq!(mgr.peek().value(), 3);
    }

}
