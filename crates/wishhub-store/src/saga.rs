//! Deletion saga log.
//!
//! Wishlist deletion spans several single-document updates with no
//! enclosing transaction. Each deletion writes a saga record up front and
//! marks steps as they complete; records that survive a crash are
//! replayed at startup. Every step is idempotent, so replaying a
//! partially completed saga converges on the fully deleted state.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use wishhub_core::types::{UserId, WishlistId};

/// Ordered steps of a wishlist deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStep {
    /// Delete every product owned by the wishlist.
    DetachProducts,
    /// Remove the wishlist from each member's membership index entry.
    DetachMembers,
    /// Delete the wishlist document and release its invite code.
    DeleteWishlist,
}

impl DeletionStep {
    /// All steps, in execution order.
    pub const ORDER: [DeletionStep; 3] = [
        DeletionStep::DetachProducts,
        DeletionStep::DetachMembers,
        DeletionStep::DeleteWishlist,
    ];
}

/// A recorded deletion in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionSaga {
    /// The wishlist being deleted.
    pub wishlist_id: WishlistId,
    /// Members (owner first) whose index entries need unlinking.
    pub members: Vec<UserId>,
    /// Steps already completed, in order.
    pub completed: Vec<DeletionStep>,
    /// When the deletion started.
    pub started_at: DateTime<Utc>,
}

impl DeletionSaga {
    /// Returns whether `step` has already run.
    pub fn is_done(&self, step: DeletionStep) -> bool {
        self.completed.contains(&step)
    }
}

/// Persistent record of in-flight deletions.
#[derive(Debug, Default)]
pub struct DeletionSagaLog {
    records: DashMap<WishlistId, DeletionSaga>,
}

impl DeletionSagaLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Records the start of a deletion. Re-beginning an in-flight saga
    /// returns the existing record so replay resumes where it stopped.
    pub fn begin(&self, wishlist_id: WishlistId, members: Vec<UserId>) -> DeletionSaga {
        self.records
            .entry(wishlist_id)
            .or_insert_with(|| DeletionSaga {
                wishlist_id,
                members,
                completed: Vec::new(),
                started_at: Utc::now(),
            })
            .clone()
    }

    /// Marks a step complete.
    pub fn mark(&self, wishlist_id: WishlistId, step: DeletionStep) {
        if let Some(mut record) = self.records.get_mut(&wishlist_id) {
            if !record.completed.contains(&step) {
                record.completed.push(step);
            }
        }
    }

    /// Removes the record once every step has run.
    pub fn finish(&self, wishlist_id: WishlistId) {
        self.records.remove(&wishlist_id);
    }

    /// Returns all sagas that have not finished.
    pub fn incomplete(&self) -> Vec<DeletionSaga> {
        self.records
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_resumes_existing_record() {
        let log = DeletionSagaLog::new();
        let id = WishlistId::new();
        log.begin(id, vec![UserId::new()]);
        log.mark(id, DeletionStep::DetachProducts);

        let resumed = log.begin(id, Vec::new());
        assert!(resumed.is_done(DeletionStep::DetachProducts));
        assert!(!resumed.is_done(DeletionStep::DetachMembers));
    }

    #[test]
    fn finish_clears_the_record() {
        let log = DeletionSagaLog::new();
        let id = WishlistId::new();
        log.begin(id, Vec::new());
        for step in DeletionStep::ORDER {
            log.mark(id, step);
        }
        log.finish(id);
        assert!(log.incomplete().is_empty());
    }

    #[test]
    fn incomplete_lists_unfinished_sagas() {
        let log = DeletionSagaLog::new();
        let id = WishlistId::new();
        log.begin(id, Vec::new());
        log.mark(id, DeletionStep::DetachProducts);
        let open = log.incomplete();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].wishlist_id, id);
    }
}
