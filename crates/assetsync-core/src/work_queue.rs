//! Shared job list that pool workers claim from

use std::sync::atomic::{AtomicUsize, Ordering};

/// Jobs of one batch, claimed by workers without locking.
///
/// A job is claimed by at most one worker. Claims past the end keep
/// returning `None`, which is how a worker learns the batch is drained.
pub struct WorkQueue<S> {
    items: Vec<S>,
    cursor: AtomicUsize,
}

impl<S> WorkQueue<S> {
    pub fn new(items: Vec<S>) -> Self {
        Self {
            items,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn claim(&self) -> Option<&S> {
        self.items.get(self.cursor.fetch_add(1, Ordering::Relaxed))
    }

    /// Batch size, claimed or not
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
