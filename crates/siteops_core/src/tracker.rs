use crate::BatchId;

/// Count of outstanding site requests for exactly one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTracker {
    batch_id: BatchId,
    remaining: usize,
}

impl DispatchTracker {
    pub fn new(batch_id: BatchId, outstanding: usize) -> Self {
        Self {
            batch_id,
            remaining: outstanding,
        }
    }

    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Records one settled request. Returns `true` only for the decrement that
    /// completes the batch; extra calls after completion are no-ops.
    pub fn decrement_and_check(&mut self) -> bool {
        match self.remaining {
            0 => false,
            n => {
                self.remaining = n - 1;
                self.remaining == 0
            }
        }
    }
}
