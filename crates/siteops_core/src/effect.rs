use crate::{BatchId, SiteOpRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue every request of the batch without waiting on one another.
    DispatchBatch {
        batch_id: BatchId,
        requests: Vec<SiteOpRequest>,
    },
}
