use crate::{BatchId, BatchPhase, OperationEntry, SiteEntry};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub sites: Vec<SiteEntry>,
    pub operations: Vec<OperationEntry>,
    pub selected_operation: Option<String>,
    pub all_sites: bool,
    pub verbose: bool,
    pub dry_run: bool,
    pub heading: Option<String>,
    /// Response messages in arrival order.
    pub messages: Vec<String>,
    /// Text of the trailing status marker.
    pub status: Option<String>,
    pub phase: BatchPhase,
    pub batch_id: Option<BatchId>,
    pub remaining: usize,
    pub failures: Vec<SiteFailureView>,
    pub dirty: bool,
}

impl AppViewModel {
    /// The rendered list: messages followed by the status marker.
    pub fn log_lines(&self) -> Vec<String> {
        self.messages
            .iter()
            .cloned()
            .chain(self.status.clone())
            .collect()
    }
}

/// A site request that settled without a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFailureView {
    pub site: String,
    pub reason: String,
}
