use crate::message_log::{MessageLog, StatusMarker};
use crate::tracker::DispatchTracker;
use crate::view_model::{AppViewModel, SiteFailureView};
use crate::{Selection, SelectionError, SiteOpOutcome};

pub type BatchId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPhase {
    #[default]
    Idle,
    Rejected,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
    pub name: String,
    pub description: String,
}

impl OperationEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    sites: Vec<SiteEntry>,
    operations: Vec<OperationEntry>,
    selected_operation: Option<String>,
    all_sites: bool,
    verbose: bool,
    dry_run: bool,
    log: MessageLog,
    tracker: Option<DispatchTracker>,
    last_batch_id: BatchId,
    failures: Vec<SiteFailureView>,
    phase: BatchPhase,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the form with one unchecked entry per site and no operation
    /// selected. Duplicate site names collapse into the first occurrence.
    pub fn with_catalog<I, S>(sites: I, operations: Vec<OperationEntry>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self {
            operations,
            ..Self::default()
        };
        for site in sites {
            state.add_site(site.into());
        }
        state
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            sites: self.sites.clone(),
            operations: self.operations.clone(),
            selected_operation: self.selected_operation.clone(),
            all_sites: self.all_sites,
            verbose: self.verbose,
            dry_run: self.dry_run,
            heading: self.log.heading().map(str::to_string),
            messages: self.log.entries().to_vec(),
            status: self.log.status().map(|status| status.to_string()),
            phase: self.phase,
            batch_id: self.tracker.as_ref().map(DispatchTracker::batch_id),
            remaining: self
                .tracker
                .as_ref()
                .map(DispatchTracker::remaining)
                .unwrap_or(0),
            failures: self.failures.clone(),
            dirty: self.dirty,
        }
    }

    /// Snapshot of the current form, sites in catalog order.
    pub fn selection(&self) -> Selection {
        Selection {
            operation: self.selected_operation.clone(),
            sites: self
                .sites
                .iter()
                .filter(|site| site.checked)
                .map(|site| site.name.clone())
                .collect(),
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn tracker(&self) -> Option<&DispatchTracker> {
        self.tracker.as_ref()
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.iter().any(|op| op.name == name)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn add_site(&mut self, name: String) {
        if self.sites.iter().all(|site| site.name != name) {
            self.sites.push(SiteEntry {
                name,
                checked: false,
            });
        }
    }

    pub(crate) fn set_site_checked(&mut self, name: &str, checked: bool) {
        if let Some(site) = self.sites.iter_mut().find(|site| site.name == name) {
            site.checked = checked;
            self.all_sites = false;
            self.dirty = true;
        }
    }

    pub(crate) fn set_all_sites(&mut self, checked: bool) {
        self.all_sites = checked;
        for site in &mut self.sites {
            site.checked = checked;
        }
        self.dirty = true;
    }

    /// Unknown operation names leave the radio group untouched.
    pub(crate) fn select_operation(&mut self, name: Option<String>) {
        match name {
            Some(name) if !self.has_operation(&name) => {}
            name => {
                self.selected_operation = name;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
        self.dirty = true;
    }

    pub(crate) fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
        self.dirty = true;
    }

    pub(crate) fn reject(&mut self, err: SelectionError) {
        self.log.reset(StatusMarker::Rejected(err));
        self.tracker = None;
        self.failures.clear();
        self.phase = BatchPhase::Rejected;
        self.dirty = true;
    }

    /// Starts a new batch, superseding any batch still in flight.
    pub(crate) fn begin_batch(&mut self, outstanding: usize) -> BatchId {
        self.last_batch_id += 1;
        let batch_id = self.last_batch_id;
        self.log.reset(StatusMarker::Running);
        self.tracker = Some(DispatchTracker::new(batch_id, outstanding));
        self.failures.clear();
        self.phase = BatchPhase::Running;
        self.dirty = true;
        batch_id
    }

    pub(crate) fn apply_settled(&mut self, batch_id: BatchId, site: String, outcome: SiteOpOutcome) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        if tracker.batch_id() != batch_id || tracker.is_complete() {
            return;
        }

        match outcome {
            SiteOpOutcome::Messages(msgs) => self.log.insert_before_status(msgs),
            SiteOpOutcome::Failed { reason } => {
                self.failures.push(SiteFailureView { site, reason });
            }
        }

        if tracker.decrement_and_check() {
            self.log.set_status(StatusMarker::Done);
            self.phase = BatchPhase::Done;
        } else {
            self.log.set_status(StatusMarker::StillRunning);
        }
        self.dirty = true;
    }
}
