//! Site operations core: pure dispatch state machine and view-model helpers.
mod effect;
mod message_log;
mod msg;
mod selection;
mod state;
mod tracker;
mod update;
mod view_model;

pub use effect::Effect;
pub use message_log::{MessageLog, StatusMarker, MESSAGES_HEADING};
pub use msg::{Msg, SiteOpOutcome};
pub use selection::{Selection, SelectionError, SiteOpRequest};
pub use state::{AppState, BatchId, BatchPhase, OperationEntry, SiteEntry};
pub use tracker::DispatchTracker;
pub use update::update;
pub use view_model::{AppViewModel, SiteFailureView};
