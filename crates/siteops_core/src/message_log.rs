use std::fmt;

use crate::SelectionError;

pub const MESSAGES_HEADING: &str = "Messages";

/// Trailing list entry that reports batch progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMarker {
    Running,
    StillRunning,
    Done,
    Rejected(SelectionError),
}

impl fmt::Display for StatusMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMarker::Running => write!(f, "Running..."),
            StatusMarker::StillRunning => write!(f, "Still running..."),
            StatusMarker::Done => write!(f, "Done!"),
            StatusMarker::Rejected(err) => write!(f, "{err}"),
        }
    }
}

/// Ordered message list. Messages are always inserted ahead of the status
/// marker, so the marker stays the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageLog {
    entries: Vec<String>,
    status: Option<StatusMarker>,
}

impl MessageLog {
    /// Clears every entry and re-heads the list with a fresh status marker.
    pub fn reset(&mut self, status: StatusMarker) {
        self.entries.clear();
        self.status = Some(status);
    }

    pub fn insert_before_status<I>(&mut self, msgs: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries.extend(msgs);
    }

    pub fn set_status(&mut self, status: StatusMarker) {
        self.status = Some(status);
    }

    /// `None` until the first dispatch renders the list.
    pub fn heading(&self) -> Option<&'static str> {
        self.status.map(|_| MESSAGES_HEADING)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn status(&self) -> Option<StatusMarker> {
        self.status
    }

    /// Every list item in display order, status marker last.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .cloned()
            .chain(self.status.map(|status| status.to_string()))
            .collect()
    }
}
