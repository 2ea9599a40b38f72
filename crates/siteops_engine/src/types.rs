use std::fmt;

use serde::Deserialize;

pub type BatchId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOpRequest {
    pub site: String,
    pub op: String,
    pub verbose: bool,
    pub dry_run: bool,
}

/// Body of a successful `/site-op` reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteOpResponse {
    pub msgs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One request settled. Emitted in arrival order.
    SiteOpCompleted {
        batch_id: BatchId,
        site: String,
        result: Result<SiteOpResponse, SiteOpError>,
    },
    /// Every request of the batch has settled.
    BatchSettled(BatchSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub batch_id: BatchId,
    pub settled: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SiteOpError {
    pub kind: FailureKind,
    pub message: String,
}

impl SiteOpError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidScriptRoot,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidScriptRoot => write!(f, "invalid script root"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build engine runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[source] SiteOpError),
}
