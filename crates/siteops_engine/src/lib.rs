//! Site operations engine: `/site-op` requests and batch fan-out.
mod batch;
mod client;
mod engine;
mod types;

pub use batch::{settle_batch, ChannelEventSink, EventSink};
pub use client::{
    decode_site_op_response, site_op_url, ClientSettings, ReqwestSiteOpClient, SiteOpClient,
};
pub use engine::EngineHandle;
pub use types::{
    BatchId, BatchSummary, EngineError, EngineEvent, FailureKind, SiteOpError, SiteOpRequest,
    SiteOpResponse,
};
