use std::sync::mpsc;

use futures_util::stream::{FuturesUnordered, StreamExt};
use ops_logging::{ops_debug, ops_info, ops_warn};

use crate::{BatchId, BatchSummary, EngineEvent, SiteOpClient, SiteOpRequest};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Issues every request at once and reports each one as it settles, then a
/// final [`EngineEvent::BatchSettled`]. A failed request never cancels the
/// others.
pub async fn settle_batch(
    client: &dyn SiteOpClient,
    batch_id: BatchId,
    requests: Vec<SiteOpRequest>,
    sink: &dyn EventSink,
) -> BatchSummary {
    ops_info!("batch {} dispatching {} request(s)", batch_id, requests.len());

    let mut pending: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| async move {
            let result = client.perform(&request).await;
            (request, result)
        })
        .collect();

    let mut summary = BatchSummary {
        batch_id,
        settled: 0,
        failed: 0,
    };
    while let Some((request, result)) = pending.next().await {
        summary.settled += 1;
        match &result {
            Ok(response) => ops_debug!(
                "batch {} site={} op={} returned {} message(s)",
                batch_id,
                request.site,
                request.op,
                response.msgs.len()
            ),
            Err(err) => {
                summary.failed += 1;
                ops_warn!(
                    "batch {} site={} op={} failed: {}",
                    batch_id,
                    request.site,
                    request.op,
                    err
                );
            }
        }
        sink.emit(EngineEvent::SiteOpCompleted {
            batch_id,
            site: request.site,
            result,
        });
    }

    ops_info!(
        "batch {} settled: {} request(s), {} failed",
        batch_id,
        summary.settled,
        summary.failed
    );
    sink.emit(EngineEvent::BatchSettled(summary.clone()));
    summary
}
