use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use ops_logging::ops_debug;

use crate::batch::{settle_batch, ChannelEventSink};
use crate::{
    BatchId, ClientSettings, EngineError, EngineEvent, ReqwestSiteOpClient, SiteOpClient,
    SiteOpRequest,
};

enum EngineCommand {
    Dispatch {
        batch_id: BatchId,
        requests: Vec<SiteOpRequest>,
    },
}

/// Handle to a background thread that owns the async runtime. Batches run
/// concurrently; events come back through a single channel.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestSiteOpClient::new(settings).map_err(EngineError::Client)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn SiteOpClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("siteops-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, event_tx).await;
                    });
                }
                ops_debug!("engine command channel closed");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn dispatch(&self, batch_id: BatchId, requests: Vec<SiteOpRequest>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Dispatch { batch_id, requests });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn SiteOpClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Dispatch { batch_id, requests } => {
            let sink = ChannelEventSink::new(event_tx);
            settle_batch(client, batch_id, requests, &sink).await;
        }
    }
}
