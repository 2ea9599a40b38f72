use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ops_logging::{ops_info, ops_warn};
use siteops_core::{Effect, Msg, SiteOpOutcome, SiteOpRequest};
use siteops_engine::{ClientSettings, EngineError, EngineEvent, EngineHandle};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DispatchBatch { batch_id, requests } => {
                    ops_info!(
                        "DispatchBatch batch_id={} sites={}",
                        batch_id,
                        requests.len()
                    );
                    let requests = requests.into_iter().map(map_request).collect();
                    self.engine.dispatch(batch_id, requests);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(250)) else {
                continue;
            };
            if let Some(msg) = map_event(event) {
                if msg_tx.send(msg).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_request(request: SiteOpRequest) -> siteops_engine::SiteOpRequest {
    siteops_engine::SiteOpRequest {
        site: request.site,
        op: request.op,
        verbose: request.verbose,
        dry_run: request.dry_run,
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::SiteOpCompleted {
            batch_id,
            site,
            result,
        } => {
            let outcome = match result {
                Ok(response) => SiteOpOutcome::Messages(response.msgs),
                Err(err) => {
                    ops_warn!("Site {} failed in batch {}: {}", site, batch_id, err);
                    SiteOpOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            Some(Msg::SiteOpSettled {
                batch_id,
                site,
                outcome,
            })
        }
        EngineEvent::BatchSettled(summary) => {
            ops_info!(
                "Batch {} settled ({} failed of {})",
                summary.batch_id,
                summary.failed,
                summary.settled
            );
            None
        }
    }
}
