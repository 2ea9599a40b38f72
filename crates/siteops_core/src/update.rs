use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SiteToggled { site, checked } => {
            state.set_site_checked(&site, checked);
            Vec::new()
        }
        Msg::AllSitesToggled(checked) => {
            state.set_all_sites(checked);
            Vec::new()
        }
        Msg::OperationSelected(name) => {
            state.select_operation(name);
            Vec::new()
        }
        Msg::VerboseToggled(verbose) => {
            state.set_verbose(verbose);
            Vec::new()
        }
        Msg::DryRunToggled(dry_run) => {
            state.set_dry_run(dry_run);
            Vec::new()
        }
        Msg::PerformOpsClicked => match state.selection().plan() {
            Err(err) => {
                state.reject(err);
                Vec::new()
            }
            Ok(requests) => {
                let batch_id = state.begin_batch(requests.len());
                vec![Effect::DispatchBatch { batch_id, requests }]
            }
        },
        Msg::SiteOpSettled {
            batch_id,
            site,
            outcome,
        } => {
            state.apply_settled(batch_id, site, outcome);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
