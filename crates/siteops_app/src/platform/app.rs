use std::io;
use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::{anyhow, Context};
use log::LevelFilter;
use ops_logging::{ops_info, ops_warn};
use siteops_core::{update, AppState, BatchPhase, Msg};

use super::config::{load_config, SiteOpsConfig};
use super::effects::EffectRunner;
use super::interactive;
use super::logging;
use super::ui::render::{render_catalog, TerminalRenderer};
use crate::cli::Args;

const EXIT_REJECTED: u8 = 1;
const EXIT_UNKNOWN_OPERATION: u8 = 2;

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(args.log, level);

    let mut config = load_config(&args.config)?;
    if let Some(script_root) = &args.script_root {
        config.script_root = script_root.clone();
    }

    let state = initial_state(&config, &args);
    if args.list {
        print!("{}", render_catalog(&state.view()));
        return Ok(ExitCode::SUCCESS);
    }

    let selection = if args.interactive {
        interactive::prompt_selection(&state.view(), io::stdin().lock(), io::stdout())
            .context("interactive selection failed")?
    } else {
        selection_messages(&args)
    };

    if let Some(op) = args.op.as_deref().filter(|_| !args.interactive) {
        if !state.has_operation(op) {
            ops_warn!("Rejected unknown operation {}", op);
            eprintln!("Operation {op} is not recognized.");
            return Ok(ExitCode::from(EXIT_UNKNOWN_OPERATION));
        }
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.client_settings(), msg_tx.clone())
        .context("failed to start the request engine")?;
    for msg in form_messages(&args, selection) {
        msg_tx
            .send(msg)
            .map_err(|_| anyhow!("message channel closed"))?;
    }

    let mut renderer = TerminalRenderer::new(io::stdout().lock());
    let mut state = state;
    loop {
        let msg = msg_rx
            .recv()
            .map_err(|_| anyhow!("message channel closed"))?;
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        if state.consume_dirty() {
            renderer.render(&state.view())?;
        }

        match state.phase() {
            BatchPhase::Done => {
                ops_info!("Batch complete");
                return Ok(ExitCode::SUCCESS);
            }
            BatchPhase::Rejected => return Ok(ExitCode::from(EXIT_REJECTED)),
            BatchPhase::Idle | BatchPhase::Running => {}
        }
    }
}

/// Catalog from the config plus any extra sites named on the command line.
fn initial_state(config: &SiteOpsConfig, args: &Args) -> AppState {
    let sites = config.sites.iter().chain(args.sites.iter()).cloned();
    AppState::with_catalog(sites, config.operation_entries())
}

/// Site and operation picks taken from the command line flags.
fn selection_messages(args: &Args) -> Vec<Msg> {
    let mut msgs = Vec::with_capacity(args.sites.len() + 2);
    if args.all_sites {
        msgs.push(Msg::AllSitesToggled(true));
    }
    msgs.extend(args.sites.iter().map(|site| Msg::SiteToggled {
        site: site.clone(),
        checked: true,
    }));
    msgs.push(Msg::OperationSelected(args.op.clone()));
    msgs
}

/// Replays the picks and option flags as form interactions, ending with the
/// click.
fn form_messages(args: &Args, selection: Vec<Msg>) -> Vec<Msg> {
    let mut msgs = selection;
    msgs.push(Msg::VerboseToggled(args.verbose));
    msgs.push(Msg::DryRunToggled(args.dry_run));
    msgs.push(Msg::PerformOpsClicked);
    msgs
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("siteops").chain(argv.iter().copied()))
    }

    fn config() -> SiteOpsConfig {
        SiteOpsConfig {
            sites: vec!["gattishouse".to_string(), "lnba".to_string()],
            ..SiteOpsConfig::default()
        }
    }

    fn replay(args: &Args) -> (AppState, Vec<siteops_core::Effect>) {
        let mut state = initial_state(&config(), args);
        let mut effects = Vec::new();
        for msg in form_messages(args, selection_messages(args)) {
            let (next, mut produced) = update(state, msg);
            state = next;
            effects.append(&mut produced);
        }
        (state, effects)
    }

    #[test]
    fn command_line_sites_extend_the_catalog() {
        let args = parse(&["--site", "unrba", "--site", "lnba", "--op", "remote_cc"]);
        let (state, effects) = replay(&args);

        let names: Vec<_> = state.view().sites.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["gattishouse", "lnba", "unrba"]);
        assert_eq!(state.selection().sites, vec!["lnba", "unrba"]);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn all_sites_flag_selects_whole_catalog() {
        let args = parse(&["--all-sites", "--op", "remote_pull", "--dry-run", "-v"]);
        let (state, _) = replay(&args);

        let selection = state.selection();
        assert_eq!(selection.sites, vec!["gattishouse", "lnba"]);
        assert!(selection.dry_run);
        assert!(selection.verbose);
        assert_eq!(state.phase(), BatchPhase::Running);
    }

    #[test]
    fn interactive_picks_drive_the_same_form() {
        let args = parse(&["--interactive", "--dry-run"]);
        let mut state = initial_state(&config(), &args);
        let picks = interactive::prompt_selection(
            &state.view(),
            std::io::Cursor::new("2\n0\n"),
            Vec::new(),
        )
        .unwrap();

        let mut effects = Vec::new();
        for msg in form_messages(&args, picks) {
            let (next, mut produced) = update(state, msg);
            state = next;
            effects.append(&mut produced);
        }

        let selection = state.selection();
        assert_eq!(selection.sites, vec!["lnba"]);
        assert_eq!(selection.operation.as_deref(), Some("local_fix_perms"));
        assert!(selection.dry_run);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn missing_operation_is_rejected() {
        let args = parse(&["--all-sites"]);
        let (state, effects) = replay(&args);

        assert!(effects.is_empty());
        assert_eq!(state.phase(), BatchPhase::Rejected);
        assert_eq!(
            state.view().log_lines(),
            vec!["You didn't select an operation"]
        );
    }
}
