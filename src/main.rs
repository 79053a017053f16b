use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use a2ui_runtime::action::ActionDispatcher;
use a2ui_runtime::args::{Cli, Commands, DispatchArgs, WatchArgs};
use a2ui_runtime::config::Config;
use a2ui_runtime::logging::init_tracing;
use a2ui_runtime::model::DataValue;
use a2ui_runtime::origin::OriginClient;
use a2ui_runtime::protocol::Action;
use a2ui_runtime::runtime::RuntimeState;
use a2ui_runtime::session_id::{resolve_session, SessionResolution, SESSION_ID_ENV};
use a2ui_runtime::stream::StreamSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;
    let origin = OriginClient::new(&config).context("failed to set up origin client")?;

    match cli.command {
        Commands::Watch(args) => watch(origin, config, args).await,
        Commands::Dispatch(args) => dispatch(origin, args).await,
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.origin.base_url = base_url.clone();
        config.validate()?;
    }
    Ok(config)
}

fn session_for(explicit: Option<&str>) -> SessionResolution {
    let env_value = std::env::var(SESSION_ID_ENV).ok();
    let resolved = resolve_session(explicit, env_value.as_deref());
    tracing::info!(session = %resolved.session_id, source = ?resolved.source, "using session");
    resolved
}

async fn watch(origin: OriginClient, config: Config, args: WatchArgs) -> anyhow::Result<()> {
    let session = session_for(args.session_id.as_deref());
    let handle = StreamSession::new(origin, config.stream, session.session_id).spawn();

    let mut states = handle.state();
    let mut phases = handle.phase();

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::info!("interrupted, closing session");
                handle.cancel();
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = states.borrow_and_update().clone();
                println!("{}", summarize(&snapshot));
            }
            changed = phases.changed() => {
                if changed.is_err() || phases.borrow_and_update().is_closed() {
                    break;
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

async fn dispatch(origin: OriginClient, args: DispatchArgs) -> anyhow::Result<()> {
    let session = session_for(args.session_id.as_deref());
    let dispatcher = ActionDispatcher::new(origin, Arc::new(session));

    let mut action = Action::new(args.name, args.surface_id);
    if let Some(source) = args.source {
        action = action.with_source(source);
    }
    for (key, value) in args.context {
        action = action.with_context(key, DataValue::String(value));
    }

    let result = dispatcher.dispatch(&action).await;
    println!("{}", serde_json::to_string(&result)?);
    if !result.accepted {
        std::process::exit(1);
    }
    Ok(())
}

/// One line per snapshot: `surfaces=N id(root=R components=C keys=K) ...`
fn summarize(state: &RuntimeState) -> String {
    let mut line = format!("surfaces={}", state.len());
    for id in state.surface_ids() {
        if let Some(surface) = state.surface(id) {
            line.push_str(&format!(
                " {}(root={} components={} keys={})",
                id,
                surface.root_component_id,
                surface.components.len(),
                surface.data_model.len()
            ));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use a2ui_runtime::runtime::RuntimeState;

    #[test]
    fn summarize_empty_state() {
        assert_eq!(summarize(&RuntimeState::new()), "surfaces=0");
    }
}
