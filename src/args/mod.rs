//! Command-line surface for the `a2ui-runtime` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "a2ui-runtime",
    version,
    about = "Headless A2UI client: stream surfaces and submit actions",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Config file (default: platform config dir, a2ui-runtime/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the origin base URL from config.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream a session and print a line per state change.
    Watch(WatchArgs),

    /// Submit one user action and print the origin's verdict.
    Dispatch(DispatchArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Session to attach to (default: $A2UI_SESSION_ID, else a new UUID).
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct DispatchArgs {
    /// Session the action belongs to (default: $A2UI_SESSION_ID, else a new UUID).
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Surface the action originates from.
    #[arg(long, value_name = "SURFACE")]
    pub surface_id: String,

    /// Action name.
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Component that triggered the action.
    #[arg(long, value_name = "COMPONENT")]
    pub source: Option<String>,

    /// Context entry, repeatable.
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
    pub context: Vec<(String, String)>,
}

fn parse_context_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
