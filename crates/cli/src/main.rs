//! `mindbridge-nav` — query the navigation access resolver from a shell.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use mindbridge_navigation::{AccessResolver, NavigationConfig};
use mindbridge_observability::LogFormat;

use commands::{ActorArgs, PathArgs};

#[derive(Parser)]
#[command(
    name = "mindbridge-nav",
    version,
    about = "Inspect MindBridge menus, route access and redirects",
    propagate_version = true
)]
struct Cli {
    /// Navigation config (JSON). Falls back to MINDBRIDGE_NAV_CONFIG, then
    /// to the built-in catalog.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true, env = "MINDBRIDGE_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Json)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sidebar menu visible to an actor
    Menu(ActorArgs),

    /// Check whether a path is accessible (or not found) for an actor
    Route {
        #[command(flatten)]
        actor: ActorArgs,
        #[command(flatten)]
        path: PathArgs,
        /// Answer "is this path not found" instead of "is it accessible"
        #[arg(long)]
        not_found: bool,
    },

    /// Show the full route decision and permission explanation
    Explain {
        #[command(flatten)]
        actor: ActorArgs,
        #[command(flatten)]
        path: PathArgs,
    },

    /// Print the landing route of a role
    DefaultRoute {
        #[arg(long)]
        role: mindbridge_auth::Role,
    },

    /// Print where an entry path redirects to (anonymous when --role is omitted)
    Redirect {
        #[arg(long)]
        role: Option<mindbridge_auth::Role>,
        #[arg(long = "permission")]
        permissions: Vec<String>,
        #[command(flatten)]
        path: PathArgs,
    },

    /// Validate the navigation config and exit
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<NavigationConfig> {
    match path {
        Some(path) => NavigationConfig::from_path(path)
            .with_context(|| format!("loading navigation config {}", path.display())),
        None => NavigationConfig::from_env().context("loading navigation config from environment"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    mindbridge_observability::init(cli.log_format.into());

    let config = load_config(cli.config.as_ref())?;
    let resolver = AccessResolver::from_config(config).context("building access resolver")?;

    let output = match cli.command {
        Commands::Menu(actor) => commands::menu(&resolver, &actor.into_actor()),
        Commands::Route {
            actor,
            path,
            not_found,
        } => commands::route(&resolver, &actor.into_actor(), &path.resolve(), not_found),
        Commands::Explain { actor, path } => {
            commands::explain(&resolver, &actor.into_actor(), &path.resolve())
        }
        Commands::DefaultRoute { role } => commands::default_route(&resolver, role),
        Commands::Redirect {
            role,
            permissions,
            path,
        } => commands::redirect(&resolver, role, permissions, &path.resolve()),
        Commands::CheckConfig => Ok(serde_json::json!({ "valid": true })),
    }?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
