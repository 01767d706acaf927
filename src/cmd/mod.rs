pub mod context;
mod render;
pub mod target;

use crate::config::{ConfigResult, ConfigSource};
use crate::error::Result;
use crate::target::DEFAULT_TIMEOUT;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "authctl",
    version,
    about = "select authorization server targets and login contexts"
)]
pub struct Cli {
    /// File to get and save configuration, or an inline YAML document
    #[arg(long, global = true, env = "AUTHCTL_CONFIG")]
    pub config: Option<String>,
    /// Display debug information
    #[arg(short, long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Display current or set new target
    Target {
        /// Server address, or the index shown by `targets`
        target: Option<String>,
        /// Set the target even if the server is not available
        #[arg(short, long)]
        force: bool,
        /// Seconds to wait for the server to answer
        #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout: u64,
    },
    /// Display all targets
    Targets,
    /// Display or set current context
    Context {
        /// Context name, or the index shown by `contexts`
        context: Option<String>,
        /// Keep a trace flag on the current context
        #[arg(short, long, overrides_with = "no_trace")]
        trace: bool,
        /// Remove the trace flag from the current context
        #[arg(long, overrides_with = "trace")]
        no_trace: bool,
    },
    /// Display all contexts
    Contexts,
}

impl Cli {
    pub fn source(&self) -> ConfigResult<ConfigSource> {
        match self.config.as_deref() {
            Some(value) => Ok(ConfigSource::from_arg(value)),
            None => ConfigSource::default_file(),
        }
    }
}

/// Loads the store, runs one command, and saves the store if it changed.
pub fn run(cli: Cli) -> Result<()> {
    let source = cli.source()?;
    let mut config = source.load()?;
    let before = config.clone();

    match cli.command {
        Command::Target {
            target,
            force,
            timeout,
        } => target::handle(
            &mut config,
            target.as_deref(),
            force,
            Duration::from_secs(timeout),
        )?,
        Command::Targets => target::list(&config),
        Command::Context {
            context,
            trace,
            no_trace,
        } => {
            let trace = match (trace, no_trace) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            context::handle(&mut config, context.as_deref(), trace)?
        }
        Command::Contexts => context::list(&config),
    }

    if config != before {
        source.save(&config)?;
    } else {
        debug!("configuration unchanged");
    }

    Ok(())
}
