use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        api_key,
        json,
        verbose,
        command,
    } = cli;

    setup_tracing(verbose);
    let ctx = AppContext::bootstrap(profile, api_key, json)?;

    match command {
        Command::Send(args) => commands::send::run(&ctx, args).await,
        Command::Events(args) => commands::events::run(&ctx, args).await,
        Command::Webhooks(args) => commands::webhooks::run(&ctx, args.command).await,
        Command::Config(args) => commands::config::run(&ctx, args.command),
    }
}

/// Warnings by default, `-v` for info, `-vv` for debug. `RUST_LOG` wins.
pub fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn setup_tracing(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbose).into())
        .from_env_lossy();

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), Level::WARN);
        assert_eq!(verbosity_level(1), Level::INFO);
        assert_eq!(verbosity_level(5), Level::DEBUG);
    }
}
