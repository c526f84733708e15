//! CLI entry point - the composition root.

use std::path::Path;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use ibtools_cli::{Cli, CliError, Commands, bootstrap, handlers, load_settings};
use ibtools_core::{PlatformType, SystemEnv};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(config: Option<&Path>, command: Commands) -> anyhow::Result<()> {
    // Platform has nothing to resolve.
    if matches!(command, Commands::Platform) {
        return handlers::platform::execute();
    }

    let env = Arc::new(SystemEnv);
    let settings = load_settings(config, env.as_ref(), PlatformType::current())?;
    let ctx = bootstrap(settings, env);

    match command {
        Commands::Resolve {
            utility,
            version,
            json,
        } => handlers::resolve::execute(&ctx, utility, version.as_deref(), json).await,
        Commands::Candidates { utility, version } => {
            handlers::candidates::execute(&ctx, utility, version.as_deref())
        }
        Commands::Probe { path, timeout_ms } => {
            handlers::probe::execute(&ctx, &path, timeout_ms).await
        }
        Commands::Check { version } => handlers::check::execute(&ctx, version.as_deref()).await,
        Commands::Platform => handlers::platform::execute(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(cli.config.as_deref(), command).await {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
    Ok(())
}
