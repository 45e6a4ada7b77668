use anyhow::Context;
use clap::Parser;
use desk_config::DeskConfig;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("desk error: {error:#}");
            std::process::exit(2);
        }
    }
}

/// Returns whether the command succeeded.
async fn run() -> anyhow::Result<bool> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    let flags = cli.global_flags();

    let config = DeskConfig::load_with_dotenv().context("failed to load desk configuration")?;
    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize helpdesk context")?;

    let outcome = commands::dispatch(cli.command, &ctx, &flags).await;
    let envelope = output::envelope(outcome);
    output::output(&envelope, flags.format)?;

    ctx.shutdown().await;
    Ok(envelope.ok)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
