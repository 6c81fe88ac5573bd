use clap::Parser;

mod bootstrap;
mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("triage error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let default_level = match cli.command {
        cli::Commands::Serve(_) => "info",
        cli::Commands::Analyze(_) => "warn",
    };
    init_tracing(cli.quiet, cli.verbose, default_level)?;

    let config = bootstrap::load_config()?;

    match &cli.command {
        cli::Commands::Serve(args) => commands::serve::handle(args, &config).await,
        cli::Commands::Analyze(args) => commands::analyze::handle(args, &config).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool, default_level: &str) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        default_level
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TRIAGE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
