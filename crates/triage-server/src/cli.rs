use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `triage` binary.
#[derive(Debug, Parser)]
#[command(name = "triage", version, about = "AI-assisted GitHub issue triage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP API and web UI.
    Serve(ServeArgs),
    /// Ask a running server to analyze one issue and print the result.
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Repository URL, e.g. <https://github.com/facebook/react>
    pub repo_url: String,

    /// Issue number (1 or greater)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub issue_number: u64,

    /// Base URL of the running server (overrides `ui.api_base_url`)
    #[arg(long)]
    pub api_url: Option<String>,
}
