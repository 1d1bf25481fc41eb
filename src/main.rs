use anyhow::Result;
use clap::Parser;
use framescan::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // FSCAN_LOG wins; otherwise --verbose picks debug over warn
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FSCAN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    match cli.command {
        Commands::Scan(args) => framescan::scan_run(args, &ctx),
        Commands::Missing(args) => framescan::missing_run(args, &ctx),
        Commands::Parse(args) => framescan::parse_run(args, &ctx),
        Commands::Init(args) => framescan::infra::config::init(args, &ctx),
        Commands::Completions(args) => framescan::completion::run(args, &ctx),
    }
}
