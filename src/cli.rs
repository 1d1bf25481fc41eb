use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "fscan")]
#[command(about = "Group numbered frame files into sequences and report missing frames")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr (overridden by FSCAN_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the frame sequences in a directory
    Scan(ScanArgs),

    /// Print the paths of frames missing from each sequence
    Missing(MissingArgs),

    /// Show how file names split into prefix/number/suffix/extension
    Parse(ParseArgs),

    /// Initialize a framescan.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Directory and extension selection shared by scan and missing
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub path: String,

    /// Only consider these extensions (repeatable, leading dot optional)
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Frame step between consecutive frames
    #[arg(long)]
    pub step: Option<Decimal>,
}

#[derive(Debug, Parser)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct MissingArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// First frame expected (default: lowest frame present)
    #[arg(long)]
    pub start: Option<Decimal>,

    /// Last frame expected (default: highest frame present)
    #[arg(long)]
    pub end: Option<Decimal>,

    /// Exit with an error if any frame is missing
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// File names to parse
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,

    /// Print the config that would be written without writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
