//! Shell completion scripts for `fscan`.
//!
//! Scripts are rendered from the clap definition, so subcommands like
//! `missing` and their flags (`--ext`, `--step`, `--check`) stay in sync.

use anyhow::{Context, Result};
use clap::{Command, CommandFactory};
use clap_complete::{Shell as CompletionShell, generate, generate_to};
use std::{fs, io};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Command tree the scripts are generated from; named after the binary.
fn command() -> (Command, String) {
    let cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    (cmd, bin)
}

/// Write the completion script for `shell` into `out`.
pub fn render(shell: Shell, out: &mut dyn io::Write) {
    let (mut cmd, bin) = command();
    generate(CompletionShell::from(shell), &mut cmd, bin, out);
}

pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    if args.stdout {
        render(args.shell, &mut io::stdout());
        return Ok(());
    }

    let dir = args
        .out_dir
        .ok_or_else(|| anyhow::anyhow!("--out-dir is required unless --stdout is set"))?;

    fs::create_dir_all(&dir).context("create --out-dir")?;
    let (mut cmd, bin) = command();
    let path = generate_to(CompletionShell::from(args.shell), &mut cmd, bin, &dir)
        .context("generate completion file")?;

    if !ctx.quiet {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}
