//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "stencil";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut stdout = io::stdout();
    match args.shell {
        Shell::Bash => write(shells::Bash, &mut stdout),
        Shell::Zsh => write(shells::Zsh, &mut stdout),
        Shell::Fish => write(shells::Fish, &mut stdout),
        Shell::PowerShell => write(shells::PowerShell, &mut stdout),
        Shell::Elvish => write(shells::Elvish, &mut stdout),
    }
    Ok(())
}

fn write(shell: impl Generator, out: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}
