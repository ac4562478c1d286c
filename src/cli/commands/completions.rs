//! Completions command - generate shell completion scripts.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    worklog completions bash > ~/.local/share/bash-completion/completions/worklog\n    \
    worklog completions zsh > ~/.zfunc/_worklog\n    \
    worklog completions fish > ~/.config/fish/completions/worklog.fish")]
pub struct Args {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Writes completions for `cmd` to stdout.
pub fn generate_completions(cmd: &mut Command, shell: Shell) {
    generate(shell, cmd, "worklog", &mut io::stdout());
}
