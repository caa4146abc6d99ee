use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, Shell};

pub fn run(shell: Shell) {
    match shell {
        Shell::Bash => print_completions(shells::Bash),
        Shell::Zsh => print_completions(shells::Zsh),
        Shell::Fish => print_completions(shells::Fish),
        Shell::Powershell => print_completions(shells::PowerShell),
    }
}

fn print_completions<G: Generator>(generator: G) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(generator, &mut cmd, name, &mut std::io::stdout());
}
