use crate::cli::{Cli, Shell};
use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};
use std::io::{self, Write};

const BIN_NAME: &str = "aws-console";

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::PowerShell => ClapShell::PowerShell,
            Shell::Elvish => ClapShell::Elvish,
        }
    }
}

fn install_hint(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc:\n#   eval \"$(aws-console completions bash)\"",
        Shell::Zsh => "# Add to ~/.zshrc:\n#   eval \"$(aws-console completions zsh)\"",
        Shell::Fish => {
            "# Save to fish completion directory:\n#   aws-console completions fish > ~/.config/fish/completions/aws-console.fish"
        }
        Shell::PowerShell => {
            "# Add to PowerShell profile:\n#   aws-console completions powershell | Out-String | Invoke-Expression"
        }
        Shell::Elvish => "# Add to Elvish config:\n#   eval (aws-console completions elvish | slurp)",
    }
}

/// Write the completion script for `shell` to `out`
pub fn render(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(ClapShell::from(shell), &mut cmd, BIN_NAME, out);
}

pub fn execute(shell: Shell) {
    render(shell, &mut io::stdout());
    // Hints go to stderr so `eval "$(...)"` only sees the script
    eprintln!("\n{}", install_hint(shell));
}
