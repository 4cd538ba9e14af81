// Woid - type-erasure benchmark analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Completion command - shell completion scripts for `woid`

use crate::cli::Cli;
use crate::error::CliError;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Shells completion scripts can be generated for.
pub const SUPPORTED_SHELLS: &[(&str, Shell)] = &[
    ("bash", Shell::Bash),
    ("zsh", Shell::Zsh),
    ("fish", Shell::Fish),
    ("powershell", Shell::PowerShell),
    ("pwsh", Shell::PowerShell),
    ("elvish", Shell::Elvish),
];

/// Resolve a shell name, ignoring case.
///
/// # Errors
///
/// Returns [`CliError::InvalidInput`] listing the supported shells if the
/// name is unknown.
pub fn parse_shell(name: &str) -> Result<Shell, CliError> {
    let lower = name.to_lowercase();
    SUPPORTED_SHELLS
        .iter()
        .find(|(known, _)| *known == lower)
        .map(|(_, shell)| *shell)
        .ok_or_else(|| {
            CliError::invalid_input(format!(
                "Unsupported shell: '{}'. Supported shells: bash, zsh, fish, powershell, elvish",
                name
            ))
        })
}

/// Write the completion script for the full `woid` command tree.
///
/// # Arguments
///
/// * `shell` - Target shell
/// * `out` - Destination of the script
pub fn write_completion<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// How to enable completions permanently for `shell`.
///
/// ```
/// use clap_complete::Shell;
/// use woid_cli::commands::install_hint;
///
/// let hint = install_hint(Shell::Bash);
/// assert!(hint.contains("~/.bashrc"));
/// assert!(hint.contains("woid completion bash"));
/// ```
pub fn install_hint(shell: Shell) -> String {
    let generate = format!("woid completion {}", shell);
    match shell {
        Shell::Bash => format!("# Add to ~/.bashrc:\neval \"$({})\"", generate),
        Shell::Zsh => format!(
            "# Save into a directory listed in $fpath:\n{} > ~/.zsh/completions/_woid",
            generate
        ),
        Shell::Fish => format!("{} > ~/.config/fish/completions/woid.fish", generate),
        Shell::PowerShell => format!(
            "# Add to $PROFILE:\n{} | Out-String | Invoke-Expression",
            generate
        ),
        Shell::Elvish => format!("# Add to ~/.elvish/rc.elv:\neval ({})", generate),
        _ => format!("{} > <completion directory>", generate),
    }
}

/// Run the completion command.
///
/// Prints either the script itself or, with `install`, how to enable it.
///
/// # Errors
///
/// Returns `Err` if the shell is not supported.
pub fn completion(shell: &str, install: bool) -> Result<(), CliError> {
    let shell = parse_shell(shell)?;
    if install {
        println!("{}", install_hint(shell));
    } else {
        write_completion(shell, &mut io::stdout());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert_eq!(parse_shell("Bash").unwrap(), Shell::Bash);
        assert_eq!(parse_shell("pwsh").unwrap(), Shell::PowerShell);
        assert!(matches!(parse_shell("tcsh"), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_write_completion_covers_subcommands() {
        let mut script = Vec::new();
        write_completion(Shell::Bash, &mut script);
        let script = String::from_utf8(script).unwrap();
        assert!(script.contains("woid"));
        assert!(script.contains("analyze"));
        assert!(script.contains("completion"));
    }

    #[test]
    fn test_install_hint_per_shell() {
        assert!(install_hint(Shell::Zsh).contains("_woid"));
        assert!(install_hint(Shell::Fish).contains("woid.fish"));
        assert!(install_hint(Shell::PowerShell).contains("powershell"));
    }
}
