//! Shell completions for the `okr` binary.

use clap::Command;
use clap_complete::Shell;
use error::Result;

/// Writes completions for `shell` to stdout.
pub fn completions(shell: Shell, cmd: &mut Command) -> Result<()> {
    clap_complete::generate(shell, cmd, "okr", &mut std::io::stdout());
    Ok(())
}
