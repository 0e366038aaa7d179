//! CLI mode

use crate::cli::Commands;
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime;

/// Run a management command
pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    lifetime::startup::install_crypto_provider();
    crate::interfaces::cli::run_cli_command(cmd).await
}
