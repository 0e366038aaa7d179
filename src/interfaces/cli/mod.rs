//! CLI interface module
//!
//! 管理命令直接连接数据库执行，不需要服务器在运行。

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands, UserCommands};
use crate::storage::StorageFactory;
use commands::{config_generate, run_migrate, run_reset_password, run_seed, run_user_add};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::LinkyError> for CliError {
    fn from(err: crate::errors::LinkyError) -> Self {
        match err {
            crate::errors::LinkyError::DatabaseConfig(_)
            | crate::errors::LinkyError::DatabaseConnection(_)
            | crate::errors::LinkyError::DatabaseOperation(_) => {
                CliError::StorageError(err.message().to_string())
            }
            other => CliError::CommandError(other.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // 生成配置文件不需要数据库
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force);
    }

    let storage = StorageFactory::create().await?;

    match cmd {
        Commands::Migrate => run_migrate(&storage),
        Commands::Seed { admin_password } => run_seed(storage, &admin_password).await,
        Commands::User { action } => match action {
            UserCommands::Add {
                username,
                fullname,
                password,
            } => run_user_add(storage, username, fullname, password).await,
            UserCommands::ResetPassword {
                username,
                password,
                stdin,
            } => run_reset_password(storage, &username, password, stdin).await,
        },
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "Command is not handled by the CLI runner".to_string(),
        )),
    }
}
