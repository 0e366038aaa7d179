//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::services::seeder::DEFAULT_ADMIN_PASSWORD;

/// Linky - short links and link-in-bio pages
#[derive(Parser)]
#[command(name = "linky")]
#[command(version)]
#[command(about = "Short links and link-in-bio pages", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Create the admin account plus sample links and pages
    Seed {
        /// Password for the `admin` account
        #[arg(long, default_value = DEFAULT_ADMIN_PASSWORD)]
        admin_password: String,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Run pending database migrations and exit
    Migrate,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a user
    Add {
        username: String,

        /// Display name (defaults to the username)
        #[arg(long)]
        fullname: Option<String>,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,
    },

    /// Reset a user's password
    ResetPassword {
        username: String,

        /// New password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["linky"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_seed_default_password() {
        let cli = Cli::try_parse_from(["linky", "-c", "custom.toml", "seed"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Some(Commands::Seed { admin_password }) => {
                assert_eq!(admin_password, DEFAULT_ADMIN_PASSWORD)
            }
            _ => panic!("expected seed command"),
        }
    }

    #[test]
    fn test_user_reset_password_args() {
        let cli = Cli::try_parse_from([
            "linky",
            "user",
            "reset-password",
            "alice",
            "--stdin",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::User {
                action: UserCommands::ResetPassword {
                    username, stdin, ..
                },
            }) => {
                assert_eq!(username, "alice");
                assert!(stdin);
            }
            _ => panic!("expected user reset-password command"),
        }
    }
}
