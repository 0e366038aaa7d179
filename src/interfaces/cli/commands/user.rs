//! 用户管理命令

use std::sync::Arc;

use colored::Colorize;

use super::password_input::get_password;
use crate::interfaces::cli::CliError;
use crate::services::{CreateUserRequest, UserService};
use crate::storage::SeaOrmStorage;

pub async fn run_user_add(
    storage: Arc<SeaOrmStorage>,
    username: String,
    fullname: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = get_password(password, false)?;
    let fullname = fullname.unwrap_or_else(|| username.clone());

    let user = UserService::new(storage)
        .create_user_unchecked(
            CreateUserRequest {
                username,
                fullname,
                password,
            },
            true,
        )
        .await?;

    println!(
        "{} User {} created (id {})",
        "✓".green().bold(),
        user.username.cyan(),
        user.id
    );
    Ok(())
}

pub async fn run_reset_password(
    storage: Arc<SeaOrmStorage>,
    username: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let new_password = get_password(password, stdin)?;

    UserService::new(storage)
        .reset_password(username, &new_password)
        .await?;

    println!(
        "{} Password for {} reset successfully",
        "✓".green().bold(),
        username.cyan()
    );
    Ok(())
}
