use std::sync::Arc;

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::seeder;
use crate::storage::SeaOrmStorage;

pub async fn run_seed(storage: Arc<SeaOrmStorage>, admin_password: &str) -> Result<(), CliError> {
    let report = seeder::seed(storage, admin_password).await?;

    if report.admin_created {
        println!("{} Admin account created", "✓".green().bold());
    } else {
        println!("{} Admin account already exists", "•".yellow());
    }
    println!(
        "{} {} sample links, {} sample pages created",
        "✓".green().bold(),
        report.links_created,
        report.pages_created
    );
    Ok(())
}
