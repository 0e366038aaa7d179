use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;

/// 迁移在打开存储时已经执行，这里只报告结果
pub fn run_migrate(storage: &SeaOrmStorage) -> Result<(), CliError> {
    println!(
        "{} {} database is up to date",
        "✓".green().bold(),
        storage.backend_name().to_uppercase()
    );
    Ok(())
}
