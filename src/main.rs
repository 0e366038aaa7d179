use clap::Parser;

use linky::cli::{Cli, Commands};
use linky::config::{get_config, init_config};
use linky::runtime::modes::{run_cli, run_server};
use linky::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    // guard 必须活到进程结束，否则日志不会刷盘
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Serve) => run_server().await,
        Some(cmd) => {
            if let Err(e) = run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
