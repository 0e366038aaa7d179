//! Execution modes
//!
//! `serve` 启动 HTTP 服务器，其余子命令走 CLI。

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
