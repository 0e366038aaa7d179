//! CLI command implementations

mod config_gen;
mod migrate;
mod password_input;
mod seed;
mod user;

pub use config_gen::config_generate;
pub use migrate::run_migrate;
pub use seed::run_seed;
pub use user::{run_reset_password, run_user_add};
