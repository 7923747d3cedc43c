use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::casks::*;
pub use services::config::*;
pub use services::doctor::*;
pub use services::logging::*;
pub use services::output::*;
pub use services::remediation::*;
pub use services::report::*;
pub use services::storage::*;
pub use services::tools::*;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging, config.output.color);

    if handle_admin_commands(&cli, &config)? {
        return Ok(());
    }
    handle_runtime_commands(&cli, &config)
}
