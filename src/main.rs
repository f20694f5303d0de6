use anyhow::Context;
use clap::Parser;
use threatmodel::config::config_manager::ConfigManager;
use threatmodel::errors::ErrorHandler;
use threatmodel::structs::cli::Cli;
use threatmodel::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A broken config file should still let `init` and `validate` report it.
    let config = ConfigManager::load();
    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .context("failed to initialise logging")?;

    let mut runner = CommandRunner::new(config);
    if let Err(e) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&e);
        std::process::exit(1);
    }
    Ok(())
}
