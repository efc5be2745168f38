use std::process::ExitCode;

use clap::Parser;
use runes_scripts::{
    cli::{Cli, Command, GlobalArgs},
    config::DeployConfig,
    deployer::RpcDeployer,
    errors::ScriptError,
    exit_status,
    verifier::ExplorerVerifier,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing `.env` file is fine, the environment may already be populated
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().pretty().init();

    let Cli { global, command } = Cli::parse();
    let result = run(global, command).await;

    match &result {
        Ok(()) => info!("Done!"),
        Err(e) => error!("{e}"),
    }

    ExitCode::from(exit_status(&result))
}

/// Build the configuration and clients, then run the command
async fn run(global: GlobalArgs, command: Command) -> Result<(), ScriptError> {
    let config = DeployConfig::from_args(&global)?;
    let deployer = RpcDeployer::new(&config)?;
    let verifier = ExplorerVerifier::new(&config)?;

    command.run(&deployer, &verifier).await
}
