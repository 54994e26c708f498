use anyhow::Result;
use clap::Parser;
use colored::*;
use log::{debug, info};
use rouilleftp::config::Config;
use rouilleftp::constants::DEFAULT_CONFIG_PATH;
use rouilleftp::core_cli::Cli;
use rouilleftp::core_log::logger::init_logger;
use rouilleftp::{dispatcher, helpers};
use std::path::Path;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = Cli::parse();
    init_logger(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", helpers::config_failure_message(&e).red());
            return ExitCode::from(2);
        }
    };

    let plan = match dispatcher::resolve(args.operation, &args.params) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            ctrl_c.cancel();
        }
    });

    match dispatcher::run(&config.client, &plan, cancel).await {
        Ok(outcome) => {
            println!("{}", helpers::success_message(&plan.operation, &outcome));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", helpers::failure_message(&plan.operation, &e).red());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn load_config(args: &Cli) -> Result<Config> {
    // An explicit path must exist; the default one is optional
    let mut config = if !args.config.is_empty() {
        Config::load_from_file(&args.config)?
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        Config::load_from_file(DEFAULT_CONFIG_PATH)?
    } else {
        debug!("No configuration file, using defaults");
        Config::default()
    };

    // Override server address from CLI if provided
    if let Some(host) = &args.host {
        config.client.host = host.clone();
    }
    if let Some(port) = args.port {
        config.client.port = port;
    }
    config.validate()?;

    debug!("Using configuration: {:?}", config);
    Ok(config)
}
