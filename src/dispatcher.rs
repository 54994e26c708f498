use crate::config::ClientConfig;
use crate::core_cli::CliOperation;
use crate::core_error::{FtpClientError, Result};
use crate::core_url::{is_remote, parse_ftp_url, Credentials, FtpUrl};
use crate::session::{Operation, Outcome, Session};
use log::{error, warn};
use tokio_util::sync::CancellationToken;

/// A validated request: what to run and who to log in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub operation: Operation,
    pub credentials: Credentials,
    /// Set when the URL named its own server.
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Turns a CLI operation and its parameters into a [`Plan`].
///
/// Single-path operations take one `ftp://` URL. `cp`/`mv` take two
/// parameters of which exactly one is a URL; credentials come from it.
pub fn resolve(operation: CliOperation, params: &[String]) -> Result<Plan> {
    match operation {
        CliOperation::Cp | CliOperation::Mv => {
            let [source, destination] = params else {
                return Err(FtpClientError::Argument(format!(
                    "'{}' operations require two arguments.",
                    operation_name(operation)
                )));
            };
            let url = match (is_remote(source), is_remote(destination)) {
                (true, false) => parse_ftp_url(source)?,
                (false, true) => parse_ftp_url(destination)?,
                (true, true) => {
                    return Err(FtpClientError::Argument(
                        "both arguments are remote; one must be a local path".to_string(),
                    ))
                }
                (false, false) => {
                    return Err(FtpClientError::Argument(
                        "neither argument is an ftp:// URL".to_string(),
                    ))
                }
            };
            let (source, destination) = (source.clone(), destination.clone());
            let operation = if operation == CliOperation::Cp {
                Operation::Copy {
                    source,
                    destination,
                }
            } else {
                Operation::Move {
                    source,
                    destination,
                }
            };
            Ok(plan_for(operation, url))
        }
        _ => {
            let [target] = params else {
                return Err(FtpClientError::Argument(format!(
                    "'{}' operation requires exactly one ftp:// URL.",
                    operation_name(operation)
                )));
            };
            let url = parse_ftp_url(target)?;
            let path = url.path.clone();
            let operation = match operation {
                CliOperation::Ls => Operation::List { path: Some(path) },
                CliOperation::Mkdir => Operation::MakeDirectory { path },
                CliOperation::Rmdir => Operation::RemoveDirectory { path },
                _ => Operation::Delete { path },
            };
            Ok(plan_for(operation, url))
        }
    }
}

/// Configuration for this run: a host carried by the URL wins.
pub fn effective_config(config: &ClientConfig, plan: &Plan) -> ClientConfig {
    let mut config = config.clone();
    if let Some(host) = &plan.host {
        config.host = host.clone();
        config.port = plan.port.unwrap_or(crate::constants::DEFAULT_PORT);
    }
    config
}

/// Connects, runs the plan and sends QUIT.
///
/// QUIT is still attempted after a failed operation as long as the control
/// connection is usable. The operation's error wins over a QUIT error.
pub async fn run(config: &ClientConfig, plan: &Plan, cancel: CancellationToken) -> Result<Outcome> {
    let config = effective_config(config, plan);
    let mut session = Session::connect(&config, cancel).await?;

    let result = drive(&mut session, plan).await;
    let send_quit = match &result {
        Ok(_) => true,
        Err(e) => e.control_usable(),
    };

    if send_quit {
        if let Err(e) = session.quit().await {
            warn!("QUIT failed: {}", e);
        }
    } else if let Err(e) = &result {
        error!("Control connection unusable, skipping QUIT: {}", e);
    }

    result
}

async fn drive(session: &mut Session, plan: &Plan) -> Result<Outcome> {
    session.login(&plan.credentials).await?;
    session.negotiate().await?;
    session.execute(&plan.operation).await
}

fn plan_for(operation: Operation, url: FtpUrl) -> Plan {
    Plan {
        operation,
        credentials: url.credentials,
        host: url.host,
        port: url.port,
    }
}

pub fn operation_name(operation: CliOperation) -> &'static str {
    match operation {
        CliOperation::Ls => "ls",
        CliOperation::Mkdir => "mkdir",
        CliOperation::Rmdir => "rmdir",
        CliOperation::Rm => "rm",
        CliOperation::Cp => "cp",
        CliOperation::Mv => "mv",
    }
}
