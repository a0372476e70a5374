//! Command handlers: adapt parsed arguments into SDK calls and print the
//! result.

use std::time::Duration;

use zosmf_client::rest::ZosmfRestClient;
use zosmf_client::tso::{
    self, AppCommunicationParameters, AppStartParameters,
};

use crate::cli::{AppCommands, Connection, OutputFormat, StartArgs, TsoCommands};
use crate::error::CliResult;
use crate::output;

fn client_for(conn: &Connection) -> CliResult<ZosmfRestClient> {
    Ok(ZosmfRestClient::new(conn.to_session())?)
}

/// Dispatch one `tso` subcommand.
pub async fn run_tso(command: TsoCommands, format: OutputFormat) -> CliResult<()> {
    match command {
        TsoCommands::Issue {
            conn,
            command,
            account,
            start,
        } => issue(&conn, &account, &command, &start, format).await,
        TsoCommands::Start {
            conn,
            account,
            start,
        } => start_address_space(&conn, &account, &start, format).await,
        TsoCommands::Stop { conn, servlet_key } => stop(&conn, &servlet_key, format).await,
        TsoCommands::Ping { conn, servlet_key } => ping(&conn, &servlet_key, format).await,
        TsoCommands::App(app) => run_app(app, format).await,
    }
}

async fn issue(
    conn: &Connection,
    account: &str,
    command: &str,
    start: &StartArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let client = client_for(conn)?;
    let parameters = start.to_parameters();
    let result = tso::issue_command(&client, account, command, parameters.as_ref()).await?;
    output::display(format, &result, result.command_response.trim_end())
}

async fn start_address_space(
    conn: &Connection,
    account: &str,
    start: &StartArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let client = client_for(conn)?;
    let parameters = start.to_parameters();
    let result = tso::start(&client, account, parameters.as_ref()).await?;
    let summary = if result.success {
        format!(
            "TSO address space started: {}",
            result.servlet_key.as_deref().unwrap_or_default()
        )
    } else {
        format!(
            "TSO address space failed to start: {}",
            result.failure.as_deref().unwrap_or_default()
        )
    };
    output::display(format, &result, &summary)
}

async fn stop(conn: &Connection, servlet_key: &str, format: OutputFormat) -> CliResult<()> {
    let client = client_for(conn)?;
    let result = tso::stop(&client, servlet_key).await?;
    let summary = format!("TSO address space stopped: {servlet_key}");
    output::display(format, &result, &summary)
}

async fn ping(conn: &Connection, servlet_key: &str, format: OutputFormat) -> CliResult<()> {
    let client = client_for(conn)?;
    let result = tso::ping(&client, servlet_key).await?;
    let summary = format!("TSO address space is active: {servlet_key}");
    output::display(format, &result, &summary)
}

async fn run_app(command: AppCommands, format: OutputFormat) -> CliResult<()> {
    match command {
        AppCommands::Start {
            conn,
            account,
            app_key,
            startup,
            servlet_key,
            queue_id,
            start,
        } => {
            let client = client_for(&conn)?;
            let parameters = AppStartParameters {
                app_key,
                startup_command: startup,
                servlet_key,
                queue_id,
            };
            let start_parameters = start.to_parameters();
            let response =
                tso::start_app(&client, &account, &parameters, start_parameters.as_ref()).await?;
            let summary = format!(
                "application started in address space {}",
                response.servlet_key.as_deref().unwrap_or_default()
            );
            output::display(format, &response, &summary)
        }
        AppCommands::Send {
            conn,
            app_key,
            servlet_key,
            message,
        } => {
            let client = client_for(&conn)?;
            let parameters = AppCommunicationParameters {
                app_key,
                servlet_key,
                message,
                receive_until_ready: false,
                timeout: Duration::ZERO,
            };
            let response = tso::send_app(&client, &parameters).await?;
            let summary = joined_messages(&response);
            output::display(format, &response, &summary)
        }
        AppCommands::Receive {
            conn,
            app_key,
            servlet_key,
            until_ready,
            timeout,
        } => {
            let client = client_for(&conn)?;
            let parameters = AppCommunicationParameters {
                app_key,
                servlet_key,
                message: String::new(),
                receive_until_ready: until_ready,
                timeout: Duration::from_secs(timeout),
            };
            let response = tso::receive_app(&client, &parameters).await?;
            let summary = joined_messages(&response);
            output::display(format, &response, &summary)
        }
    }
}

fn joined_messages(response: &tso::AppResponse) -> String {
    response
        .data
        .iter()
        .map(|message| message.data.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
