//! Composite issue-command orchestration: start, send-and-collect, stop.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{TsoError, TsoResult};
use crate::rest::ZosmfRestClient;
use crate::tso::send::{SendResult, send_data_to_address_space_collect};
use crate::tso::start::{StartParameters, StartStopResult, start};
use crate::tso::stop::stop;
use crate::tso::validation::{self, NO_ACCOUNT_NUMBER, NO_COMMAND};

/// Parameters for [`issue_command_with`].
#[derive(Debug, Clone, Default)]
pub struct IssueParameters {
    /// Account number for the address-space start.
    pub account_number: String,
    /// Command text to issue.
    pub command: String,
    /// Optional address-space configuration; defaults are substituted for
    /// unset fields.
    pub start_parameters: Option<StartParameters>,
    /// Best-effort stop of the address space when the send/collect step
    /// fails.
    ///
    /// `false` reproduces the historical behavior: a send failure propagates
    /// without a stop call, leaving the remote address space running until
    /// it times out server-side. `true` attempts the stop before
    /// propagating; a failure of that cleanup stop is logged and discarded.
    pub cleanup_on_failure: bool,
}

/// Aggregate result of the issue-command flow.
#[derive(Debug, Clone, Serialize)]
pub struct IssueResult {
    /// Overall success flag.
    pub success: bool,
    /// Result of the start step, including any output drained at startup.
    pub start: StartStopResult,
    /// Result of the send-and-collect step.
    pub send: SendResult,
    /// Result of the stop step.
    pub stop: StartStopResult,
    /// The collected command output, one line per message.
    pub command_response: String,
}

/// Issue one TSO command in a fresh address space: start, send-and-collect,
/// stop, aggregate. Equivalent to [`issue_command_with`] without cleanup on
/// send failure.
pub async fn issue_command(
    client: &ZosmfRestClient,
    account_number: &str,
    command: &str,
    start_parameters: Option<&StartParameters>,
) -> TsoResult<IssueResult> {
    issue_command_with(
        client,
        &IssueParameters {
            account_number: account_number.to_string(),
            command: command.to_string(),
            start_parameters: start_parameters.cloned(),
            cleanup_on_failure: false,
        },
    )
    .await
}

/// Issue one TSO command with explicit [`IssueParameters`].
///
/// Flow: start → send-and-collect → stop → aggregate.
///
/// * A failed start (structured `success: false`) becomes a
///   [`TsoError::StartFailed`] whose `detail` carries the server's failure
///   text; no stop is attempted since no servlet key exists.
/// * The stop runs after a successful send regardless of what the send
///   collected, so a completed session never leaks its address space.
/// * If the send itself fails and `cleanup_on_failure` is unset, the error
///   propagates without a stop call (the address space leaks until the
///   server times it out).
pub async fn issue_command_with(
    client: &ZosmfRestClient,
    parameters: &IssueParameters,
) -> TsoResult<IssueResult> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(&parameters.account_number, NO_ACCOUNT_NUMBER)?;
    validation::validate_not_empty(&parameters.command, NO_COMMAND)?;

    let start_result = start(
        client,
        &parameters.account_number,
        parameters.start_parameters.as_ref(),
    )
    .await?;
    if !start_result.success {
        return Err(TsoError::StartFailed {
            detail: start_result.failure.unwrap_or_default(),
        });
    }
    // start only reports success with a servlet key present.
    let servlet_key = start_result.servlet_key.clone().ok_or_else(|| {
        TsoError::MalformedResponse("successful start without a servlet key".to_string())
    })?;

    debug!(servlet_key, command = %parameters.command, "issuing TSO command");
    let send_result =
        match send_data_to_address_space_collect(client, &servlet_key, &parameters.command).await {
            Ok(result) => result,
            Err(err) => {
                if parameters.cleanup_on_failure {
                    if let Err(stop_err) = stop(client, &servlet_key).await {
                        warn!(servlet_key, error = %stop_err, "cleanup stop failed");
                    }
                }
                return Err(err);
            }
        };

    let stop_result = stop(client, &servlet_key).await?;

    Ok(IssueResult {
        success: true,
        command_response: send_result.command_response.clone(),
        start: start_result,
        send: send_result,
        stop: stop_result,
    })
}
