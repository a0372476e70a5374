//! App-to-app address-space communication.
//!
//! A TSO application started in an address space exchanges plain-text
//! messages through `/zosmf/tsoApp/app/<servletKey>/<appKey>`. The receive
//! side is the timeout-bounded variant of the collection loop: it polls
//! until the literal `"READY"` keyword appears in a message (trimmed), the
//! caller-supplied wall-clock timeout elapses, or a transport error occurs
//! (in which case whatever was already collected is returned).

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use zosmf_protocol::constants::{READY_KEYWORD, TSO_APP_RESOURCE};
use zosmf_protocol::{TsoData, TsoResponse};

use crate::error::{TsoError, TsoResult};
use crate::rest::ZosmfRestClient;
use crate::tso::start::{StartParameters, start};
use crate::tso::validation::{
    self, NO_ACCOUNT_NUMBER, NO_APP_KEY, NO_DATA, NO_SERVLET_KEY, NO_STARTUP_COMMAND,
};

/// Parameters for starting a TSO application.
#[derive(Debug, Clone, Default)]
pub struct AppStartParameters {
    /// Application key identifying the app within the address space.
    pub app_key: String,
    /// Startup command executed inside the address space.
    pub startup_command: String,
    /// Existing address-space handle. When unset (together with
    /// `queue_id`), a fresh address space is started first.
    pub servlet_key: Option<String>,
    /// Existing queue identifier.
    pub queue_id: Option<String>,
}

/// Parameters for sending to or receiving from a running TSO application.
#[derive(Debug, Clone)]
pub struct AppCommunicationParameters {
    /// Application key.
    pub app_key: String,
    /// Address-space handle.
    pub servlet_key: String,
    /// Plain-text message to send (ignored by receive).
    pub message: String,
    /// Keep polling until the `"READY"` keyword arrives.
    pub receive_until_ready: bool,
    /// Wall-clock bound on the receive loop, checked before each poll.
    pub timeout: Duration,
}

/// One flattened message from an application response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppMessage {
    /// Message format version, when the entry carried one.
    pub version: Option<String>,
    /// Message text. Empty for prompt entries.
    pub data: String,
}

/// Flattened application response.
#[derive(Debug, Clone, Serialize)]
pub struct AppResponse {
    /// Response format version.
    pub version: Option<String>,
    /// Whether the address space was reused.
    pub reused: bool,
    /// Whether the server-side session timed out.
    pub timeout: bool,
    /// Address-space handle.
    pub servlet_key: Option<String>,
    /// Queue identifier.
    pub queue_id: Option<String>,
    /// Message entries, in arrival order across polls.
    pub data: Vec<AppMessage>,
}

/// Flatten a raw response into an [`AppResponse`], falling back to `appData`
/// when no `tsoData` is present.
fn flatten_response(
    response: TsoResponse,
    servlet_key: Option<String>,
    queue_id: Option<String>,
) -> AppResponse {
    let data = match response.tso_data {
        Some(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                TsoData::Message(m) => AppMessage {
                    version: m.version,
                    data: m.data.unwrap_or_default(),
                },
                TsoData::Prompt(p) => AppMessage {
                    version: p.version,
                    data: String::new(),
                },
            })
            .collect(),
        None => response
            .app_data
            .map(|raw| {
                vec![AppMessage {
                    version: None,
                    data: raw,
                }]
            })
            .unwrap_or_default(),
    };
    AppResponse {
        version: response.ver,
        reused: response.reused,
        timeout: response.timeout,
        servlet_key,
        queue_id,
        data,
    }
}

fn app_resource(servlet_key: &str, app_key: &str) -> String {
    format!("{TSO_APP_RESOURCE}/{servlet_key}/{app_key}")
}

/// Start a TSO application, creating a fresh address space first when no
/// servlet key and queue ID are supplied.
pub async fn start_app(
    client: &ZosmfRestClient,
    account_number: &str,
    parameters: &AppStartParameters,
    start_parameters: Option<&StartParameters>,
) -> TsoResult<AppResponse> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(account_number, NO_ACCOUNT_NUMBER)?;
    validation::validate_not_empty(&parameters.app_key, NO_APP_KEY)?;
    validation::validate_not_empty(&parameters.startup_command, NO_STARTUP_COMMAND)?;

    let (servlet_key, queue_id) = match (&parameters.servlet_key, &parameters.queue_id) {
        (Some(servlet_key), Some(queue_id)) => (servlet_key.clone(), queue_id.clone()),
        _ => {
            // Address space is not known and must be created first.
            let started = start(client, account_number, start_parameters).await?;
            if !started.success {
                return Err(TsoError::StartFailed {
                    detail: started.failure.unwrap_or_default(),
                });
            }
            let servlet_key = started.servlet_key.ok_or_else(|| {
                TsoError::MalformedResponse("successful start without a servlet key".to_string())
            })?;
            let queue_id = started.response.queue_id.clone().ok_or_else(|| {
                TsoError::MalformedResponse("start response carries no queue ID".to_string())
            })?;
            (servlet_key, queue_id)
        }
    };

    let resource = app_resource(&servlet_key, &parameters.app_key);
    let body = json!({
        "startcmd": format!("{} '&1 &2 {}'", parameters.startup_command, queue_id)
    });
    debug!(servlet_key, app_key = %parameters.app_key, "starting TSO application");
    let response = client
        .post_expect_json::<TsoResponse>(&resource, Some(&body))
        .await?;

    Ok(flatten_response(
        response,
        Some(servlet_key),
        Some(queue_id),
    ))
}

/// Send a plain-text message to a running TSO application.
pub async fn send_app(
    client: &ZosmfRestClient,
    parameters: &AppCommunicationParameters,
) -> TsoResult<AppResponse> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(&parameters.servlet_key, NO_SERVLET_KEY)?;
    validation::validate_not_empty(&parameters.app_key, NO_APP_KEY)?;
    validation::validate_not_empty(&parameters.message, NO_DATA)?;

    let resource = app_resource(&parameters.servlet_key, &parameters.app_key);
    debug!(servlet_key = %parameters.servlet_key, "sending message to TSO application");
    let response = client
        .put_text_expect_json::<TsoResponse>(&resource, parameters.message.clone())
        .await?;

    let servlet_key = response.servlet_key.clone();
    let queue_id = response.queue_id.clone();
    Ok(flatten_response(response, servlet_key, queue_id))
}

/// Receive messages from a running TSO application.
///
/// Polls the app resource until a message whose trimmed text equals
/// `"READY"` arrives (when `receive_until_ready` is set), the wall-clock
/// `timeout` elapses, or a transport error occurs. An error after something
/// was already collected returns the partial aggregate instead of failing;
/// an error before anything was collected propagates. A timeout with
/// nothing collected is a [`TsoError::ReceiveTimeout`].
pub async fn receive_app(
    client: &ZosmfRestClient,
    parameters: &AppCommunicationParameters,
) -> TsoResult<AppResponse> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(&parameters.servlet_key, NO_SERVLET_KEY)?;
    validation::validate_not_empty(&parameters.app_key, NO_APP_KEY)?;

    let resource = app_resource(&parameters.servlet_key, &parameters.app_key);
    let started = Instant::now();
    let mut combined: Option<AppResponse> = None;

    loop {
        if started.elapsed() >= parameters.timeout {
            warn!(
                servlet_key = %parameters.servlet_key,
                "timed out waiting for application data"
            );
            break;
        }

        let batch = match client.get_expect_json::<TsoResponse>(&resource).await {
            Ok(response) => {
                let servlet_key = response.servlet_key.clone();
                let queue_id = response.queue_id.clone();
                flatten_response(response, servlet_key, queue_id)
            }
            Err(err) => {
                if let Some(partial) = combined {
                    warn!(error = %err, "returning partial application response");
                    return Ok(partial);
                }
                return Err(err);
            }
        };

        let ready = batch
            .data
            .iter()
            .any(|message| message.data.trim() == READY_KEYWORD);

        match combined.as_mut() {
            Some(aggregate) => aggregate.data.extend(batch.data),
            None => combined = Some(batch),
        }

        if ready || !parameters.receive_until_ready {
            break;
        }
    }

    combined.ok_or(TsoError::ReceiveTimeout {
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zosmf_protocol::{TsoMessage, TsoPrompt};

    #[test]
    fn flattens_tso_data_entries() {
        let response = TsoResponse {
            ver: Some("0100".to_string()),
            tso_data: Some(vec![
                TsoData::Message(TsoMessage {
                    version: Some("0100".to_string()),
                    data: Some("HELLO".to_string()),
                }),
                TsoData::Prompt(TsoPrompt {
                    version: Some("0100".to_string()),
                    hidden: None,
                }),
            ]),
            ..Default::default()
        };
        let flattened = flatten_response(response, Some("KEY1".to_string()), Some("4".to_string()));
        assert_eq!(flattened.servlet_key.as_deref(), Some("KEY1"));
        assert_eq!(flattened.queue_id.as_deref(), Some("4"));
        assert_eq!(
            flattened.data,
            vec![
                AppMessage {
                    version: Some("0100".to_string()),
                    data: "HELLO".to_string()
                },
                AppMessage {
                    version: Some("0100".to_string()),
                    data: String::new()
                },
            ]
        );
    }

    #[test]
    fn falls_back_to_app_data() {
        let response = TsoResponse {
            app_data: Some("RAW PAYLOAD".to_string()),
            ..Default::default()
        };
        let flattened = flatten_response(response, None, None);
        assert_eq!(
            flattened.data,
            vec![AppMessage {
                version: None,
                data: "RAW PAYLOAD".to_string()
            }]
        );
    }

    #[test]
    fn app_resource_path_shape() {
        assert_eq!(
            app_resource("ZOSMFAD-SYS2-55-aaakaaac", "myapp"),
            "/zosmf/tsoApp/app/ZOSMFAD-SYS2-55-aaakaaac/myapp"
        );
    }
}
