//! Send data to a running address space and collect its output.

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use zosmf_protocol::constants::{DONT_READ_REPLY, SEND_VERSION, TSO_RESOURCE};
use zosmf_protocol::{TsoData, TsoResponse};

use crate::error::TsoResult;
use crate::rest::ZosmfRestClient;
use crate::tso::validation::{self, NO_DATA, NO_SERVLET_KEY};

/// Accumulator built by the collection loop: every raw response seen, in
/// arrival order, plus the concatenated message text.
#[derive(Debug, Clone, Serialize)]
pub struct CollectedResponses {
    /// One raw response per poll, seeded with the initial response.
    pub responses: Vec<TsoResponse>,
    /// All `TSO MESSAGE` text seen so far, one line per message. Prompts are
    /// never concatenated; they only serve as the stop signal.
    pub messages: String,
}

/// Scan one response's `tsoData` entries, appending message text to the
/// accumulator. Returns `true` once a terminal prompt is seen.
///
/// A prompt only terminates after at least one message has been accumulated;
/// a prompt arriving before any real output is treated as spurious and the
/// caller keeps polling. Entries after a terminal prompt in the same batch
/// are still scanned, so a trailing message is not lost.
fn scan_batch(messages: &mut String, response: &TsoResponse) -> bool {
    let mut done = false;
    if let Some(entries) = &response.tso_data {
        for entry in entries {
            match entry {
                TsoData::Message(m) => {
                    if let Some(data) = &m.data {
                        messages.push_str(data);
                        messages.push('\n');
                    }
                }
                TsoData::Prompt(_) => {
                    if !messages.is_empty() {
                        done = true;
                    }
                    // Spurious prompt before any output; keep polling.
                }
            }
        }
    }
    done
}

/// Poll the address space until a genuine terminal prompt is seen.
///
/// The loop is seeded with `initial` and issues a GET against the servlet
/// key for each further batch of queued output, validating every polled
/// response for an embedded service error.
///
/// There is deliberately no iteration cap or wall-clock timeout on this
/// path; the per-request timeout on the session is the only upper bound on
/// each poll. A server that never produces a terminal prompt after data
/// will keep this loop polling. The app-communication variant
/// ([`crate::tso::receive_app`]) is the timeout-bounded one.
pub async fn collect_responses(
    client: &ZosmfRestClient,
    servlet_key: &str,
    initial: TsoResponse,
) -> TsoResult<CollectedResponses> {
    let mut collected = CollectedResponses {
        responses: vec![initial],
        messages: String::new(),
    };

    loop {
        // The newest response is always the one to scan.
        let current = collected
            .responses
            .last()
            .cloned()
            .unwrap_or_default();
        if scan_batch(&mut collected.messages, &current) {
            break;
        }

        debug!(servlet_key, polls = collected.responses.len(), "polling for queued output");
        let resource = format!("{TSO_RESOURCE}/{servlet_key}");
        let next = client.get_expect_json::<TsoResponse>(&resource).await?;
        validation::validate_service_error(&next)?;
        collected.responses.push(next);
    }

    Ok(collected)
}

/// Result of sending data to an address space and collecting the output.
#[derive(Debug, Clone, Serialize)]
pub struct SendResult {
    /// Always `true` when the call returns; failures surface as errors.
    pub success: bool,
    /// Every raw response seen, in arrival order.
    pub responses: Vec<TsoResponse>,
    /// Concatenated message text, one line per message.
    pub command_response: String,
}

/// Send `data` to the address space identified by `servlet_key` and collect
/// responses until the terminal prompt.
///
/// A response with an embedded service error is surfaced as a
/// [`crate::TsoError::Service`] error (contrast with [`crate::tso::start`]).
pub async fn send_data_to_address_space_collect(
    client: &ZosmfRestClient,
    servlet_key: &str,
    data: &str,
) -> TsoResult<SendResult> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(servlet_key, NO_SERVLET_KEY)?;
    validation::validate_not_empty(data, NO_DATA)?;

    let resource = format!("{TSO_RESOURCE}/{servlet_key}{DONT_READ_REPLY}");
    let body = json!({ "TSO RESPONSE": { "VERSION": SEND_VERSION, "DATA": data } });
    debug!(servlet_key, "sending data to TSO address space");
    let response = client
        .put_expect_json::<TsoResponse>(&resource, Some(&body))
        .await?;
    validation::validate_service_error(&response)?;

    let collected = collect_responses(client, servlet_key, response).await?;
    Ok(SendResult {
        success: true,
        responses: collected.responses,
        command_response: collected.messages,
    })
}
