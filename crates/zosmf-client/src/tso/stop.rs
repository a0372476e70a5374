//! Stop a TSO address space.

use tracing::debug;

use zosmf_protocol::TsoResponse;
use zosmf_protocol::constants::TSO_RESOURCE;

use crate::error::TsoResult;
use crate::rest::ZosmfRestClient;
use crate::tso::start::StartStopResult;
use crate::tso::validation::{self, NO_SERVLET_KEY};

/// Stop the address space identified by `servlet_key`.
///
/// A correlation failure (e.g. the address space is already gone) arrives
/// as `msgData` over a 2xx response and is surfaced as a
/// [`crate::TsoError::Service`] error. The servlet key is invalid once this
/// call succeeds.
pub async fn stop(client: &ZosmfRestClient, servlet_key: &str) -> TsoResult<StartStopResult> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(servlet_key, NO_SERVLET_KEY)?;

    let resource = format!("{TSO_RESOURCE}/{servlet_key}");
    debug!(servlet_key, "stopping TSO address space");
    let response = client.delete_expect_json::<TsoResponse>(&resource).await?;
    validation::validate_service_error(&response)?;

    Ok(StartStopResult {
        success: response.is_success(),
        servlet_key: response.servlet_key.clone(),
        response,
        messages: String::new(),
        failure: None,
        collected: Vec::new(),
    })
}
