//! Ping a TSO address space.

use serde::Serialize;
use tracing::debug;

use zosmf_protocol::TsoResponse;
use zosmf_protocol::constants::TSO_PING_RESOURCE;

use crate::error::TsoResult;
use crate::rest::ZosmfRestClient;
use crate::tso::validation::{self, NO_SERVLET_KEY};

/// Result of pinging an address space.
#[derive(Debug, Clone, Serialize)]
pub struct PingResult {
    /// Whether the address space answered with its servlet key.
    pub success: bool,
    /// The raw response as received.
    pub response: TsoResponse,
    /// The echoed servlet key, on success.
    pub servlet_key: Option<String>,
}

/// Ping the address space identified by `servlet_key`.
///
/// A single round trip, no polling. An embedded service error is surfaced
/// as a [`crate::TsoError::Service`] error.
pub async fn ping(client: &ZosmfRestClient, servlet_key: &str) -> TsoResult<PingResult> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(servlet_key, NO_SERVLET_KEY)?;

    let resource = format!("{TSO_PING_RESOURCE}/{servlet_key}");
    debug!(servlet_key, "pinging TSO address space");
    let response = client
        .put_expect_json::<TsoResponse>(&resource, None)
        .await?;
    validation::validate_service_error(&response)?;

    Ok(PingResult {
        success: response.is_success(),
        servlet_key: response.servlet_key.clone(),
        response,
    })
}
