//! Start a TSO address space.

use serde::{Deserialize, Serialize};
use tracing::debug;

use zosmf_protocol::TsoResponse;
use zosmf_protocol::constants::{
    DEFAULT_CHSET, DEFAULT_COLS, DEFAULT_CPAGE, DEFAULT_PROC, DEFAULT_ROWS, DEFAULT_RSIZE,
    PARM_ACCT, PARM_CHSET, PARM_COLS, PARM_CPAGE, PARM_PROC, PARM_ROWS, PARM_RSIZE, TSO_RESOURCE,
};

use crate::error::{TsoError, TsoResult};
use crate::rest::ZosmfRestClient;
use crate::tso::send::collect_responses;
use crate::tso::validation::{self, NO_ACCOUNT_NUMBER};

/// Optional address-space configuration. Any field left unset is replaced by
/// its documented default when the start request is built.
///
/// The account number always comes from the dedicated `account_number`
/// argument of [`start`], never from this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartParameters {
    /// Logon procedure. Default `IZUFPROC`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logon_procedure: Option<String>,
    /// Character set. Default `697`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<String>,
    /// Code page. Default `1047`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_page: Option<String>,
    /// Screen rows. Default `24`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<String>,
    /// Screen columns. Default `80`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<String>,
    /// Region size. Default `4096`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_size: Option<String>,
}

/// Start parameters with every field resolved, ready for query encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedStartParameters {
    pub(crate) logon_procedure: String,
    pub(crate) character_set: String,
    pub(crate) code_page: String,
    pub(crate) rows: String,
    pub(crate) columns: String,
    pub(crate) region_size: String,
    pub(crate) account: String,
}

/// Merge `parameters` over the default table. Fields explicitly set are
/// preserved verbatim; the account always comes from `account_number`.
pub(crate) fn resolve_start_parameters(
    parameters: Option<&StartParameters>,
    account_number: &str,
) -> ResolvedStartParameters {
    let field = |value: Option<&String>, default: &str| {
        value.cloned().unwrap_or_else(|| default.to_string())
    };
    let p = parameters.cloned().unwrap_or_default();
    ResolvedStartParameters {
        logon_procedure: field(p.logon_procedure.as_ref(), DEFAULT_PROC),
        character_set: field(p.character_set.as_ref(), DEFAULT_CHSET),
        code_page: field(p.code_page.as_ref(), DEFAULT_CPAGE),
        rows: field(p.rows.as_ref(), DEFAULT_ROWS),
        columns: field(p.columns.as_ref(), DEFAULT_COLS),
        region_size: field(p.region_size.as_ref(), DEFAULT_RSIZE),
        account: account_number.to_string(),
    }
}

/// Build the start resource with its query string. Key order is fixed and
/// part of the wire contract: acct, proc, chset, cpage, rows, cols, rsize.
pub(crate) fn resources_query(parameters: &ResolvedStartParameters) -> String {
    format!(
        "{TSO_RESOURCE}?{PARM_ACCT}={}&{PARM_PROC}={}&{PARM_CHSET}={}&{PARM_CPAGE}={}&{PARM_ROWS}={}&{PARM_COLS}={}&{PARM_RSIZE}={}",
        parameters.account,
        parameters.logon_procedure,
        parameters.character_set,
        parameters.code_page,
        parameters.rows,
        parameters.columns,
        parameters.region_size,
    )
}

/// Outward-facing result of the start and stop operations.
#[derive(Debug, Clone, Serialize)]
pub struct StartStopResult {
    /// Whether the operation succeeded (servlet key present on the response).
    pub success: bool,
    /// The raw response as received.
    pub response: TsoResponse,
    /// The address-space handle, on success.
    pub servlet_key: Option<String>,
    /// Concatenated message text drained from the address space, one line
    /// per message. Empty for stop.
    pub messages: String,
    /// Server failure text from the first `msgData` entry, on failure.
    pub failure: Option<String>,
    /// Every raw response seen while draining queued output, in arrival
    /// order (start only).
    pub collected: Vec<TsoResponse>,
}

/// Issue the start POST with fully resolved parameters and return the raw
/// response.
pub(crate) async fn start_common(
    client: &ZosmfRestClient,
    parameters: &ResolvedStartParameters,
) -> TsoResult<TsoResponse> {
    let resource = resources_query(parameters);
    debug!(%resource, "starting TSO address space");
    client.post_expect_json::<TsoResponse>(&resource, None).await
}

/// Start a TSO address space.
///
/// Unset fields of `parameters` are substituted from the default table. On
/// a response carrying a servlet key, immediately drains any queued output
/// via the collection loop before returning.
///
/// A server-side failure (a `msgData` response without a servlet key) is
/// returned as `StartStopResult { success: false, .. }`, **not** as an
/// error; see the crate-level notes on the start/stop asymmetry.
pub async fn start(
    client: &ZosmfRestClient,
    account_number: &str,
    parameters: Option<&StartParameters>,
) -> TsoResult<StartStopResult> {
    validation::validate_session(client.session())?;
    validation::validate_not_empty(account_number, NO_ACCOUNT_NUMBER)?;

    let resolved = resolve_start_parameters(parameters, account_number);
    let response = start_common(client, &resolved).await?;

    match response.servlet_key.clone() {
        Some(servlet_key) => {
            let drained = collect_responses(client, &servlet_key, response.clone()).await?;
            Ok(StartStopResult {
                success: true,
                response,
                servlet_key: Some(servlet_key),
                messages: drained.messages,
                failure: None,
                collected: drained.responses,
            })
        }
        None => {
            let failure = response.first_error().map(|m| m.message_text.clone());
            if failure.is_none() {
                return Err(TsoError::MalformedResponse(
                    "start response carries neither a servlet key nor msgData".to_string(),
                ));
            }
            Ok(StartStopResult {
                success: false,
                response,
                servlet_key: None,
                messages: String::new(),
                failure,
                collected: Vec::new(),
            })
        }
    }
}
