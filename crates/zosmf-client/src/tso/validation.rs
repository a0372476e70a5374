//! Guard-clause checks performed before any network call.
//!
//! All validation is synchronous and local; the only side effect is the
//! returned error. Each guard fails with a fixed canned message, so calling
//! an operation twice with the same invalid input produces the identical
//! error both times.

use zosmf_protocol::TsoResponse;

use crate::error::{TsoError, TsoResult};
use crate::session::ZosmfSession;

/// Canned message: no usable session.
pub const NO_SESSION: &str = "No session was supplied.";
/// Canned message: missing account number.
pub const NO_ACCOUNT_NUMBER: &str = "No account number was supplied.";
/// Canned message: missing servlet key.
pub const NO_SERVLET_KEY: &str = "No servlet key was supplied.";
/// Canned message: missing command text.
pub const NO_COMMAND: &str = "No command text was supplied.";
/// Canned message: missing data to send.
pub const NO_DATA: &str = "No data was supplied.";
/// Canned message: missing application key.
pub const NO_APP_KEY: &str = "No application key was supplied.";
/// Canned message: missing application startup command.
pub const NO_STARTUP_COMMAND: &str = "No application startup command was supplied.";

/// Fail when the session has no host to connect to.
///
/// A `&ZosmfSession` cannot be null in Rust, so the "no session supplied"
/// guard degrades to rejecting a session that cannot identify a server.
pub fn validate_session(session: &ZosmfSession) -> TsoResult<()> {
    if session.host.is_empty() {
        return Err(TsoError::InvalidInput(NO_SESSION));
    }
    Ok(())
}

/// Fail with `message` when `value` is empty.
pub fn validate_not_empty(value: &str, message: &'static str) -> TsoResult<()> {
    if value.is_empty() {
        return Err(TsoError::InvalidInput(message));
    }
    Ok(())
}

/// Convert an embedded service error into a [`TsoError::Service`].
///
/// z/OSMF reports business errors (e.g. "cannot correlate the request") in
/// `msgData` over a 200-status response. Used by stop, ping, send, and the
/// poll loop. Deliberately *not* used by [`crate::tso::start`], which
/// returns a structured failure instead.
pub fn validate_service_error(response: &TsoResponse) -> TsoResult<()> {
    if let Some(message) = response.first_error() {
        return Err(TsoError::Service(message.message_text.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zosmf_protocol::MessageData;

    #[test]
    fn session_without_host_is_rejected() {
        let err = validate_session(&ZosmfSession::default()).unwrap_err();
        assert_eq!(err.to_string(), NO_SESSION);
    }

    #[test]
    fn session_with_host_passes() {
        let session = ZosmfSession {
            host: "host.com".to_string(),
            ..Default::default()
        };
        assert!(validate_session(&session).is_ok());
    }

    #[test]
    fn empty_string_fails_with_supplied_message() {
        let err = validate_not_empty("", NO_ACCOUNT_NUMBER).unwrap_err();
        assert_eq!(err.to_string(), NO_ACCOUNT_NUMBER);
        assert!(validate_not_empty("DEFAULT", NO_ACCOUNT_NUMBER).is_ok());
    }

    #[test]
    fn validation_is_idempotent() {
        let first = validate_not_empty("", NO_COMMAND).unwrap_err();
        let second = validate_not_empty("", NO_COMMAND).unwrap_err();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn service_error_surfaces_message_text_verbatim() {
        let response = TsoResponse {
            servlet_key: Some("KEY1".to_string()),
            msg_data: Some(vec![MessageData {
                message_text: "IZUG1126E: z/OSMF cannot correlate the request".to_string(),
                message_id: Some("IZUG1126E".to_string()),
                stack_trace: None,
            }]),
            ..Default::default()
        };
        let err = validate_service_error(&response).unwrap_err();
        assert_eq!(
            err.to_string(),
            "IZUG1126E: z/OSMF cannot correlate the request"
        );
    }

    #[test]
    fn clean_response_passes_service_error_check() {
        let response = TsoResponse {
            servlet_key: Some("KEY1".to_string()),
            ..Default::default()
        };
        assert!(validate_service_error(&response).is_ok());
    }
}
