//! Address-space lifecycle tests against a mock z/OSMF server.
//!
//! Every test drives the real reqwest client against wiremock, so the
//! resource paths, query strings, and request bodies are verified exactly
//! as they go over the wire. Sequenced poll responses rely on mocks being
//! evaluated in mount order, with `up_to_n_times(1)` retiring earlier
//! responses.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zosmf_client::rest::ZosmfRestClient;
use zosmf_client::session::ZosmfSession;
use zosmf_client::tso::{self, StartParameters};
use zosmf_client::TsoError;

const SERVLET_KEY: &str = "ZOSMFAD-SYS2-55-aaakaaac";

fn client_for(server: &MockServer) -> ZosmfRestClient {
    let address = server.address();
    ZosmfRestClient::new(ZosmfSession {
        host: address.ip().to_string(),
        port: address.port(),
        user: Some("usr".to_string()),
        password: Some("password".to_string()),
        secure: false,
        ..Default::default()
    })
    .expect("session with host must build")
}

fn message(text: &str) -> serde_json::Value {
    json!({ "TSO MESSAGE": { "VERSION": "0100", "DATA": text } })
}

fn prompt() -> serde_json::Value {
    json!({ "TSO PROMPT": { "VERSION": "0100", "HIDDEN": "FALSE" } })
}

fn session_response(tso_data: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "servletKey": SERVLET_KEY,
        "queueID": "4",
        "ver": "0100",
        "reused": false,
        "timeout": false,
        "tsoData": tso_data
    })
}

#[tokio::test]
async fn start_substitutes_defaults_and_passes_explicit_values_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zosmf/tsoApp/tso"))
        .and(query_param("acct", "DEFAULT"))
        .and(query_param("proc", "PROC1"))
        .and(query_param("chset", "697"))
        .and(query_param("cpage", "1047"))
        .and(query_param("rows", "24"))
        .and(query_param("cols", "80"))
        .and(query_param("rsize", "4096"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![
            message("ZOSMFAD LOGON IN PROGRESS"),
            prompt(),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let parameters = StartParameters {
        logon_procedure: Some("PROC1".to_string()),
        ..Default::default()
    };
    let result = tso::start(&client, "DEFAULT", Some(&parameters))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.servlet_key.as_deref(), Some(SERVLET_KEY));
    assert_eq!(result.messages, "ZOSMFAD LOGON IN PROGRESS\n");
}

#[tokio::test]
async fn start_failure_is_a_structured_result_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zosmf/tsoApp/tso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ver": "0100",
            "reused": false,
            "timeout": false,
            "msgData": [{
                "messageText": "cannot allocate",
                "messageId": "IZUG1122E"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tso::start(&client, "DEFAULT", None).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.servlet_key, None);
    assert_eq!(result.failure.as_deref(), Some("cannot allocate"));
}

#[tokio::test]
async fn stop_surfaces_service_error_as_an_error() {
    let error_text = format!(
        "IZUG1126E: z/OSMF cannot correlate the request for key \"{SERVLET_KEY}\" \
         with an active z/OS application session."
    );
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY,
            "ver": "0100",
            "reused": false,
            "timeout": false,
            "msgData": [{
                "messageText": error_text,
                "messageId": "IZUG1126E",
                "stackTrace": "Exception error"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tso::stop(&client, SERVLET_KEY).await.unwrap_err();

    assert!(matches!(err, TsoError::Service(_)));
    assert_eq!(err.to_string(), error_text);
}

#[tokio::test]
async fn stop_succeeds_on_clean_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY,
            "ver": "0100",
            "reused": false,
            "timeout": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tso::stop(&client, SERVLET_KEY).await.unwrap();

    assert!(result.success);
    assert_eq!(result.servlet_key.as_deref(), Some(SERVLET_KEY));
}

#[tokio::test]
async fn ping_surfaces_service_error_as_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/ping/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY,
            "ver": "0100",
            "reused": false,
            "timeout": false,
            "msgData": [{
                "messageText": "IZUG1126E: z/OSMF cannot correlate the request for key",
                "messageId": "IZUG1126E"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tso::ping(&client, SERVLET_KEY).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "IZUG1126E: z/OSMF cannot correlate the request for key"
    );
}

#[tokio::test]
async fn ping_succeeds_with_a_single_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/ping/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY,
            "ver": "0100",
            "reused": false,
            "timeout": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tso::ping(&client, SERVLET_KEY).await.unwrap();

    assert!(result.success);
    assert_eq!(result.servlet_key.as_deref(), Some(SERVLET_KEY));
}

#[tokio::test]
async fn poll_loop_ignores_a_premature_prompt_and_keeps_polling() {
    let server = MockServer::start().await;

    // The immediate send response carries only a prompt; with an empty
    // accumulator the loop must not stop there.
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .and(query_param("readReply", "false"))
        .and(body_json(json!({
            "TSO RESPONSE": { "VERSION": "0100", "DATA": "STATUS" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![prompt()])))
        .expect(1)
        .mount(&server)
        .await;

    // First poll yields output but no prompt; second poll yields the
    // genuine terminal prompt.
    Mock::given(method("GET"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(session_response(vec![message("JOB ACTIVE")])),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![prompt()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tso::send_data_to_address_space_collect(&client, SERVLET_KEY, "STATUS")
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.command_response, "JOB ACTIVE\n");
    assert_eq!(result.responses.len(), 3);
}

#[tokio::test]
async fn send_surfaces_service_error_as_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY,
            "ver": "0100",
            "reused": false,
            "timeout": false,
            "msgData": [{ "messageText": "input queue is full" }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tso::send_data_to_address_space_collect(&client, SERVLET_KEY, "STATUS")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "input queue is full");
}

#[tokio::test]
async fn issue_command_runs_start_send_stop_and_aggregates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zosmf/tsoApp/tso"))
        .and(query_param("acct", "DEFAULT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![
            message("LOGON IN PROGRESS"),
            prompt(),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .and(body_json(json!({
            "TSO RESPONSE": { "VERSION": "0100", "DATA": "STATUS" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![
            message("JOB ACTIVE"),
            prompt(),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY,
            "ver": "0100",
            "reused": false,
            "timeout": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tso::issue_command(&client, "DEFAULT", "STATUS", None)
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.command_response, "JOB ACTIVE\n");
    assert_eq!(result.start.servlet_key.as_deref(), Some(SERVLET_KEY));
    assert!(result.stop.success);
}

#[tokio::test]
async fn issue_command_aborts_when_start_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zosmf/tsoApp/tso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ver": "0100",
            "reused": false,
            "timeout": false,
            "msgData": [{ "messageText": "cannot allocate" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tso::issue_command(&client, "DEFAULT", "STATUS", None)
        .await
        .unwrap_err();

    match err {
        TsoError::StartFailed { detail } => assert_eq!(detail, "cannot allocate"),
        other => panic!("expected StartFailed, got {other:?}"),
    }

    // Neither send nor stop was attempted.
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.as_str() == "POST"));
}

#[tokio::test]
async fn issue_command_without_cleanup_leaves_address_space_on_send_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zosmf/tsoApp/tso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![
            message("LOGON IN PROGRESS"),
            prompt(),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY, "ver": "0100", "reused": false, "timeout": false
        })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tso::issue_command(&client, "DEFAULT", "STATUS", None)
        .await
        .unwrap_err();
    assert!(matches!(err, TsoError::Http { status: 500, .. }));
}

#[tokio::test]
async fn issue_command_with_cleanup_stops_the_address_space_on_send_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zosmf/tsoApp/tso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response(vec![
            message("LOGON IN PROGRESS"),
            prompt(),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/zosmf/tsoApp/tso/{SERVLET_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servletKey": SERVLET_KEY, "ver": "0100", "reused": false, "timeout": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let parameters = tso::IssueParameters {
        account_number: "DEFAULT".to_string(),
        command: "STATUS".to_string(),
        start_parameters: None,
        cleanup_on_failure: true,
    };
    let err = tso::issue_command_with(&client, &parameters).await.unwrap_err();
    assert!(matches!(err, TsoError::Http { status: 500, .. }));
}

#[tokio::test]
async fn validation_rejects_missing_inputs_before_any_request() {
    // No mock server: validation must fail before a connection is attempted.
    let client = ZosmfRestClient::new(ZosmfSession {
        host: "host.invalid".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = tso::issue_command(&client, "", "STATUS", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No account number was supplied.");

    let err = tso::issue_command(&client, "DEFAULT", "", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No command text was supplied.");

    let err = tso::stop(&client, "").await.unwrap_err();
    assert_eq!(err.to_string(), "No servlet key was supplied.");

    let err = tso::send_data_to_address_space_collect(&client, "KEY1", "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No data was supplied.");
}
