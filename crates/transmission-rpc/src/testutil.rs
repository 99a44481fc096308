//! Shared test utilities and fixtures.

use std::time::Duration;

use mockall::Sequence;
use serde_json::{Value, json};

use crate::config::{ClientConfig, Credentials, Endpoint};
use crate::session::SESSION_ID_HEADER;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, MockTransport};

pub(crate) const TEST_URL: &str = "http://127.0.0.1:9091/transmission/rpc";

pub(crate) fn test_config() -> ClientConfig {
    ClientConfig::new(Endpoint::parse(TEST_URL).unwrap()).with_timeout(Duration::from_secs(5))
}

pub(crate) fn test_config_with_credentials(username: &str, password: &str) -> ClientConfig {
    let endpoint = Endpoint::parse(TEST_URL)
        .unwrap()
        .with_credentials(Credentials::from_parts(
            Some(username.into()),
            Some(password.into()),
        ));
    ClientConfig::new(endpoint)
}

/// The 409 challenge carrying `token`.
pub(crate) fn conflict(token: &str) -> HttpResponse {
    HttpResponse::new(409)
        .with_header(SESSION_ID_HEADER, token)
        .with_body("<h1>409: Conflict</h1>")
}

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::new(401).with_body("<h1>401: Unauthorized</h1>")
}

pub(crate) fn ok_json(value: Value) -> HttpResponse {
    HttpResponse::new(200)
        .with_header("Content-Type", "application/json")
        .with_body(serde_json::to_vec(&value).unwrap())
}

pub(crate) fn success(arguments: Value) -> HttpResponse {
    ok_json(json!({"result": "success", "arguments": arguments}))
}

pub(crate) fn is_probe(request: &HttpRequest) -> bool {
    request.method == HttpMethod::Get && request.body.is_none()
}

pub(crate) fn is_post_with_token(request: &HttpRequest, token: &str) -> bool {
    request.method == HttpMethod::Post && request.header(SESSION_ID_HEADER) == Some(token)
}

/// Decodes the JSON body of a POST.
pub(crate) fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap()
}

/// Whether `request` is a POST of `method`.
pub(crate) fn is_call(request: &HttpRequest, method: &str) -> bool {
    request.method == HttpMethod::Post && body_json(request)["method"] == method
}

/// Expects the probe answered with `token`.
pub(crate) fn expect_probe(mock: &mut MockTransport, seq: &mut Sequence, token: &'static str) {
    mock.expect_send()
        .times(1)
        .in_sequence(seq)
        .withf(is_probe)
        .returning(move |_| Ok(conflict(token)));
}

/// Expects the handshake performed by `TransmissionClient::with_transport`:
/// the probe followed by `session-get` reporting `rpc_version`.
pub(crate) fn expect_handshake(
    mock: &mut MockTransport,
    seq: &mut Sequence,
    token: &'static str,
    rpc_version: i64,
) {
    expect_probe(mock, seq, token);
    mock.expect_send()
        .times(1)
        .in_sequence(seq)
        .withf(move |request| {
            is_post_with_token(request, token) && is_call(request, "session-get")
        })
        .returning(move |_| Ok(success(json!({"rpc-version": rpc_version, "version": "4.0.6"}))));
}
