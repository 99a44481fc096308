use thiserror::Error;

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The endpoint could not be reached (connection refused, DNS failure, reset, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// No response arrived within the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// The daemon answered HTTP 401.
    #[error("invalid credentials")]
    Authentication,

    /// The daemon answered in a way the session protocol does not allow.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Arguments were rejected before anything was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The daemon processed the call but reported a `result` other than `"success"`.
    #[error("server error: {0}")]
    Server(String),
}

/// Violations of the session handshake or of the response envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A 409 challenge arrived without a usable session id header.
    #[error("session id not found")]
    MissingSessionId,

    /// The daemon answered with a status code the protocol does not expect here.
    #[error("unexpected response: HTTP {0}")]
    UnexpectedStatus(u16),

    /// The daemon rejected a freshly negotiated session id.
    #[error("invalid session id")]
    InvalidSessionId,

    /// The response body was not the JSON document we expected.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::MalformedResponse(err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_messages() {
        let err: RpcError = ProtocolError::MissingSessionId.into();
        assert_eq!(err.to_string(), "protocol error: session id not found");

        let err: RpcError = ProtocolError::UnexpectedStatus(500).into();
        assert_eq!(err.to_string(), "protocol error: unexpected response: HTTP 500");
    }

    #[test]
    fn test_json_error_is_malformed_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: RpcError = json_err.into();
        assert!(matches!(
            err,
            RpcError::Protocol(ProtocolError::MalformedResponse(_))
        ));
    }
}
