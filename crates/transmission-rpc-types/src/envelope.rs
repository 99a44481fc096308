//! The JSON envelope exchanged with the daemon.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{ProtocolError, RpcError};

/// The `result` value the daemon reports for a call it executed.
pub const RESULT_SUCCESS: &str = "success";

/// Arguments object of an RPC call.
pub type Arguments = Map<String, Value>;

/// A single RPC call: `{"method": ..., "arguments": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// RPC method name, e.g. `torrent-start`.
    pub method: String,
    /// Method arguments; an empty object when the method takes none.
    pub arguments: Arguments,
}

impl RpcRequest {
    /// Builds a request for `method` with the given arguments.
    pub fn new(method: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Serializes the request into the HTTP body.
    pub fn to_body(&self) -> Result<Vec<u8>, RpcError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// The decoded response document.
///
/// The document is kept verbatim; `result` is not checked unless the caller
/// asks for a typed view through [`RpcResponse::decode_arguments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RpcResponse(Value);

impl RpcResponse {
    /// Parses a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RpcError> {
        Ok(Self(serde_json::from_slice(body)?))
    }

    /// The `result` field, if present.
    pub fn result(&self) -> Option<&str> {
        self.0.get("result").and_then(Value::as_str)
    }

    /// Whether the daemon reported `"success"`.
    pub fn is_success(&self) -> bool {
        self.result() == Some(RESULT_SUCCESS)
    }

    /// The `arguments` object, if present.
    pub fn arguments(&self) -> Option<&Arguments> {
        self.0.get("arguments").and_then(Value::as_object)
    }

    /// A single entry of the `arguments` object.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments().and_then(|args| args.get(key))
    }

    /// The whole document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the response and returns the whole document.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Decodes `arguments` into `T`, failing with [`RpcError::Server`] when the
    /// daemon did not report success.
    pub fn decode_arguments<T: DeserializeOwned>(self) -> Result<T, RpcError> {
        if !self.is_success() {
            let result = self.result().unwrap_or("missing result").to_string();
            return Err(RpcError::Server(result));
        }
        let Value::Object(mut document) = self.0 else {
            return Err(ProtocolError::MalformedResponse("response is not an object".into()).into());
        };
        let arguments = document
            .remove("arguments")
            .ok_or_else(|| ProtocolError::MalformedResponse("missing arguments".into()))?;
        Ok(serde_json::from_value(arguments)?)
    }
}

impl From<Value> for RpcResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
