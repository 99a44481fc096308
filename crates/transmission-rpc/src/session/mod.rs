//! Session id negotiation and the RPC call protocol.
//!
//! Transmission rejects any call that does not carry the current session id
//! with HTTP 409 and hands out a fresh id in the same response. The session
//! obtains an id when it is created and renegotiates it once per call when
//! the daemon reports it as stale.

use std::fmt;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use transmission_rpc_types::{Arguments, ProtocolError, RpcError, RpcRequest, RpcResponse};

use crate::config::ClientConfig;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};


/// Header carrying the session id in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_CONFLICT: u16 = 409;

/// Opaque session id handed out by the daemon.
#[derive(Clone, PartialEq, Eq)]
struct SessionToken(String);

enum SessionState {
    Uninitialized,
    Authenticated(SessionToken),
}

impl SessionState {
    fn token(&self) -> Option<&SessionToken> {
        match self {
            Self::Uninitialized => None,
            Self::Authenticated(token) => Some(token),
        }
    }
}

/// An authenticated RPC session with a Transmission daemon.
///
/// The session id is only reachable through [`RpcSession::call`]. Calls hold
/// the session lock for the whole exchange, including a renegotiation, so
/// concurrent callers sharing one session are serialised.
pub struct RpcSession<T: Transport = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
    state: Mutex<SessionState>,
}

impl<T: Transport> fmt::Debug for RpcSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcSession")
            .field("config", &self.config)
            .field("session_id", &"...")
            .finish()
    }
}

impl<T: Transport> RpcSession<T> {
    /// Creates a session and negotiates its first session id.
    ///
    /// Fails fast: an unreachable or misbehaving endpoint is reported here
    /// rather than on the first call.
    #[instrument(skip_all, fields(url = %config.endpoint.url()))]
    pub async fn connect(transport: T, config: ClientConfig) -> Result<Self, RpcError> {
        let session = Self {
            transport,
            config,
            state: Mutex::new(SessionState::Uninitialized),
        };
        session.acquire_token().await?;
        debug!("Session established");
        Ok(session)
    }

    /// The configuration this session was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probes the endpoint for a new session id and stores it.
    ///
    /// The previous id is kept if the probe fails.
    pub async fn acquire_token(&self) -> Result<(), RpcError> {
        let mut state = self.state.lock().await;
        *state = SessionState::Authenticated(self.probe().await?);
        Ok(())
    }

    /// Executes `method` with `arguments` and returns the decoded response.
    ///
    /// A 409 answer triggers exactly one renegotiation and resend of the same
    /// body. The `result` field of the response is not inspected.
    #[instrument(skip(self, arguments))]
    pub async fn call(&self, method: &str, arguments: Arguments) -> Result<RpcResponse, RpcError> {
        if method.is_empty() {
            return Err(RpcError::InvalidArgument(
                "RPC method must not be empty".into(),
            ));
        }
        let body = RpcRequest::new(method, arguments).to_body()?;

        let mut state = self.state.lock().await;
        let mut response = self.post(&body, state.token()).await?;
        if response.status == STATUS_CONFLICT {
            warn!("Session id rejected, negotiating a new one");
            *state = SessionState::Authenticated(self.probe().await?);
            response = self.post(&body, state.token()).await?;
            if response.status == STATUS_CONFLICT {
                return Err(ProtocolError::InvalidSessionId.into());
            }
        }
        drop(state);

        match response.status {
            STATUS_UNAUTHORIZED => Err(RpcError::Authentication),
            _ if response.is_success() => {
                let decoded = RpcResponse::from_slice(&response.body)?;
                debug!(result = ?decoded.result(), "RPC call completed");
                Ok(decoded)
            }
            status => Err(ProtocolError::UnexpectedStatus(status).into()),
        }
    }

    /// Sends the session id probe and extracts the id from the 409 challenge.
    async fn probe(&self) -> Result<SessionToken, RpcError> {
        debug!("Requesting session id from {}", self.config.endpoint.url());
        let response = self
            .transport
            .send(self.request(HttpMethod::Get, None, None))
            .await?;

        match response.status {
            STATUS_UNAUTHORIZED => Err(RpcError::Authentication),
            STATUS_CONFLICT => {
                let token = response
                    .header(SESSION_ID_HEADER)
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .ok_or(ProtocolError::MissingSessionId)?;
                debug!("Received new session id");
                Ok(SessionToken(token.to_string()))
            }
            status => Err(ProtocolError::UnexpectedStatus(status).into()),
        }
    }

    async fn post(
        &self,
        body: &[u8],
        token: Option<&SessionToken>,
    ) -> Result<HttpResponse, RpcError> {
        let request = self.request(HttpMethod::Post, token, Some(body.to_vec()));
        Ok(self.transport.send(request).await?)
    }

    fn request(
        &self,
        method: HttpMethod,
        token: Option<&SessionToken>,
        body: Option<Vec<u8>>,
    ) -> HttpRequest {
        let mut headers = vec![("User-Agent".to_string(), self.config.user_agent.clone())];
        if let Some(credentials) = self.config.endpoint.credentials() {
            headers.push(("Authorization".into(), credentials.basic_auth_header()));
        }
        if body.is_some() {
            headers.push(("Content-Type".into(), "application/json".into()));
        }
        if let Some(SessionToken(token)) = token {
            headers.push((SESSION_ID_HEADER.into(), token.clone()));
        }

        HttpRequest {
            method,
            url: self.config.endpoint.url().clone(),
            headers,
            body,
            timeout: self.config.timeout,
        }
    }

    #[cfg(test)]
    pub(crate) async fn current_token(&self) -> Option<String> {
        self.state.lock().await.token().map(|token| token.0.clone())
    }
}
