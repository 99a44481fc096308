//! # Transmission RPC client.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc::{ClientConfig, Endpoint, TransmissionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::parse("http://localhost:9091/transmission/rpc")?;
//!     let client = TransmissionClient::connect(ClientConfig::new(endpoint)).await?;
//!     client.add_file("path/to/file.torrent", Some("/path/to/download/dir"), Default::default()).await?;
//!     for torrent in client.torrents().await? {
//!         println!("{} {}", torrent.name, client.status_label(torrent.status));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Every call carries the session id negotiated by [`RpcSession`]; when the
//! daemon rotates it, the session renegotiates and resends the call once.

mod client;
mod config;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use tracing_subscriber as _;

pub use client::{LIST_FIELDS, TORRENT_FIELDS, TransmissionClient};
pub use config::{ClientConfig, Credentials, DEFAULT_RPC_URL, DEFAULT_TIMEOUT, Endpoint};
pub use session::{RpcSession, SESSION_ID_HEADER};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
};
pub use transmission_rpc_types::*;
