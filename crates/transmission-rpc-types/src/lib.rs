//! # Transmission RPC Types
//!
//! This crate defines the types shared by the Transmission RPC client: the
//! error taxonomy, the JSON envelope, torrent identifiers, the status label
//! table and typed views of common responses.

mod envelope;
mod error;
mod ids;
mod status;

use serde::Deserialize;

pub use envelope::{Arguments, RESULT_SUCCESS, RpcRequest, RpcResponse};
pub use error::{ProtocolError, RpcError};
pub use ids::{Ids, TorrentId};
pub use status::{SEQUENTIAL_STATUS_RPC_VERSION, TorrentStatus, UNKNOWN_STATUS, status_label};

// The below mirror the `session-stats` and `torrent-get` payloads. Only the
// fields the client requests are modelled; the raw response stays available
// through `RpcResponse`.

/// Session statistics, the `arguments` of `session-stats`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct SessionStats {
    pub active_torrent_count: i64,

    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: StatsDetails,

    #[serde(rename = "current-stats")]
    pub current_stats: StatsDetails,

    pub download_speed: i64,

    pub paused_torrent_count: i64,

    pub torrent_count: i64,

    pub upload_speed: i64,
}

/// Detailed statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,

    pub files_added: i64,

    pub seconds_active: i64,

    pub session_count: i64,

    pub uploaded_bytes: i64,
}

/// One entry of a `torrent-get` answer.
///
/// The single-torrent query asks for fewer fields than the listing, so the
/// listing-only fields default to zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentSummary {
    pub id: i64,

    pub name: String,

    pub status: i64,

    pub done_date: i64,

    pub have_valid: i64,

    pub total_size: i64,

    #[serde(default)]
    pub percent_done: f64,

    #[serde(default)]
    pub peers_connected: i64,

    #[serde(default)]
    pub eta: i64,
}

/// The `arguments` of a `torrent-get` answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TorrentList {
    /// Torrents matching the query, in daemon order.
    pub torrents: Vec<TorrentSummary>,
}
