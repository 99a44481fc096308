//! Transmission RPC client implementation.

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tracing::debug;

use transmission_rpc_types::{
    Arguments, Ids, ProtocolError, RpcError, RpcResponse, SessionStats, TorrentId, TorrentList,
    TorrentSummary, status_label,
};

use crate::config::ClientConfig;
use crate::session::RpcSession;
use crate::transport::{ReqwestTransport, Transport};


/// Fields requested for a single torrent.
pub const TORRENT_FIELDS: [&str; 6] = ["id", "name", "status", "doneDate", "haveValid", "totalSize"];

/// Fields requested when listing all torrents.
pub const LIST_FIELDS: [&str; 9] = [
    "id",
    "name",
    "status",
    "doneDate",
    "haveValid",
    "totalSize",
    "percentDone",
    "peersConnected",
    "eta",
];

/// TransmissionClient talks to a Transmission daemon over its RPC interface.
pub struct TransmissionClient<T: Transport = ReqwestTransport> {
    session: RpcSession<T>,
    rpc_version: i64,
}

impl<T: Transport> fmt::Debug for TransmissionClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmissionClient")
            .field("session", &self.session)
            .field("rpc_version", &self.rpc_version)
            .finish()
    }
}

impl TransmissionClient {
    /// Create a new TransmissionClient using the default HTTP transport.
    ///
    /// This method is async as the session id and the daemon's RPC version are
    /// negotiated on creation.
    pub async fn connect(config: ClientConfig) -> Result<Self, RpcError> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(transport, config).await
    }
}

impl<T: Transport> TransmissionClient<T> {
    /// Create a TransmissionClient over a custom transport.
    pub async fn with_transport(transport: T, config: ClientConfig) -> Result<Self, RpcError> {
        debug!("Connecting to Transmission RPC at {}", config.endpoint.url());
        let session = RpcSession::connect(transport, config).await?;

        let info = session.call("session-get", Arguments::new()).await?;
        let rpc_version = info
            .argument("rpc-version")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                ProtocolError::MalformedResponse("session-get did not report rpc-version".into())
            })?;

        debug!("Connected to Transmission Daemon, RPC version {rpc_version}");
        Ok(Self {
            session,
            rpc_version,
        })
    }

    /// The RPC version reported by the daemon when the client connected.
    pub fn rpc_version(&self) -> i64 {
        self.rpc_version
    }

    /// Human-readable label for a torrent status code.
    pub fn status_label(&self, status: i64) -> &'static str {
        status_label(self.rpc_version, status)
    }

    /// The underlying session, for RPC methods without a dedicated wrapper.
    pub fn session(&self) -> &RpcSession<T> {
        &self.session
    }

    /// Start torrents.
    pub async fn start_torrents(&self, ids: impl Into<Ids>) -> Result<RpcResponse, RpcError> {
        self.call_with_ids("torrent-start", ids).await
    }

    /// Stop torrents.
    pub async fn stop_torrents(&self, ids: impl Into<Ids>) -> Result<RpcResponse, RpcError> {
        self.call_with_ids("torrent-stop", ids).await
    }

    /// Verify the local data of torrents.
    pub async fn verify_torrents(&self, ids: impl Into<Ids>) -> Result<RpcResponse, RpcError> {
        self.call_with_ids("torrent-verify", ids).await
    }

    /// Ask the trackers of torrents for more peers.
    pub async fn reannounce_torrents(&self, ids: impl Into<Ids>) -> Result<RpcResponse, RpcError> {
        self.call_with_ids("torrent-reannounce", ids).await
    }

    /// Set arbitrary torrent fields (`torrent-set`), e.g. `uploadLimit`.
    ///
    /// An `ids` entry in `fields` is replaced by `ids`.
    pub async fn set_torrents(
        &self,
        ids: impl Into<Ids>,
        mut fields: Arguments,
    ) -> Result<RpcResponse, RpcError> {
        let ids = ids_value(ids)?;
        debug!("Setting fields {:?} on torrents {ids}", fields.keys().collect::<Vec<_>>());
        fields.insert("ids".into(), ids);
        self.session.call("torrent-set", fields).await
    }

    /// Get one torrent with the fields in [`TORRENT_FIELDS`].
    pub async fn get_torrent(&self, id: impl Into<TorrentId>) -> Result<RpcResponse, RpcError> {
        let id = id.into();
        debug!("Getting torrent {id}");
        let mut arguments = Arguments::new();
        arguments.insert("fields".into(), json!(TORRENT_FIELDS));
        arguments.insert("ids".into(), serde_json::to_value(vec![id])?);
        self.session.call("torrent-get", arguments).await
    }

    /// List all torrents with the fields in [`LIST_FIELDS`].
    pub async fn list_torrents(&self) -> Result<RpcResponse, RpcError> {
        debug!("Listing torrents");
        let mut arguments = Arguments::new();
        arguments.insert("fields".into(), json!(LIST_FIELDS));
        self.session.call("torrent-get", arguments).await
    }

    /// Typed variant of [`TransmissionClient::list_torrents`].
    pub async fn torrents(&self) -> Result<Vec<TorrentSummary>, RpcError> {
        let list: TorrentList = self.list_torrents().await?.decode_arguments()?;
        debug!("Listed {} torrents", list.torrents.len());
        Ok(list.torrents)
    }

    /// Add a torrent by local `.torrent` path, URL or magnet link.
    ///
    /// `extra` carries further `torrent-add` arguments such as `paused`.
    pub async fn add_file(
        &self,
        filename: &str,
        download_dir: Option<&str>,
        mut extra: Arguments,
    ) -> Result<RpcResponse, RpcError> {
        debug!("Adding torrent from {filename}");
        if let Some(dir) = download_dir {
            extra.insert("download-dir".into(), dir.into());
        }
        extra.insert("filename".into(), filename.into());
        self.session.call("torrent-add", extra).await
    }

    /// Add a torrent from the raw contents of a `.torrent` file.
    pub async fn add_metainfo(
        &self,
        metainfo: &[u8],
        download_dir: Option<&str>,
        mut extra: Arguments,
    ) -> Result<RpcResponse, RpcError> {
        debug!("Adding torrent from {} bytes of metainfo", metainfo.len());
        if let Some(dir) = download_dir {
            extra.insert("download-dir".into(), dir.into());
        }
        extra.insert("metainfo".into(), STANDARD.encode(metainfo).into());
        self.session.call("torrent-add", extra).await
    }

    /// Remove torrents. If `delete_local_data` is true, the downloaded data is deleted too.
    pub async fn remove_torrents(
        &self,
        ids: impl Into<Ids>,
        delete_local_data: bool,
    ) -> Result<RpcResponse, RpcError> {
        let ids = ids_value(ids)?;
        debug!("Removing torrents {ids}, delete_local_data={delete_local_data}");
        let mut arguments = Arguments::new();
        arguments.insert("ids".into(), ids);
        arguments.insert("delete-local-data".into(), delete_local_data.into());
        self.session.call("torrent-remove", arguments).await
    }

    /// Change the download location of torrents. With `move_existing` the
    /// daemon moves the data, otherwise it looks for it at `location`.
    pub async fn move_torrents(
        &self,
        ids: impl Into<Ids>,
        location: &str,
        move_existing: bool,
    ) -> Result<RpcResponse, RpcError> {
        let ids = ids_value(ids)?;
        debug!("Moving torrents {ids} to {location}, move={move_existing}");
        let mut arguments = Arguments::new();
        arguments.insert("ids".into(), ids);
        arguments.insert("location".into(), location.into());
        arguments.insert("move".into(), move_existing.into());
        self.session.call("torrent-set-location", arguments).await
    }

    /// Rename a file or directory inside a single torrent.
    pub async fn rename_torrent(
        &self,
        ids: impl Into<Ids>,
        path: &str,
        name: &str,
    ) -> Result<RpcResponse, RpcError> {
        let ids = ids.into().normalize();
        if ids.len() != 1 {
            return Err(RpcError::InvalidArgument(
                "Cannot rename more than one torrent at a time".into(),
            ));
        }
        debug!("Renaming {path} to {name} in torrent {}", ids[0]);
        let mut arguments = Arguments::new();
        arguments.insert("ids".into(), serde_json::to_value(ids)?);
        arguments.insert("path".into(), path.into());
        arguments.insert("name".into(), name.into());
        self.session.call("torrent-rename-path", arguments).await
    }

    /// Get the session settings.
    pub async fn session_get(&self) -> Result<RpcResponse, RpcError> {
        self.session.call("session-get", Arguments::new()).await
    }

    /// Change session settings, e.g. `download-queue-size`.
    pub async fn session_set(&self, arguments: Arguments) -> Result<RpcResponse, RpcError> {
        debug!("Setting session fields {:?}", arguments.keys().collect::<Vec<_>>());
        self.session.call("session-set", arguments).await
    }

    /// Get session statistics.
    pub async fn session_stats(&self) -> Result<RpcResponse, RpcError> {
        self.session.call("session-stats", Arguments::new()).await
    }

    /// Typed variant of [`TransmissionClient::session_stats`].
    pub async fn stats(&self) -> Result<SessionStats, RpcError> {
        let stats: SessionStats = self.session_stats().await?.decode_arguments()?;
        debug!("Session statistics: {stats:?}");
        Ok(stats)
    }

    async fn call_with_ids(
        &self,
        method: &str,
        ids: impl Into<Ids>,
    ) -> Result<RpcResponse, RpcError> {
        let ids = ids_value(ids)?;
        debug!("Calling {method} for torrents {ids}");
        let mut arguments = Arguments::new();
        arguments.insert("ids".into(), ids);
        self.session.call(method, arguments).await
    }
}

/// Normalizes `ids` into the JSON list sent as the `ids` argument.
fn ids_value(ids: impl Into<Ids>) -> Result<Value, RpcError> {
    Ok(serde_json::to_value(ids.into().normalize())?)
}
