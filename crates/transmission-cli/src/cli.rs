use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;
use transmission_rpc::{
    Arguments, ClientConfig, Credentials, DEFAULT_RPC_URL, Endpoint, RpcError, TorrentId,
};

/// Errors raised by the command-line front-end.
#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("invalid field {0:?}, expected key=<json>")]
    InvalidField(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(name = "transmission-ctl", version, about, long_about = None)]
pub(crate) struct Cli {
    /// URL of the Transmission RPC endpoint.
    #[arg(long, env = "TRANSMISSION_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// RPC username.
    #[arg(short, long, env = "TRANSMISSION_USERNAME")]
    pub username: Option<String>,

    /// RPC password.
    #[arg(short, long, env = "TRANSMISSION_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(short, long, env = "TRANSMISSION_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Builds the client configuration from the global options.
    pub(crate) fn config(&self) -> Result<ClientConfig, RpcError> {
        let credentials = Credentials::from_parts(self.username.clone(), self.password.clone());
        let endpoint = Endpoint::parse(&self.url)?.with_credentials(credentials);
        Ok(ClientConfig::new(endpoint).with_timeout(Duration::from_secs(self.timeout)))
    }
}

/// One subcommand per client operation.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List all torrents.
    List,

    /// Show a single torrent.
    Get {
        #[arg(value_parser = parse_torrent_id)]
        id: TorrentId,
    },

    /// Start torrents.
    Start(IdsArgs),

    /// Stop torrents.
    Stop(IdsArgs),

    /// Verify the local data of torrents.
    Verify(IdsArgs),

    /// Ask the trackers of torrents for more peers.
    Reannounce(IdsArgs),

    /// Set torrent fields, e.g. `--field uploadLimit=100`.
    Set {
        #[command(flatten)]
        ids: IdsArgs,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Add a torrent by `.torrent` path, URL or magnet link.
    Add {
        source: String,

        #[command(flatten)]
        options: AddArgs,
    },

    /// Add a torrent from a local `.torrent` file, uploading its contents.
    AddMetainfo {
        path: PathBuf,

        #[command(flatten)]
        options: AddArgs,
    },

    /// Remove torrents.
    Remove {
        #[command(flatten)]
        ids: IdsArgs,

        /// Delete the downloaded data too.
        #[arg(long, default_value_t = false)]
        delete: bool,
    },

    /// Change the download location of torrents.
    Move {
        #[command(flatten)]
        ids: IdsArgs,

        /// New download directory.
        #[arg(long)]
        location: String,

        /// Move the data instead of looking for it at the new location.
        #[arg(long = "move", default_value_t = false)]
        move_data: bool,
    },

    /// Rename a file or directory inside a torrent.
    Rename {
        #[arg(value_parser = parse_torrent_id)]
        id: TorrentId,

        /// Path of the file or directory to rename, relative to the torrent.
        #[arg(long)]
        path: String,

        /// New name.
        #[arg(long)]
        name: String,
    },

    /// Show the session settings.
    Session,

    /// Change session settings, e.g. `--field download-queue-size=3`.
    SessionSet {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show session statistics.
    Stats,
}

/// Torrents addressed by a subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct IdsArgs {
    /// Torrent ids or hash strings.
    #[arg(required = true, value_parser = parse_torrent_id)]
    pub ids: Vec<TorrentId>,
}

/// `key=<json>` pairs forwarded as RPC arguments.
#[derive(Debug, Clone, Args)]
pub(crate) struct FieldArgs {
    /// A `key=<json>` pair. Values that are not valid JSON are sent as strings.
    #[arg(long = "field", required = true, value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,
}

impl FieldArgs {
    pub(crate) fn into_arguments(self) -> Arguments {
        self.fields.into_iter().collect()
    }
}

/// Options shared by the `add` subcommands.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct AddArgs {
    /// Directory to download into, instead of the daemon's default.
    #[arg(short, long)]
    pub download_dir: Option<String>,

    /// Add the torrent without starting it.
    #[arg(long, default_value_t = false)]
    pub paused: bool,
}

impl AddArgs {
    /// Extra `torrent-add` arguments.
    pub(crate) fn extra(&self) -> Arguments {
        let mut extra = Arguments::new();
        if self.paused {
            extra.insert("paused".into(), true.into());
        }
        extra
    }
}

/// Numeric ids are torrent ids, anything else is a hash string.
pub(crate) fn parse_torrent_id(value: &str) -> Result<TorrentId, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("torrent id must not be empty".into());
    }
    Ok(match value.parse::<i64>() {
        Ok(id) => TorrentId::Id(id),
        Err(_) => TorrentId::Hash(value.to_string()),
    })
}

pub(crate) fn parse_field(value: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = value
        .split_once('=')
        .ok_or_else(|| CliError::InvalidField(value.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidField(value.to_string()));
    }
    let parsed = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), parsed))
}
