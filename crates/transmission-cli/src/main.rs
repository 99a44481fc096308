//! # transmission-ctl
//!
//! Command-line front-end for the Transmission RPC interface.
//!
//! ## Usage
//!
//! ```sh,ignore
//! transmission-ctl --url http://localhost:9091/transmission/rpc list
//! transmission-ctl add 'magnet:?xt=urn:btih:...' --download-dir /srv/torrents
//! transmission-ctl set 1 2 --field uploadLimit=100 --field uploadLimited=true
//! ```
//!
//! Global options may also come from `TRANSMISSION_*` environment variables
//! or a `.env` file.

use std::{fs, path::Path};

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use transmission_rpc::TransmissionClient;

use crate::cli::{Cli, CliError, Command};

mod cli;
mod output;

/// Initializes the tracing subscriber. Logs go to stderr so that stdout only
/// carries command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the raw contents of a `.torrent` file.
fn read_metainfo(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Runs one subcommand against the daemon and prints its output.
async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config()?;
    let client = TransmissionClient::connect(config).await?;
    info!("Connected, RPC version {}", client.rpc_version());

    let response = match cli.command {
        Command::List => {
            let torrents = client.torrents().await?;
            print!(
                "{}",
                output::torrent_table(&torrents, |status| client.status_label(status))
            );
            return Ok(());
        }
        Command::Get { id } => client.get_torrent(id).await?,
        Command::Start(args) => client.start_torrents(args.ids).await?,
        Command::Stop(args) => client.stop_torrents(args.ids).await?,
        Command::Verify(args) => client.verify_torrents(args.ids).await?,
        Command::Reannounce(args) => client.reannounce_torrents(args.ids).await?,
        Command::Set { ids, fields } => {
            client
                .set_torrents(ids.ids, fields.into_arguments())
                .await?
        }
        Command::Add { source, options } => {
            client
                .add_file(&source, options.download_dir.as_deref(), options.extra())
                .await?
        }
        Command::AddMetainfo { path, options } => {
            let metainfo = read_metainfo(&path)?;
            debug!("Read {} bytes from {}", metainfo.len(), path.display());
            client
                .add_metainfo(&metainfo, options.download_dir.as_deref(), options.extra())
                .await?
        }
        Command::Remove { ids, delete } => client.remove_torrents(ids.ids, delete).await?,
        Command::Move {
            ids,
            location,
            move_data,
        } => client.move_torrents(ids.ids, &location, move_data).await?,
        Command::Rename { id, path, name } => client.rename_torrent(id, &path, &name).await?,
        Command::Session => client.session_get().await?,
        Command::SessionSet { fields } => client.session_set(fields.into_arguments()).await?,
        Command::Stats => client.session_stats().await?,
    };

    if !response.is_success() {
        warn!("Daemon answered {:?}", response.result());
    }
    println!("{}", output::pretty_json(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    debug!("Running {:?}", cli.command);
    run(cli).await?;

    Ok(())
}
