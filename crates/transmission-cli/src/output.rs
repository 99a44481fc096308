//! Rendering of RPC answers for the terminal.

use std::fmt::Write;

use transmission_rpc::{RpcResponse, TorrentSummary};

use crate::cli::CliError;

/// Renders torrents as a table, one row per torrent in daemon order.
pub(crate) fn torrent_table(
    torrents: &[TorrentSummary],
    status_label: impl Fn(i64) -> &'static str,
) -> String {
    let mut table = format!("{:>5}  {:>6}  {:<12}  {}\n", "ID", "Done", "Status", "Name");
    for torrent in torrents {
        let done = format!("{:.0}%", torrent.percent_done * 100.0);
        // Writing into a String cannot fail.
        let _ = writeln!(
            table,
            "{:>5}  {:>6}  {:<12}  {}",
            torrent.id,
            done,
            status_label(torrent.status),
            torrent.name
        );
    }
    table
}

/// Pretty-prints the whole response, `result` included.
pub(crate) fn pretty_json(response: &RpcResponse) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(response.as_value())?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use transmission_rpc::status_label;

    use super::*;

    fn summary(id: i64, name: &str, status: i64, percent_done: f64) -> TorrentSummary {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "status": status,
            "doneDate": 0,
            "haveValid": 0,
            "totalSize": 0,
            "percentDone": percent_done,
        }))
        .unwrap()
    }

    #[test]
    fn table_uses_status_labels_of_the_rpc_version() {
        let torrents = [summary(1, "debian.iso", 4, 0.5), summary(2, "arch.iso", 6, 1.0)];

        let table = torrent_table(&torrents, |status| status_label(17, status));
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Status"));
        assert!(lines[1].contains("Downloading") && lines[1].contains("50%"));
        assert!(lines[1].ends_with("debian.iso"));
        assert!(lines[2].contains("Seeding") && lines[2].contains("100%"));
    }

    #[test]
    fn table_with_legacy_codes() {
        let torrents = [summary(3, "legacy", 4, 0.0)];
        let table = torrent_table(&torrents, |status| status_label(13, status));
        assert!(table.lines().nth(1).unwrap().contains("Downloading"));

        let torrents = [summary(3, "legacy", 6, 0.0)];
        let table = torrent_table(&torrents, |status| status_label(13, status));
        assert!(table.lines().nth(1).unwrap().contains("Unknown"));
    }

    #[test]
    fn empty_list_prints_the_header_only() {
        assert_eq!(torrent_table(&[], |_| "Unknown").lines().count(), 1);
    }

    #[test]
    fn pretty_json_keeps_the_result() {
        let response = RpcResponse::from(json!({"result": "success", "arguments": {"a": 1}}));
        let rendered = pretty_json(&response).unwrap();
        assert!(rendered.contains("\"result\": \"success\""));
        assert!(rendered.contains('\n'));
    }
}
