//! Torrent identifiers as accepted by the `ids` argument.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single torrent reference: the daemon-local numeric id or the info hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Numeric id assigned by the daemon.
    Id(i64),
    /// Hex-encoded info hash.
    Hash(String),
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for TorrentId {
    fn from(id: i32) -> Self {
        Self::Id(id.into())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_string())
    }
}

/// One or many torrent references.
///
/// Operations accept either shape; [`Ids::normalize`] turns it into the list
/// the wire format requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    /// A single id, not wrapped in a list.
    One(TorrentId),
    /// A list of ids.
    Many(Vec<TorrentId>),
}

impl Ids {
    /// Returns the ids as a list; a single id becomes a one-element list.
    pub fn normalize(self) -> Vec<TorrentId> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }
}

impl From<TorrentId> for Ids {
    fn from(id: TorrentId) -> Self {
        Self::One(id)
    }
}

impl From<i64> for Ids {
    fn from(id: i64) -> Self {
        Self::One(id.into())
    }
}

impl From<i32> for Ids {
    fn from(id: i32) -> Self {
        Self::One(id.into())
    }
}

impl From<&str> for Ids {
    fn from(hash: &str) -> Self {
        Self::One(hash.into())
    }
}

impl From<String> for Ids {
    fn from(hash: String) -> Self {
        Self::One(hash.into())
    }
}

impl<T: Into<TorrentId>> From<Vec<T>> for Ids {
    fn from(ids: Vec<T>) -> Self {
        Self::Many(ids.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TorrentId> + Clone> From<&[T]> for Ids {
    fn from(ids: &[T]) -> Self {
        Self::Many(ids.iter().cloned().map(Into::into).collect())
    }
}
